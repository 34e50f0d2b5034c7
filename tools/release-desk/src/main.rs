//! Release Desk: terminal front-end for allotment releases.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use release_desk::config::Args;
use release_desk::demo::demo_document;
use release_desk::{load_config, ui, App, DeskConfig, TerminalCapture};
use release_session::{AllotmentDirectory, InMemoryReleaseLedger, JsonFileLedger, ReleaseLedger};

/// Ledger plus the directory view of the same store.
type Backend = (Arc<dyn ReleaseLedger>, Arc<dyn AllotmentDirectory>);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_tracing(&config.log_file, &config.log_level)?;
    info!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "Release desk starting"
    );

    let (ledger, directory) = open_backend(&config).await?;
    let capture =
        TerminalCapture::with_keyboard_enhancement(supports_keyboard_enhancement().unwrap_or(false));

    // Create app state
    let app = Arc::new(Mutex::new(App::new(
        config.session.clone(),
        ledger,
        directory,
        capture,
    )));
    app.lock().await.reload_allotments().await;

    // Spawn background refresh task
    if config.refresh_secs > 0 {
        let refresh_app = app.clone();
        let refresh_interval = Duration::from_secs(config.refresh_secs);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(refresh_interval);
            loop {
                interval.tick().await;
                refresh_app.lock().await.refresh_if_idle().await;
            }
        });
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, app.clone()).await;

    // Drop the session hook before handing the terminal back
    app.lock().await.quit();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!("Release desk stopped: {:?}", err);
    }
    info!("Release desk stopped");
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
) -> Result<()> {
    loop {
        // Draw UI
        {
            let app_guard = app.lock().await;
            terminal.draw(|frame| {
                ui::render(frame, &app_guard);
            })?;
        }

        // Poll with a timeout so toasts expire on screen
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.lock().await.handle_key(key).await;
                }
            }
        }

        // Check if we should quit
        if app.lock().await.should_quit() {
            return Ok(());
        }
    }
}

/// Open the JSON ledger, the in-memory demo ledger, or a demo-seeded file.
async fn open_backend(config: &DeskConfig) -> Result<Backend> {
    match &config.ledger {
        Some(path) => {
            let ledger = if path.exists() {
                JsonFileLedger::open(path)
            } else if config.demo {
                JsonFileLedger::create(path, &demo_document())
                    .await
                    .with_context(|| format!("seeding demo ledger at {}", path.display()))?
            } else {
                anyhow::bail!("ledger file not found: {}", path.display());
            };
            info!(path = %path.display(), "Using JSON ledger");
            let ledger = Arc::new(ledger);
            let backend: Backend = (ledger.clone(), ledger);
            Ok(backend)
        }
        None => {
            info!("Using in-memory demo ledger");
            let ledger = Arc::new(InMemoryReleaseLedger::new(demo_document()));
            let backend: Backend = (ledger.clone(), ledger);
            Ok(backend)
        }
    }
}

/// Log to a file with an `EnvFilter`; `RUST_LOG` wins over the configured level.
fn init_tracing(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log filter {level:?}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}
