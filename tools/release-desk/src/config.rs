//! Command-line arguments and resolved desk configuration.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use release_session::config::{DEFAULT_NOTIFICATION_TTL_MS, DEFAULT_PAGE_SIZE};
use release_session::ReleaseSessionConfig;
use serde::{Deserialize, Serialize};

/// Ledger file path, used when `--ledger` is not given.
pub const LEDGER_ENV: &str = "RELEASE_DESK_LEDGER";

/// Log filter, used when `--log-level` is not given.
pub const LOG_ENV: &str = "RELEASE_DESK_LOG";

/// Release Desk: scan/confirm allotment releases
#[derive(Parser, Debug, Clone)]
#[command(name = "release-desk")]
#[command(about = "TUI for releasing allotment shares by barcode scan")]
pub struct Args {
    /// JSON ledger file shared by all desks
    #[arg(short, long)]
    pub ledger: Option<PathBuf>,

    /// Run with built-in demo data. With --ledger, seeds the file if missing
    #[arg(long)]
    pub demo: bool,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, default_value = "release-desk.log")]
    pub log_file: PathBuf,

    /// Log filter, e.g. "info" or "release_session=debug"
    #[arg(long)]
    pub log_level: Option<String>,

    /// How long notifications stay on screen
    #[arg(long, default_value_t = DEFAULT_NOTIFICATION_TTL_MS)]
    pub notification_ttl_ms: u64,

    /// Roster rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Only Enter ends a scan (for scanners that send Tab between fields)
    #[arg(long)]
    pub no_tab_terminator: bool,

    /// Seconds between background roster refreshes
    #[arg(short, long, default_value = "5")]
    pub refresh: u64,
}

/// Everything main needs after argument and environment resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Ledger file, if any.
    pub ledger: Option<PathBuf>,
    /// Demo mode.
    pub demo: bool,
    /// Log destination.
    pub log_file: PathBuf,
    /// Log filter directive.
    pub log_level: String,
    /// Background refresh period; 0 disables it.
    pub refresh_secs: u64,
    /// Engine settings.
    pub session: ReleaseSessionConfig,
}

/// Resolve arguments against `RELEASE_DESK_LEDGER` and `RELEASE_DESK_LOG`.
pub fn load_config(args: &Args) -> Result<DeskConfig> {
    resolve(
        args,
        std::env::var(LEDGER_ENV).ok(),
        std::env::var(LOG_ENV).ok(),
    )
}

fn resolve(args: &Args, env_ledger: Option<String>, env_log: Option<String>) -> Result<DeskConfig> {
    let ledger = args.ledger.clone().or_else(|| {
        env_ledger
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
    });
    if ledger.is_none() && !args.demo {
        bail!("no ledger configured: pass --ledger <file>, set {LEDGER_ENV}, or use --demo");
    }

    let log_level = args
        .log_level
        .clone()
        .or(env_log)
        .unwrap_or_else(|| "info".to_string());

    let session = ReleaseSessionConfig {
        notification_ttl_ms: args.notification_ttl_ms,
        tab_terminates: !args.no_tab_terminator,
        page_size: args.page_size,
    };
    session.validate().context("invalid session settings")?;

    Ok(DeskConfig {
        ledger,
        demo: args.demo,
        log_file: args.log_file.clone(),
        log_level,
        refresh_secs: args.refresh,
        session,
    })
}
