//! # Release Flow Integration Tests
//!
//! Drive two release desks against one JSON ledger file, the way two
//! terminals share a ledger at a distribution site.
//!
//! ## Covered Flows
//!
//! 1. Scan, confirm and see the release persisted for the other desk
//! 2. Both desks confirm the same beneficiary; only one write happens
//! 3. Desks on separate ledger handles release different beneficiaries
//!    at the same time without losing each other's writes
//! 4. Closing a desk while a release is pending leaves the ledger untouched
//! 5. In-kind allotments display quantities and units

use std::sync::Arc;

use release_session::{
    AllotmentId, AllotmentRef, Amount, AssignmentRow, BeneficiaryCode, BeneficiaryId,
    BeneficiaryStatus, ConfirmOutcome, CountingCapture, InputEvent, InputOutcome, JsonFileLedger,
    Key, LedgerDocument, Money, ReleaseLedger, ReleaseSessionApi, ReleaseSessionConfig,
    ReleaseSessionController, ScanOutcome, SessionState,
};
use tempfile::TempDir;

type Desk = ReleaseSessionController<JsonFileLedger, CountingCapture>;

fn cash_allotment() -> AllotmentRef {
    AllotmentRef {
        id: AllotmentId(10),
        project_name: "Educational Assistance".to_string(),
        company: String::new(),
        department: "Mayor's Office".to_string(),
        source_of_fund: "Special Education Fund".to_string(),
        total_budget: Amount::money(Money::from_pesos(6_000)),
    }
}

fn rice_allotment() -> AllotmentRef {
    AllotmentRef {
        id: AllotmentId(11),
        project_name: "Rice Subsidy".to_string(),
        company: String::new(),
        department: "Agriculture".to_string(),
        source_of_fund: String::new(),
        total_budget: Amount::in_kind(1_200, "kg"),
    }
}

fn assignment(allotment: u64, beneficiary: u64, code: &str, last: &str, share: Amount) -> AssignmentRow {
    AssignmentRow {
        allotment_id: AllotmentId(allotment),
        beneficiary_id: BeneficiaryId(beneficiary),
        code: Some(BeneficiaryCode::new(code)),
        first_name: "Juan".to_string(),
        last_name: last.to_string(),
        barangay: "Bagong Silang".to_string(),
        classification: "Student".to_string(),
        status: BeneficiaryStatus::Endorsed,
        share,
        released: false,
        released_at: None,
    }
}

fn seed() -> LedgerDocument {
    let cash = || Amount::money(Money::from_pesos(2_000));
    LedgerDocument {
        allotments: vec![cash_allotment(), rice_allotment()],
        assignments: vec![
            assignment(10, 1, "EDU-0001", "Dela Cruz", cash()),
            assignment(10, 2, "EDU-0002", "Garcia", cash()),
            assignment(10, 3, "EDU-0003", "Mendoza", cash()),
            assignment(11, 1, "RICE-0001", "Dela Cruz", Amount::in_kind(1_200, "kg")),
        ],
    }
}

async fn shared_ledger() -> (TempDir, Arc<JsonFileLedger>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let ledger = JsonFileLedger::create(dir.path().join("ledger.json"), &seed())
        .await
        .expect("seed ledger");
    (dir, Arc::new(ledger))
}

async fn desk(ledger: &Arc<JsonFileLedger>, allotment: AllotmentRef) -> Desk {
    let mut desk = ReleaseSessionController::new(
        ReleaseSessionConfig::for_testing(),
        Arc::clone(ledger),
        CountingCapture::default(),
    );
    desk.open_session(allotment).await.expect("open session");
    desk
}

async fn scan(desk: &mut Desk, code: &str) -> InputOutcome {
    desk.handle_input(InputEvent::Text(code.to_string())).await;
    desk.handle_input(InputEvent::Key(Key::Enter)).await
}

#[tokio::test]
async fn test_release_visible_to_second_desk() {
    // Arrange
    let (_dir, ledger) = shared_ledger().await;
    let mut first = desk(&ledger, cash_allotment()).await;
    let second_ledger = Arc::new(JsonFileLedger::open(ledger.path()));
    let mut second = desk(&second_ledger, cash_allotment()).await;

    // Act
    scan(&mut first, "EDU-0002").await;
    let outcome = first
        .handle_input(InputEvent::Key(Key::Enter))
        .await;

    // Assert
    assert_eq!(
        outcome,
        InputOutcome::Confirmed(ConfirmOutcome::Released(BeneficiaryCode::new("EDU-0002")))
    );
    assert!(ledger
        .is_released(AllotmentId(10), BeneficiaryId(2))
        .await
        .unwrap());

    second.refresh_roster().await.unwrap();
    assert_eq!(second.view().progress_text(), "Released: 1/3");
    assert!(matches!(
        scan(&mut second, "EDU-0002").await,
        InputOutcome::Scanned(ScanOutcome::AlreadyReleased(_))
    ));
    assert_eq!(second.state(), SessionState::Open);
}

#[tokio::test]
async fn test_second_confirm_of_same_code_is_already_recorded() {
    // Arrange: both desks scanned the same code before either confirmed
    let (_dir, ledger) = shared_ledger().await;
    let mut first = desk(&ledger, cash_allotment()).await;
    let mut second = desk(&ledger, cash_allotment()).await;
    scan(&mut first, "EDU-0001").await;
    scan(&mut second, "edu-0001").await;
    assert_eq!(first.state(), SessionState::AwaitingConfirmation);
    assert_eq!(second.state(), SessionState::AwaitingConfirmation);

    // Act
    let winner = first.confirm().await.unwrap();
    let stamp = ledger.load().await.unwrap().assignments[0].released_at;
    let loser = second.confirm().await.unwrap();

    // Assert
    assert_eq!(winner, ConfirmOutcome::Released(BeneficiaryCode::new("EDU-0001")));
    assert_eq!(loser, ConfirmOutcome::AlreadyRecorded(BeneficiaryCode::new("EDU-0001")));
    assert!(stamp.is_some());
    assert_eq!(ledger.load().await.unwrap().assignments[0].released_at, stamp);
    assert_eq!(second.state(), SessionState::Open);
    assert_eq!(second.progress().released, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_desks_keep_every_release() {
    // Arrange: one allotment of 24, each desk on its own ledger handle
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ledger.json");
    let mut document = seed();
    document.assignments = (1..=24)
        .map(|id| {
            assignment(
                10,
                id,
                &format!("EDU-{id:04}"),
                &format!("Family {id:02}"),
                Amount::money(Money::from_pesos(250)),
            )
        })
        .collect();
    let first_ledger = Arc::new(JsonFileLedger::create(&path, &document).await.unwrap());
    let second_ledger = Arc::new(JsonFileLedger::open(&path));
    let mut first = desk(&first_ledger, cash_allotment()).await;
    let mut second = desk(&second_ledger, cash_allotment()).await;

    // Act: odd codes at one desk, even codes at the other
    async fn release_all(desk: &mut Desk, ids: Vec<u64>) {
        for id in ids {
            scan(desk, &format!("EDU-{id:04}")).await;
            let outcome = desk.confirm().await.expect("confirm");
            assert!(matches!(outcome, ConfirmOutcome::Released(_)));
        }
    }
    tokio::join!(
        release_all(&mut first, (1..=24).filter(|id| id % 2 == 1).collect()),
        release_all(&mut second, (1..=24).filter(|id| id % 2 == 0).collect()),
    );

    // Assert
    let stored = first_ledger.load().await.unwrap();
    assert_eq!(stored.assignments.iter().filter(|row| row.released).count(), 24);
    first.refresh_roster().await.unwrap();
    assert_eq!(first.view().progress_text(), "Released: 24/24");
}

#[tokio::test]
async fn test_close_with_pending_release_writes_nothing() {
    // Arrange
    let (_dir, ledger) = shared_ledger().await;
    let mut desk = desk(&ledger, cash_allotment()).await;
    scan(&mut desk, "EDU-0003").await;
    assert!(desk.pending().is_some());

    // Act
    desk.close_session();

    // Assert
    assert_eq!(desk.state(), SessionState::Closed);
    assert_eq!(desk.capture().installs, 1);
    assert_eq!(desk.capture().uninstalls, 1);
    let document = ledger.load().await.unwrap();
    assert!(document.assignments.iter().all(|row| !row.released));
}

#[tokio::test]
async fn test_in_kind_allotment_texts() {
    let (_dir, ledger) = shared_ledger().await;
    let mut desk = desk(&ledger, rice_allotment()).await;

    assert_eq!(desk.view().budget_text(), "Budget: 1200 kg");
    scan(&mut desk, "RICE-0001").await;

    let pending = desk.pending().expect("pending release");
    assert_eq!(pending.share_text, "1,200 kg");
    assert_eq!(pending.barangay, "Bagong Silang");
}

#[tokio::test]
async fn test_roster_of_other_allotment_is_not_scannable() {
    let (_dir, ledger) = shared_ledger().await;
    let mut desk = desk(&ledger, rice_allotment()).await;

    let outcome = scan(&mut desk, "EDU-0001").await;

    assert_eq!(
        outcome,
        InputOutcome::Scanned(ScanOutcome::NotFound("EDU-0001".to_string()))
    );
}
