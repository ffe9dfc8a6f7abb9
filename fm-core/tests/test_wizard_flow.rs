//! End-to-end behaviour of the release wizard against a running
//! distribution worker and catalog.
//!
//! Time is paused, so the simulated submission delay resolves as soon as the
//! runtime is otherwise idle.

use fm_core::catalog::{ReleaseCatalog, ReleaseStatus, SharedCatalog};
use fm_core::distribution::DistributionService;
use fm_core::session::{User, UserRole};
use fm_core::wizard::{
    MetadataField, ReleaseWizard, SubmissionPhase, SubmitOutcome, TrackField, WizardAction,
    WizardError, WizardStep,
};
use fm_core::Genre;
use std::time::Duration;

const SUBMISSION_DELAY: Duration = Duration::from_millis(2000);

fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

fn artist() -> User {
    User {
        id: "k3j9x0a1b".to_string(),
        name: "Nova Sky".to_string(),
        email: "nova@example.com".to_string(),
        stage_name: "Nova Sky".to_string(),
        role: UserRole::Artist,
    }
}

fn start_wizard() -> (ReleaseWizard, SharedCatalog) {
    let catalog = SharedCatalog::new(ReleaseCatalog::with_demo_submissions());
    let handle = DistributionService::start(
        SUBMISSION_DELAY,
        catalog.clone(),
        tokio::runtime::Handle::current(),
    );
    (ReleaseWizard::new(artist(), handle), catalog)
}

/// Two adds then removing the first track keeps the others intact
#[tokio::test]
async fn test_add_twice_then_remove_first() {
    tracing_init();
    let (mut wizard, _) = start_wizard();
    assert_eq!(wizard.step(), WizardStep::Metadata);

    let t1 = wizard.draft().tracks().first_id();
    let t2 = wizard.add_track().unwrap();
    let t3 = wizard.add_track().unwrap();
    wizard.update_track(t2, TrackField::SongTitle, "Orbit".to_string());
    wizard.update_track(t3, TrackField::Isrc, "USRC17607839".to_string());
    assert_eq!(wizard.draft().tracks().len(), 3);

    let t2_before = wizard.draft().track(t2).cloned();
    let t3_before = wizard.draft().track(t3).cloned();
    wizard.remove_track(t1).unwrap();

    assert_eq!(wizard.draft().tracks().len(), 2);
    assert!(wizard.draft().track(t1).is_none());
    assert_eq!(wizard.draft().track(t2).cloned(), t2_before);
    assert_eq!(wizard.draft().track(t3).cloned(), t3_before);
    assert_eq!(wizard.draft().tracks().ids(), vec![t2, t3]);
}

/// The last track cannot be removed
#[tokio::test]
async fn test_remove_last_track_is_refused() {
    tracing_init();
    let (mut wizard, _) = start_wizard();
    let only = wizard.draft().tracks().first_id();
    wizard.update_track(only, TrackField::SongTitle, "Solo".to_string());
    let before = wizard.draft().clone();

    assert_eq!(
        wizard.remove_track(only),
        Err(WizardError::MinimumTracksViolation)
    );
    assert_eq!(wizard.draft(), &before);
}

/// Navigation stays within steps 1..=4
#[tokio::test]
async fn test_step_bounds() {
    tracing_init();
    let (mut wizard, _) = start_wizard();

    assert_eq!(
        wizard.retreat(),
        Err(WizardError::InvalidTransition {
            action: WizardAction::Retreat,
            step: WizardStep::Metadata,
        })
    );
    assert_eq!(wizard.step().number(), 1);

    for expected in 2..=4 {
        wizard.advance().unwrap();
        assert_eq!(wizard.step().number(), expected);
    }
    assert!(wizard.advance().is_err());
    assert_eq!(wizard.step().number(), 4);
}

/// Metadata survives moving forward and back
#[tokio::test]
async fn test_metadata_persists_across_navigation() {
    tracing_init();
    let (mut wizard, _) = start_wizard();
    wizard
        .set_field(MetadataField::Title, "Midnight Echoes".to_string())
        .unwrap();
    wizard
        .set_field(MetadataField::Genre, "Electronic".to_string())
        .unwrap();
    wizard
        .set_field(MetadataField::ReleaseDate, "2024-06-01".to_string())
        .unwrap();
    wizard
        .set_field(MetadataField::Upc, "036000291452".to_string())
        .unwrap();
    let before = wizard.draft().clone();

    wizard.advance().unwrap();
    wizard.set_cover_art("cover.png".to_string());
    wizard.advance().unwrap();
    wizard.retreat().unwrap();
    wizard.retreat().unwrap();

    assert_eq!(wizard.step(), WizardStep::Metadata);
    assert_eq!(wizard.draft().title(), before.title());
    assert_eq!(wizard.draft().genre(), Genre::Electronic);
    assert_eq!(wizard.draft().release_date(), before.release_date());
    assert_eq!(wizard.draft().upc(), before.upc());
    assert_eq!(wizard.draft().cover_art(), Some("cover.png"));
}

/// Submit from review, then Finished after the delay
#[tokio::test(start_paused = true)]
async fn test_submission_finishes_after_delay() {
    tracing_init();
    let (mut wizard, catalog) = start_wizard();
    wizard
        .set_field(MetadataField::Title, "Galactic Horizon II".to_string())
        .unwrap();
    for _ in 0..3 {
        wizard.advance().unwrap();
    }

    let started = tokio::time::Instant::now();
    assert!(matches!(
        wizard.submit(),
        Ok(SubmitOutcome::Started { .. })
    ));
    assert_eq!(wizard.phase(), SubmissionPhase::Submitting);

    let receipt = wizard.finish().await.unwrap().clone();
    assert!(started.elapsed() >= SUBMISSION_DELAY);
    assert_eq!(wizard.phase(), SubmissionPhase::Finished);
    assert_eq!(receipt.release_id, "105");

    let catalog = catalog.get();
    let release = catalog.get("105").unwrap();
    assert_eq!(release.status, ReleaseStatus::Pending);
    assert_eq!(release.artist_name, "Nova Sky");
    assert_eq!(release.upc.len(), 12);
}

/// A second submit while in flight sends nothing
#[tokio::test(start_paused = true)]
async fn test_double_submit_sends_once() {
    tracing_init();
    let (mut wizard, catalog) = start_wizard();
    for _ in 0..3 {
        wizard.advance().unwrap();
    }

    assert!(matches!(
        wizard.submit(),
        Ok(SubmitOutcome::Started { .. })
    ));
    assert_eq!(wizard.submit(), Ok(SubmitOutcome::AlreadySubmitting));

    wizard.finish().await.unwrap();
    tokio::time::sleep(SUBMISSION_DELAY * 3).await;

    assert_eq!(catalog.get().releases().len(), 5);
    assert_eq!(wizard.phase(), SubmissionPhase::Finished);
}

/// A genre outside the fixed set is rejected
#[tokio::test]
async fn test_unknown_genre_is_rejected() {
    tracing_init();
    let (mut wizard, _) = start_wizard();
    wizard
        .set_field(MetadataField::Genre, "Jazz".to_string())
        .unwrap();

    assert_eq!(
        wizard.set_field(MetadataField::Genre, "Sea Shanty".to_string()),
        Err(WizardError::UnknownGenre("Sea Shanty".to_string()))
    );
    assert_eq!(wizard.draft().genre(), Genre::Jazz);
}

/// Track floor and identity hold over a scripted mix of adds and removes
#[tokio::test]
async fn test_track_floor_and_identity_hold() {
    tracing_init();
    let (mut wizard, _) = start_wizard();
    let keeper = wizard.draft().tracks().first_id();
    wizard.update_track(keeper, TrackField::Credits, "Written by Nova".to_string());

    let mut added = Vec::new();
    for round in 0..12 {
        if round % 4 == 3 {
            if let Some(id) = added.pop() {
                wizard.remove_track(id).unwrap();
            }
        } else {
            let id = wizard.add_track().unwrap();
            wizard.update_track(id, TrackField::SongTitle, format!("Take {round}"));
            added.push(id);
        }
        assert!(wizard.draft().tracks().len() >= 1);
        assert_eq!(
            wizard.draft().track(keeper).unwrap().credits,
            "Written by Nova"
        );
    }

    for id in added.drain(..) {
        wizard.remove_track(id).unwrap();
    }
    assert_eq!(wizard.draft().tracks().ids(), vec![keeper]);
    assert_eq!(
        wizard.remove_track(keeper),
        Err(WizardError::MinimumTracksViolation)
    );
}

/// The review shows what was entered, with numbering by position
#[tokio::test]
async fn test_review_projection() {
    tracing_init();
    let (mut wizard, _) = start_wizard();
    wizard
        .set_field(MetadataField::Title, "Faded Memories".to_string())
        .unwrap();
    let first = wizard.draft().tracks().first_id();
    let second = wizard.add_track().unwrap();
    wizard.update_track(second, TrackField::SongTitle, "Echo".to_string());
    wizard.remove_track(first).unwrap();

    let review = wizard.review();
    assert_eq!(review.title, "Faded Memories");
    assert_eq!(review.byline(), "Nova Sky • Pop");
    assert_eq!(review.release_date, "Not set");
    assert_eq!(review.total_tracks, 1);
    assert_eq!(review.tracks[0].number, 1);
    assert_eq!(review.tracks[0].title, "Echo");
}

/// A worker that stopped leaves the wizard submitting and reports it on every wait
#[tokio::test]
async fn test_stopped_worker_reports_unavailable() {
    tracing_init();
    let worker_runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let catalog = SharedCatalog::new(ReleaseCatalog::new());
    let handle = DistributionService::start(
        SUBMISSION_DELAY,
        catalog.clone(),
        worker_runtime.handle().clone(),
    );
    worker_runtime.shutdown_background();

    let mut wizard = ReleaseWizard::new(artist(), handle);
    for _ in 0..3 {
        wizard.advance().unwrap();
    }
    assert!(matches!(
        wizard.submit(),
        Ok(SubmitOutcome::Started { .. })
    ));

    assert_eq!(
        wizard.finish().await.unwrap_err(),
        WizardError::DistributionUnavailable
    );
    assert_eq!(wizard.phase(), SubmissionPhase::Submitting);
    assert_eq!(
        wizard.finish().await.unwrap_err(),
        WizardError::DistributionUnavailable
    );
    assert_eq!(
        wizard.poll_submission(),
        Err(WizardError::DistributionUnavailable)
    );
    assert_eq!(wizard.submit(), Ok(SubmitOutcome::AlreadySubmitting));
    assert_eq!(wizard.phase(), SubmissionPhase::Submitting);
    assert!(wizard.receipt().is_none());
    assert!(catalog.get().releases().is_empty());
}

/// Polling first and then waiting both see the stopped worker
#[tokio::test]
async fn test_poll_then_finish_after_worker_stopped() {
    tracing_init();
    let worker_runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let handle = DistributionService::start(
        SUBMISSION_DELAY,
        SharedCatalog::new(ReleaseCatalog::new()),
        worker_runtime.handle().clone(),
    );
    worker_runtime.shutdown_background();

    let mut wizard = ReleaseWizard::new(artist(), handle);
    for _ in 0..3 {
        wizard.advance().unwrap();
    }
    wizard.submit().unwrap();

    assert_eq!(
        wizard.poll_submission(),
        Err(WizardError::DistributionUnavailable)
    );
    assert_eq!(
        wizard.finish().await.unwrap_err(),
        WizardError::DistributionUnavailable
    );
    assert_eq!(wizard.phase(), SubmissionPhase::Submitting);
}
