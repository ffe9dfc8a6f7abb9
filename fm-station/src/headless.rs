use crate::release_file::{ReleaseFile, ReleaseFileError};
use fm_core::assets::{AssetPicker, MockAssetPicker, AUDIO_GUIDELINES, COVER_ART_GUIDELINES};
use fm_core::auth::{AuthMode, Credentials, MockAuthenticator};
use fm_core::catalog::{CatalogError, Release, ReleaseCatalog, SharedCatalog};
use fm_core::config::Config;
use fm_core::distribution::{DistributionService, SubmissionReceipt};
use fm_core::routes::{avatar_initial, nav_items, Route};
use fm_core::session::{MemoryStore, Session, User};
use fm_core::wizard::{
    MetadataField, ReleaseWizard, SubmitOutcome, TrackField, WizardError, WizardEvent,
};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum HeadlessError {
    #[error(transparent)]
    ReleaseFile(#[from] ReleaseFileError),
    #[error("Wizard rejected the release: {0}")]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("{0} is not allowed to review releases")]
    AdminOnly(String),
}

/// Admin decision on a pending release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triage {
    Approve,
    Reject,
}

pub struct SubmitArgs<'a> {
    pub release_path: &'a Path,
    pub email: String,
    pub stage_name: Option<String>,
    /// Fill missing cover art and audio from the asset picker
    pub pick_assets: bool,
}

/// Build the catalog the way a fresh session sees it.
pub fn open_catalog(config: &Config) -> SharedCatalog {
    let catalog = if config.seed_demo_catalog {
        ReleaseCatalog::with_demo_submissions()
    } else {
        ReleaseCatalog::new()
    };
    SharedCatalog::new(catalog)
}

async fn sign_in(config: &Config, email: String, stage_name: Option<String>) -> User {
    let mut session = Session::restore(MemoryStore::default(), config.session_key.clone());
    let credentials = Credentials {
        mode: if stage_name.is_some() {
            AuthMode::Signup
        } else {
            AuthMode::Login
        },
        email,
        password: String::new(),
        stage_name: stage_name.unwrap_or_default(),
    };
    let user = MockAuthenticator::new(config.login_delay)
        .authenticate(credentials)
        .await;
    session.login(user.clone());
    let menu: Vec<&str> = nav_items(&user).into_iter().map(Route::label).collect();
    debug!(
        "Sidebar [{}] avatar {}",
        menu.join(", "),
        avatar_initial(session.current_user())
    );
    user
}

/// Walk the wizard through every step, entering `release` as a user would.
pub async fn fill_wizard(
    wizard: &mut ReleaseWizard,
    release: &ReleaseFile,
    picker: Option<&dyn AssetPicker>,
) -> Result<(), WizardError> {
    wizard.apply(WizardEvent::SetField {
        field: MetadataField::Title,
        value: release.title.clone(),
    })?;
    if let Some(genre) = &release.genre {
        wizard.apply(WizardEvent::SetField {
            field: MetadataField::Genre,
            value: genre.clone(),
        })?;
    }
    wizard.apply(WizardEvent::SetField {
        field: MetadataField::ReleaseDate,
        value: release.release_date.clone(),
    })?;
    wizard.apply(WizardEvent::SetField {
        field: MetadataField::Upc,
        value: release.upc.clone(),
    })?;
    wizard.apply(WizardEvent::Advance)?;

    match (&release.cover_art, picker) {
        (Some(cover), _) => wizard.apply(WizardEvent::SetCoverArt(cover.clone()))?,
        (None, Some(picker)) => {
            wizard.pick_cover_art(picker).await;
        }
        (None, None) => {}
    }
    wizard.apply(WizardEvent::Advance)?;

    let mut id = wizard.draft().tracks().first_id();
    for (idx, entry) in release.tracks.iter().enumerate() {
        if idx > 0 {
            match wizard.add_track() {
                Some(added) => id = added,
                None => break,
            }
        }
        let fields = [
            (TrackField::SongTitle, &entry.song_title),
            (TrackField::Isrc, &entry.isrc),
            (TrackField::Credits, &entry.credits),
        ];
        for (field, value) in fields {
            wizard.update_track(id, field, value.clone());
        }
        match (&entry.audio, picker) {
            (Some(audio), _) => {
                wizard.update_track(id, TrackField::AudioRef, audio.clone());
            }
            (None, Some(picker)) => {
                wizard.pick_track_audio(id, picker).await;
            }
            (None, None) => {}
        }
    }
    wizard.apply(WizardEvent::Advance)?;
    Ok(())
}

/// Sign in, enter the release, submit it and wait for the receipt.
pub async fn submit(
    config: &Config,
    catalog: SharedCatalog,
    args: SubmitArgs<'_>,
) -> Result<SubmissionReceipt, HeadlessError> {
    let release = ReleaseFile::load(args.release_path)?;
    let user = sign_in(config, args.email, args.stage_name).await;

    let distribution = DistributionService::start(
        config.submission_delay,
        catalog,
        tokio::runtime::Handle::current(),
    );
    let mut wizard = ReleaseWizard::new(user, distribution);
    let mock_picker = MockAssetPicker::default();
    let picker: Option<&dyn AssetPicker> = if args.pick_assets {
        Some(&mock_picker)
    } else {
        None
    };
    fill_wizard(&mut wizard, &release, picker).await?;

    print!("{}", asset_notes());
    println!("{}", wizard.review());
    if let SubmitOutcome::Started { submission_id } = wizard.submit()? {
        info!("Waiting for distribution of {}", submission_id);
    }
    let receipt = wizard.finish().await?.clone();
    if let Some(route) = wizard.exit_route() {
        debug!("Returning to {}", route.path());
    }
    Ok(receipt)
}

/// Advisory copy for the asset steps. Nothing here is enforced.
fn asset_notes() -> String {
    let mut notes = String::from("Cover Art\n");
    for line in COVER_ART_GUIDELINES {
        notes.push_str(&format!("  * {line}\n"));
    }
    notes.push_str(&format!("Tracks\n  * {AUDIO_GUIDELINES}\n"));
    notes
}

/// Sign in as `email` and approve or reject a pending release.
///
/// Only users who can open the admin panel may triage.
pub async fn triage(
    config: &Config,
    catalog: &SharedCatalog,
    email: String,
    release_id: &str,
    decision: Triage,
) -> Result<Release, HeadlessError> {
    let user = sign_in(config, email, None).await;
    if Route::resolve(Route::Admin.path(), &user) != Route::Admin {
        return Err(HeadlessError::AdminOnly(user.email));
    }
    let mut catalog = catalog.get();
    let release = match decision {
        Triage::Approve => catalog.approve(release_id)?,
        Triage::Reject => catalog.reject(release_id)?,
    };
    info!("{} set release {} to {}", user.email, release.id, release.status);
    Ok(release.clone())
}
