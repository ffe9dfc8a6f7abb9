use clap::{Parser, Subcommand};
use fm_core::catalog::{ReleaseStatus, SharedCatalog};
use fm_core::config::Config;
use std::path::PathBuf;
use tracing::{error, info};

mod headless;
mod release_file;

/// fm-station: submit releases for distribution without a browser.
#[derive(Parser)]
#[command(name = "fm-station")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in, run the release wizard from a YAML file and submit it.
    Submit {
        /// Path to the release description.
        release: PathBuf,

        /// Account email. Addresses containing "admin" sign in as admin.
        #[arg(long, env = "FM_EMAIL")]
        email: String,

        /// Stage name. Given = sign up, omitted = log in.
        #[arg(long)]
        stage_name: Option<String>,

        /// Use the asset picker for missing cover art and audio.
        #[arg(long)]
        pick_assets: bool,
    },

    /// List releases in the catalog, optionally triaging one first.
    Catalog {
        /// Only show releases whose title or artist contains this text.
        #[arg(long)]
        search: Option<String>,

        /// Only show releases awaiting review.
        #[arg(long)]
        pending: bool,

        /// Admin account used for --approve / --reject.
        #[arg(long, env = "FM_EMAIL")]
        email: Option<String>,

        /// Approve a pending release and send it to stores.
        #[arg(long, value_name = "ID", requires = "email", conflicts_with = "reject")]
        approve: Option<String>,

        /// Reject a pending release.
        #[arg(long, value_name = "ID", requires = "email")]
        reject: Option<String>,
    },

    /// Show the effective configuration.
    Config {
        /// Also write it to config.yaml.
        #[arg(long)]
        write: bool,
    },
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    // Default to info level if RUST_LOG not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_catalog(catalog: &SharedCatalog, search: Option<&str>, pending_only: bool) {
    let catalog = catalog.get();
    let releases = match search {
        Some(query) => catalog.search(query),
        None => catalog.releases().iter().collect(),
    };
    let mut shown = 0;
    for release in releases {
        if pending_only && release.status != ReleaseStatus::Pending {
            continue;
        }
        println!(
            "{:<5} {:<24} {:<20} {:<12} {:<11} {}",
            release.id,
            release.title,
            release.artist_name,
            release.genre,
            release.release_date,
            release.status
        );
        shown += 1;
    }
    if shown == 0 {
        info!("No releases found");
    }
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {e}");
        std::process::exit(1);
    });
    info!(
        "fm-station starting (dev mode: {})",
        Config::is_dev_mode()
    );

    match args.command {
        Command::Submit {
            release,
            email,
            stage_name,
            pick_assets,
        } => {
            let catalog = headless::open_catalog(&config);
            let submit_args = headless::SubmitArgs {
                release_path: &release,
                email,
                stage_name,
                pick_assets,
            };
            match headless::submit(&config, catalog, submit_args).await {
                Ok(receipt) => {
                    println!("Submission Successful!");
                    println!("{}", receipt.confirmation_message());
                    println!("Release ID: {}  UPC: {}", receipt.release_id, receipt.upc);
                }
                Err(e) => {
                    error!("Submission failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Command::Catalog {
            search,
            pending,
            email,
            approve,
            reject,
        } => {
            let catalog = headless::open_catalog(&config);
            let decision = approve
                .map(|id| (id, headless::Triage::Approve))
                .or_else(|| reject.map(|id| (id, headless::Triage::Reject)));
            if let Some((release_id, decision)) = decision {
                let email = email.unwrap_or_default();
                match headless::triage(&config, &catalog, email, &release_id, decision).await {
                    Ok(release) => println!(
                        "Release {} \"{}\" is now {}",
                        release.id, release.title, release.status
                    ),
                    Err(e) => {
                        error!("Review failed: {e}");
                        std::process::exit(1);
                    }
                }
            }
            print_catalog(&catalog, search.as_deref(), pending);
        }
        Command::Config { write } => {
            println!("config dir:       {}", config.config_dir.display());
            println!("submission delay: {:?}", config.submission_delay);
            println!("login delay:      {:?}", config.login_delay);
            println!("session key:      {}", config.session_key);
            println!("demo catalog:     {}", config.seed_demo_catalog);
            if write {
                match config.save_to_config_yaml() {
                    Ok(path) => info!("Wrote {}", path.display()),
                    Err(e) => {
                        error!("Failed to write config: {e}");
                        std::process::exit(1);
                    }
                }
            }
        }
    }
}
