//! Plant Catalog - Entry Point

use clap::Parser;
use plant_catalog::api::CatalogClient;
use plant_catalog::model::error::AppError;
use plant_catalog::model::filter::FilterState;
use plant_catalog::shell::{self, ShellCommand};
use plant_catalog::state::catalog_state::CatalogSnapshot;
use plant_catalog::state::pagination::PageSize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

/// Plant Catalog - browse, filter and add plants from the storefront API
#[derive(Parser, Debug)]
#[command(name = "plant-catalog")]
#[command(version)]
#[command(about = "Interactive client for the plant storefront catalog API")]
pub struct Args {
    /// Catalog server origin (e.g. http://localhost:5001)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Search debounce in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Items per page (12, 24, 48 or 96)
    #[arg(long)]
    pub page_size: Option<PageSize>,

    /// Start with this search text applied
    #[arg(short, long)]
    pub search: Option<String>,

    /// Start filtered to this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Filters the session starts with.
    pub fn initial_filters(&self) -> FilterState {
        FilterState {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            ..FilterState::default()
        }
    }
}

/// Print only views that are not waiting on the network or the debounce.
fn is_settled(snapshot: &CatalogSnapshot) -> bool {
    !snapshot.loading && !snapshot.creating && snapshot.pending_search.is_none()
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = plant_catalog::config::load_config_with_precedence(args.config.clone())?;
        let merged = plant_catalog::config::merge_config(config_file)?;
        let with_env = plant_catalog::config::apply_env_overrides(merged)?;
        plant_catalog::config::apply_cli_overrides(
            with_env,
            args.api_url.clone(),
            args.debounce_ms,
            args.page_size,
        )
    };

    let _log_guard = plant_catalog::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let client = Arc::new(CatalogClient::new(
        config.api_base_url.clone(),
        config.request_timeout,
    )?);
    let settings = config.to_settings(args.initial_filters());

    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(None::<CatalogSnapshot>);

    let session = tokio::spawn(plant_catalog::runtime::run(
        client,
        settings,
        action_rx,
        move |snapshot| {
            if is_settled(snapshot) {
                println!("{}", shell::render(snapshot));
            }
            view_tx.send_replace(Some(snapshot.clone()));
        },
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match shell::parse_command(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Dispatch(actions))) => {
                if actions.into_iter().any(|a| action_tx.send(a).is_err()) {
                    warn!("catalog session ended early");
                    break;
                }
            }
            Ok(Some(ShellCommand::Show)) => match view_rx.borrow().as_ref() {
                Some(snapshot) => println!("{}", shell::render(snapshot)),
                None => println!("Loading..."),
            },
            Ok(Some(ShellCommand::Help)) => println!("{}", shell::HELP),
            Ok(Some(ShellCommand::Quit)) => break,
            Err(err) => eprintln!("{err}"),
        }
    }

    drop(action_tx);
    session.await?;

    Ok(())
}
