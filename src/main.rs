mod aggregate;
mod api;
mod config;
mod export;
mod logging;
mod models;
mod run;
mod session;
mod ui;

use anyhow::Result;

use crate::api::HttpStore;
use crate::config::Config;
use crate::run::Services;
use crate::session::SessionStore;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load()?;
    if let Err(e) = logging::init(&config.data_dir) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    tracing::info!(
        api_url = %config.api_url,
        config = %config.config_path.display(),
        "starting finora"
    );

    let store = HttpStore::new(&config.api_url, config.timeout)?;
    let sessions = SessionStore::in_dir(&config.data_dir);
    let services = Services {
        store: &store,
        sessions: &sessions,
    };

    match args.len() {
        1 => {
            let session = sessions.load().unwrap_or_else(|e| {
                tracing::warn!("stored session unreadable: {e:#}");
                None
            });
            run::as_tui(&services, session)
        }
        2.. => run::as_cli(&args, &services),
        _ => {
            eprintln!("Usage: finora [command]");
            Ok(())
        }
    }
}
