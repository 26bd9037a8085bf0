#![allow(non_snake_case)]

use std::env;

use clap::Parser;
use tracing::{debug, warn};

use lifeCalendar::cli::{self, Cli};
use lifeCalendar::clients::build_client;
use lifeCalendar::config::{AppConfig, Settings};
use lifeCalendar::observability;
use lifeCalendar::service::calendar_session::CalendarSession;
use lifeCalendar::service::reflection_service::ReflectionService;
use lifeCalendar::store::{JsonFileStore, MemoryStore, PreferenceStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match env::var("CONFIG_FILE") {
        Ok(path) => match AppConfig::from_file(&path) {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
        Err(_) => (AppConfig::default(), None),
    };
    let settings = Settings::resolve(&config);
    observability::init_logging(&settings.log_level)?;
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring config file");
    }

    let args = Cli::parse();

    let client = build_client(&settings.reflection).unwrap_or_else(|e| {
        warn!(error = %e, "unable to build language model client");
        None
    });
    if client.is_none() {
        debug!("reflections will use the fallback text");
    }
    let reflections = ReflectionService::from_client(client);

    let store: Box<dyn PreferenceStore> = if args.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        match JsonFileStore::open(&settings.data_dir) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!(error = %e, dir = %settings.data_dir.display(), "preference store unavailable, not saving");
                Box::new(MemoryStore::new())
            }
        }
    };
    let mut session = CalendarSession::load(store);

    cli::run(args, &mut session, &reflections).await
}
