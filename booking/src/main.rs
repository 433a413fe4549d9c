//! Interactive box office.
//!
//! Seeds the catalog from configuration, then runs the menu on stdin/stdout.
//! Logs go to stderr so they never interleave with the menu.

use box_office::{
    BookingEnvironment, BookingReducer, BookingState, BookingStore, cli,
    config::{Config, DEFAULT_LOG_FILTER},
};
use box_office_core::environment::SystemClock;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();

    tracing::info!(movies = config.movies.len(), "Configuration loaded");

    let env = BookingEnvironment::new(Arc::new(SystemClock));
    let store: BookingStore = BookingStore::new(BookingState::new(), BookingReducer::new(), env);

    let mut stdout = tokio::io::stdout();
    cli::seed_catalog(&store, &config.movies, &mut stdout).await?;
    cli::run_menu(&store, BufReader::new(tokio::io::stdin()), stdout).await?;

    store.shutdown();
    Ok(())
}
