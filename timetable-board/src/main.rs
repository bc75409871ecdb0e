use std::process::ExitCode;

use timetable_board::cache::{CacheConfig, CachedFeedClient};
use timetable_board::config::AppConfig;
use timetable_board::reconcile::{SystemClock, build_board};
use timetable_board::timetables::{FeedSource, FixtureFeedClient, TimetablesClient};
use timetable_board::web::{AppState, BoardResponse, create_router};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so the printed board stays machine-readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|e| format!("Invalid configuration: {e}"))?;

    let feeds = match &config.fixture_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Serving feeds from fixtures");
            FeedSource::Fixture(FixtureFeedClient::new(dir))
        }
        None => {
            let client = TimetablesClient::new(config.feed_config())
                .map_err(|e| format!("Failed to create timetables client: {e}"))?;
            FeedSource::Live(CachedFeedClient::new(client, &CacheConfig::default()))
        }
    };

    match std::env::args().nth(1).as_deref() {
        None => print_board(&feeds, &config).await,
        Some("serve") => serve(feeds, &config).await,
        Some(other) => Err(format!("Unknown command: {other} (expected `serve` or nothing)")),
    }
}

/// Build the board once and print it as JSON.
async fn print_board(feeds: &FeedSource, config: &AppConfig) -> Result<(), String> {
    let board = build_board(feeds, &config.board_config(), &SystemClock)
        .await
        .map_err(|e| e.to_string())?;

    let json = serde_json::to_string_pretty(&BoardResponse::from(&board))
        .map_err(|e| format!("Failed to serialize board: {e}"))?;
    println!("{json}");

    Ok(())
}

async fn serve(feeds: FeedSource, config: &AppConfig) -> Result<(), String> {
    let state = AppState::new(feeds, config.board_config());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.listen))?;

    info!(addr = %config.listen, station = %config.station, "Departure board listening");
    info!("  GET  /            - HTML board");
    info!("  GET  /board.json  - JSON board");
    info!("  GET  /health      - Health check");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {e}"))
}
