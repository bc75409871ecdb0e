//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::reconcile::{Board, BoardError, SystemClock, build_board};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(board_page))
        .route("/health", get(health))
        .route("/board.json", get(board_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn current_board(state: &AppState) -> Result<Board, AppError> {
    Ok(build_board(&*state.feeds, &state.config, &SystemClock).await?)
}

/// The board as JSON.
async fn board_json(State(state): State<AppState>) -> Result<Json<BoardResponse>, AppError> {
    let board = current_board(&state).await?;
    Ok(Json(BoardResponse::from(&board)))
}

/// The board as an HTML page.
async fn board_page(State(state): State<AppState>) -> Response {
    match current_board(&state).await {
        Ok(board) => Html(
            BoardTemplate::from_board(&board)
                .render()
                .unwrap_or_else(|e| format!("Template error: {}", e)),
        )
        .into_response(),
        Err(e) => {
            let status = e.status();
            let page = ErrorTemplate {
                title: "Board unavailable".to_string(),
                message: e.message().to_string(),
            };
            (
                status,
                Html(
                    page.render()
                        .unwrap_or_else(|e| format!("Template error: {}", e)),
                ),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// An upstream feed failed
    Upstream { message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Upstream { message } => message,
        }
    }
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::Fetch { .. } => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message().to_string();

        error!(status = status.as_u16(), %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::reconcile::BoardConfig;
    use crate::timetables::{FeedSource, FixtureFeedClient};

    fn state(dir: &std::path::Path) -> AppState {
        AppState::new(
            FeedSource::Fixture(FixtureFeedClient::new(dir)),
            BoardConfig::new(StationId::parse("8000105").unwrap()),
        )
    }

    #[tokio::test]
    async fn health_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn json_board_from_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fchg_8000105.xml"), "<timetable/>").unwrap();

        let Json(body) = board_json(State(state(dir.path()))).await.unwrap();

        assert_eq!(body.station, "8000105");
        assert!(body.departures.is_empty());
    }

    #[tokio::test]
    async fn missing_change_feed_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();

        let err = board_json(State(state(dir.path()))).await.unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(err.message().contains("change feed"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn html_error_page() {
        let dir = tempfile::tempdir().unwrap();

        let response = board_page(State(state(dir.path()))).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn html_board_page() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fchg_8000105.xml"), "<timetable/>").unwrap();

        let response = board_page(State(state(dir.path()))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
