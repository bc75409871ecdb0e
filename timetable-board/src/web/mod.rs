//! Web layer for the departure board.
//!
//! Serves the board as JSON and as an HTML page.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
