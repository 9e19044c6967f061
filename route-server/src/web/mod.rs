//! Web layer for direct route lookups.
//!
//! Exposes the lookup engine over HTTP as a JSON API.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
