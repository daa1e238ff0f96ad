//! Web layer for the reachability server.
//!
//! Provides HTTP endpoints for computing reachability, searching
//! addresses, and listing apprenticeships.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
