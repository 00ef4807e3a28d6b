//! Web layer for the ticket query server.
//!
//! Exposes station lookups and ticket/route queries over HTTP.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
