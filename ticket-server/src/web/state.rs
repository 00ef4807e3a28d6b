//! Application state for the web layer.

use std::sync::Arc;

use crate::rail::RailClient;
use crate::stations::StationIndex;

/// Shared application state.
///
/// The station index is built once at startup and never mutated, so
/// handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Immutable station table and derived lookups
    pub index: Arc<StationIndex>,

    /// 12306 query client
    pub rail: RailClient,
}

impl AppState {
    /// Create a new app state.
    pub fn new(index: StationIndex, rail: RailClient) -> Self {
        Self {
            index: Arc::new(index),
            rail,
        }
    }
}
