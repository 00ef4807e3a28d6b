//! Station table: fetch, decode, and derived lookups.
//!
//! The table is loaded exactly once at startup. If it cannot be fetched or
//! decodes to nothing, startup fails; there is no retry or partial mode,
//! since no ticket query can be answered without it.

mod client;
mod decode;
mod error;
mod index;

pub use client::{StationClient, StationClientConfig};
pub use decode::{StationRecord, decode_station_table};
pub use error::StationError;
pub use index::{StationIndex, StationSummary};

/// Fetch the station table and build the process-lifetime index.
pub async fn fetch_index(client: &StationClient) -> Result<StationIndex, StationError> {
    let raw = client.fetch_raw_table().await?;
    let table = decode_station_table(&raw);
    if table.is_empty() {
        return Err(StationError::EmptyTable);
    }
    Ok(StationIndex::build(table))
}
