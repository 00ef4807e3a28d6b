//! 12306 upstream client and record decoding.
//!
//! Key characteristics of the platform's query API:
//! - endpoints are session-gated: every query needs cookies fetched from
//!   the booking site immediately beforehand
//! - ticket rows are `|`-delimited and decoded purely by position
//! - fares are packed into three parallel sub-fields (`yp_ex`,
//!   `yp_info_new`, `seat_discount_info`) that only make sense together

mod client;
mod convert;
mod error;
mod types;

pub use client::{RailClient, RailConfig};
pub use convert::{
    DecodeError, convert_route_stations, convert_ticket, convert_tickets, decode_amenities,
    extract_fares,
};
pub use error::RailError;
pub use types::{LeftTicketReply, RawTicketRecord, RouteReply, RouteStationData};
