//! Domain types for the ticket query server.
//!
//! Decoded, display-ready records and the filtering vocabulary applied to
//! them. Everything here is plain data plus pure functions; the upstream
//! wire formats live in `rail` and `stations`.

pub mod seat;

mod category;
mod route;
mod ticket;

pub use category::{CategoryFilter, InvalidFilter, TrainCategory};
pub use route::RouteStationInfo;
pub use ticket::{FareEntry, TicketInfo, format_tickets};
