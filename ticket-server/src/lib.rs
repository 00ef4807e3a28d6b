//! 12306 ticket query server.
//!
//! Fetches the booking platform's station table once at startup, then
//! answers station lookups and left-ticket/route queries by decoding the
//! platform's packed string formats into typed records.

pub mod domain;
pub mod rail;
pub mod stations;
pub mod web;
