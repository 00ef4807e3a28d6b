//! Display-ready ticket records and their text rendering.

use std::fmt::Write as _;

use serde::Serialize;

/// One seat class's availability/price/discount on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FareEntry {
    /// Display name of the seat class, e.g. "二等座".
    pub seat_name: String,

    /// Short code of the seat class, e.g. "ze".
    pub short_code: String,

    /// The raw seat-type code this entry was decoded from, e.g. "O".
    pub seat_type_code: String,

    /// Remaining availability, copied verbatim from the ticket row.
    /// Either a digit string ("23") or a status word ("有", "无", "候补").
    pub availability: String,

    /// Price as a plain integer in the upstream's currency unit.
    pub price: u32,

    /// Discount percentage for this seat class, when one is advertised.
    pub discount: Option<u32>,
}

/// A normalized, display-ready ticket.
///
/// Built from one raw ticket row plus the station index (telecode → name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketInfo {
    /// Internal train identifier used by route queries, e.g. "240000G10336".
    pub train_no: String,

    /// Public train code shown to passengers, e.g. "G103".
    pub start_train_code: String,

    /// Departure time at the queried origin, "HH:MM".
    pub start_time: String,

    /// Arrival time at the queried destination, "HH:MM".
    pub arrive_time: String,

    /// Total journey duration, "HH:MM".
    pub duration: String,

    /// Origin station display name.
    pub from_station_name: String,

    /// Destination station display name.
    pub to_station_name: String,

    /// Origin station telecode.
    pub from_station_code: String,

    /// Destination station telecode.
    pub to_station_code: String,

    /// Per-seat-class fares, in `yp_ex` decode order.
    pub fares: Vec<FareEntry>,

    /// Amenity tags decoded from `dw_flag`, e.g. "复兴号".
    pub amenities: Vec<String>,
}

/// Message rendered when a query matches no trains.
const NO_RESULTS: &str = "没有查询到相关车次信息";

/// Render tickets as the human-readable summary returned to callers.
///
/// One line per ticket followed by one indented line per fare entry.
/// Availability gets a "张" suffix only when it is purely numeric;
/// status words ("有", "候补") are shown as-is.
pub fn format_tickets(tickets: &[TicketInfo]) -> String {
    if tickets.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut out = String::from("车次 | 出发站 -> 到达站 | 出发时间 -> 到达时间 | 历时 |");
    for ticket in tickets {
        let _ = write!(
            out,
            "{}(实际车次train_no: {}) {}(telecode: {}) -> {}(telecode: {}) {} -> {} 历时：{}",
            ticket.start_train_code,
            ticket.train_no,
            ticket.from_station_name,
            ticket.from_station_code,
            ticket.to_station_name,
            ticket.to_station_code,
            ticket.start_time,
            ticket.arrive_time,
            ticket.duration,
        );
        for fare in &ticket.fares {
            let _ = write!(
                out,
                "\n- {}: {}剩余 {}元",
                fare.seat_name,
                format_availability(&fare.availability),
                fare.price,
            );
        }
        out.push('\n');
    }
    out
}

fn format_availability(availability: &str) -> String {
    if !availability.is_empty() && availability.chars().all(|c| c.is_ascii_digit()) {
        format!("{availability}张")
    } else {
        availability.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_ticket(start_train_code: &str, amenities: &[&str]) -> TicketInfo {
        TicketInfo {
            train_no: format!("240000{start_train_code}01"),
            start_train_code: start_train_code.to_string(),
            start_time: "08:00".to_string(),
            arrive_time: "12:30".to_string(),
            duration: "04:30".to_string(),
            from_station_name: "北京南".to_string(),
            to_station_name: "上海虹桥".to_string(),
            from_station_code: "VNP".to_string(),
            to_station_code: "AOH".to_string(),
            fares: vec![FareEntry {
                seat_name: "二等座".to_string(),
                short_code: "ze".to_string(),
                seat_type_code: "O".to_string(),
                availability: "99".to_string(),
                price: 553,
                discount: None,
            }],
            amenities: amenities.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_list_renders_fixed_message() {
        assert_eq!(format_tickets(&[]), NO_RESULTS);
    }

    #[test]
    fn ticket_line_includes_codes_and_times() {
        let out = format_tickets(&[make_ticket("G1", &[])]);
        assert!(out.starts_with("车次 | 出发站 -> 到达站"));
        assert!(out.contains("G1(实际车次train_no: 240000G101)"));
        assert!(out.contains("北京南(telecode: VNP) -> 上海虹桥(telecode: AOH)"));
        assert!(out.contains("08:00 -> 12:30 历时：04:30"));
    }

    #[test]
    fn numeric_availability_gets_zhang_suffix() {
        let out = format_tickets(&[make_ticket("G1", &[])]);
        assert!(out.contains("- 二等座: 99张剩余 553元"));
    }

    #[test]
    fn status_availability_is_verbatim() {
        let mut ticket = make_ticket("G1", &[]);
        ticket.fares[0].availability = "有".to_string();
        let out = format_tickets(&[ticket]);
        assert!(out.contains("- 二等座: 有剩余 553元"));
    }
}
