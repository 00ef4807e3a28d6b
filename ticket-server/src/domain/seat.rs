//! Seat-type code table.
//!
//! 12306 identifies each seat class by a one- or two-character code inside
//! the packed `yp_ex` / `seat_discount_info` fields. This table maps those
//! codes to a display name and to the short code used by the per-class
//! availability fields of a ticket row (`swz_num`, `ze_num`, ...).

/// A resolved seat class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatType {
    /// Display name, e.g. "二等座".
    pub name: &'static str,
    /// Short code keying the `<short>_num` availability field, e.g. "ze".
    pub short: &'static str,
}

/// All known seat-type codes.
///
/// Several codes share a short code (e.g. `M` and `D` are both first-class
/// variants counted under `zy_num`).
const SEAT_TYPES: &[(&str, SeatType)] = &[
    ("9", SeatType { name: "商务座", short: "swz" }),
    ("P", SeatType { name: "特等座", short: "tz" }),
    ("M", SeatType { name: "一等座", short: "zy" }),
    ("D", SeatType { name: "优选一等座", short: "zy" }),
    ("O", SeatType { name: "二等座", short: "ze" }),
    ("S", SeatType { name: "二等包座", short: "ze" }),
    ("6", SeatType { name: "高级软卧", short: "gr" }),
    ("A", SeatType { name: "高级动卧", short: "gr" }),
    ("4", SeatType { name: "软卧", short: "rw" }),
    ("I", SeatType { name: "一等卧", short: "rw" }),
    ("F", SeatType { name: "动卧", short: "rw" }),
    ("3", SeatType { name: "硬卧", short: "yw" }),
    ("J", SeatType { name: "二等卧", short: "yw" }),
    ("2", SeatType { name: "软座", short: "rz" }),
    ("1", SeatType { name: "硬座", short: "yz" }),
    ("W", SeatType { name: "无座", short: "wz" }),
    ("WZ", SeatType { name: "无座", short: "wz" }),
    ("H", SeatType { name: "其他", short: "qt" }),
];

/// Resolve a seat-type code.
///
/// Returns `None` for codes not in the table; callers treat that as a
/// decode error rather than guessing.
pub fn lookup(code: &str) -> Option<SeatType> {
    SEAT_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, t)| *t)
}
