//! Decoding raw 12306 records into domain types.
//!
//! The fare sub-fields of a ticket row are packed: `yp_ex` carries the
//! ordered seat-type codes, `yp_info_new` one fixed-width price block per
//! code, and `seat_discount_info` fixed-width discount blocks. These
//! decoders are pure functions; any inconsistency inside one record is a
//! `DecodeError`, and a decode error fails the whole request rather than
//! producing a partially decoded ticket.

use std::collections::HashMap;

use crate::domain::{FareEntry, RouteStationInfo, TicketInfo, seat};
use crate::stations::StationIndex;

use super::types::{RawTicketRecord, RouteStationData};

/// Width of one price block in `yp_info_new`.
const PRICE_BLOCK_LEN: usize = 10;

/// Width of one discount block in `seat_discount_info`.
const DISCOUNT_BLOCK_LEN: usize = 5;

/// Amenity vocabulary decoded from `dw_flag`, in bitfield order.
const AMENITIES: [&str; 7] = [
    "智能动车组",
    "复兴号",
    "静音车厢",
    "温馨动卧",
    "动感号",
    "支持选铺",
    "老年优惠",
];

/// Error decoding an upstream record.
///
/// These indicate a defect in upstream data or in the station index, not
/// bad caller input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Seat-type code not in the fixed table
    #[error("unknown seat-type code: {0:?}")]
    UnknownSeatType(String),

    /// `yp_info_new` has no block for a seat-sequence position
    #[error("missing price block {index} in yp_info_new {yp_info_new:?}")]
    PriceBlockMissing { index: usize, yp_info_new: String },

    /// A price block's digit field failed to parse
    #[error("malformed price block: {0:?}")]
    BadPriceBlock(String),

    /// `seat_discount_info` is not a run of whole discount blocks
    #[error("malformed seat_discount_info: {0:?}")]
    BadDiscounts(String),

    /// A telecode on the ticket is not in the station index
    #[error("station telecode {0:?} not found in station index")]
    UnknownTelecode(String),

    /// A waypoint's sequence number failed to parse
    #[error("invalid route sequence number: {0:?}")]
    BadSequenceNumber(String),
}

/// Decode the discount table: seat-type code → discount percent.
///
/// `seat_discount_info` is a concatenation of 5-character blocks, each a
/// one-character seat-type code followed by four decimal digits. Partial
/// or non-numeric blocks are rejected outright instead of reproducing the
/// upstream client's lenient number parsing.
fn decode_discounts(seat_discount_info: &str) -> Result<HashMap<String, u32>, DecodeError> {
    let malformed = || DecodeError::BadDiscounts(seat_discount_info.to_string());

    if seat_discount_info.len() % DISCOUNT_BLOCK_LEN != 0 {
        return Err(malformed());
    }

    let mut discounts = HashMap::new();
    let mut rest = seat_discount_info;
    while !rest.is_empty() {
        let block = rest.get(..DISCOUNT_BLOCK_LEN).ok_or_else(malformed)?;
        let code = block.get(..1).ok_or_else(malformed)?;
        let percent: u32 = block[1..].parse().map_err(|_| malformed())?;
        discounts.insert(code.to_string(), percent);
        rest = &rest[DISCOUNT_BLOCK_LEN..];
    }
    Ok(discounts)
}

/// Decode the ordered seat-type code sequence from `yp_ex`.
///
/// Every `'0'` character is a delimiter, never data; empty segments are
/// discarded. So `"O0M0"` and `"O00M"` both decode to `["O", "M"]`.
fn decode_seat_sequence(yp_ex: &str) -> Vec<&str> {
    yp_ex.split('0').filter(|s| !s.is_empty()).collect()
}

/// Decode the price for seat-sequence position `index`.
///
/// `yp_info_new` holds one 10-character block per position, in sequence
/// order; the price is characters [1,5) of the block parsed as a base-10
/// integer. The remaining characters are not currently interpreted.
fn decode_price(yp_info_new: &str, index: usize) -> Result<u32, DecodeError> {
    let block = yp_info_new
        .get(index * PRICE_BLOCK_LEN..(index + 1) * PRICE_BLOCK_LEN)
        .ok_or_else(|| DecodeError::PriceBlockMissing {
            index,
            yp_info_new: yp_info_new.to_string(),
        })?;
    block
        .get(1..5)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| DecodeError::BadPriceBlock(block.to_string()))
}

/// Decode the per-seat-class fares of one ticket row.
///
/// One entry per seat class actually offered, in `yp_ex` order. Entries
/// are keyed by seat-type code: a repeated code overwrites the earlier
/// entry in place, keeping its original position.
pub fn extract_fares(record: &RawTicketRecord) -> Result<Vec<FareEntry>, DecodeError> {
    let discounts = decode_discounts(&record.seat_discount_info)?;
    let codes = decode_seat_sequence(&record.yp_ex);

    let mut fares: Vec<FareEntry> = Vec::with_capacity(codes.len());
    for (index, code) in codes.into_iter().enumerate() {
        let seat = seat::lookup(code)
            .ok_or_else(|| DecodeError::UnknownSeatType(code.to_string()))?;
        let entry = FareEntry {
            seat_name: seat.name.to_string(),
            short_code: seat.short.to_string(),
            seat_type_code: code.to_string(),
            availability: record.seat_count(seat.short).to_string(),
            price: decode_price(&record.yp_info_new, index)?,
            discount: discounts.get(code).copied(),
        };
        match fares.iter_mut().find(|f| f.seat_type_code == code) {
            Some(existing) => *existing = entry,
            None => fares.push(entry),
        }
    }
    Ok(fares)
}

/// Decode the `#`-delimited amenity bitfield.
///
/// Each check is tied to a token position; a list too short for a check
/// simply skips it. The token[0] pairing with the vocabulary is kept
/// exactly as the platform's own client decodes it.
pub fn decode_amenities(dw_flag: &str) -> Vec<String> {
    let tokens: Vec<&str> = dw_flag.split('#').collect();
    let mut out = Vec::new();

    if tokens.first() == Some(&"5") {
        out.push(AMENITIES[0]);
    }
    if tokens.get(1) == Some(&"1") {
        out.push(AMENITIES[1]);
    }
    if let Some(token) = tokens.get(2) {
        if token.starts_with('Q') {
            out.push(AMENITIES[2]);
        } else if token.starts_with('R') {
            out.push(AMENITIES[3]);
        }
    }
    if tokens.get(5) == Some(&"D") {
        out.push(AMENITIES[4]);
    }
    if let Some(token) = tokens.get(6)
        && *token != "z"
    {
        out.push(AMENITIES[5]);
    }
    if let Some(token) = tokens.get(7)
        && *token != "z"
    {
        out.push(AMENITIES[6]);
    }

    out.into_iter().map(String::from).collect()
}

/// Convert one decoded ticket row into a display-ready ticket.
///
/// The station index must already contain both telecodes; a miss is a
/// contract violation surfaced as a decode error.
pub fn convert_ticket(
    record: &RawTicketRecord,
    index: &StationIndex,
) -> Result<TicketInfo, DecodeError> {
    let from = index
        .by_code(&record.from_station_telecode)
        .ok_or_else(|| DecodeError::UnknownTelecode(record.from_station_telecode.clone()))?;
    let to = index
        .by_code(&record.to_station_telecode)
        .ok_or_else(|| DecodeError::UnknownTelecode(record.to_station_telecode.clone()))?;

    Ok(TicketInfo {
        train_no: record.train_no.clone(),
        start_train_code: record.station_train_code.clone(),
        start_time: record.start_time.clone(),
        arrive_time: record.arrive_time.clone(),
        duration: record.lishi.clone(),
        from_station_name: from.station_name.clone(),
        to_station_name: to.station_name.clone(),
        from_station_code: record.from_station_telecode.clone(),
        to_station_code: record.to_station_telecode.clone(),
        fares: extract_fares(record)?,
        amenities: decode_amenities(&record.dw_flag),
    })
}

/// Convert a batch of raw ticket rows.
///
/// The first decode error fails the whole batch; tickets are never
/// silently dropped or partially decoded.
pub fn convert_tickets(
    rows: &[String],
    index: &StationIndex,
) -> Result<Vec<TicketInfo>, DecodeError> {
    rows.iter()
        .map(|row| convert_ticket(&RawTicketRecord::decode_row(row), index))
        .collect()
}

/// Normalize raw route waypoints, preserving input order.
///
/// The origin (sequence index 0) has no arrival time upstream, so its
/// arrival is taken from its departure field.
pub fn convert_route_stations(
    waypoints: &[RouteStationData],
) -> Result<Vec<RouteStationInfo>, DecodeError> {
    waypoints
        .iter()
        .enumerate()
        .map(|(idx, wp)| {
            let sequence_number = wp
                .station_no
                .parse()
                .map_err(|_| DecodeError::BadSequenceNumber(wp.station_no.clone()))?;
            let arrival_time = if idx == 0 {
                wp.start_time.clone()
            } else {
                wp.arrive_time.clone()
            };
            Ok(RouteStationInfo {
                arrival_time,
                station_name: wp.station_name.clone(),
                stopover_duration: wp.stopover_time.clone(),
                sequence_number,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rail::types::tests::make_row;
    use crate::stations::{StationIndex, decode_station_table};

    fn index() -> StationIndex {
        let raw = [
            "@xx|北京南|VNP|beijingnan|bjn|0|0001|北京||",
            "@yy|上海虹桥|AOH|shanghaihongqiao|shh|1|0002|上海||",
        ]
        .join("|");
        StationIndex::build(decode_station_table(&raw))
    }

    fn make_record(fields: &[(usize, &str)]) -> RawTicketRecord {
        RawTicketRecord::decode_row(&make_row(fields))
    }

    #[test]
    fn discount_table_round_trip() {
        let discounts = decode_discounts("O0030M0015").unwrap();
        assert_eq!(discounts.len(), 2);
        assert_eq!(discounts["O"], 30);
        assert_eq!(discounts["M"], 15);
    }

    #[test]
    fn empty_discount_info_is_empty_table() {
        assert!(decode_discounts("").unwrap().is_empty());
    }

    #[test]
    fn partial_discount_block_is_rejected() {
        assert!(matches!(
            decode_discounts("O0030M00"),
            Err(DecodeError::BadDiscounts(_))
        ));
    }

    #[test]
    fn non_numeric_discount_is_rejected() {
        assert!(matches!(
            decode_discounts("O00x0"),
            Err(DecodeError::BadDiscounts(_))
        ));
    }

    #[test]
    fn seat_sequence_splits_on_zero() {
        assert_eq!(decode_seat_sequence("O0M0"), vec!["O", "M"]);
        // Consecutive delimiters produce empty segments, which are dropped.
        assert_eq!(decode_seat_sequence("O00M"), vec!["O", "M"]);
        assert_eq!(decode_seat_sequence(""), Vec::<&str>::new());
        // Two-character codes survive when not containing '0'.
        assert_eq!(decode_seat_sequence("WZ0"), vec!["WZ"]);
    }

    #[test]
    fn price_is_chars_one_to_five_of_block() {
        assert_eq!(decode_price("1012300000", 0).unwrap(), 123);
        assert_eq!(decode_price("O055350000M093550000", 1).unwrap(), 935);
    }

    #[test]
    fn price_block_past_end_is_error() {
        assert_eq!(
            decode_price("1012300000", 1),
            Err(DecodeError::PriceBlockMissing {
                index: 1,
                yp_info_new: "1012300000".to_string(),
            })
        );
    }

    #[test]
    fn non_numeric_price_is_error() {
        assert!(matches!(
            decode_price("1x12300000", 0),
            Err(DecodeError::BadPriceBlock(_))
        ));
    }

    #[test]
    fn fares_follow_seat_sequence_order() {
        let record = make_record(&[
            (30, "有"),   // ze_num
            (31, "12"),   // zy_num
            (34, "O0M0"),
            (39, "O055350000M093550000"),
            (54, "O0030"),
        ]);

        let fares = extract_fares(&record).unwrap();
        assert_eq!(fares.len(), 2);

        assert_eq!(fares[0].seat_type_code, "O");
        assert_eq!(fares[0].seat_name, "二等座");
        assert_eq!(fares[0].short_code, "ze");
        assert_eq!(fares[0].availability, "有");
        assert_eq!(fares[0].price, 553);
        assert_eq!(fares[0].discount, Some(30));

        assert_eq!(fares[1].seat_type_code, "M");
        assert_eq!(fares[1].seat_name, "一等座");
        assert_eq!(fares[1].availability, "12");
        assert_eq!(fares[1].price, 935);
        assert_eq!(fares[1].discount, None);
    }

    #[test]
    fn repeated_seat_code_overwrites_in_place() {
        let record = make_record(&[
            (34, "O0M0O0"),
            (39, "O011110000M022220000O033330000"),
        ]);

        let fares = extract_fares(&record).unwrap();
        assert_eq!(fares.len(), 2);
        // "O" keeps its first position but carries the later block's price.
        assert_eq!(fares[0].seat_type_code, "O");
        assert_eq!(fares[0].price, 333);
        assert_eq!(fares[1].seat_type_code, "M");
    }

    #[test]
    fn unknown_seat_code_is_error() {
        let record = make_record(&[(34, "X0"), (39, "1012300000")]);
        assert_eq!(
            extract_fares(&record),
            Err(DecodeError::UnknownSeatType("X".to_string()))
        );
    }

    #[test]
    fn missing_price_block_fails_extraction() {
        let record = make_record(&[(34, "O0M0"), (39, "O055350000")]);
        assert!(matches!(
            extract_fares(&record),
            Err(DecodeError::PriceBlockMissing { index: 1, .. })
        ));
    }

    #[test]
    fn amenity_predicates_by_position() {
        // token[0]=="5", token[1]=="1", token[2] starts with "Q",
        // token[5]=="D", token[6]=="z" (skip), token[7]!="z".
        let amenities = decode_amenities("5#1#Q##2#D#z#x");
        assert_eq!(
            amenities,
            vec!["智能动车组", "复兴号", "静音车厢", "动感号", "老年优惠"]
        );
    }

    #[test]
    fn amenity_r_token_selects_sleeper() {
        let amenities = decode_amenities("0#0#R1");
        assert_eq!(amenities, vec!["温馨动卧"]);
    }

    #[test]
    fn amenity_non_z_tail_tokens_included() {
        let amenities = decode_amenities("5#1#Q##D#x#x");
        // Tokens: ["5","1","Q","","D","x","x"]; token[5]=="x" fails the
        // "D" check, token[6]=="x" != "z" selects index 5, and there is
        // no token[7].
        assert_eq!(amenities, vec!["智能动车组", "复兴号", "静音车厢", "支持选铺"]);
    }

    #[test]
    fn short_flag_list_skips_checks() {
        assert_eq!(decode_amenities("5"), vec!["智能动车组"]);
        assert!(decode_amenities("").is_empty());
    }

    #[test]
    fn converts_full_ticket() {
        let record = make_record(&[
            (2, "240000G10336"),
            (3, "G103"),
            (6, "VNP"),
            (7, "AOH"),
            (8, "06:20"),
            (9, "12:58"),
            (10, "06:38"),
            (30, "有"),
            (34, "O0"),
            (39, "O055350000"),
            (46, "5#1#Q#"),
        ]);

        let ticket = convert_ticket(&record, &index()).unwrap();
        assert_eq!(ticket.train_no, "240000G10336");
        assert_eq!(ticket.start_train_code, "G103");
        assert_eq!(ticket.from_station_name, "北京南");
        assert_eq!(ticket.to_station_name, "上海虹桥");
        assert_eq!(ticket.from_station_code, "VNP");
        assert_eq!(ticket.to_station_code, "AOH");
        assert_eq!(ticket.duration, "06:38");
        assert_eq!(ticket.fares.len(), 1);
        assert_eq!(ticket.amenities, vec!["智能动车组", "复兴号", "静音车厢"]);
    }

    #[test]
    fn unknown_telecode_fails_conversion() {
        let record = make_record(&[(6, "XXX"), (7, "AOH")]);
        assert_eq!(
            convert_ticket(&record, &index()),
            Err(DecodeError::UnknownTelecode("XXX".to_string()))
        );
    }

    #[test]
    fn batch_fails_on_first_bad_row() {
        let good = make_row(&[(6, "VNP"), (7, "AOH")]);
        let bad = make_row(&[(6, "VNP"), (7, "AOH"), (34, "X0"), (39, "1012300000")]);
        assert!(convert_tickets(&[good.clone()], &index()).is_ok());
        assert!(convert_tickets(&[good, bad], &index()).is_err());
    }

    fn waypoint(arrive: &str, start: &str, name: &str, no: &str) -> RouteStationData {
        RouteStationData {
            arrive_time: arrive.to_string(),
            start_time: start.to_string(),
            station_name: name.to_string(),
            stopover_time: "----".to_string(),
            station_no: no.to_string(),
        }
    }

    #[test]
    fn route_origin_takes_departure_as_arrival() {
        let waypoints = vec![
            waypoint("----", "08:00", "北京南", "01"),
            waypoint("09:30", "09:33", "济南西", "02"),
        ];

        let route = convert_route_stations(&waypoints).unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route[0].arrival_time, "08:00");
        assert_eq!(route[0].sequence_number, 1);
        assert_eq!(route[1].arrival_time, "09:30");
        assert_eq!(route[1].sequence_number, 2);
        assert_eq!(route[1].station_name, "济南西");
    }

    #[test]
    fn route_bad_sequence_number_is_error() {
        let waypoints = vec![waypoint("----", "08:00", "北京南", "first")];
        assert_eq!(
            convert_route_stations(&waypoints),
            Err(DecodeError::BadSequenceNumber("first".to_string()))
        );
    }

    #[test]
    fn route_preserves_input_order() {
        let waypoints: Vec<_> = (1..=4)
            .map(|i| waypoint("10:00", "10:02", &format!("站{i}"), &i.to_string()))
            .collect();
        let route = convert_route_stations(&waypoints).unwrap();
        let names: Vec<&str> = route.iter().map(|r| r.station_name.as_str()).collect();
        assert_eq!(names, vec!["站1", "站2", "站3", "站4"]);
    }
}
