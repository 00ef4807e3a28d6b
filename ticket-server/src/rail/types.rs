//! 12306 API response DTOs and the raw ticket row.
//!
//! The query endpoints wrap their payload in a common JSON envelope; the
//! ticket payload itself is a list of `|`-delimited rows decoded purely by
//! position. `Option` and `#[serde(default)]` are used liberally because
//! the platform omits fields rather than sending null in many cases.

use serde::Deserialize;

/// Envelope of `/otn/leftTicket/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeftTicketReply {
    /// Absent when the query itself was rejected upstream.
    pub data: Option<LeftTicketData>,
}

/// Payload of a left-ticket query.
#[derive(Debug, Clone, Deserialize)]
pub struct LeftTicketData {
    /// Raw `|`-delimited ticket rows.
    #[serde(default)]
    pub result: Vec<String>,
}

/// Envelope of `/otn/czxx/queryByTrainNo`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteReply {
    pub data: Option<RouteReplyData>,
}

/// Payload of a route query.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteReplyData {
    /// Waypoints in route order.
    #[serde(default)]
    pub data: Vec<RouteStationData>,
}

/// One raw waypoint of a train's route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStationData {
    /// Arrival time at this stop. Meaningless for the origin, where the
    /// platform sends a placeholder.
    #[serde(default)]
    pub arrive_time: String,

    /// Departure time from this stop.
    #[serde(default)]
    pub start_time: String,

    #[serde(default)]
    pub station_name: String,

    /// Stop duration as supplied, e.g. "3分钟" or "----".
    #[serde(default)]
    pub stopover_time: String,

    /// 1-based sequence number, as a decimal string.
    #[serde(default)]
    pub station_no: String,
}

/// One ticket row, decoded from its 57 `|`-separated positions.
///
/// Position layout of a row (0-based); unnamed positions are reserved or
/// unused by this server:
///
/// ```text
///  0 secret_str          1 button_text_info    2 train_no
///  3 station_train_code  4 start_station_telecode
///  5 end_station_telecode                      6 from_station_telecode
///  7 to_station_telecode 8 start_time          9 arrive_time
/// 10 lishi              11 can_web_buy        12 yp_info
/// 13 start_train_date   14 train_seat_feature 15 location_code
/// 16 from_station_no    17 to_station_no      18 is_support_card
/// 19 controlled_train_flag
/// 20 gg_num  21 gr_num  22 qt_num  23 rw_num  24 rz_num  25 tz_num
/// 26 wz_num  27 yb_num  28 yw_num  29 yz_num  30 ze_num  31 zy_num
/// 32 swz_num 33 srrb_num
/// 34 yp_ex              35 seat_types         36 exchange_train_flag
/// 37 houbu_train_flag   38 houbu_seat_limit   39 yp_info_new
/// 40-45 (reserved)      46 dw_flag            47 (reserved)
/// 48 stopcheck_time     49 country_flag       50 local_arrive_time
/// 51 local_start_time   52 (reserved)         53 bed_level_info
/// 54 seat_discount_info 55 sale_time          56 (reserved)
/// ```
///
/// A shift of one position silently corrupts every downstream field, so
/// this table is the contract. Rows with fewer tokens than positions leave
/// the trailing fields empty; that is tolerated, not rejected.
#[derive(Debug, Clone, Default)]
pub struct RawTicketRecord {
    pub train_no: String,
    pub station_train_code: String,
    pub start_station_telecode: String,
    pub end_station_telecode: String,
    pub from_station_telecode: String,
    pub to_station_telecode: String,
    pub start_time: String,
    pub arrive_time: String,
    pub lishi: String,

    // Per-seat-class availability, keyed by short code + "_num" upstream.
    pub gg_num: String,
    pub gr_num: String,
    pub qt_num: String,
    pub rw_num: String,
    pub rz_num: String,
    pub tz_num: String,
    pub wz_num: String,
    pub yb_num: String,
    pub yw_num: String,
    pub yz_num: String,
    pub ze_num: String,
    pub zy_num: String,
    pub swz_num: String,
    pub srrb_num: String,

    /// Packed seat-type code sequence.
    pub yp_ex: String,
    /// Packed per-seat price blocks, aligned with `yp_ex`.
    pub yp_info_new: String,
    /// `#`-delimited amenity bitfield.
    pub dw_flag: String,
    /// Packed per-seat discount blocks.
    pub seat_discount_info: String,
}

impl RawTicketRecord {
    /// Decode one `|`-delimited row by position.
    pub fn decode_row(row: &str) -> Self {
        let tokens: Vec<&str> = row.split('|').collect();
        let field = |idx: usize| tokens.get(idx).copied().unwrap_or("").to_string();

        Self {
            train_no: field(2),
            station_train_code: field(3),
            start_station_telecode: field(4),
            end_station_telecode: field(5),
            from_station_telecode: field(6),
            to_station_telecode: field(7),
            start_time: field(8),
            arrive_time: field(9),
            lishi: field(10),
            gg_num: field(20),
            gr_num: field(21),
            qt_num: field(22),
            rw_num: field(23),
            rz_num: field(24),
            tz_num: field(25),
            wz_num: field(26),
            yb_num: field(27),
            yw_num: field(28),
            yz_num: field(29),
            ze_num: field(30),
            zy_num: field(31),
            swz_num: field(32),
            srrb_num: field(33),
            yp_ex: field(34),
            yp_info_new: field(39),
            dw_flag: field(46),
            seat_discount_info: field(54),
        }
    }

    /// Availability field for a seat-class short code, copied verbatim.
    ///
    /// Unknown short codes yield an empty string; the seat-type table is
    /// the only source of short codes, so that case means a table bug.
    pub fn seat_count(&self, short: &str) -> &str {
        match short {
            "swz" => &self.swz_num,
            "tz" => &self.tz_num,
            "zy" => &self.zy_num,
            "ze" => &self.ze_num,
            "gr" => &self.gr_num,
            "srrb" => &self.srrb_num,
            "rw" => &self.rw_num,
            "yw" => &self.yw_num,
            "rz" => &self.rz_num,
            "yz" => &self.yz_num,
            "wz" => &self.wz_num,
            "qt" => &self.qt_num,
            "gg" => &self.gg_num,
            "yb" => &self.yb_num,
            _ => "",
        }
    }
}
