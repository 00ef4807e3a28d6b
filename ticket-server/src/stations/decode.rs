//! Station table decoding.
//!
//! 12306 publishes its station list as one flat `|`-delimited string with
//! no record separator: fields belong to a station purely by counting, ten
//! fields per station.

use std::collections::HashMap;

/// Number of fields per station in the flat table.
const FIELDS_PER_STATION: usize = 10;

/// One station from the 12306 station table.
///
/// Field names and order follow the upstream dump. `station_code` is the
/// telecode used in ticket and route queries; `code` is a separate numeric
/// identifier. `r1`/`r2` are trailing fields with no known meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub station_id: String,
    pub station_name: String,
    pub station_code: String,
    pub station_pinyin: String,
    pub station_short: String,
    pub station_index: String,
    pub code: String,
    pub city: String,
    pub r1: String,
    pub r2: String,
}

/// Decode the flat station table into a telecode-keyed map.
///
/// The input is split on `|` and partitioned into consecutive runs of
/// exactly ten fields. A trailing partial run is dropped, as is any record
/// whose `station_code` is empty. Duplicate telecodes keep the last record
/// seen (codes are expected unique upstream).
pub fn decode_station_table(raw: &str) -> HashMap<String, StationRecord> {
    let fields: Vec<&str> = raw.split('|').collect();

    let mut stations = HashMap::new();
    for chunk in fields.chunks_exact(FIELDS_PER_STATION) {
        let record = StationRecord {
            station_id: chunk[0].to_string(),
            station_name: chunk[1].to_string(),
            station_code: chunk[2].to_string(),
            station_pinyin: chunk[3].to_string(),
            station_short: chunk[4].to_string(),
            station_index: chunk[5].to_string(),
            code: chunk[6].to_string(),
            city: chunk[7].to_string(),
            r1: chunk[8].to_string(),
            r2: chunk[9].to_string(),
        };
        if record.station_code.is_empty() {
            continue;
        }
        stations.insert(record.station_code.clone(), record);
    }
    stations
}

#[cfg(test)]
pub(crate) fn make_raw_station(name: &str, code: &str, city: &str) -> String {
    format!("@xx|{name}|{code}|pinyin|short|0|0001|{city}||")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// N complete groups with distinct non-empty telecodes decode to
        /// exactly N records, regardless of a trailing partial group.
        #[test]
        fn complete_groups_all_decoded(n in 0usize..30, partial in 0usize..FIELDS_PER_STATION) {
            let mut fields = Vec::new();
            for i in 0..n {
                let code = format!("S{i:02}");
                fields.push(make_raw_station(&format!("站{i}"), &code, "城"));
            }
            for j in 0..partial {
                fields.push(format!("extra{j}"));
            }
            let raw = fields.join("|");

            let stations = decode_station_table(&raw);
            prop_assert_eq!(stations.len(), n);
        }
    }
}
