//! Derived station lookups.

use std::collections::HashMap;

use serde::Serialize;

use super::decode::StationRecord;

/// The code/name pair returned by city and name lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationSummary {
    pub station_code: String,
    pub station_name: String,
}

impl StationSummary {
    fn of(record: &StationRecord) -> Self {
        Self {
            station_code: record.station_code.clone(),
            station_name: record.station_name.clone(),
        }
    }
}

/// Immutable station lookups, built once at startup.
///
/// Holds the telecode-keyed records plus three derived indexes. All derived
/// entries are value copies; nothing here is mutated after construction, so
/// the index can be shared freely across in-flight requests.
pub struct StationIndex {
    /// Primary: telecode → full record.
    by_code: HashMap<String, StationRecord>,

    /// City name → every station in that city.
    by_city: HashMap<String, Vec<StationSummary>>,

    /// City name → the city's canonical station (the member whose name
    /// equals the city name). Not every city has one.
    city_station: HashMap<String, StationSummary>,

    /// Station display name → code/name pair.
    by_name: HashMap<String, StationSummary>,
}

impl StationIndex {
    /// Build all derived indexes from a decoded station table.
    pub fn build(by_code: HashMap<String, StationRecord>) -> Self {
        let mut by_city: HashMap<String, Vec<StationSummary>> = HashMap::new();
        let mut city_station = HashMap::new();
        let mut by_name = HashMap::new();

        for record in by_code.values() {
            let summary = StationSummary::of(record);
            by_city
                .entry(record.city.clone())
                .or_default()
                .push(summary.clone());
            if record.station_name == record.city {
                city_station.insert(record.city.clone(), summary.clone());
            }
            by_name.insert(record.station_name.clone(), summary);
        }

        Self {
            by_code,
            by_city,
            city_station,
            by_name,
        }
    }

    /// Number of stations in the index.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the index holds no stations.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Is this telecode a known station?
    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Look up the full record for a telecode.
    pub fn by_code(&self, code: &str) -> Option<&StationRecord> {
        self.by_code.get(code)
    }

    /// All stations located in a city.
    pub fn stations_in_city(&self, city: &str) -> Option<&[StationSummary]> {
        self.by_city.get(city).map(Vec::as_slice)
    }

    /// The canonical station of a city, when one exists.
    pub fn city_station(&self, city: &str) -> Option<&StationSummary> {
        self.city_station.get(city)
    }

    /// Look up a station by display name. A trailing "站" is stripped
    /// before the lookup since callers often append it.
    pub fn by_name(&self, name: &str) -> Option<&StationSummary> {
        let name = name.strip_suffix('站').unwrap_or(name);
        self.by_name.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::decode::{decode_station_table, make_raw_station};

    fn beijing_index() -> StationIndex {
        let raw = [
            make_raw_station("北京", "BJP", "北京"),
            make_raw_station("北京南", "VNP", "北京"),
            make_raw_station("上海虹桥", "AOH", "上海"),
        ]
        .join("|");
        StationIndex::build(decode_station_table(&raw))
    }

    #[test]
    fn city_lookup_returns_all_members() {
        let index = beijing_index();
        let stations = index.stations_in_city("北京").unwrap();
        assert_eq!(stations.len(), 2);
        let codes: Vec<&str> = stations.iter().map(|s| s.station_code.as_str()).collect();
        assert!(codes.contains(&"BJP"));
        assert!(codes.contains(&"VNP"));
    }

    #[test]
    fn city_station_is_the_name_matching_member() {
        let index = beijing_index();
        let canonical = index.city_station("北京").unwrap();
        assert_eq!(canonical.station_code, "BJP");
        assert_eq!(canonical.station_name, "北京");
        // 上海虹桥 != 上海, so 上海 has no canonical station here.
        assert!(index.city_station("上海").is_none());
    }

    #[test]
    fn name_lookup_strips_trailing_suffix() {
        let index = beijing_index();
        assert_eq!(index.by_name("北京南").unwrap().station_code, "VNP");
        assert_eq!(index.by_name("北京南站").unwrap().station_code, "VNP");
        assert!(index.by_name("不存在").is_none());
    }

    #[test]
    fn misses_return_none() {
        let index = beijing_index();
        assert!(index.stations_in_city("广州").is_none());
        assert!(index.by_code("XXX").is_none());
        assert!(!index.contains_code("XXX"));
        assert!(index.contains_code("AOH"));
    }

    #[test]
    fn every_station_appears_in_its_city_exactly_once() {
        let index = beijing_index();
        for code in ["BJP", "VNP", "AOH"] {
            let record = index.by_code(code).unwrap();
            let members = index.stations_in_city(&record.city).unwrap();
            let hits = members
                .iter()
                .filter(|s| s.station_code == record.station_code)
                .count();
            assert_eq!(hits, 1, "station {code} should appear once in its city");
        }
    }
}
