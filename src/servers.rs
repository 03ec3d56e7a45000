//! Static server fixture list for the web UI.
//!
//! These entries are display fixtures, not measurement inputs. The `ping`
//! column is a fixed plausibility number per city, unrelated to `/api/ping`.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ServerEntry {
    pub id: u32,
    pub name: &'static str,
    pub location: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lng: f64,
    /// Great-circle distance from the reference point, km.
    pub distance: u32,
    pub ping: u32,
}

pub const SERVER_LIST: &[ServerEntry] = &[
    ServerEntry {
        id: 1,
        name: "New York, US",
        location: "New York",
        country: "United States",
        lat: 40.7128,
        lng: -74.0060,
        distance: 0,
        ping: 12,
    },
    ServerEntry {
        id: 2,
        name: "London, UK",
        location: "London",
        country: "United Kingdom",
        lat: 51.5074,
        lng: -0.1278,
        distance: 5571,
        ping: 85,
    },
    ServerEntry {
        id: 3,
        name: "Tokyo, JP",
        location: "Tokyo",
        country: "Japan",
        lat: 35.6762,
        lng: 139.6503,
        distance: 10838,
        ping: 165,
    },
    ServerEntry {
        id: 4,
        name: "Sydney, AU",
        location: "Sydney",
        country: "Australia",
        lat: -33.8688,
        lng: 151.2093,
        distance: 15989,
        ping: 210,
    },
    ServerEntry {
        id: 5,
        name: "Frankfurt, DE",
        location: "Frankfurt",
        country: "Germany",
        lat: 50.1109,
        lng: 8.6821,
        distance: 6198,
        ping: 95,
    },
    ServerEntry {
        id: 6,
        name: "Singapore, SG",
        location: "Singapore",
        country: "Singapore",
        lat: 1.3521,
        lng: 103.8198,
        distance: 15322,
        ping: 180,
    },
    ServerEntry {
        id: 7,
        name: "Mumbai, IN",
        location: "Mumbai",
        country: "India",
        lat: 19.0760,
        lng: 72.8777,
        distance: 12568,
        ping: 145,
    },
    ServerEntry {
        id: 8,
        name: "São Paulo, BR",
        location: "São Paulo",
        country: "Brazil",
        lat: -23.5505,
        lng: -46.6333,
        distance: 7688,
        ping: 120,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_has_eight_entries() {
        assert_eq!(SERVER_LIST.len(), 8);
        assert_eq!(SERVER_LIST[0].id, 1);
        assert_eq!(SERVER_LIST[0].name, "New York, US");
        assert_eq!(SERVER_LIST[7].name, "São Paulo, BR");
    }

    #[test]
    fn test_ids_are_sequential() {
        for (i, entry) in SERVER_LIST.iter().enumerate() {
            assert_eq!(entry.id as usize, i + 1);
        }
    }

    #[test]
    fn test_fixture_serializes_with_expected_fields() {
        let json = serde_json::to_value(SERVER_LIST).unwrap();
        let first = &json[0];
        assert_eq!(first["id"], 1);
        assert_eq!(first["name"], "New York, US");
        assert_eq!(first["country"], "United States");
        assert_eq!(first["lat"], 40.7128);
        assert_eq!(first["lng"], -74.0060);
        assert_eq!(first["distance"], 0);
        assert_eq!(first["ping"], 12);
    }
}
