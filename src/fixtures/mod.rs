//! Request fixtures for the geolocation endpoint.
//!
//! Builders produce the JSON bodies the scenarios send; random providers
//! supply coordinate and accuracy inputs for the parameterized scenarios.
//! Out-of-range values are passed through verbatim: probing how the remote
//! responds to them is the suite's job, not the fixture layer's.

use rand::Rng;
use serde::Serialize;

const HOME_MOBILE_COUNTRY_CODE: u32 = 310;
const HOME_MOBILE_NETWORK_CODE: u32 = 410;
const RADIO_TYPE: &str = "gsm";
const CARRIER: &str = "Vodafone";

const MIN_ACCURACY: f64 = 100_000.0;
const MAX_ACCURACY: f64 = 500_000.0;

/// Wire payload for a `/geolocate` call. Optional sections are omitted from
/// the body entirely rather than serialized as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocatePayload {
    pub home_mobile_country_code: u32,
    pub home_mobile_network_code: u32,
    pub radio_type: String,
    pub carrier: String,
    pub consider_ip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_towers: Option<Vec<CellTower>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_access_points: Option<Vec<WifiAccessPoint>>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellTower {
    pub cell_id: u32,
    pub location_area_code: u32,
    pub mobile_country_code: u32,
    pub mobile_network_code: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiAccessPoint {
    pub mac_address: String,
    pub signal_strength: i32,
    pub signal_to_noise_ratio: u32,
}

impl GeolocatePayload {
    /// Serialize to the request body text. Field order is fixed by the struct
    /// declaration, so identical inputs produce byte-identical output.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// The minimum field set the remote accepts: carrier identification plus
/// `considerIp`, no optional sections.
pub fn base_payload() -> GeolocatePayload {
    GeolocatePayload {
        home_mobile_country_code: HOME_MOBILE_COUNTRY_CODE,
        home_mobile_network_code: HOME_MOBILE_NETWORK_CODE,
        radio_type: RADIO_TYPE.to_string(),
        carrier: CARRIER.to_string(),
        consider_ip: true,
        location: None,
        accuracy: None,
        cell_towers: None,
        wifi_access_points: None,
    }
}

/// Base payload with an explicit location. The coordinates are not range
/// checked here.
pub fn payload_with_location(lat: f64, lng: f64) -> GeolocatePayload {
    GeolocatePayload {
        location: Some(Location { lat, lng }),
        ..base_payload()
    }
}

/// Base payload with an explicit accuracy field.
pub fn payload_with_accuracy(accuracy: f64) -> GeolocatePayload {
    GeolocatePayload {
        accuracy: Some(accuracy),
        ..base_payload()
    }
}

/// Base payload plus every optional section: one cell tower and one Wi-Fi
/// access point.
pub fn payload_with_all_fields() -> GeolocatePayload {
    GeolocatePayload {
        cell_towers: Some(vec![CellTower {
            cell_id: 1234,
            location_area_code: 5678,
            mobile_country_code: HOME_MOBILE_COUNTRY_CODE,
            mobile_network_code: HOME_MOBILE_NETWORK_CODE,
        }]),
        wifi_access_points: Some(vec![WifiAccessPoint {
            mac_address: "01:23:45:67:89:AB".to_string(),
            signal_strength: -65,
            signal_to_noise_ratio: 40,
        }]),
        ..base_payload()
    }
}

/// A body that is not JSON at all.
pub fn malformed_payload() -> String {
    "{invalidJson}".to_string()
}

/// A body that starts as JSON but is cut off mid-value.
pub fn truncated_json_payload() -> String {
    "{ \"invalid\": }".to_string()
}

/// `count` independent (latitude, longitude) pairs, latitude uniform in
/// [-90, 90) and longitude uniform in [-180, 180). No uniqueness guarantee.
pub fn random_coordinate_pairs(count: usize) -> Vec<(f64, f64)> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            (
                rng.random_range(-90.0..90.0),
                rng.random_range(-180.0..180.0),
            )
        })
        .collect()
}

/// A uniform accuracy sample in [100000, 500000).
pub fn random_accuracy() -> f64 {
    rand::rng().random_range(MIN_ACCURACY..MAX_ACCURACY)
}
