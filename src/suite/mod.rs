//! The concrete geolocation scenarios, one per probe the suite runs.

use crate::fixtures;
use crate::http::request::{Credential, GeolocateRequest};
use crate::scenario::{Expectation, Scenario};

pub const SUITE_NAME: &str = "Geolocation API Tests";

const RESPONSE_TIME_CEILING_MS: u64 = 2000;
const COORDINATE_SAMPLES: usize = 3;

// Known-good reference point (Los Angeles), reused across probes.
const REFERENCE_LAT: f64 = 34.052235;
const REFERENCE_LNG: f64 = -118.243683;

/// Build the full scenario list for one run. Randomized fixtures are sampled
/// fresh each time, so repeated runs exercise different coordinates.
pub fn scenarios() -> Vec<Scenario> {
    let mut scenarios = vec![Scenario::new(
        "positive geolocation",
        valid(fixtures::base_payload().to_json()),
        Expectation::status(200),
    )];

    scenarios.extend(parameterized(
        "dynamic coordinates",
        fixtures::random_coordinate_pairs(COORDINATE_SAMPLES),
        |&(lat, lng)| valid(fixtures::payload_with_location(lat, lng).to_json()),
        Expectation::status(200),
    ));

    scenarios.extend(parameterized(
        "dynamic accuracy",
        vec![fixtures::random_accuracy(), 200_000.0, 500_000.0],
        |&accuracy| valid(fixtures::payload_with_accuracy(accuracy).to_json()),
        Expectation::status(200),
    ));

    scenarios.push(Scenario::new(
        "invalid request format",
        valid(fixtures::malformed_payload()),
        Expectation::status(400),
    ));

    scenarios.push(Scenario::new(
        "invalid api key",
        GeolocateRequest::new(
            fixtures::payload_with_location(0.0, 0.0).to_json(),
            Credential::Invalid,
        ),
        Expectation::status(400),
    ));

    scenarios.push(Scenario::new(
        "unauthorized access",
        GeolocateRequest::new(
            fixtures::payload_with_location(REFERENCE_LAT, REFERENCE_LNG).to_json(),
            Credential::None,
        ),
        Expectation::status(403),
    ));

    scenarios.push(Scenario::new(
        "invalid json format",
        valid(fixtures::truncated_json_payload()),
        Expectation::status(400),
    ));

    scenarios.push(Scenario::new(
        "boundary coordinates",
        valid(fixtures::payload_with_location(90.0, 180.0).to_json()),
        Expectation::status(200),
    ));

    scenarios.push(Scenario::new(
        "response time",
        valid(fixtures::payload_with_location(REFERENCE_LAT, REFERENCE_LNG).to_json()),
        Expectation::status_within(200, RESPONSE_TIME_CEILING_MS),
    ));

    scenarios.push(Scenario::new(
        "minimum parameters",
        valid(fixtures::base_payload().to_json()),
        Expectation::status(200),
    ));

    scenarios.push(Scenario::new(
        "maximum parameters",
        valid(fixtures::payload_with_all_fields().to_json()),
        Expectation::status(200),
    ));

    scenarios
}

fn valid(body: String) -> GeolocateRequest {
    GeolocateRequest::new(body, Credential::Valid)
}

/// Expand a scenario template over a finite fixture sequence: one scenario
/// (and therefore one outcome) per tuple, indexed from 1.
fn parameterized<T>(
    name: &str,
    inputs: Vec<T>,
    build: impl Fn(&T) -> GeolocateRequest,
    expect: Expectation,
) -> Vec<Scenario> {
    inputs
        .iter()
        .enumerate()
        .map(|(idx, input)| Scenario::new(format!("{name} [{}]", idx + 1), build(input), expect))
        .collect()
}
