use std::time::Instant;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::config::Config;

use super::request::{Credential, GeolocateRequest};
use super::response::ApiResponse;
use super::{Transport, TransportError, TransportErrorKind};

const GEOLOCATE_PATH: &str = "/geolocate";
const KEY_PARAM: &str = "key";
const INVALID_API_KEY: &str = "INVALID_API_KEY";

/// The reqwest-backed transport. One client instance is shared across the
/// whole run; the per-request timeout comes from the run configuration.
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<HttpTransport, String> {
        let endpoint = format!("{}{GEOLOCATE_PATH}", config.base_url);
        let endpoint = Url::parse(&endpoint)
            .map_err(|err| format!("Invalid geolocation endpoint `{endpoint}`: {err}"))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| format!("Failed to build HTTP client: {err}"))?;

        Ok(HttpTransport {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    fn request_url(&self, credential: Credential) -> Url {
        let mut url = self.endpoint.clone();
        match credential {
            Credential::Valid => {
                url.query_pairs_mut().append_pair(KEY_PARAM, &self.api_key);
            }
            Credential::Invalid => {
                url.query_pairs_mut().append_pair(KEY_PARAM, INVALID_API_KEY);
            }
            Credential::None => {}
        }
        url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &GeolocateRequest) -> Result<ApiResponse, TransportError> {
        let url = self.request_url(request.credential);

        info!(body = %request.body, "sending geolocation request");

        let started = Instant::now();
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body.clone())
            .send()
            .await
            .map_err(|err| TransportError::new(classify(&err), err.to_string()))?;
        let elapsed = started.elapsed().as_millis() as u64;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let bytes = response.bytes().await.map_err(|err| {
            TransportError::new(
                TransportErrorKind::Read,
                format!("Failed to read response: {err}"),
            )
        })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        let response = ApiResponse {
            status: status.as_u16(),
            status_text,
            body,
            time_ms: elapsed,
            size_bytes: bytes.len(),
        };

        info!(
            status = response.status,
            status_text = %response.status_text,
            time_ms = response.time_ms,
            size_bytes = response.size_bytes,
            "received geolocation response"
        );
        debug!(body = %response.body, "response body");

        Ok(response)
    }
}

fn classify(err: &reqwest::Error) -> TransportErrorKind {
    if err.is_timeout() {
        return TransportErrorKind::Timeout;
    }

    let message = err.to_string().to_ascii_lowercase();
    if message.contains("dns") || message.contains("failed to lookup address") {
        return TransportErrorKind::Dns;
    }
    if message.contains("tls") || message.contains("ssl") || message.contains("certificate") {
        return TransportErrorKind::Tls;
    }
    if err.is_connect() {
        return TransportErrorKind::Connect;
    }

    TransportErrorKind::Read
}
