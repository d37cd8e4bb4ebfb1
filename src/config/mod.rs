//! Run configuration read from the process environment at suite start.

use std::env;
use std::time::Duration;

const API_KEY_ENV: &str = "GOOGLE_API_KEY";
const BASE_URL_ENV: &str = "GEOPROBE_BASE_URL";
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/geolocation/v1";

/// Bounds every call so a hung remote cannot stall the suite.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Read the run configuration. A missing or empty API key is a fatal
    /// setup error: the run must abort before any scenario executes.
    pub fn from_env() -> Result<Config, String> {
        Config::from_values(env::var(API_KEY_ENV).ok(), env::var(BASE_URL_ENV).ok())
    }

    fn from_values(api_key: Option<String>, base_url: Option<String>) -> Result<Config, String> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                format!("API key is not set. Please set the {API_KEY_ENV} environment variable.")
            })?;

        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Config {
            base_url,
            api_key,
            request_timeout: REQUEST_TIMEOUT,
        })
    }
}
