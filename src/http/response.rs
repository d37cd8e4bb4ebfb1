/// What one geolocation round trip produced. Scenarios assert on the status
/// code and latency; the body is captured for logging and future assertions.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    pub time_ms: u64,
    pub size_bytes: usize,
}
