/// Which API key, if any, to attach to a call as the `key` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    /// The key from the run configuration.
    Valid,
    /// A deliberately bogus key, for probing rejection behavior.
    Invalid,
    /// No `key` parameter at all.
    None,
}

/// One outbound geolocation call: a raw body plus a credential mode. The body
/// is sent verbatim, including deliberately malformed text.
#[derive(Debug, Clone)]
pub struct GeolocateRequest {
    pub body: String,
    pub credential: Credential,
}

impl GeolocateRequest {
    pub fn new(body: impl Into<String>, credential: Credential) -> GeolocateRequest {
        GeolocateRequest {
            body: body.into(),
            credential,
        }
    }
}
