use pmoupnp::soap::{SoapParseError, UpnpError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlPointError {
    #[error("HTTP error calling {action} at {url}: {message}")]
    Http {
        action: String,
        url: String,
        message: String,
    },
    #[error("{0} failed with HTTP status {1} and body: {2}")]
    SoapStatus(String, u16, String),
    #[error("{action} returned UPnP error {error}")]
    UpnpFault { action: String, error: UpnpError },
    #[error("Soap Error: invalid envelope for action {0}: {1}")]
    SoapEnvelope(String, String),
    #[error("Missing {0} element in SOAP body")]
    UpnpMissingReturnValue(String),
    #[error("Invalid {0} value: {1}")]
    UpnpBadReturnValue(String, String),
    #[error("Invalid DIDL-Lite result: {0}")]
    Didl(#[from] pmodidl::DidlError),
    #[error(
        "Device reported {reported} track(s) added for {uri} at position {position} \
         ({accepted} accepted before)"
    )]
    InsertionRejected {
        uri: String,
        position: u32,
        reported: u32,
        accepted: usize,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ControlPointError {
    pub fn upnp_missing_return_value(value: &str) -> Self {
        ControlPointError::UpnpMissingReturnValue(value.to_string())
    }

    pub fn upnp_bad_return_value(name: &str, value: &str) -> Self {
        ControlPointError::UpnpBadReturnValue(name.to_string(), value.to_string())
    }

    pub fn soap_envelope(action: &str, err: SoapParseError) -> Self {
        ControlPointError::SoapEnvelope(action.to_string(), err.to_string())
    }

    /// The UPnP fault code, when the device rejected the call with one.
    pub fn upnp_error_code(&self) -> Option<u32> {
        match self {
            ControlPointError::UpnpFault { error, .. } => Some(error.error_code),
            _ => None,
        }
    }
}
