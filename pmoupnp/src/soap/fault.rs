//! Decoding of SOAP faults returned by UPnP devices

use std::fmt;

use super::SoapEnvelope;
use super::envelope::find_child_with_suffix;

/// UPnP error carried in the `detail` of a SOAP fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpnpError {
    pub error_code: u32,
    pub error_description: String,
}

impl fmt::Display for UpnpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error_description.is_empty() {
            match super::error_codes::describe(self.error_code) {
                Some(label) => write!(f, "{} ({})", self.error_code, label),
                None => write!(f, "{}", self.error_code),
            }
        } else {
            write!(f, "{}: {}", self.error_code, self.error_description)
        }
    }
}

/// Extracts the UPnP error of a fault envelope, if any.
///
/// Returns `None` when the body holds no `Fault`, or when the fault has no
/// parsable `UPnPError/errorCode`.
pub fn parse_upnp_error(envelope: &SoapEnvelope) -> Option<UpnpError> {
    let fault = envelope.body_child("Fault")?;
    let detail = find_child_with_suffix(fault, "detail")?;
    let upnp_error = find_child_with_suffix(detail, "UPnPError")?;

    let error_code = find_child_with_suffix(upnp_error, "errorCode")?
        .get_text()?
        .trim()
        .parse::<u32>()
        .ok()?;

    let error_description = find_child_with_suffix(upnp_error, "errorDescription")
        .and_then(|e| e.get_text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    Some(UpnpError {
        error_code,
        error_description,
    })
}
