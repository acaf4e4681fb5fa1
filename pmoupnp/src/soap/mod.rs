//! # Module SOAP - client side of UPnP control
//!
//! This module provides what a control point needs to talk to a UPnP
//! service over SOAP:
//!
//! - ✅ Building action request envelopes
//! - ✅ Parsing response envelopes
//! - ✅ Extracting the out-arguments of an `{Action}Response`
//! - ✅ Decoding UPnP faults (`UPnPError` details)
//!
//! ## Architecture
//!
//! - [`SoapEnvelope`] : parsed SOAP envelope
//! - [`ActionResponse`] : out-arguments of an action, in document order
//! - [`UpnpError`] : fault detail returned by a device
//!
//! ## Example
//!
//! ```
//! use pmoupnp::soap::{build_soap_request, parse_soap_envelope, parse_action_response};
//!
//! let request = build_soap_request(
//!     "urn:schemas-upnp-org:service:AVTransport:1",
//!     "RemoveTrackRangeFromQueue",
//!     &[("InstanceID", "0"), ("StartingIndex", "3")],
//! ).unwrap();
//! assert!(request.contains("<StartingIndex>3</StartingIndex>"));
//!
//! let body = r#"<?xml version="1.0"?>
//! <s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
//!   <s:Body>
//!     <u:RemoveTrackRangeFromQueueResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">
//!       <NewUpdateID>42</NewUpdateID>
//!     </u:RemoveTrackRangeFromQueueResponse>
//!   </s:Body>
//! </s:Envelope>"#;
//!
//! let envelope = parse_soap_envelope(body.as_bytes()).unwrap();
//! let response = parse_action_response(&envelope, "RemoveTrackRangeFromQueue").unwrap();
//! assert_eq!(response.get("NewUpdateID"), Some("42"));
//! ```

mod builder;
mod envelope;
mod fault;
mod parser;

pub use builder::build_soap_request;
pub use envelope::{SoapBody, SoapEnvelope, SoapHeader};
pub use fault::{UpnpError, parse_upnp_error};
pub use parser::{ActionResponse, SoapParseError, parse_action_response, parse_soap_envelope};

/// Namespace of the SOAP 1.1 envelope.
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Encoding style required by the UPnP Device Architecture.
pub const SOAP_ENCODING_STYLE: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Standard UPnP control error codes, plus the AVTransport and
/// ContentDirectory codes a queue controller runs into.
pub mod error_codes {
    /// Invalid action
    pub const INVALID_ACTION: u32 = 401;

    /// Invalid arguments
    pub const INVALID_ARGS: u32 = 402;

    /// Action failed
    pub const ACTION_FAILED: u32 = 501;

    /// Argument value invalid
    pub const ARGUMENT_VALUE_INVALID: u32 = 600;

    /// Argument value out of range
    pub const ARGUMENT_VALUE_OUT_OF_RANGE: u32 = 601;

    /// Optional action not implemented
    pub const OPTIONAL_ACTION_NOT_IMPLEMENTED: u32 = 602;

    /// Out of memory
    pub const OUT_OF_MEMORY: u32 = 603;

    /// Human intervention required
    pub const HUMAN_INTERVENTION_REQUIRED: u32 = 604;

    /// String argument too long
    pub const STRING_ARGUMENT_TOO_LONG: u32 = 605;

    /// ContentDirectory: no such object
    pub const NO_SUCH_OBJECT: u32 = 701;

    /// AVTransport: invalid InstanceID
    pub const INVALID_INSTANCE_ID: u32 = 718;

    /// Short human readable label for a known code.
    pub fn describe(code: u32) -> Option<&'static str> {
        match code {
            INVALID_ACTION => Some("Invalid Action"),
            INVALID_ARGS => Some("Invalid Args"),
            ACTION_FAILED => Some("Action Failed"),
            ARGUMENT_VALUE_INVALID => Some("Argument Value Invalid"),
            ARGUMENT_VALUE_OUT_OF_RANGE => Some("Argument Value Out of Range"),
            OPTIONAL_ACTION_NOT_IMPLEMENTED => Some("Optional Action Not Implemented"),
            OUT_OF_MEMORY => Some("Out of Memory"),
            HUMAN_INTERVENTION_REQUIRED => Some("Human Intervention Required"),
            STRING_ARGUMENT_TOO_LONG => Some("String Argument Too Long"),
            NO_SUCH_OBJECT => Some("No Such Object"),
            INVALID_INSTANCE_ID => Some("Invalid InstanceID"),
            _ => None,
        }
    }
}
