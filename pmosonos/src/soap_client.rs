use std::time::Duration;

use pmoupnp::soap::{SoapEnvelope, build_soap_request, parse_soap_envelope};
use tracing::{debug, trace};
use ureq::Agent;

use crate::errors::ControlPointError;

/// Result of a SOAP call:
/// - HTTP status code
/// - raw XML body (always)
/// - parsed SOAP envelope if parsing succeeded
pub struct SoapCallResult {
    pub status: ureq::http::StatusCode,
    pub raw_body: String,
    pub envelope: Option<SoapEnvelope>,
}

/// Invoke a UPnP SOAP action on a control URL.
///
/// - `control_url`: full HTTP URL of the service control endpoint
/// - `service_type`: service URN, e.g. "urn:schemas-upnp-org:service:AVTransport:1"
/// - `action`: action name, e.g. "AddURIToQueue"
/// - `args`: list of (name, value) pairs, e.g. &[("InstanceID", "0")]
/// - `timeout`: global timeout covering the whole exchange (connection,
///   request, response body); `None` waits indefinitely
pub fn invoke_upnp_action_with_timeout(
    control_url: &str,
    service_type: &str,
    action: &str,
    args: &[(&str, &str)],
    timeout: Option<Duration>,
) -> Result<SoapCallResult, ControlPointError> {
    let http_error = |message: String| ControlPointError::Http {
        action: action.to_string(),
        url: control_url.to_string(),
        message,
    };

    let body_xml = build_soap_request(service_type, action, args)
        .map_err(|e| http_error(format!("failed to build SOAP request body: {}", e)))?;

    // 4xx/5xx are not errors here: SOAP faults come back as HTTP 500 and
    // their body is needed to decode the UPnP error.
    let config = Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(timeout)
        .build();

    let agent: Agent = config.into();

    let soap_action_header = format!(r#""{}#{}""#, service_type, action);

    debug!(url = control_url, action, "Sending SOAP request");
    trace!(body = %body_xml, "SOAP request body");

    let mut response = agent
        .post(control_url)
        .header("Content-Type", r#"text/xml; charset="utf-8""#)
        .header("SOAPAction", &soap_action_header)
        .send(body_xml)
        .map_err(|e| http_error(e.to_string()))?;

    let status = response.status();

    let raw_body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| http_error(format!("failed to read SOAP response body: {}", e)))?;

    trace!(status = status.as_u16(), body = %raw_body, "SOAP response");

    // A body that is not a SOAP envelope does not fail the call here; the
    // caller decides from the status and the missing envelope.
    let envelope = parse_soap_envelope(raw_body.as_bytes()).ok();

    Ok(SoapCallResult {
        status,
        raw_body,
        envelope,
    })
}
