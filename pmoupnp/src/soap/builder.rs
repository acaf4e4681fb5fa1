//! Construction of SOAP action requests

use xmltree::{Element, XMLNode};

use super::{SOAP_ENCODING_STYLE, SOAP_ENVELOPE_NS};

fn wrap_in_envelope(body_child: Element) -> Result<String, xmltree::Error> {
    let mut body = Element::new("s:Body");
    body.children.push(XMLNode::Element(body_child));

    let mut envelope = Element::new("s:Envelope");
    envelope
        .attributes
        .insert("xmlns:s".to_string(), SOAP_ENVELOPE_NS.to_string());
    envelope
        .attributes
        .insert("s:encodingStyle".to_string(), SOAP_ENCODING_STYLE.to_string());
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(false);
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Builds a UPnP SOAP request.
///
/// # Arguments
///
/// * `service_urn` - Service URN (ex: "urn:schemas-upnp-org:service:AVTransport:1")
/// * `action` - Action name (ex: "AddURIToQueue")
/// * `args` - In-arguments, in the order the service description declares them
///
/// Argument values are written as text nodes, so embedded XML (DIDL-Lite
/// metadata for instance) gets escaped by the emitter.
pub fn build_soap_request(
    service_urn: &str,
    action: &str,
    args: &[(&str, &str)],
) -> Result<String, xmltree::Error> {
    let request_name = format!("u:{}", action);
    let mut request_elem = Element::new(&request_name);
    request_elem
        .attributes
        .insert("xmlns:u".to_string(), service_urn.to_string());

    for (name, value) in args {
        let mut child = Element::new(name);
        child.children.push(XMLNode::Text((*value).to_string()));
        request_elem.children.push(XMLNode::Element(child));
    }

    wrap_in_envelope(request_elem)
}
