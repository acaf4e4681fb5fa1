//! SOAP response parser for UPnP control points

use super::envelope::find_child_with_suffix;
use super::{SoapBody, SoapEnvelope, SoapHeader};
use std::io::BufReader;
use xmltree::Element;

/// SOAP parsing error
#[derive(Debug, thiserror::Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    XmlError(#[from] xmltree::ParseError),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("Missing {0}Response element in SOAP Body")]
    MissingResponse(String),
}

/// Out-arguments of a UPnP action, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResponse {
    values: Vec<(String, String)>,
}

impl ActionResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an out-argument; a later value for the same name replaces
    /// the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The value of the only out-argument, when the action has exactly one.
    pub fn single_value(&self) -> Option<&str> {
        match self.values.as_slice() {
            [(_, value)] => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ActionResponse {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut response = ActionResponse::new();
        for (name, value) in iter {
            response.insert(name, value);
        }
        response
    }
}

/// Parses a complete SOAP envelope
pub fn parse_soap_envelope(xml: &[u8]) -> Result<SoapEnvelope, SoapParseError> {
    let reader = BufReader::new(xml);
    let root = Element::parse(reader)?;

    if !root.name.ends_with("Envelope") {
        return Err(SoapParseError::MissingEnvelope);
    }

    let header = find_child_with_suffix(&root, "Header").map(|e| SoapHeader { content: e.clone() });

    let body_elem = find_child_with_suffix(&root, "Body").ok_or(SoapParseError::MissingBody)?;

    Ok(SoapEnvelope {
        header,
        body: SoapBody {
            content: body_elem.clone(),
        },
    })
}

/// Extracts the out-arguments of `{action}Response` from an envelope.
///
/// Values are the trimmed text of each direct child element; an empty
/// element yields an empty string.
pub fn parse_action_response(
    envelope: &SoapEnvelope,
    action: &str,
) -> Result<ActionResponse, SoapParseError> {
    let response_name = format!("{}Response", action);
    let response_elem = envelope
        .body_child(&response_name)
        .ok_or_else(|| SoapParseError::MissingResponse(action.to_string()))?;

    Ok(response_elem
        .children
        .iter()
        .filter_map(|node| node.as_element())
        .map(|elem| {
            let value = elem
                .get_text()
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            (elem.name.clone(), value)
        })
        .collect())
}
