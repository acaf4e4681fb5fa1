//! SOAP envelope structures

use xmltree::Element;

/// Complete SOAP envelope
#[derive(Debug, Clone)]
pub struct SoapEnvelope {
    /// Optional SOAP header
    pub header: Option<SoapHeader>,

    /// SOAP body holding the action response or a fault
    pub body: SoapBody,
}

/// SOAP header
#[derive(Debug, Clone)]
pub struct SoapHeader {
    pub content: Element,
}

/// SOAP body
#[derive(Debug, Clone)]
pub struct SoapBody {
    pub content: Element,
}

impl SoapEnvelope {
    pub fn new(body: SoapBody) -> Self {
        Self { header: None, body }
    }

    /// Returns the first element child of the body whose name ends with `suffix`.
    pub fn body_child(&self, suffix: &str) -> Option<&Element> {
        find_child_with_suffix(&self.body.content, suffix)
    }
}

/// Finds the first element child of `parent` whose name ends with `suffix`.
///
/// Devices are inconsistent about namespace prefixes, so matching is done
/// on the suffix of the local name.
pub(crate) fn find_child_with_suffix<'a>(parent: &'a Element, suffix: &str) -> Option<&'a Element> {
    parent
        .children
        .iter()
        .find_map(|node| node.as_element().filter(|e| e.name.ends_with(suffix)))
}
