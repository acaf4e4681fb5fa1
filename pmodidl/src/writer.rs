//! Single-item DIDL-Lite documents, as sent in `EnqueuedURIMetaData`.

use quick_xml::escape::escape;

/// Namespace declarations written on the `DIDL-Lite` root element.
pub const DIDL_NAMESPACES: &[(&str, &str)] = &[
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:upnp", "urn:schemas-upnp-org:metadata-1-0/upnp/"),
    ("xmlns:r", "urn:schemas-rinconnetworks-com:metadata-1-0/"),
    ("xmlns", "urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"),
];

#[derive(Debug, Clone, PartialEq)]
struct DescEntry {
    id: String,
    namespace: String,
    value: String,
}

/// Builder for a DIDL-Lite document holding exactly one `item`.
///
/// The output is a single line without XML declaration, which is what
/// renderers expect in metadata arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemWriter {
    id: String,
    parent_id: String,
    restricted: bool,
    title: String,
    class: String,
    creator: Option<String>,
    album: Option<String>,
    resource: Option<(String, String)>,
    descriptions: Vec<DescEntry>,
}

impl ItemWriter {
    pub fn new(id: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: "-1".to_string(),
            restricted: true,
            title: String::new(),
            class: class.into(),
            creator: None,
            album: None,
            resource: None,
            descriptions: Vec::new(),
        }
    }

    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = parent_id.into();
        self
    }

    pub fn restricted(mut self, restricted: bool) -> Self {
        self.restricted = restricted;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn resource(mut self, url: impl Into<String>, protocol_info: impl Into<String>) -> Self {
        self.resource = Some((url.into(), protocol_info.into()));
        self
    }

    /// Adds a `<desc>` element (service descriptors, account tokens…).
    pub fn description(
        mut self,
        id: impl Into<String>,
        namespace: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.descriptions.push(DescEntry {
            id: id.into(),
            namespace: namespace.into(),
            value: value.into(),
        });
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<DIDL-Lite");
        for (name, value) in DIDL_NAMESPACES {
            xml.push_str(&format!(r#" {}="{}""#, name, value));
        }
        xml.push('>');

        xml.push_str(&format!(
            r#"<item id="{}" parentID="{}" restricted="{}">"#,
            escape(self.id.as_str()),
            escape(self.parent_id.as_str()),
            self.restricted
        ));

        if let Some((url, protocol_info)) = &self.resource {
            xml.push_str(&format!(
                r#"<res protocolInfo="{}">{}</res>"#,
                escape(protocol_info.as_str()),
                escape(url.as_str())
            ));
        }

        xml.push_str(&format!(
            "<dc:title>{}</dc:title>",
            escape(self.title.as_str())
        ));
        xml.push_str(&format!(
            "<upnp:class>{}</upnp:class>",
            escape(self.class.as_str())
        ));

        if let Some(creator) = &self.creator {
            xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape(creator.as_str())));
        }
        if let Some(album) = &self.album {
            xml.push_str(&format!("<upnp:album>{}</upnp:album>", escape(album.as_str())));
        }

        for desc in &self.descriptions {
            xml.push_str(&format!(
                r#"<desc id="{}" nameSpace="{}">{}</desc>"#,
                escape(desc.id.as_str()),
                escape(desc.namespace.as_str()),
                escape(desc.value.as_str())
            ));
        }

        xml.push_str("</item></DIDL-Lite>");
        xml
    }
}
