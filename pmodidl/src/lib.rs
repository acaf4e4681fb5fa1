//! # pmodidl - DIDL-Lite Parser
//!
//! Parser and writer for the DIDL-Lite format used by UPnP/DLNA
//! ContentDirectory responses and by the `…MetaData` arguments of
//! AVTransport actions.
//!
//! Element names are matched both with and without their namespace prefix
//! (`dc:title` and `title`), as renderers are not consistent about it.

use serde::Deserialize;
use thiserror::Error;

mod writer;

pub use writer::{DIDL_NAMESPACES, ItemWriter};

/// Error raised while decoding a DIDL-Lite document
#[derive(Debug, Error)]
pub enum DidlError {
    #[error("Invalid DIDL-Lite document: {0}")]
    Decode(#[from] quick_xml::de::DeError),
}

// ============= DIDL-Lite structures =============

/// Root of a DIDL-Lite document
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename = "DIDL-Lite")]
pub struct DIDLLite {
    #[serde(rename = "container", default)]
    pub containers: Vec<Container>,

    #[serde(rename = "item", default)]
    pub items: Vec<Item>,
}

/// Container which may hold other containers or items
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Container {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@parentID", default)]
    pub parent_id: String,

    #[serde(rename = "@childCount", default)]
    pub child_count: Option<String>,

    #[serde(rename = "dc:title", alias = "title", default)]
    pub title: String,

    #[serde(rename = "upnp:class", alias = "class", default)]
    pub class: String,

    #[serde(rename = "container", default)]
    pub containers: Vec<Container>,

    #[serde(rename = "item", default)]
    pub items: Vec<Item>,
}

/// Item describing a single playable object
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Item {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@parentID", default)]
    pub parent_id: String,

    #[serde(rename = "@restricted", default)]
    pub restricted: Option<String>,

    #[serde(rename = "dc:title", alias = "title", default)]
    pub title: String,

    #[serde(rename = "dc:creator", alias = "creator", default)]
    pub creator: Option<String>,

    #[serde(rename = "upnp:class", alias = "class", default)]
    pub class: String,

    #[serde(rename = "upnp:artist", alias = "artist", default)]
    pub artist: Option<String>,

    #[serde(rename = "upnp:album", alias = "album", default)]
    pub album: Option<String>,

    #[serde(rename = "upnp:albumArtURI", alias = "albumArtURI", default)]
    pub album_art: Option<String>,

    #[serde(
        rename = "upnp:originalTrackNumber",
        alias = "originalTrackNumber",
        default
    )]
    pub original_track_number: Option<String>,

    #[serde(rename = "res", default)]
    pub resources: Vec<Resource>,

    #[serde(rename = "desc", default)]
    pub descriptions: Vec<Description>,
}

/// Media resource of an item
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Resource {
    #[serde(rename = "@protocolInfo", default)]
    pub protocol_info: String,

    #[serde(rename = "@duration", default)]
    pub duration: Option<String>,

    #[serde(rename = "$text", default)]
    pub url: String,
}

/// Vendor descriptor attached to an item (`<desc>`)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Description {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,

    #[serde(rename = "@nameSpace", default)]
    pub namespace: Option<String>,

    #[serde(rename = "$text", default)]
    pub value: String,
}

// ============= Methods =============

impl DIDLLite {
    /// Parses a DIDL-Lite document. Blank input yields an empty document.
    pub fn parse(input: &str) -> Result<Self, DidlError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(DIDLLite::default());
        }
        Ok(quick_xml::de::from_str(trimmed)?)
    }

    /// Iterates over every item, top-level ones first, then those nested in
    /// containers.
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        AllItemsIter::new(&self.containers, &self.items)
    }
}

impl Item {
    /// First resource of the item, the one renderers play.
    pub fn primary_resource(&self) -> Option<&Resource> {
        self.resources.first()
    }

    /// URL of the primary resource, or an empty string when the item has none.
    pub fn primary_url(&self) -> &str {
        self.primary_resource()
            .map(|res| res.url.trim())
            .unwrap_or_default()
    }
}

// ============= Iterators =============

struct AllItemsIter<'a> {
    containers: Vec<&'a Container>,
    current_items: std::slice::Iter<'a, Item>,
}

impl<'a> AllItemsIter<'a> {
    fn new(containers: &'a [Container], items: &'a [Item]) -> Self {
        Self {
            containers: containers.iter().rev().collect(),
            current_items: items.iter(),
        }
    }
}

impl<'a> Iterator for AllItemsIter<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current_items.next() {
                return Some(item);
            }

            let container = self.containers.pop()?;
            self.containers.extend(container.containers.iter().rev());
            self.current_items = container.items.iter();
        }
    }
}
