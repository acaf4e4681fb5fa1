//! In-memory zone player used by the integration tests.
//!
//! It keeps a queue and an `UpdateID` counter, checks tokens on mutating
//! actions like a real device, and records every call it receives.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;

use pmosonos::{ActionResponse, ControlPointError, RemoteInvoker, Service};
use pmoupnp::soap::UpnpError;

/// Fault code returned for a stale `UpdateID`.
pub const STALE_UPDATE_ID: u32 = 412;
/// Fault code returned for an index outside the queue.
pub const INVALID_INDEX: u32 = 701;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeTrack {
    pub uri: String,
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl FakeTrack {
    pub fn numbered(i: usize) -> Self {
        FakeTrack {
            uri: format!("x-file-cifs://nas/music/track{:03}.flac", i),
            title: format!("Track {}", i),
            artist: format!("Artist {}", i % 5),
            album: format!("Album {}", i / 10),
        }
    }

    fn from_uri(uri: &str) -> Self {
        FakeTrack {
            uri: uri.to_string(),
            title: uri.rsplit('/').next().unwrap_or(uri).to_string(),
            artist: String::new(),
            album: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub service: Service,
    pub action: String,
    pub args: Vec<(String, String)>,
}

impl Call {
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
struct DeviceState {
    tracks: Vec<FakeTrack>,
    update_id: u32,
    calls: Vec<Call>,
    rejected_uris: HashSet<String>,
    album_size: u32,
    fail_browse_from: Option<u32>,
    fail_removal_after: Option<usize>,
    removals: usize,
    shrink_after_pages: Option<(usize, usize)>,
    pages_served: usize,
}

#[derive(Debug)]
pub struct FakeDevice {
    state: RefCell<DeviceState>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::with_tracks(0)
    }

    pub fn with_tracks(count: usize) -> Self {
        FakeDevice {
            state: RefCell::new(DeviceState {
                tracks: (0..count).map(FakeTrack::numbered).collect(),
                update_id: 40,
                album_size: 3,
                ..DeviceState::default()
            }),
        }
    }

    pub fn update_id(&self) -> String {
        self.state.borrow().update_id.to_string()
    }

    /// Simulates another controller changing the queue.
    pub fn bump_update_id(&self) {
        self.state.borrow_mut().update_id += 1;
    }

    pub fn uris(&self) -> Vec<String> {
        self.state.borrow().tracks.iter().map(|t| t.uri.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().tracks.len()
    }

    /// The device accepts the call but reports no track added for `uri`.
    pub fn reject_uri(&self, uri: &str) {
        self.state.borrow_mut().rejected_uris.insert(uri.to_string());
    }

    pub fn set_album_size(&self, size: u32) {
        self.state.borrow_mut().album_size = size;
    }

    /// Browses of the queue entries starting at or after `start` fail.
    pub fn fail_browse_from(&self, start: u32) {
        self.state.borrow_mut().fail_browse_from = Some(start);
    }

    /// Once `pages` queue pages have been served, the queue is cut down to
    /// its first `keep` tracks, as if another controller removed the rest.
    pub fn shrink_after_pages(&self, pages: usize, keep: usize) {
        self.state.borrow_mut().shrink_after_pages = Some((pages, keep));
    }

    /// Range removals after the first `count` ones fail.
    pub fn fail_removal_after(&self, count: usize) {
        self.state.borrow_mut().fail_removal_after = Some(count);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn calls_to(&self, action: &str) -> Vec<Call> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.action == action)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }
}

fn fault(action: &str, code: u32, description: &str) -> ControlPointError {
    ControlPointError::UpnpFault {
        action: action.to_string(),
        error: UpnpError {
            error_code: code,
            error_description: description.to_string(),
        },
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn didl_page(tracks: &[FakeTrack], first_index: usize) -> String {
    let mut xml = String::from(
        r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/">"#,
    );
    for (offset, track) in tracks.iter().enumerate() {
        xml.push_str(&format!(
            r#"<item id="Q:0/{}" parentID="Q:0" restricted="true"><res protocolInfo="x-file-cifs:*:audio/flac:*">{}</res><dc:title>{}</dc:title><upnp:class>object.item.audioItem.musicTrack</upnp:class>"#,
            first_index + offset + 1,
            escape(&track.uri),
            escape(&track.title),
        ));
        if !track.artist.is_empty() {
            xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape(&track.artist)));
        }
        if !track.album.is_empty() {
            xml.push_str(&format!("<upnp:album>{}</upnp:album>", escape(&track.album)));
        }
        xml.push_str("</item>");
    }
    xml.push_str("</DIDL-Lite>");
    xml
}

fn arg<'a>(args: &'a [(&str, String)], name: &str) -> Option<&'a str> {
    args.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
}

fn number_arg(action: &str, args: &[(&str, String)], name: &str) -> Result<u32, ControlPointError> {
    arg(args, name)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| fault(action, 402, &format!("bad {}", name)))
}

impl DeviceState {
    fn check_token(&self, action: &str, args: &[(&str, String)]) -> Result<(), ControlPointError> {
        if arg(args, "UpdateID") != Some(self.update_id.to_string().as_str()) {
            return Err(fault(action, STALE_UPDATE_ID, "stale UpdateID"));
        }
        Ok(())
    }

    fn browse(&mut self, args: &[(&str, String)]) -> Result<ActionResponse, ControlPointError> {
        if arg(args, "ObjectID") != Some("Q:0") {
            return Err(fault("Browse", INVALID_INDEX, "No Such Object"));
        }
        let start = number_arg("Browse", args, "StartingIndex")?;
        let count = number_arg("Browse", args, "RequestedCount")?;

        match arg(args, "BrowseFlag") {
            Some("BrowseMetadata") => Ok([
                (
                    "Result",
                    r#"<DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><container id="Q:0" parentID="Q:" restricted="true"/></DIDL-Lite>"#.to_string(),
                ),
                ("NumberReturned", "1".to_string()),
                ("TotalMatches", "1".to_string()),
                ("UpdateID", self.update_id.to_string()),
            ]
            .into_iter()
            .collect()),
            Some("BrowseDirectChildren") => {
                if self.fail_browse_from.is_some_and(|from| start >= from) {
                    return Err(fault("Browse", 501, "Action Failed"));
                }
                let len = self.tracks.len();
                let from = (start as usize).min(len);
                let to = if count == 0 {
                    len
                } else {
                    (from + count as usize).min(len)
                };
                let page = &self.tracks[from..to];
                let response: ActionResponse = [
                    ("Result", didl_page(page, from)),
                    ("NumberReturned", page.len().to_string()),
                    ("TotalMatches", len.to_string()),
                    ("UpdateID", self.update_id.to_string()),
                ]
                .into_iter()
                .collect();

                self.pages_served += 1;
                if let Some((pages, keep)) = self.shrink_after_pages {
                    if self.pages_served == pages {
                        self.tracks.truncate(keep);
                        self.update_id += 1;
                    }
                }
                Ok(response)
            }
            _ => Err(fault("Browse", 402, "bad BrowseFlag")),
        }
    }

    fn add_uri(&mut self, args: &[(&str, String)]) -> Result<ActionResponse, ControlPointError> {
        const ACTION: &str = "AddURIToQueue";
        self.check_token(ACTION, args)?;
        let uri = arg(args, "EnqueuedURI").unwrap_or_default().to_string();
        let desired = number_arg(ACTION, args, "DesiredFirstTrackNumberEnqueued")?;
        let index = (desired.max(1) as usize - 1).min(self.tracks.len());

        let added = if self.rejected_uris.contains(&uri) {
            0
        } else if uri.starts_with("x-rincon-cpcontainer:") {
            self.album_size
        } else {
            1
        };

        for n in 0..added as usize {
            let mut track = FakeTrack::from_uri(&uri);
            if added > 1 {
                track.uri = format!("{}#{}", uri, n + 1);
            }
            self.tracks.insert(index + n, track);
        }
        if added > 0 {
            self.update_id += 1;
        }

        Ok([
            ("FirstTrackNumberEnqueued", (index + 1).to_string()),
            ("NumTracksAdded", added.to_string()),
            ("NewQueueLength", self.tracks.len().to_string()),
            ("NewUpdateID", self.update_id.to_string()),
        ]
        .into_iter()
        .collect())
    }

    fn remove_range(&mut self, args: &[(&str, String)]) -> Result<ActionResponse, ControlPointError> {
        const ACTION: &str = "RemoveTrackRangeFromQueue";
        if self.fail_removal_after.is_some_and(|n| self.removals >= n) {
            return Err(fault(ACTION, 501, "Action Failed"));
        }
        self.check_token(ACTION, args)?;
        let start = number_arg(ACTION, args, "StartingIndex")? as usize;
        let count = number_arg(ACTION, args, "NumberOfTracks")? as usize;
        if start == 0 || start - 1 + count > self.tracks.len() {
            return Err(fault(ACTION, INVALID_INDEX, "Illegal seek target"));
        }

        self.tracks.drain(start - 1..start - 1 + count);
        self.update_id += 1;
        self.removals += 1;
        Ok([("NewUpdateID", self.update_id.to_string())].into_iter().collect())
    }
}

impl RemoteInvoker for FakeDevice {
    fn invoke(
        &self,
        service: Service,
        action: &str,
        args: &[(&str, String)],
    ) -> Result<ActionResponse, ControlPointError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call {
            service,
            action: action.to_string(),
            args: args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        });

        match (service, action) {
            (Service::ContentDirectory, "Browse") => state.browse(args),
            (Service::AvTransport, "AddURIToQueue") => state.add_uri(args),
            (Service::AvTransport, "RemoveTrackRangeFromQueue") => state.remove_range(args),
            (Service::AvTransport, "RemoveAllTracksFromQueue") => {
                state.tracks.clear();
                state.update_id += 1;
                Ok(ActionResponse::new())
            }
            _ => Err(fault(action, 401, "Invalid Action")),
        }
    }
}
