//! The play queue of a zone player.
//!
//! Every mutating action on the queue carries the device's current
//! `UpdateID`; the device rejects calls made with a stale one. [`Queue`]
//! keeps the last token the device handed back and replaces it after every
//! successful mutation.

mod browse;
mod pages;
mod ranges;
mod track;

pub use pages::TrackPages;
pub use track::QueueTrack;

pub(crate) use ranges::{TrackRange, merge_ranges};

use pmoconfig::Config;
use tracing::{debug, info, warn};

use crate::errors::ControlPointError;
use crate::invoker::{RemoteInvoker, Service};
use crate::services::StreamingResource;

use browse::{BrowseFlag, browse_queue};

/// Object id of the default queue of a zone player.
pub const QUEUE_OBJECT_ID: &str = "Q:0";

/// Largest `RequestedCount` a zone player honours.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Behaviour switches of a [`Queue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueOptions {
    /// Reuse the last known `UpdateID`. When false, every call needing a
    /// token probes the device first.
    pub cache_update_id: bool,
    /// Tracks requested per `Browse` while listing, `1..=100`.
    pub page_size: u32,
}

impl Default for QueueOptions {
    fn default() -> Self {
        Self {
            cache_update_id: true,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl QueueOptions {
    pub fn with_cache_update_id(mut self, cache: bool) -> Self {
        self.cache_update_id = cache;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, ControlPointError> {
        let cache_update_id = config
            .get_queue_cache_update_id()
            .map_err(|e| ControlPointError::Config(e.to_string()))?;
        let page_size = config
            .get_queue_page_size()
            .map_err(|e| ControlPointError::Config(e.to_string()))?;

        Ok(QueueOptions::default()
            .with_cache_update_id(cache_update_id)
            .with_page_size(u32::try_from(page_size).unwrap_or(MAX_PAGE_SIZE)))
    }
}

/// Handle on the default queue (`Q:0`) of one controller.
///
/// The queue borrows its controller and only owns the cached update token.
/// Positions are zero-based and refer to the queue as it is when the call
/// is made.
pub struct Queue<'a, I: RemoteInvoker + ?Sized> {
    controller: &'a I,
    options: QueueOptions,
    update_id: Option<String>,
}

impl<'a, I: RemoteInvoker + ?Sized> Queue<'a, I> {
    pub fn new(controller: &'a I, options: QueueOptions) -> Self {
        Self {
            controller,
            options,
            update_id: None,
        }
    }

    pub fn controller(&self) -> &'a I {
        self.controller
    }

    pub fn options(&self) -> &QueueOptions {
        &self.options
    }

    /// The cached token, without contacting the device.
    pub fn cached_update_id(&self) -> Option<&str> {
        self.update_id.as_deref()
    }

    /// Returns a token usable for the next mutating call.
    ///
    /// The cached token is returned as is when caching is enabled;
    /// otherwise the device is probed with a metadata-only `Browse`.
    pub fn update_id(&mut self) -> Result<String, ControlPointError> {
        if self.options.cache_update_id {
            if let Some(token) = &self.update_id {
                return Ok(token.clone());
            }
        }

        let probe = browse_queue(self.controller, BrowseFlag::Metadata, 0, 0)?;
        debug!(update_id = %probe.update_id, "Fetched queue UpdateID");
        self.update_id = Some(probe.update_id.clone());
        Ok(probe.update_id)
    }

    /// Replaces the cached token.
    pub fn set_update_id(&mut self, token: impl Into<String>) {
        self.update_id = Some(token.into());
    }

    /// Current number of tracks in the queue. Caches the token returned
    /// along with the count.
    pub fn count(&mut self) -> Result<u32, ControlPointError> {
        let probe = browse_queue(self.controller, BrowseFlag::DirectChildren, 0, 1)?;
        self.set_update_id(probe.update_id);
        Ok(probe.total_matches)
    }

    /// Lazily lists tracks from zero-based `start`; `total == 0` lists all
    /// remaining ones.
    pub fn tracks(&self, start: u32, total: u32) -> TrackPages<'a, I> {
        TrackPages::new(self.controller, start, total, self.options.page_size)
    }

    /// Collects [`tracks`](Self::tracks).
    pub fn get_tracks(&self, start: u32, total: u32) -> Result<Vec<QueueTrack>, ControlPointError> {
        self.tracks(start, total).collect()
    }

    /// Inserts `uris` in order from zero-based `position`, or at the end of
    /// the queue when `position` is `None`.
    ///
    /// Stops at the first URI the device does not accept as exactly one
    /// track; tracks inserted before it stay in the queue and
    /// [`ControlPointError::InsertionRejected`] reports how many there were.
    pub fn add_tracks<U, S>(&mut self, uris: U, position: Option<u32>) -> Result<usize, ControlPointError>
    where
        U: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (mut position, mut probed) = self.insertion_point(position)?;
        let mut accepted = 0;

        for uri in uris {
            let uri = uri.as_ref();
            let token = self.next_insertion_token(&mut probed)?;
            let reported = self.enqueue(token, uri, "", position)?;
            if reported != 1 {
                warn!(uri, position, reported, accepted, "Track insertion rejected");
                return Err(ControlPointError::InsertionRejected {
                    uri: uri.to_string(),
                    position,
                    reported,
                    accepted,
                });
            }
            accepted += 1;
            position = position.saturating_add(1);
        }

        info!(accepted, "Tracks added to queue");
        Ok(accepted)
    }

    pub fn add_track(&mut self, uri: &str, position: Option<u32>) -> Result<(), ControlPointError> {
        self.add_tracks([uri], position).map(|_| ())
    }

    /// Inserts streaming resources with their metadata.
    ///
    /// An album expands into as many entries as the device reports; the
    /// returned count is the number of queue entries created.
    pub fn add_resources(
        &mut self,
        resources: &[StreamingResource],
        position: Option<u32>,
    ) -> Result<usize, ControlPointError> {
        let (mut position, mut probed) = self.insertion_point(position)?;
        let mut accepted = 0;

        for resource in resources {
            let uri = resource.uri();
            let token = self.next_insertion_token(&mut probed)?;
            let reported = self.enqueue(token, &uri, &resource.metadata(), position)?;
            let valid = if resource.is_container() {
                reported > 0
            } else {
                reported == 1
            };
            if !valid {
                warn!(uri = %uri, position, reported, accepted, "Resource insertion rejected");
                return Err(ControlPointError::InsertionRejected {
                    uri,
                    position,
                    reported,
                    accepted,
                });
            }
            accepted = accepted.saturating_add(reported as usize);
            position = position.saturating_add(reported);
        }

        info!(accepted, "Resources added to queue");
        Ok(accepted)
    }

    /// Removes the tracks at the given zero-based positions.
    ///
    /// Positions are merged into contiguous ranges, removed in ascending
    /// order. A failing range aborts the removal; ranges removed before it
    /// stay removed.
    pub fn remove_tracks(&mut self, positions: &[u32]) -> Result<(), ControlPointError> {
        let ranges = merge_ranges(positions);
        let mut removed = 0;

        for TrackRange { start, len } in ranges.iter().copied() {
            let token = self.update_id()?;
            let starting_index = start - removed;

            debug!(starting_index, len, "Removing queue range");
            let response = self.controller.invoke(
                Service::AvTransport,
                "RemoveTrackRangeFromQueue",
                &[
                    ("ObjectID", QUEUE_OBJECT_ID.to_string()),
                    ("UpdateID", token),
                    ("StartingIndex", starting_index.to_string()),
                    ("NumberOfTracks", len.to_string()),
                ],
            )?;

            let new_token = response
                .get("NewUpdateID")
                .or_else(|| response.single_value())
                .ok_or_else(|| ControlPointError::upnp_missing_return_value("NewUpdateID"))?;
            self.set_update_id(new_token);
            removed += len;
        }

        if removed > 0 {
            info!(removed, ranges = ranges.len(), "Tracks removed from queue");
        }
        Ok(())
    }

    pub fn remove_track(&mut self, position: u32) -> Result<(), ControlPointError> {
        self.remove_tracks(&[position])
    }

    /// Empties the queue. The device returns no token, so the cached one is
    /// dropped.
    pub fn clear(&mut self) -> Result<(), ControlPointError> {
        self.controller
            .invoke(Service::AvTransport, "RemoveAllTracksFromQueue", &[])?;
        self.update_id = None;
        info!("Queue cleared");
        Ok(())
    }

    /// Resolves the insertion position. When the queue length had to be
    /// probed, the token read along with it is returned for the first call.
    fn insertion_point(
        &mut self,
        position: Option<u32>,
    ) -> Result<(u32, Option<String>), ControlPointError> {
        match position {
            Some(position) => Ok((position, None)),
            None => {
                let length = self.count()?;
                Ok((length, self.update_id.clone()))
            }
        }
    }

    /// Token for the next `AddURIToQueue`: the one just read by the length
    /// probe if any, else [`update_id`](Self::update_id).
    fn next_insertion_token(
        &mut self,
        probed: &mut Option<String>,
    ) -> Result<String, ControlPointError> {
        match probed.take() {
            Some(token) => Ok(token),
            None => self.update_id(),
        }
    }

    /// Sends one `AddURIToQueue` with `token`, caches the returned token and
    /// returns `NumTracksAdded`.
    fn enqueue(
        &mut self,
        token: String,
        uri: &str,
        metadata: &str,
        position: u32,
    ) -> Result<u32, ControlPointError> {
        let track_number = position.saturating_add(1);

        debug!(uri, position, track_number, "Enqueuing URI");
        let response = self.controller.invoke(
            Service::AvTransport,
            "AddURIToQueue",
            &[
                ("ObjectID", QUEUE_OBJECT_ID.to_string()),
                ("UpdateID", token),
                ("EnqueuedURI", uri.to_string()),
                ("EnqueuedURIMetaData", metadata.to_string()),
                ("DesiredFirstTrackNumberEnqueued", track_number.to_string()),
                ("EnqueueAsNext", "0".to_string()),
            ],
        )?;

        let new_token = response
            .get("NewUpdateID")
            .ok_or_else(|| ControlPointError::upnp_missing_return_value("NewUpdateID"))?;
        self.set_update_id(new_token);

        let raw = response
            .get("NumTracksAdded")
            .ok_or_else(|| ControlPointError::upnp_missing_return_value("NumTracksAdded"))?;
        raw.parse::<u32>()
            .map_err(|_| ControlPointError::upnp_bad_return_value("NumTracksAdded", raw))
    }
}
