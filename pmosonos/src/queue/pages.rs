//! Page-by-page listing of the queue.

use std::collections::VecDeque;

use pmodidl::DIDLLite;
use tracing::{debug, warn};

use crate::errors::ControlPointError;
use crate::invoker::RemoteInvoker;

use super::QueueTrack;
use super::browse::{BrowseFlag, browse_queue};

/// Iterator over queue entries, fetched lazily one `Browse` page at a time.
///
/// Built by [`Queue::tracks`](super::Queue::tracks). Yields at most the
/// requested number of tracks; an error is yielded once and ends the
/// iteration.
pub struct TrackPages<'a, I: RemoteInvoker + ?Sized> {
    controller: &'a I,
    next_start: u32,
    page_size: u32,
    remaining: Option<usize>,
    buffer: VecDeque<QueueTrack>,
    exhausted: bool,
}

impl<'a, I: RemoteInvoker + ?Sized> TrackPages<'a, I> {
    pub(crate) fn new(controller: &'a I, start: u32, total: u32, page_size_limit: u32) -> Self {
        let page_size = if total > 0 && total < page_size_limit {
            total
        } else {
            page_size_limit
        };

        Self {
            controller,
            next_start: start,
            page_size,
            remaining: (total > 0).then_some(total as usize),
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    fn fetch_page(&mut self) -> Result<(), ControlPointError> {
        let page = browse_queue(
            self.controller,
            BrowseFlag::DirectChildren,
            self.next_start,
            self.page_size,
        )?;
        let didl = DIDLLite::parse(&page.didl)?;
        let before = self.buffer.len();
        self.buffer.extend(didl.all_items().map(QueueTrack::from));
        let received = self.buffer.len() - before;

        debug!(
            start = self.next_start,
            received,
            total_matches = page.total_matches,
            "Fetched queue page"
        );

        self.next_start = self.next_start.saturating_add(self.page_size);
        if received == 0 || page.total_matches == 0 || self.next_start >= page.total_matches {
            self.exhausted = true;
        }
        Ok(())
    }
}

impl<I: RemoteInvoker + ?Sized> Iterator for TrackPages<'_, I> {
    type Item = Result<QueueTrack, ControlPointError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.remaining == Some(0) {
                return None;
            }

            if let Some(track) = self.buffer.pop_front() {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                return Some(Ok(track));
            }

            if self.exhausted {
                return None;
            }

            if let Err(err) = self.fetch_page() {
                warn!(start = self.next_start, error = %err, "Queue listing interrupted");
                self.exhausted = true;
                return Some(Err(err));
            }
        }
    }
}
