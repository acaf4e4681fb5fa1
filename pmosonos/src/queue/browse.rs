//! ContentDirectory `Browse` on the queue container.

use tracing::debug;

use crate::errors::ControlPointError;
use crate::invoker::{RemoteInvoker, Service};

use super::QUEUE_OBJECT_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BrowseFlag {
    /// The queue's entries.
    DirectChildren,
    /// The queue container itself; used to read `UpdateID` only.
    Metadata,
}

impl BrowseFlag {
    fn as_str(self) -> &'static str {
        match self {
            BrowseFlag::DirectChildren => "BrowseDirectChildren",
            BrowseFlag::Metadata => "BrowseMetadata",
        }
    }
}

/// Out-arguments of a queue `Browse`.
#[derive(Debug, Clone)]
pub(crate) struct BrowseResult {
    pub didl: String,
    pub total_matches: u32,
    pub update_id: String,
}

pub(crate) fn browse_queue<I: RemoteInvoker + ?Sized>(
    controller: &I,
    flag: BrowseFlag,
    start: u32,
    count: u32,
) -> Result<BrowseResult, ControlPointError> {
    debug!(flag = flag.as_str(), start, count, "Browsing queue");

    let response = controller.invoke(
        Service::ContentDirectory,
        "Browse",
        &[
            ("ObjectID", QUEUE_OBJECT_ID.to_string()),
            ("BrowseFlag", flag.as_str().to_string()),
            ("Filter", String::new()),
            ("StartingIndex", start.to_string()),
            ("RequestedCount", count.to_string()),
            ("SortCriteria", String::new()),
        ],
    )?;

    let update_id = response
        .get("UpdateID")
        .ok_or_else(|| ControlPointError::upnp_missing_return_value("UpdateID"))?
        .to_string();

    let total_matches = match response.get("TotalMatches") {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| ControlPointError::upnp_bad_return_value("TotalMatches", raw))?,
        None => return Err(ControlPointError::upnp_missing_return_value("TotalMatches")),
    };

    Ok(BrowseResult {
        didl: response.get("Result").unwrap_or_default().to_string(),
        total_matches,
        update_id,
    })
}
