use pmodidl::Item;

/// One entry of the queue, as reported by the device.
///
/// Fields are passed through as-is; those the device leaves out are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueTrack {
    pub id: String,
    pub uri: String,
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl From<&Item> for QueueTrack {
    fn from(item: &Item) -> Self {
        let artist = item
            .creator
            .as_deref()
            .or(item.artist.as_deref())
            .unwrap_or_default();

        QueueTrack {
            id: item.id.clone(),
            uri: item.primary_url().to_string(),
            title: item.title.clone(),
            artist: artist.to_string(),
            album: item.album.clone().unwrap_or_default(),
        }
    }
}
