//! Streaming-service resources that can be enqueued with their metadata.

use pmodidl::ItemWriter;
use rand::Rng;

const MUSIC_TRACK_CLASS: &str = "object.item.audioItem.musicTrack";
const RINCON_NAMESPACE: &str = "urn:schemas-rinconnetworks-com:metadata-1-0/";
const SPOTIFY_SERVICE_DESCRIPTOR: &str = "SA_RINCON2311_X_#Svc2311-0-Token";

/// A Spotify track or album, identified by its Spotify id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StreamingResource {
    SpotifyTrack(String),
    SpotifyAlbum(String),
}

impl StreamingResource {
    pub fn spotify_track(id: impl Into<String>) -> Self {
        StreamingResource::SpotifyTrack(id.into())
    }

    pub fn spotify_album(id: impl Into<String>) -> Self {
        StreamingResource::SpotifyAlbum(id.into())
    }

    /// `spotify:{track|album}:{id}`
    pub fn spotify_uri(&self) -> String {
        match self {
            StreamingResource::SpotifyTrack(id) => format!("spotify:track:{}", id),
            StreamingResource::SpotifyAlbum(id) => format!("spotify:album:{}", id),
        }
    }

    /// URI to enqueue on the zone player.
    pub fn uri(&self) -> String {
        let encoded = urlencoding::encode(&self.spotify_uri()).into_owned();
        match self {
            StreamingResource::SpotifyTrack(_) => format!("x-sonos-spotify:{}", encoded),
            StreamingResource::SpotifyAlbum(_) => format!("x-rincon-cpcontainer:{}", encoded),
        }
    }

    /// An album container expands to several queue entries.
    pub fn is_container(&self) -> bool {
        matches!(self, StreamingResource::SpotifyAlbum(_))
    }

    /// DIDL-Lite metadata sent along with [`uri`](Self::uri).
    ///
    /// The item id is a random 8-digit number followed by the encoded
    /// Spotify URI; the device only needs the service descriptor to resolve
    /// the account.
    pub fn metadata(&self) -> String {
        let hash: u32 = rand::rng().random_range(10_000_000..100_000_000);
        let id = format!("{}{}", hash, urlencoding::encode(&self.spotify_uri()));

        ItemWriter::new(id, MUSIC_TRACK_CLASS)
            .description("cdudn", RINCON_NAMESPACE, SPOTIFY_SERVICE_DESCRIPTOR)
            .to_xml()
    }
}
