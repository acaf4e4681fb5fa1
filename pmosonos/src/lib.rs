//! # pmosonos - Sonos play queue control
//!
//! Lists, fills and prunes the play queue (`Q:0`) of a Sonos zone player
//! through its UPnP ContentDirectory and AVTransport services.
//!
//! ```no_run
//! use pmosonos::{SonosController, StreamingResource};
//!
//! let controller = SonosController::new("192.168.1.20");
//! let mut queue = controller.queue();
//!
//! queue.add_tracks(["x-file-cifs://nas/music/a.flac"], None)?;
//! queue.add_resources(&[StreamingResource::spotify_album("1A2GTWGtFfWp7KSQTwWOyo")], Some(0))?;
//!
//! for track in queue.tracks(0, 0) {
//!     let track = track?;
//!     println!("{} - {}", track.artist, track.title);
//! }
//!
//! queue.remove_tracks(&[0, 1, 2])?;
//! # Ok::<(), pmosonos::ControlPointError>(())
//! ```

use std::time::Duration;

pub mod controller;
pub mod errors;
pub mod invoker;
pub mod queue;
pub mod services;
pub mod soap_client;

pub use controller::SonosController;
pub use errors::ControlPointError;
pub use invoker::{RemoteInvoker, Service};
pub use pmoupnp::soap::ActionResponse;
pub use queue::{MAX_PAGE_SIZE, QUEUE_OBJECT_ID, Queue, QueueOptions, QueueTrack, TrackPages};
pub use services::StreamingResource;

/// SOAP port of Sonos zone players.
pub const DEFAULT_DEVICE_PORT: u16 = 1400;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
