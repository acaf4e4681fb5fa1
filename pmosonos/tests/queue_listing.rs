mod common;

use common::{FakeDevice, FakeTrack};
use pmosonos::{ControlPointError, Queue, QueueOptions};

fn browse_windows(device: &FakeDevice) -> Vec<(String, String)> {
    device
        .calls_to("Browse")
        .iter()
        .map(|c| {
            (
                c.arg("StartingIndex").unwrap().to_string(),
                c.arg("RequestedCount").unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn bounded_listing_stops_after_total() {
    let device = FakeDevice::with_tracks(20);
    let queue = Queue::new(&device, QueueOptions::default());

    let tracks = queue.get_tracks(0, 5).unwrap();

    assert_eq!(tracks.len(), 5);
    assert_eq!(tracks[0].id, "Q:0/1");
    assert_eq!(tracks[4].title, "Track 4");
    assert_eq!(browse_windows(&device), vec![("0".into(), "5".into())]);
}

#[test]
fn long_queue_is_paged_transparently() {
    let device = FakeDevice::with_tracks(250);
    let queue = Queue::new(&device, QueueOptions::default());

    let tracks = queue.get_tracks(0, 0).unwrap();

    assert_eq!(tracks.len(), 250);
    let uris: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();
    assert_eq!(uris, device.uris());
    assert_eq!(
        browse_windows(&device),
        vec![
            ("0".into(), "100".into()),
            ("100".into(), "100".into()),
            ("200".into(), "100".into()),
        ]
    );

    for call in device.calls_to("Browse") {
        assert_eq!(call.arg("ObjectID"), Some("Q:0"));
        assert_eq!(call.arg("BrowseFlag"), Some("BrowseDirectChildren"));
        assert_eq!(call.arg("Filter"), Some(""));
        assert_eq!(call.arg("SortCriteria"), Some(""));
    }
}

#[test]
fn total_spanning_pages_stops_mid_page() {
    let device = FakeDevice::with_tracks(250);
    let queue = Queue::new(&device, QueueOptions::default());

    let tracks = queue.get_tracks(0, 150).unwrap();

    assert_eq!(tracks.len(), 150);
    assert_eq!(tracks[149].uri, FakeTrack::numbered(149).uri);
    assert_eq!(device.calls_to("Browse").len(), 2);
}

#[test]
fn listing_from_an_offset_ends_at_queue_end() {
    let device = FakeDevice::with_tracks(250);
    let queue = Queue::new(&device, QueueOptions::default());

    let tracks = queue.get_tracks(240, 0).unwrap();

    assert_eq!(tracks.len(), 10);
    assert_eq!(tracks[0].id, "Q:0/241");
    assert_eq!(browse_windows(&device), vec![("240".into(), "100".into())]);
}

#[test]
fn empty_queue_lists_nothing() {
    let device = FakeDevice::new();
    let queue = Queue::new(&device, QueueOptions::default());

    assert!(queue.get_tracks(0, 0).unwrap().is_empty());
    assert_eq!(device.calls_to("Browse").len(), 1);
}

#[test]
fn total_larger_than_queue_returns_what_exists() {
    let device = FakeDevice::with_tracks(20);
    let queue = Queue::new(&device, QueueOptions::default());

    let tracks = queue.get_tracks(0, 50).unwrap();

    assert_eq!(tracks.len(), 20);
    assert_eq!(browse_windows(&device), vec![("0".into(), "50".into())]);

    device.clear_calls();
    assert_eq!(queue.get_tracks(5, 50).unwrap().len(), 15);
    assert_eq!(browse_windows(&device), vec![("5".into(), "50".into())]);
}

#[test]
fn queue_shrinking_between_pages_ends_listing() {
    let device = FakeDevice::with_tracks(250);
    device.shrink_after_pages(1, 120);
    let queue = Queue::new(&device, QueueOptions::default());

    let tracks = queue.get_tracks(0, 0).unwrap();

    assert_eq!(tracks.len(), 120);
    assert_eq!(tracks[119].uri, FakeTrack::numbered(119).uri);
    assert_eq!(
        browse_windows(&device),
        vec![("0".into(), "100".into()), ("100".into(), "100".into())]
    );
}

#[test]
fn queue_emptied_between_pages_stops_without_retry() {
    let device = FakeDevice::with_tracks(250);
    device.shrink_after_pages(1, 60);
    let queue = Queue::new(&device, QueueOptions::default());

    assert_eq!(queue.get_tracks(0, 0).unwrap().len(), 100);
    assert_eq!(device.calls_to("Browse").len(), 2);
}

#[test]
fn configured_page_size_is_used() {
    let device = FakeDevice::with_tracks(90);
    let queue = Queue::new(&device, QueueOptions::default().with_page_size(40));

    assert_eq!(queue.get_tracks(0, 0).unwrap().len(), 90);
    assert_eq!(
        browse_windows(&device),
        vec![
            ("0".into(), "40".into()),
            ("40".into(), "40".into()),
            ("80".into(), "40".into()),
        ]
    );
}

#[test]
fn page_size_never_exceeds_device_limit() {
    let options = QueueOptions::default().with_page_size(500);
    assert_eq!(options.page_size, 100);
}

#[test]
fn track_fields_are_decoded() {
    let device = FakeDevice::with_tracks(3);
    let queue = Queue::new(&device, QueueOptions::default());

    let track = queue.get_tracks(2, 1).unwrap().remove(0);
    let expected = FakeTrack::numbered(2);

    assert_eq!(track.id, "Q:0/3");
    assert_eq!(track.uri, expected.uri);
    assert_eq!(track.title, expected.title);
    assert_eq!(track.artist, expected.artist);
    assert_eq!(track.album, expected.album);
}

#[test]
fn transport_error_is_yielded_once_after_paged_tracks() {
    let device = FakeDevice::with_tracks(150);
    device.fail_browse_from(100);
    let queue = Queue::new(&device, QueueOptions::default());

    let mut pages = queue.tracks(0, 0);
    let fetched: Vec<_> = pages.by_ref().take(100).collect();
    assert!(fetched.iter().all(Result::is_ok));

    let err = pages.next().unwrap().unwrap_err();
    assert!(matches!(err, ControlPointError::UpnpFault { .. }));
    assert!(pages.next().is_none());

    assert!(queue.get_tracks(0, 0).is_err());
}

#[test]
fn listing_does_not_touch_the_token_cache() {
    let device = FakeDevice::with_tracks(10);
    let queue = Queue::new(&device, QueueOptions::default());

    queue.get_tracks(0, 0).unwrap();
    assert_eq!(queue.cached_update_id(), None);
}
