//! Conversion of sparse queue positions into removable ranges.

/// Contiguous one-based block of queue entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrackRange {
    pub start: u32,
    pub len: u32,
}

/// Merges zero-based positions into maximal one-based runs, ascending.
///
/// Duplicates count once. Starts are those of the queue before any removal;
/// the caller shifts them by what earlier ranges already removed.
pub(crate) fn merge_ranges(positions: &[u32]) -> Vec<TrackRange> {
    let mut sorted: Vec<u32> = positions.iter().map(|p| p.saturating_add(1)).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut ranges: Vec<TrackRange> = Vec::new();
    for position in sorted {
        match ranges.last_mut() {
            Some(last) if last.start + last.len == position => last.len += 1,
            _ => ranges.push(TrackRange {
                start: position,
                len: 1,
            }),
        }
    }
    ranges
}
