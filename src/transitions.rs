use std::collections::HashMap;

use crate::keyframes::{EntryId, RankEntry};
use crate::tracks::Track;

/// Entry-to-predecessor map: each entry after the first in a track points at the one before it.
pub fn compute_prev(tracks: &[Track]) -> HashMap<EntryId, RankEntry> {
    tracks
        .iter()
        .flat_map(|track| track.entries.windows(2))
        .map(|pair| (pair[1].id, pair[0].clone()))
        .collect()
}

/// Entry-to-successor map: each entry before the last in a track points at the one after it.
pub fn compute_next(tracks: &[Track]) -> HashMap<EntryId, RankEntry> {
    tracks
        .iter()
        .flat_map(|track| track.entries.windows(2))
        .map(|pair| (pair[0].id, pair[1].clone()))
        .collect()
}

/// Neighbouring appearances of every entry's category.
///
/// Both lookups are total: an entry without a neighbour resolves to itself, so a first or last
/// appearance animates as a zero-length slide.
#[derive(Debug, Clone, Default)]
pub struct Transitions {
    prev: HashMap<EntryId, RankEntry>,
    next: HashMap<EntryId, RankEntry>,
}

impl Transitions {
    pub fn from_tracks(tracks: &[Track]) -> Self {
        Self {
            prev: compute_prev(tracks),
            next: compute_next(tracks),
        }
    }

    pub fn prev<'a>(&'a self, entry: &'a RankEntry) -> &'a RankEntry {
        self.prev.get(&entry.id).unwrap_or(entry)
    }

    pub fn next<'a>(&'a self, entry: &'a RankEntry) -> &'a RankEntry {
        self.next.get(&entry.id).unwrap_or(entry)
    }

    pub fn len(&self) -> usize {
        self.prev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prev.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: usize, name: &str, value: u64, rank: usize) -> RankEntry {
        RankEntry {
            id: EntryId(id),
            name: name.to_string(),
            value,
            rank,
        }
    }

    fn track(name: &str, entries: Vec<RankEntry>) -> Track {
        Track {
            name: name.to_string(),
            entries,
        }
    }

    #[test]
    fn links_consecutive_appearances() {
        let a0 = entry(0, "A", 1, 1);
        let a1 = entry(3, "A", 4, 0);
        let a2 = entry(9, "A", 6, 0);
        let transitions = Transitions::from_tracks(&[track(
            "A",
            vec![a0.clone(), a1.clone(), a2.clone()],
        )]);

        assert_eq!(transitions.prev(&a1), &a0);
        assert_eq!(transitions.prev(&a2), &a1);
        assert_eq!(transitions.next(&a0), &a1);
        assert_eq!(transitions.next(&a1), &a2);
        assert_eq!(transitions.len(), 2);
    }

    #[test]
    fn track_ends_fall_back_to_self() {
        let first = entry(0, "A", 1, 0);
        let last = entry(1, "A", 2, 0);
        let lone = entry(2, "B", 5, 0);
        let transitions = Transitions::from_tracks(&[
            track("A", vec![first.clone(), last.clone()]),
            track("B", vec![lone.clone()]),
        ]);

        assert_eq!(transitions.prev(&first), &first);
        assert_eq!(transitions.next(&last), &last);
        assert_eq!(transitions.prev(&lone), &lone);
        assert_eq!(transitions.next(&lone), &lone);
    }

    #[test]
    fn unknown_entries_resolve_to_themselves() {
        let transitions = Transitions::default();
        let stray = entry(42, "Z", 7, 3);
        assert!(transitions.is_empty());
        assert_eq!(transitions.prev(&stray), &stray);
        assert_eq!(transitions.next(&stray), &stray);
    }

    #[test]
    fn keyed_by_identity_not_by_name() {
        let a0 = entry(0, "A", 1, 0);
        let a1 = entry(1, "A", 1, 0);
        let transitions = Transitions::from_tracks(&[track("A", vec![a0.clone(), a1.clone()])]);
        assert_eq!(transitions.prev(&a1).id, EntryId(0));
        assert_eq!(transitions.next(&a0).id, EntryId(1));
    }
}
