use std::collections::HashMap;

use crate::keyframes::{Keyframe, RankEntry};

/// One category's appearances, in keyframe order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub entries: Vec<RankEntry>,
}

/// Group every ranking entry by category name. Tracks are ordered by first appearance.
pub fn compute_tracks(keyframes: &[Keyframe]) -> Vec<Track> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut tracks: Vec<Track> = Vec::new();

    for entry in keyframes.iter().flat_map(|k| k.entries.iter()) {
        let slot = *slots.entry(entry.name.as_str()).or_insert_with(|| {
            tracks.push(Track {
                name: entry.name.clone(),
                entries: Vec::new(),
            });
            tracks.len() - 1
        });
        tracks[slot].entries.push(entry.clone());
    }

    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::keyframes::compute_keyframes;
    use crate::record::Record;

    #[test]
    fn groups_entries_by_name_in_date_order() {
        let records = vec![
            Record::new("2020-01-01T00:00:00Z", "B"),
            Record::new("2020-01-01T00:00:00Z", "B"),
            Record::new("2020-01-02T00:00:00Z", "A"),
            Record::new("2020-01-03T00:00:00Z", "A"),
        ];
        let keyframes = compute_keyframes(&aggregate(&records).unwrap());
        let tracks = compute_tracks(&keyframes);

        let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);

        let b_values: Vec<u64> = tracks[0].entries.iter().map(|e| e.value).collect();
        let a_values: Vec<u64> = tracks[1].entries.iter().map(|e| e.value).collect();
        assert_eq!(b_values, vec![2, 2, 2]);
        assert_eq!(a_values, vec![1, 2]);
        assert!(tracks[1].entries.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn empty_keyframes_have_no_tracks() {
        assert!(compute_tracks(&[]).is_empty());
    }
}
