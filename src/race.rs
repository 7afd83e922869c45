use std::time::Instant;

use chrono::NaiveDate;
use tracing::info;

use crate::aggregate::aggregate;
use crate::error::RaceResult;
use crate::keyframes::{compute_keyframes, Keyframe};
use crate::record::Record;
use crate::tracks::{compute_tracks, Track};
use crate::transitions::Transitions;

/// The complete, immutable output of the keyframe pipeline.
#[derive(Debug, Clone, Default)]
pub struct Race {
    pub keyframes: Vec<Keyframe>,
    pub tracks: Vec<Track>,
    pub transitions: Transitions,
}

impl Race {
    /// Run every pipeline stage over one batch of records.
    pub fn build(records: &[Record]) -> RaceResult<Self> {
        let start_time = Instant::now();
        info!(
            action = "start",
            component = "race_pipeline",
            record_count = records.len(),
            "Building keyframes"
        );

        let buckets = aggregate(records)?;
        let keyframes = compute_keyframes(&buckets);
        let tracks = compute_tracks(&keyframes);
        let transitions = Transitions::from_tracks(&tracks);

        info!(
            action = "complete",
            component = "race_pipeline",
            keyframe_count = keyframes.len(),
            category_count = tracks.len(),
            transition_count = transitions.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Keyframes built"
        );

        Ok(Self {
            keyframes,
            tracks,
            transitions,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// First and last keyframe dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;
        Some((first.date, last.date))
    }

    pub fn category_count(&self) -> usize {
        self.tracks.len()
    }
}
