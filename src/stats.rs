use chrono::NaiveDate;

use crate::race::Race;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceSummary {
    pub record_count: usize,
    pub date_range: Option<(NaiveDate, NaiveDate, i64)>,
    pub keyframe_count: usize,
    pub category_count: usize,
    /// Top categories of the last keyframe.
    pub standings: Vec<Standing>,
    pub frames_written: usize,
}

impl RaceSummary {
    pub fn from_race(race: &Race, record_count: usize, top: usize) -> Self {
        let date_range = race
            .date_range()
            .map(|(first, last)| (first, last, (last - first).num_days()));
        let standings = race
            .keyframes
            .last()
            .map(|k| {
                k.top(top)
                    .iter()
                    .map(|e| Standing {
                        name: e.name.clone(),
                        value: e.value,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            record_count,
            date_range,
            keyframe_count: race.keyframes.len(),
            category_count: race.category_count(),
            standings,
            frames_written: 0,
        }
    }
}
