use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use chrono::NaiveDate;
use tracing::info;

use crate::error::{RaceError, RaceResult};
use crate::record::Record;

/// Running totals per category through one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub counts: BTreeMap<String, u64>,
}

/// Per-day counts, dates in first-seen order.
#[derive(Debug, Default)]
struct DailyCounts {
    buckets: Vec<DateBucket>,
    index: HashMap<NaiveDate, usize>,
}

impl DailyCounts {
    fn add(mut self, date: NaiveDate, category: &str) -> Self {
        let slot = match self.index.get(&date) {
            Some(&slot) => slot,
            None => {
                self.index.insert(date, self.buckets.len());
                self.buckets.push(DateBucket {
                    date,
                    counts: BTreeMap::new(),
                });
                self.buckets.len() - 1
            }
        };
        *self.buckets[slot]
            .counts
            .entry(category.to_string())
            .or_insert(0) += 1;
        self
    }
}

/// Convert records into cumulative per-date, per-category counts.
///
/// Records are expected in ascending timestamp order and are not re-sorted; dates keep the order
/// in which they are first seen. Every bucket inherits all totals of the bucket before it, so a
/// category stays present with its frozen total after its last record.
pub fn aggregate(records: &[Record]) -> RaceResult<Vec<DateBucket>> {
    let start_time = Instant::now();

    let daily = records
        .iter()
        .enumerate()
        .try_fold(DailyCounts::default(), |acc, (index, record)| {
            let date = record.date(index)?;
            Ok::<_, RaceError>(acc.add(date, &record.category))
        })?;

    let buckets: Vec<DateBucket> = daily
        .buckets
        .into_iter()
        .scan(BTreeMap::<String, u64>::new(), |running, day| {
            for (category, count) in day.counts {
                *running.entry(category).or_insert(0) += count;
            }
            Some(DateBucket {
                date: day.date,
                counts: running.clone(),
            })
        })
        .collect();

    info!(
        action = "complete",
        component = "aggregation",
        record_count = records.len(),
        date_count = buckets.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Running totals computed"
    );

    Ok(buckets)
}
