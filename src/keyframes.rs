use chrono::NaiveDate;

use crate::aggregate::DateBucket;

/// Identity of one ranking entry. Unique across a whole keyframe sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

/// A category's cumulative count and 0-based rank within one keyframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub id: EntryId,
    pub name: String,
    pub value: u64,
    pub rank: usize,
}

/// One date's full ranked snapshot, entries in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyframe {
    pub date: NaiveDate,
    pub entries: Vec<RankEntry>,
}

impl Keyframe {
    /// Value of the rank-0 entry, or 0 for an empty snapshot.
    pub fn top_value(&self) -> u64 {
        self.entries.first().map(|e| e.value).unwrap_or(0)
    }

    pub fn top(&self, n: usize) -> &[RankEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

/// Rank every bucket by cumulative count, descending. Equal counts are ordered by ascending
/// category name.
pub fn compute_keyframes(buckets: &[DateBucket]) -> Vec<Keyframe> {
    let mut next_id = 0usize;

    buckets
        .iter()
        .map(|bucket| {
            let mut categories: Vec<(&String, u64)> =
                bucket.counts.iter().map(|(c, &n)| (c, n)).collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

            let entries = categories
                .into_iter()
                .enumerate()
                .map(|(rank, (name, value))| {
                    let id = EntryId(next_id);
                    next_id += 1;
                    RankEntry {
                        id,
                        name: name.clone(),
                        value,
                        rank,
                    }
                })
                .collect();

            Keyframe {
                date: bucket.date,
                entries,
            }
        })
        .collect()
}
