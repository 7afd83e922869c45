pub mod aggregate;
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod keyframes;
pub mod race;
pub mod record;
pub mod render;
pub mod source;
pub mod stats;
pub mod tracks;
pub mod transitions;
pub mod utils;

pub use aggregate::{aggregate, DateBucket};
pub use args::Args;
pub use config::ChartConfig;
pub use error::{RaceError, RaceResult};
pub use keyframes::{compute_keyframes, EntryId, Keyframe, RankEntry};
pub use race::Race;
pub use record::Record;
pub use render::{Frame, FrameSink, Renderer};
pub use source::{JsonSource, RecordSource, SqliteQuery, SqliteSource};
pub use stats::RaceSummary;
pub use tracks::{compute_tracks, Track};
pub use transitions::{compute_next, compute_prev, Transitions};
