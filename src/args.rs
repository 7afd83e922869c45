use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::render::ease::Ease;
use crate::source::SourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrameFormat {
    Svg,
    Png,
}

#[derive(Parser, Debug)]
#[command(
    name = "racebar",
    about = "Render a bar chart race from timestamped category records",
    version,
    long_about = None
)]
pub struct Args {
    /// Records to chart: a JSON file, a SQLite database, or `-` for JSON on stdin
    pub input: PathBuf,

    /// How to read the input
    #[arg(short, long, value_enum, default_value_t = SourceKind::Auto)]
    pub kind: SourceKind,

    /// SQLite table holding the records
    #[arg(long, default_value = "discussions")]
    pub table: String,

    /// SQLite column holding the ISO 8601 creation timestamp
    #[arg(long, default_value = "DateCreated")]
    pub timestamp_column: String,

    /// SQLite column holding the category label
    #[arg(long, default_value = "Category")]
    pub category_column: String,

    /// Directory to write frames into; only the summary is printed when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Frame file format
    #[arg(short, long, value_enum, default_value_t = FrameFormat::Svg)]
    pub format: FrameFormat,

    /// Number of bars to display
    #[arg(short, long, default_value_t = 12)]
    pub bars: usize,

    /// Transition length per keyframe, in milliseconds
    #[arg(short, long, default_value_t = 250)]
    pub duration: u64,

    /// Frames per second of animation
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Chart width in pixels
    #[arg(long, default_value_t = 695.0)]
    pub width: f64,

    /// Height of one bar slot in pixels
    #[arg(long, default_value_t = 48.0)]
    pub bar_size: f64,

    /// Easing applied to every transition
    #[arg(long, value_enum, default_value_t = Ease::Linear)]
    pub ease: Ease,

    /// Number of worker threads for PNG rasterization
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
