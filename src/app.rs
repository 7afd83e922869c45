use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;

use crate::args::{Args, FrameFormat};
use crate::config::ChartConfig;
use crate::race::Race;
use crate::render::sink::{PngDirSink, SvgDirSink};
use crate::render::{FrameSink, Renderer};
use crate::source::{open_source, SqliteQuery};
use crate::stats::RaceSummary;
use crate::utils::format_number;

pub fn chart_config(args: &Args) -> ChartConfig {
    ChartConfig {
        width: args.width,
        bar_size: args.bar_size,
        bars: args.bars,
        duration: Duration::from_millis(args.duration),
        fps: args.fps,
        ease: args.ease,
        ..ChartConfig::default()
    }
}

pub fn run_race(args: &Args) -> Result<RaceSummary> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "racebar", input = ?args.input, "Starting bar chart race");

    let query = SqliteQuery {
        table: args.table.clone(),
        timestamp_column: args.timestamp_column.clone(),
        category_column: args.category_column.clone(),
    };
    let records = open_source(args.kind, &args.input, query)
        .fetch()
        .with_context(|| format!("Failed to load records from {:?}", args.input))?;

    let race = Race::build(&records).context("Failed to build keyframes")?;
    let mut summary = RaceSummary::from_race(&race, records.len(), args.bars);

    if let Some(out) = &args.out {
        let renderer = Renderer::new(chart_config(args)).context("Invalid chart settings")?;
        let config = renderer.config();
        let mut sink: Box<dyn FrameSink> = match args.format {
            FrameFormat::Svg => Box::new(SvgDirSink::create(out)?),
            FrameFormat::Png => Box::new(PngDirSink::create(
                out,
                config.width.ceil() as u32,
                config.height().ceil() as u32,
                args.workers,
            )?),
        };
        summary.frames_written = renderer
            .play(&race, sink.as_mut())
            .with_context(|| format!("Failed to render frames into {:?}", out))?;
    }

    info!(
        action = "complete",
        component = "racebar",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Bar chart race completed"
    );

    Ok(summary)
}

pub fn print_race_summary(summary: &RaceSummary, args: &Args) {
    println!("\n--- Bar Chart Race: {} ---", args.input.display());

    match &summary.date_range {
        Some((first, last, days)) if *days > 0 => println!(
            "Date range: {} to {} ({} days)",
            first.format("%B %-d, %Y"),
            last.format("%B %-d, %Y"),
            format_number(*days as u64)
        ),
        Some((first, last, _)) => println!(
            "Date range: {} to {}",
            first.format("%B %-d, %Y"),
            last.format("%B %-d, %Y")
        ),
        None => println!("Date range: No data available"),
    }

    println!("Records: {}", format_number(summary.record_count as u64));
    println!("Keyframes: {}", format_number(summary.keyframe_count as u64));
    println!(
        "Unique categories: {}",
        format_number(summary.category_count as u64)
    );

    if !summary.standings.is_empty() {
        println!("\nFinal top {} categories:", summary.standings.len());
        for (rank, standing) in summary.standings.iter().enumerate() {
            println!(
                "{:>3}. {}: {}",
                rank + 1,
                standing.name,
                format_number(standing.value)
            );
        }
    }

    if let Some(out) = &args.out {
        println!(
            "\nFrames written to {}: {}",
            out.display(),
            format_number(summary.frames_written as u64)
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;

    use super::*;

    fn write_records(dir: &std::path::Path) -> String {
        let path = dir.join("records.json");
        fs::write(
            &path,
            r#"[
                {"DateCreated": "2020-01-01T09:00:00Z", "Category": "Ideas"},
                {"DateCreated": "2020-01-01T10:00:00Z", "Category": "Help"},
                {"DateCreated": "2020-01-02T11:00:00Z", "Category": "Help"}
            ]"#,
        )
        .unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn args_map_onto_chart_config() {
        let args = Args::parse_from([
            "racebar",
            "records.json",
            "--bars",
            "5",
            "--duration",
            "500",
            "--fps",
            "10",
        ]);
        let config = chart_config(&args);
        assert_eq!(config.bars, 5);
        assert_eq!(config.frames_per_transition(), 5);
        assert_eq!(config.width, 695.0);
    }

    #[test]
    fn summary_only_without_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_records(dir.path());
        let args = Args::parse_from(["racebar", input.as_str()]);

        let summary = run_race(&args).unwrap();
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.keyframe_count, 2);
        assert_eq!(summary.standings[0].name, "Help");
        assert_eq!(summary.frames_written, 0);
    }

    #[test]
    fn writes_svg_frames() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_records(dir.path());
        let out = dir.path().join("frames");
        let out_arg = out.to_string_lossy().into_owned();
        let args = Args::parse_from([
            "racebar",
            input.as_str(),
            "--out",
            out_arg.as_str(),
            "--fps",
            "8",
        ]);

        let summary = run_race(&args).unwrap();
        assert_eq!(summary.frames_written, 4);
        assert!(out.join("frame_00000.svg").exists());
        assert!(out.join("frame_00003.svg").exists());
        assert!(!out.join("frame_00004.svg").exists());
    }

    #[test]
    fn writes_png_frames() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_records(dir.path());
        let out = dir.path().join("png");
        let out_arg = out.to_string_lossy().into_owned();
        let args = Args::parse_from([
            "racebar",
            input.as_str(),
            "--out",
            out_arg.as_str(),
            "--format",
            "png",
            "--fps",
            "4",
            "--bars",
            "2",
            "--workers",
            "2",
        ]);

        let summary = run_race(&args).unwrap();
        assert_eq!(summary.frames_written, 2);
        for index in 0..2 {
            let path = out.join(format!("frame_{index:05}.png"));
            let image = image::open(&path).unwrap().to_rgba8();
            assert_eq!(image.dimensions(), (695, 118));
        }
        assert!(!out.join("frame_00000.svg").exists());
    }

    #[test]
    fn malformed_input_is_reported_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, r#"[{"DateCreated": "soon", "Category": "A"}]"#).unwrap();
        let input = input.to_string_lossy().into_owned();
        let args = Args::parse_from(["racebar", input.as_str()]);

        let err = run_race(&args).unwrap_err();
        assert!(format!("{err:#}").contains("malformed timestamp"));
    }
}
