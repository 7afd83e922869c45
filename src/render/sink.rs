use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use crate::error::{RaceError, RaceResult};
use crate::render::{Frame, FrameSink};

fn frame_path(dir: &Path, index: usize, extension: &str) -> PathBuf {
    dir.join(format!("frame_{index:05}.{extension}"))
}

fn prepare_dir(dir: &Path) -> RaceResult<()> {
    fs::create_dir_all(dir).map_err(|e| {
        RaceError::render(format!("cannot create output directory {}: {e}", dir.display()))
    })
}

/// Writes each frame as `frame_NNNNN.svg`.
#[derive(Debug)]
pub struct SvgDirSink {
    dir: PathBuf,
    written: usize,
}

impl SvgDirSink {
    pub fn create(dir: impl Into<PathBuf>) -> RaceResult<Self> {
        let dir = dir.into();
        prepare_dir(&dir)?;
        Ok(Self { dir, written: 0 })
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for SvgDirSink {
    fn accept(&mut self, frames: Vec<Frame>) -> RaceResult<()> {
        for frame in frames {
            fs::write(frame_path(&self.dir, frame.index, "svg"), frame.svg)?;
            self.written += 1;
        }
        Ok(())
    }
}

/// Rasterizes frames to `frame_NNNNN.png`, spreading each batch over a bounded thread pool.
pub struct PngDirSink {
    dir: PathBuf,
    width: u32,
    height: u32,
    fontdb: Arc<usvg::fontdb::Database>,
    pool: rayon::ThreadPool,
    written: usize,
}

impl PngDirSink {
    pub fn create(
        dir: impl Into<PathBuf>,
        width: u32,
        height: u32,
        workers: Option<usize>,
    ) -> RaceResult<Self> {
        let dir = dir.into();
        prepare_dir(&dir)?;

        let workers = workers.unwrap_or_else(|| std::cmp::min(num_cpus::get(), 8));
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| RaceError::configuration(format!("cannot start worker pool: {e}")))?;

        let start_time = Instant::now();
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        info!(
            action = "load",
            component = "fonts",
            face_count = db.len(),
            worker_count = workers,
            duration_ms = start_time.elapsed().as_millis(),
            "Loaded system fonts"
        );

        Ok(Self {
            dir,
            width: width.max(1),
            height: height.max(1),
            fontdb: Arc::new(db),
            pool,
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for PngDirSink {
    fn accept(&mut self, frames: Vec<Frame>) -> RaceResult<()> {
        let (dir, width, height, fontdb) = (&self.dir, self.width, self.height, &self.fontdb);
        self.pool.install(|| {
            frames.par_iter().try_for_each(|frame| {
                rasterize_to_png(
                    &frame.svg,
                    fontdb,
                    width,
                    height,
                    &frame_path(dir, frame.index, "png"),
                )
            })
        })?;
        self.written += frames.len();
        Ok(())
    }
}

fn rasterize_to_png(
    svg: &str,
    fontdb: &Arc<usvg::fontdb::Database>,
    width: u32,
    height: u32,
    path: &Path,
) -> RaceResult<()> {
    let opts = usvg::Options {
        fontdb: Arc::clone(fontdb),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| RaceError::render(format!("parse frame svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RaceError::render("failed to allocate frame pixmap"))?;
    pixmap.fill(resvg::tiny_skia::Color::WHITE);

    let sx = width as f32 / tree.size().width();
    let sy = height as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // Opaque background, so premultiplied and straight alpha agree.
    let image = image::RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| RaceError::render("frame pixmap has an unexpected size"))?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| RaceError::render(format!("write {}: {e}", path.display())))
}
