pub mod color;
pub mod ease;
pub mod scale;
pub mod sink;
pub mod svg;
pub mod transition;

use std::time::Instant;

use tracing::{debug, info};

use crate::config::ChartConfig;
use crate::error::RaceResult;
use crate::race::Race;
use transition::Transition;

/// One rendered SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position in the whole animation, starting at 0.
    pub index: usize,
    /// Keyframe this frame transitions into.
    pub keyframe: usize,
    pub svg: String,
}

/// Consumer of rendered frames. Receives one transition's frames per call, in order; the
/// renderer does not start the next transition until `accept` returns.
pub trait FrameSink {
    fn accept(&mut self, frames: Vec<Frame>) -> RaceResult<()>;
}

impl FrameSink for Vec<Frame> {
    fn accept(&mut self, frames: Vec<Frame>) -> RaceResult<()> {
        self.extend(frames);
        Ok(())
    }
}

pub struct Renderer {
    config: ChartConfig,
}

impl Renderer {
    pub fn new(config: ChartConfig) -> RaceResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Animate every keyframe of `race` in order, returning the number of frames emitted.
    pub fn play<S: FrameSink + ?Sized>(&self, race: &Race, sink: &mut S) -> RaceResult<usize> {
        let start_time = Instant::now();
        let per_transition = self.config.frames_per_transition();
        info!(
            action = "start",
            component = "renderer",
            keyframe_count = race.keyframes.len(),
            frames_per_transition = per_transition,
            "Rendering frames"
        );

        let mut emitted = 0usize;
        for keyframe in 0..race.keyframes.len() {
            let Some(transition) = Transition::plan(race, keyframe, &self.config) else {
                break;
            };

            let frames: Vec<Frame> = (1..=per_transition)
                .map(|step| {
                    let t = step as f64 / per_transition as f64;
                    Frame {
                        index: emitted + step - 1,
                        keyframe,
                        svg: svg::render_scene(&transition.scene(t)),
                    }
                })
                .collect();

            sink.accept(frames)?;
            emitted += per_transition;
            debug!(
                action = "transition",
                component = "renderer",
                keyframe,
                frame_count = emitted,
                "Transition complete"
            );
        }

        info!(
            action = "complete",
            component = "renderer",
            frame_count = emitted,
            duration_ms = start_time.elapsed().as_millis(),
            "Frames rendered"
        );
        Ok(emitted)
    }
}
