use std::collections::HashSet;

use crate::config::ChartConfig;
use crate::keyframes::{Keyframe, RankEntry};
use crate::race::Race;
use crate::render::color::string_to_colour;
use crate::render::scale::{BandScale, LinearScale};
use crate::utils::format_count;

/// Chart width in pixels per requested axis tick.
const PIXELS_PER_TICK: f64 = 160.0;

/// Bar geometry at one end of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    width: f64,
    y: f64,
    value: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Motion {
    name: String,
    colour: String,
    from: Placement,
    to: Placement,
    exiting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarShape {
    pub name: String,
    pub colour: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Label text for the bar's value.
    pub value_label: String,
    pub exiting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub x: f64,
    /// `None` for the leading tick, which draws a line only.
    pub label: Option<String>,
}

/// Everything drawn in one frame, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub bars: Vec<BarShape>,
    pub ticks: Vec<Tick>,
    /// Baseline of the axis, above the first bar.
    pub axis_y: f64,
    pub tick_height: f64,
    /// Date text drawn in the lower right corner.
    pub ticker: String,
    pub ticker_y: f64,
    pub ticker_size: f64,
}

/// The animated interval leading into one keyframe.
///
/// Bars already on screen slide from where the previous transition left them. Bars entering the
/// top set start from their `prev` appearance, bars leaving it head for their `next` one.
#[derive(Debug, Clone)]
pub struct Transition<'a> {
    config: &'a ChartConfig,
    y: BandScale,
    motions: Vec<Motion>,
    from_max: f64,
    to_max: f64,
    ticker_before: String,
    ticker_after: String,
}

impl<'a> Transition<'a> {
    /// Plan the transition into `race.keyframes[index]`. Returns `None` past the last keyframe.
    pub fn plan(race: &Race, index: usize, config: &'a ChartConfig) -> Option<Self> {
        let keyframe = race.keyframes.get(index)?;
        let previous = index.checked_sub(1).and_then(|i| race.keyframes.get(i));

        let to_max = domain_max(keyframe);
        let from_max = previous.map(domain_max).unwrap_or(to_max);
        let x_new = x_scale(config, to_max);
        let x_old = x_scale(config, from_max);
        let y = y_scale(config);

        let place = |x: &LinearScale, entry: &RankEntry| Placement {
            width: x.apply(entry.value as f64) - x.apply(0.0),
            y: y.apply(entry.rank.min(config.bars)),
            value: entry.value as f64,
        };

        let current = keyframe.top(config.bars);
        let shown_before: &[RankEntry] = previous.map(|k| k.top(config.bars)).unwrap_or(&[]);
        let shown_now: HashSet<&str> = current.iter().map(|e| e.name.as_str()).collect();

        let mut motions = Vec::with_capacity(current.len() + shown_before.len());
        for entry in current {
            let prev = race.transitions.prev(entry);
            let from = match shown_before.iter().find(|e| e.name == entry.name) {
                Some(before) => place(&x_old, before),
                None => place(&x_new, prev),
            };
            motions.push(Motion {
                name: entry.name.clone(),
                colour: string_to_colour(&entry.name),
                from: Placement {
                    value: prev.value as f64,
                    ..from
                },
                to: place(&x_new, entry),
                exiting: false,
            });
        }
        for before in shown_before
            .iter()
            .filter(|e| !shown_now.contains(e.name.as_str()))
        {
            let next = race.transitions.next(before);
            motions.push(Motion {
                name: before.name.clone(),
                colour: string_to_colour(&before.name),
                from: place(&x_old, before),
                to: place(&x_new, next),
                exiting: true,
            });
        }

        let ticker_after = format_date(keyframe);
        let ticker_before = previous
            .or_else(|| race.keyframes.first())
            .map(format_date)
            .unwrap_or_else(|| ticker_after.clone());

        Some(Self {
            config,
            y,
            motions,
            from_max,
            to_max,
            ticker_before,
            ticker_after,
        })
    }

    /// Scene at progress `t` in `[0, 1]`, before easing.
    pub fn scene(&self, t: f64) -> Scene {
        let config = self.config;
        let e = config.ease.apply(t);
        let x = x_scale(config, lerp(self.from_max, self.to_max, e));
        let x0 = x.apply(0.0);

        let ticks = x
            .ticks(config.width / PIXELS_PER_TICK)
            .into_iter()
            .enumerate()
            .map(|(i, value)| Tick {
                x: x.apply(value),
                label: (i > 0).then(|| format_count(value)),
            })
            .collect();

        let bars = self
            .motions
            .iter()
            .map(|m| BarShape {
                name: m.name.clone(),
                colour: m.colour.clone(),
                x: x0,
                y: lerp(m.from.y, m.to.y, e),
                width: lerp(m.from.width, m.to.width, e).max(0.0),
                height: self.y.bandwidth(),
                value_label: format_count(lerp(m.from.value, m.to.value, e)),
                exiting: m.exiting,
            })
            .collect();

        let ticker = if t >= 1.0 {
            &self.ticker_after
        } else {
            &self.ticker_before
        };

        Scene {
            width: config.width,
            height: config.height(),
            bars,
            ticks,
            axis_y: config.margin.top,
            tick_height: config.bar_size * (config.bars as f64 + 0.1),
            ticker: ticker.clone(),
            ticker_y: config.margin.top + config.bar_size * (config.bars as f64 - 0.45),
            ticker_size: config.bar_size,
        }
    }
}

fn domain_max(keyframe: &Keyframe) -> f64 {
    keyframe.top_value().max(1) as f64
}

fn x_scale(config: &ChartConfig, max: f64) -> LinearScale {
    LinearScale::new(
        (0.0, max),
        (config.margin.left, config.width - config.margin.right),
    )
}

fn y_scale(config: &ChartConfig) -> BandScale {
    let top = config.margin.top;
    BandScale::new(
        config.bars.saturating_add(1),
        (top, top + config.bar_size * (config.bars as f64 + 1.1)),
        0.1,
    )
}

fn format_date(keyframe: &Keyframe) -> String {
    keyframe.date.format("%Y-%m-%d").to_string()
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
