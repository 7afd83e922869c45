/// Continuous linear mapping from a value domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Evenly spaced "nice" tick values covering the domain, stepping by 1, 2 or 5 times a power
    /// of ten. Steps never go below 1 since every charted value is a whole count.
    /// `count` is a hint and may be fractional.
    pub fn ticks(&self, count: f64) -> Vec<f64> {
        let (start, stop) = self.domain;
        if stop.is_nan() || stop <= start {
            return vec![start];
        }
        let step = tick_step(start, stop, count.max(1.0)).max(1.0);
        let first = (start / step).ceil() as i64;
        let last = (stop / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let raw = (stop - start) / count;
    let base = 10f64.powf(raw.log10().floor());
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Discrete bands for `0..count` with equal inner and outer padding, snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let n = count.max(1) as f64;
        let (r0, r1) = range;
        let step = ((r1 - r0) / (n - padding + padding * 2.0).max(1.0)).floor();
        let start = (r0 + (r1 - r0 - step * (n - padding)) * 0.5).round();
        let bandwidth = (step * (1.0 - padding)).round();
        Self {
            count: count.max(1),
            start,
            step,
            bandwidth,
        }
    }

    /// Top edge of band `index`. Indices past the last band share the last band.
    pub fn apply(&self, index: usize) -> f64 {
        self.start + self.step * index.min(self.count - 1) as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_domain_onto_range() {
        let x = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(x.apply(0.0), 0.0);
        assert_eq!(x.apply(5.0), 50.0);
        assert_eq!(x.apply(10.0), 100.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let x = LinearScale::new((3.0, 3.0), (10.0, 20.0));
        assert_eq!(x.apply(3.0), 10.0);
        assert_eq!(x.ticks(4.0), vec![3.0]);
    }

    #[test]
    fn ticks_use_nice_steps() {
        let x = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        assert_eq!(x.ticks(4.0), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

        let x = LinearScale::new((0.0, 1234.0), (0.0, 1.0));
        assert_eq!(
            x.ticks(4.0),
            vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0, 1200.0]
        );
    }

    #[test]
    fn fractional_tick_counts_are_not_truncated() {
        let x = LinearScale::new((0.0, 13.0), (0.0, 1.0));
        assert_eq!(
            x.ticks(695.0 / 160.0),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0]
        );
        assert_eq!(x.ticks(4.0), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn ticks_stay_whole_for_small_domains() {
        let x = LinearScale::new((0.0, 2.0), (0.0, 1.0));
        assert_eq!(x.ticks(4.0), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn bands_are_centered_and_rounded() {
        let y = BandScale::new(3, (0.0, 100.0), 0.0);
        assert_eq!(y.apply(0), 1.0);
        assert_eq!(y.apply(1), 34.0);
        assert_eq!(y.bandwidth(), 33.0);

        let y = BandScale::new(4, (0.0, 420.0), 0.5);
        assert_eq!(y.apply(0), 47.0);
        assert_eq!(y.apply(1), 140.0);
        assert_eq!(y.bandwidth(), 47.0);
    }

    #[test]
    fn indices_past_the_end_share_the_last_band() {
        let y = BandScale::new(3, (0.0, 100.0), 0.0);
        assert_eq!(y.apply(5), y.apply(2));
    }
}
