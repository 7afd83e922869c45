/// Easing applied to a transition's progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Ease {
    #[default]
    Linear,
    QuadInOut,
    CubicInOut,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadInOut if t < 0.5 => 2.0 * t * t,
            Self::QuadInOut => 1.0 - (2.0 - 2.0 * t).powi(2) / 2.0,
            Self::CubicInOut if t < 0.5 => 4.0 * t.powi(3),
            Self::CubicInOut => 1.0 - (2.0 - 2.0 * t).powi(3) / 2.0,
        }
    }
}
