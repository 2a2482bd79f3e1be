pub mod band;
pub mod linear;
pub mod log;
pub mod time;

pub use band::{BandScale, DEFAULT_PADDING};
pub use linear::LinearScale;
pub use log::{LogBase, LogScale, NegativePolicy};
pub use time::{TickInterval, TimeScale, TimeUnit};

use serde::{Deserialize, Serialize};

use crate::formatter::format_number;
use crate::scalar::ScaleValue;

/// Tick count used when a scale is built without an explicit cadence.
pub const DEFAULT_INTERVAL_COUNT: usize = 10;

/// Resolved tick cadence for continuous numeric scales: either a target
/// count of evenly spaced steps, or an explicit caller-supplied list used
/// verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickSpec {
    Count(usize),
    Positions(Vec<f64>),
}

impl Default for TickSpec {
    fn default() -> Self {
        TickSpec::Count(DEFAULT_INTERVAL_COUNT)
    }
}

/// Any of the supported scale variants behind one uniform surface.
///
/// Renderers drive every variant through the same calls: ticks in domain
/// units for labels, ticks in range units for grid lines, a position
/// transform for data points, and a tick formatter. Each variant keeps its
/// full typed API available for variant-specific concerns such as band
/// geometry.
#[derive(Debug, Clone)]
pub enum Scale {
    Linear(LinearScale),
    Log(LogScale),
    Band(BandScale),
    Time(TimeScale),
}

impl Scale {
    pub fn range(&self) -> (f64, f64) {
        match self {
            Scale::Linear(s) => s.range(),
            Scale::Log(s) => s.range(),
            Scale::Band(s) => s.range(),
            Scale::Time(s) => s.range(),
        }
    }

    /// Replaces the range. Derived state is recomputed on access, so the
    /// returned scale is immediately consistent.
    pub fn with_range(self, range: (f64, f64)) -> Scale {
        match self {
            Scale::Linear(s) => Scale::Linear(s.with_range(range)),
            Scale::Log(s) => Scale::Log(s.with_range(range)),
            Scale::Band(s) => Scale::Band(s.with_range(range)),
            Scale::Time(s) => Scale::Time(s.with_range(range)),
        }
    }

    /// Tick values in domain units.
    pub fn ticks_in_domain(&self) -> Vec<ScaleValue> {
        match self {
            Scale::Linear(s) => s.ticks_in_domain().into_iter().map(Into::into).collect(),
            Scale::Log(s) => s.ticks_in_domain().into_iter().map(Into::into).collect(),
            Scale::Band(s) => s.ticks_in_domain(),
            Scale::Time(s) => s.ticks_in_domain().into_iter().map(Into::into).collect(),
        }
    }

    /// Range coordinates of the ticks, in the same order as
    /// [`ticks_in_domain`](Self::ticks_in_domain).
    pub fn ticks_in_range(&self) -> Vec<f64> {
        match self {
            Scale::Linear(s) => s.ticks_in_domain().into_iter().map(|t| s.position(t)).collect(),
            Scale::Log(s) => s.ticks_in_domain().into_iter().map(|t| s.position(t)).collect(),
            Scale::Band(s) => s.ticks_in_range(),
            Scale::Time(s) => s.ticks_in_range(),
        }
    }

    /// Maps a single value into the range. A value of the wrong kind for
    /// the variant is treated like an unknown lookup and maps to the range
    /// start.
    pub fn position(&self, value: &ScaleValue) -> f64 {
        match (self, value) {
            (Scale::Linear(s), ScaleValue::Number(v)) => s.position(*v),
            (Scale::Log(s), ScaleValue::Number(v)) => s.position(*v),
            (Scale::Band(s), ScaleValue::Category(v)) => s.center(v),
            (Scale::Time(s), ScaleValue::Timestamp(v)) => s.position(*v),
            _ => self.range().0,
        }
    }

    /// Snapshot of the coordinate transform for repeated use in tight
    /// loops. The returned closure is a pure function of the scale's state
    /// at the time it was obtained; later builder steps on the scale do
    /// not affect it.
    pub fn position_fn(&self) -> Box<dyn Fn(&ScaleValue) -> f64 + Send + Sync> {
        match self {
            Scale::Linear(s) => {
                let (d0, d1) = s.transform_domain();
                let (r0, r1) = s.range();
                Box::new(move |value| match value {
                    ScaleValue::Number(v) if d1 != d0 => r0 + ((v - d0) / (d1 - d0)) * (r1 - r0),
                    ScaleValue::Number(v) => *v,
                    _ => r0,
                })
            }
            Scale::Log(s) => {
                let s = s.clone();
                let l0 = s.log_value(s.domain().0);
                let l1 = s.log_value(s.domain().1);
                let (r0, r1) = s.range();
                Box::new(move |value| match value {
                    ScaleValue::Number(v) if l1 != l0 => {
                        r0 + ((s.log_value(*v) - l0) / (l1 - l0)) * (r1 - r0)
                    }
                    _ => r0,
                })
            }
            Scale::Band(s) => {
                let s = s.clone();
                Box::new(move |value| match value {
                    ScaleValue::Category(v) => s.center(v),
                    _ => s.range().0,
                })
            }
            Scale::Time(s) => {
                let s = s.clone();
                let nice = s.nice();
                Box::new(move |value| match value {
                    ScaleValue::Timestamp(v) => {
                        s.position_between(*v, nice.nice_min, nice.nice_max)
                    }
                    _ => s.range().0,
                })
            }
        }
    }

    /// Maps a range coordinate back into the domain. `None` when the
    /// coordinate falls outside every band of a band scale.
    pub fn invert(&self, value: f64) -> Option<ScaleValue> {
        match self {
            Scale::Linear(s) => Some(s.invert(value).into()),
            Scale::Log(s) => Some(s.invert(value).into()),
            Scale::Band(s) => s.invert(value).map(Into::into),
            Scale::Time(s) => Some(s.invert(value).into()),
        }
    }

    /// Formats a tick with the variant's policy, or the caller-supplied
    /// formatter when one is attached.
    pub fn format_tick(&self, value: &ScaleValue) -> String {
        match (self, value) {
            (Scale::Linear(s), ScaleValue::Number(v)) => s.format_tick(*v),
            (Scale::Log(s), ScaleValue::Number(v)) => s.format_tick(*v),
            (Scale::Band(s), ScaleValue::Category(v)) => s.format_tick(v),
            (Scale::Time(s), ScaleValue::Timestamp(v)) => s.format_tick(*v),
            (_, other) => fallback_label(other),
        }
    }
}

/// Label for a value the variant has no policy for.
fn fallback_label(value: &ScaleValue) -> String {
    match value {
        ScaleValue::Number(v) => format_number(*v, 0),
        ScaleValue::Timestamp(v) => v.format("%Y-%m-%d %H:%M:%S").to_string(),
        ScaleValue::Category(v) => v.clone(),
    }
}

impl From<LinearScale> for Scale {
    fn from(scale: LinearScale) -> Self {
        Scale::Linear(scale)
    }
}

impl From<LogScale> for Scale {
    fn from(scale: LogScale) -> Self {
        Scale::Log(scale)
    }
}

impl From<BandScale> for Scale {
    fn from(scale: BandScale) -> Self {
        Scale::Band(scale)
    }
}

impl From<TimeScale> for Scale {
    fn from(scale: TimeScale) -> Self {
        Scale::Time(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_uniform_ticks_match_positions() {
        let scales: Vec<Scale> = vec![
            LinearScale::new((0.0, 100.0), (0.0, 10.0)).into(),
            LogScale::new((1.0, 1000.0), (0.0, 10.0)).into(),
            BandScale::new(["A", "B", "C"], (0.0, 10.0)).into(),
        ];
        for scale in scales {
            let domain_ticks = scale.ticks_in_domain();
            let range_ticks = scale.ticks_in_range();
            assert_eq!(domain_ticks.len(), range_ticks.len());
            for (d, r) in domain_ticks.iter().zip(&range_ticks) {
                assert_approx_eq!(f64, scale.position(d), *r, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_position_fn_matches_position() {
        let scale: Scale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).into();
        let f = scale.position_fn();
        assert_approx_eq!(f64, f(&ScaleValue::Number(5.0)), 50.0);
        assert_approx_eq!(f64, scale.position(&ScaleValue::Number(5.0)), 50.0);
    }

    #[test]
    fn test_position_fn_is_a_snapshot() {
        let scale: Scale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).into();
        let f = scale.position_fn();
        let moved = scale.with_range((0.0, 1.0));
        assert_approx_eq!(f64, f(&ScaleValue::Number(10.0)), 100.0);
        assert_approx_eq!(f64, moved.position(&ScaleValue::Number(10.0)), 1.0);
    }

    #[test]
    fn test_mismatched_value_kind_maps_to_range_start() {
        let scale: Scale = LinearScale::new((0.0, 10.0), (7.0, 100.0)).into();
        assert_approx_eq!(f64, scale.position(&ScaleValue::Category("A".into())), 7.0);
    }

    #[test]
    fn test_with_range_is_idempotent() {
        let scale: Scale = BandScale::new(["A", "B"], (0.0, 1.0)).into();
        let once = scale.clone().with_range((0.0, 8.0));
        let twice = scale.with_range((0.0, 8.0)).with_range((0.0, 8.0));
        assert_eq!(once.ticks_in_range(), twice.ticks_in_range());
        assert_eq!(
            once.position(&ScaleValue::Category("B".into())),
            twice.position(&ScaleValue::Category("B".into()))
        );
    }

    #[test]
    fn test_format_tick_dispatch() {
        let linear: Scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).into();
        assert_eq!(linear.format_tick(&ScaleValue::Number(20.0)), "20");

        let band: Scale = BandScale::new(["Hippo"], (0.0, 1.0)).into();
        assert_eq!(band.format_tick(&ScaleValue::Category("Hippo".into())), "Hippo");
    }
}
