use chrono::NaiveDateTime;

/// Aesthetic step sizes, expressed as multiples of a power of ten.
const NICE_BREAKS: [f64; 13] = [
    0.1, 0.2, 0.25, 0.4, 0.5, 0.75, 1.0, 2.0, 2.5, 4.0, 5.0, 7.5, 10.0,
];

/// Slack factor applied when counting whole steps between nice bounds, so
/// that a bound sitting a hair below an exact multiple still counts.
const STEP_COUNT_SLACK: f64 = 1.0001;

/// Rounded axis interval computed from a raw numeric domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NiceNumeric {
    /// Domain minimum rounded down to a whole step
    pub nice_min: f64,
    /// Domain maximum rounded up to a whole step
    pub nice_max: f64,
    /// Distance between adjacent ticks
    pub step: f64,
    /// Number of whole steps between the nice bounds
    pub interval_count: usize,
    /// Fractional digits a default formatter should render for ticks at this step
    pub display_decimals: usize,
}

impl NiceNumeric {
    /// Tick positions at every step boundary, inclusive of both nice bounds.
    pub fn positions(&self) -> Vec<f64> {
        (0..=self.interval_count)
            .map(|i| self.nice_min + self.step * i as f64)
            .collect()
    }
}

/// Rounds a numeric domain outward to aesthetic step boundaries.
///
/// The step is the smallest entry of a break table of the form
/// `{1, 2, 2.5, 4, 5, 7.5} x 10^k` that divides the domain into at most
/// `interval_count - 1` whole intervals. Both returned bounds are whole
/// multiples of the step, so the nice domain always contains the raw one.
pub fn nice_interval(min: f64, max: f64, interval_count: usize) -> NiceNumeric {
    let divisor = interval_count.max(2) - 1;
    let width = max - min;
    let width = if width == 0.0 { 1.0 } else { width };
    let raw_step = width / divisor as f64;

    let magnitude = (raw_step.log10() - 1.0).ceil();
    let scale_factor = 10f64.powf(magnitude);
    let normalized = raw_step / scale_factor;
    let break_value = NICE_BREAKS
        .iter()
        .copied()
        .find(|b| *b >= normalized)
        .unwrap_or(NICE_BREAKS[NICE_BREAKS.len() - 1]);
    let step = break_value * scale_factor;

    let nice_min = step * (min / step).floor();
    let nice_max = step * (max / step).ceil();
    let adjusted = (STEP_COUNT_SLACK * (nice_max - nice_min) / step).round() as usize;

    let display_decimals = if magnitude > 0.0 {
        0
    } else {
        (1.0 - magnitude) as usize
    };

    NiceNumeric {
        nice_min,
        nice_max,
        step,
        interval_count: adjusted,
        display_decimals,
    }
}

/// Minimum and maximum of the finite values in `values`, normalized so that
/// min <= max. Falls back to `(0.0, 1.0)` when no finite value is present.
pub fn extent<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        (0.0, 1.0)
    } else {
        (min, max)
    }
}

/// Earliest and latest of `values`. Falls back to a one-day window starting
/// at the epoch when the iterator is empty.
pub fn extent_timestamps<I>(values: I) -> (NaiveDateTime, NaiveDateTime)
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    let mut min: Option<NaiveDateTime> = None;
    let mut max: Option<NaiveDateTime> = None;
    for v in values {
        min = Some(min.map_or(v, |m| m.min(v)));
        max = Some(max.map_or(v, |m| m.max(v)));
    }
    match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            let epoch = NaiveDateTime::default();
            (epoch, epoch + chrono::Duration::days(1))
        }
    }
}
