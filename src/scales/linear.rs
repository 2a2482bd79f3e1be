use std::sync::Arc;

use crate::array::{extent, nice_interval, NiceNumeric};
use crate::error::ScaleError;
use crate::formatter::{format_number, FormatterRef, TickFormatter};
use crate::scales::{TickSpec, DEFAULT_INTERVAL_COUNT};

/// Continuous linear scale mapping a numeric domain onto a coordinate range.
///
/// The domain is rounded outward to aesthetic step boundaries before the
/// transform is derived, so the first and last tick always land exactly on
/// the range bounds. The range is taken as given; a descending range flips
/// the axis.
#[derive(Debug, Clone)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    ticks: TickSpec,
    formatter: Option<FormatterRef>,
}

impl LinearScale {
    /// Creates a scale from explicit domain bounds, swapping them if given
    /// in descending order.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (min, max) = domain;
        let domain = if min > max { (max, min) } else { (min, max) };
        Self {
            domain,
            range,
            ticks: TickSpec::Count(DEFAULT_INTERVAL_COUNT),
            formatter: None,
        }
    }

    /// Creates a scale whose domain is the extent of `values`, ignoring
    /// non-finite entries. An empty collection falls back to a unit domain.
    pub fn from_data<I>(values: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::new(extent(values), range)
    }

    pub fn with_domain(self, domain: (f64, f64)) -> Self {
        let (min, max) = domain;
        let domain = if min > max { (max, min) } else { (min, max) };
        Self { domain, ..self }
    }

    pub fn with_range(self, range: (f64, f64)) -> Self {
        Self { range, ..self }
    }

    pub fn with_interval_count(self, count: usize) -> Self {
        Self {
            ticks: TickSpec::Count(count),
            ..self
        }
    }

    /// Replaces computed ticks with an explicit position list, used verbatim.
    pub fn with_tick_positions(self, positions: Vec<f64>) -> Result<Self, ScaleError> {
        if positions.is_empty() {
            return Err(ScaleError::EmptyTickPositions);
        }
        Ok(Self {
            ticks: TickSpec::Positions(positions),
            ..self
        })
    }

    pub fn with_formatter(self, formatter: Arc<dyn TickFormatter>) -> Self {
        Self {
            formatter: Some(formatter),
            ..self
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn formatter(&self) -> Option<&FormatterRef> {
        self.formatter.as_ref()
    }

    /// Nice interval recomputed from the current domain and tick cadence.
    pub fn nice(&self) -> NiceNumeric {
        let count = match &self.ticks {
            TickSpec::Count(count) => *count,
            TickSpec::Positions(positions) => positions.len(),
        };
        nice_interval(self.domain.0, self.domain.1, count)
    }

    /// Domain bounds the coordinate transform interpolates between. Explicit
    /// tick positions leave the raw domain untouched.
    pub(crate) fn transform_domain(&self) -> (f64, f64) {
        match &self.ticks {
            TickSpec::Count(_) => {
                let nice = self.nice();
                (nice.nice_min, nice.nice_max)
            }
            TickSpec::Positions(_) => self.domain,
        }
    }

    /// Maps a domain value into the range. A collapsed domain degenerates to
    /// the identity transform.
    pub fn position(&self, value: f64) -> f64 {
        let (d0, d1) = self.transform_domain();
        if d1 == d0 {
            return value;
        }
        let (r0, r1) = self.range;
        r0 + ((value - d0) / (d1 - d0)) * (r1 - r0)
    }

    /// Maps a range coordinate back into the domain.
    pub fn invert(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        if r1 == r0 {
            return value;
        }
        let (d0, d1) = self.transform_domain();
        d0 + ((value - r0) / (r1 - r0)) * (d1 - d0)
    }

    /// Tick values in domain units: either every nice step boundary or the
    /// explicit position list.
    pub fn ticks_in_domain(&self) -> Vec<f64> {
        match &self.ticks {
            TickSpec::Count(_) => self.nice().positions(),
            TickSpec::Positions(positions) => positions.clone(),
        }
    }

    fn display_decimals(&self) -> usize {
        match &self.ticks {
            TickSpec::Count(_) => self.nice().display_decimals,
            TickSpec::Positions(_) => 0,
        }
    }

    /// Formats a tick value under the scale's decimal policy, unless a
    /// custom formatter was supplied.
    pub fn format_tick(&self, value: f64) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter.format(&value.into());
        }
        format_number(value, self.display_decimals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_ticks_span_range_exactly() {
        let scale = LinearScale::new((0.3, 9.7), (0.0, 200.0)).with_interval_count(6);
        let ticks = scale.ticks_in_domain();
        assert_approx_eq!(f64, scale.position(ticks[0]), 0.0);
        assert_approx_eq!(f64, scale.position(*ticks.last().unwrap()), 200.0);
    }

    #[test]
    fn test_position_interpolates() {
        // domain nices to 0..100, so 50 sits mid-range
        let scale = LinearScale::new((0.0, 97.0), (0.0, 10.0)).with_interval_count(10);
        assert_approx_eq!(f64, scale.position(50.0), 5.0);
        assert_approx_eq!(f64, scale.position(0.0), 0.0);
        assert_approx_eq!(f64, scale.position(100.0), 10.0);
    }

    #[test]
    fn test_flipped_range() {
        let scale = LinearScale::new((0.0, 100.0), (300.0, 0.0)).with_interval_count(6);
        assert_approx_eq!(f64, scale.position(0.0), 300.0);
        assert_approx_eq!(f64, scale.position(100.0), 0.0);
        assert_approx_eq!(f64, scale.position(25.0), 225.0);
    }

    #[test]
    fn test_descending_domain_is_normalized() {
        let scale = LinearScale::new((100.0, 0.0), (0.0, 1.0));
        assert_eq!(scale.domain(), (0.0, 100.0));
    }

    #[test]
    fn test_collapsed_domain_degenerates_to_identity() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 1.0)).with_tick_positions(vec![5.0]).unwrap();
        assert_approx_eq!(f64, scale.position(5.0), 5.0);
        assert_approx_eq!(f64, scale.position(42.0), 42.0);
    }

    #[test]
    fn test_invert_round_trips() {
        let scale = LinearScale::new((0.0, 80.0), (10.0, 410.0)).with_interval_count(5);
        for v in [0.0, 13.0, 55.5, 80.0] {
            assert_approx_eq!(f64, scale.invert(scale.position(v)), v, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_from_data_ignores_non_finite() {
        let scale = LinearScale::from_data([4.0, f64::NAN, -2.0, 9.0], (0.0, 1.0));
        assert_eq!(scale.domain(), (-2.0, 9.0));
    }

    #[test]
    fn test_explicit_tick_positions_used_verbatim() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 1.0))
            .with_tick_positions(vec![1.0, 4.0, 9.5])
            .unwrap();
        assert_eq!(scale.ticks_in_domain(), vec![1.0, 4.0, 9.5]);
        // transform interpolates the raw domain when ticks are explicit
        assert_approx_eq!(f64, scale.position(5.0), 0.5);
    }

    #[test]
    fn test_empty_tick_positions_rejected() {
        let result = LinearScale::new((0.0, 10.0), (0.0, 1.0)).with_tick_positions(vec![]);
        assert_eq!(result.unwrap_err(), ScaleError::EmptyTickPositions);
    }

    #[test]
    fn test_format_tick_decimals() {
        // step 0.2 keeps two decimals, whole numbers drop them
        let scale = LinearScale::new((0.0, 1.0), (0.0, 1.0)).with_interval_count(6);
        assert_eq!(scale.format_tick(0.2), "0.20");
        assert_eq!(scale.format_tick(1.0), "1");

        let scale = LinearScale::new((0.0, 1000.0), (0.0, 1.0)).with_interval_count(6);
        assert_eq!(scale.format_tick(200.0), "200");
    }

    #[test]
    fn test_custom_formatter_wins() {
        use crate::scalar::ScaleValue;

        #[derive(Debug)]
        struct Units;
        impl TickFormatter for Units {
            fn format(&self, value: &ScaleValue) -> String {
                match value {
                    ScaleValue::Number(v) => format!("{v}ms"),
                    other => format!("{other:?}"),
                }
            }
        }

        let scale = LinearScale::new((0.0, 10.0), (0.0, 1.0)).with_formatter(Arc::new(Units));
        assert_eq!(scale.format_tick(4.0), "4ms");
    }
}
