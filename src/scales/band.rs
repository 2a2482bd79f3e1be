use std::sync::Arc;

use crate::error::ScaleError;
use crate::formatter::{FormatterRef, TickFormatter};
use crate::scalar::ScaleValue;

/// Default gap between adjacent bands, in range units.
pub const DEFAULT_PADDING: f64 = 0.5;

/// Ordinal scale assigning each discrete domain value an equal-width band of
/// the range, in domain order.
///
/// Padding narrows each band symmetrically without moving its center. The
/// range may run in either direction; padding is applied flip-aware so the
/// gap stays visually on the correct side of an inverted axis.
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding: f64,
    formatter: Option<FormatterRef>,
}

impl BandScale {
    pub fn new<I, S>(domain: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            padding: DEFAULT_PADDING,
            formatter: None,
        }
    }

    pub fn with_domain<I, S>(self, domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_range(self, range: (f64, f64)) -> Self {
        Self { range, ..self }
    }

    /// Sets the gap between adjacent bands. A padding wider than the band
    /// itself is accepted; the resulting band bounds simply cross.
    pub fn with_padding(self, padding: f64) -> Result<Self, ScaleError> {
        if !padding.is_finite() || padding < 0.0 {
            return Err(ScaleError::InvalidScalePropertyValue(format!(
                "padding must be a non-negative number, got {padding}"
            )));
        }
        Ok(Self { padding, ..self })
    }

    pub fn with_formatter(self, formatter: Arc<dyn TickFormatter>) -> Self {
        Self {
            formatter: Some(formatter),
            ..self
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn formatter(&self) -> Option<&FormatterRef> {
        self.formatter.as_ref()
    }

    /// Width of one band including padding, signed by range direction. Zero
    /// for an empty domain.
    pub fn item_width(&self) -> f64 {
        if self.domain.is_empty() {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.domain.len() as f64
    }

    /// Distance between the starts of adjacent bands; identical to
    /// [`item_width`](Self::item_width).
    pub fn step(&self) -> f64 {
        self.item_width()
    }

    /// Signed width of one padded band. Zero for an empty domain.
    pub fn band_width(&self) -> f64 {
        if self.domain.is_empty() {
            return 0.0;
        }
        self.item_width() - self.flip() * self.padding
    }

    /// +1 for an ascending range, -1 for a descending one.
    fn flip(&self) -> f64 {
        if self.range.0 < self.range.1 {
            1.0
        } else {
            -1.0
        }
    }

    fn index_of(&self, value: &str) -> Option<usize> {
        self.domain.iter().position(|d| d == value)
    }

    /// Center coordinate of the band at `index`.
    pub fn center_at(&self, index: usize) -> f64 {
        let width = self.item_width();
        self.range.0 + width / 2.0 + index as f64 * width
    }

    /// Center coordinate for a domain value. An unknown value maps to the
    /// range start.
    pub fn center(&self, value: &str) -> f64 {
        match self.index_of(value) {
            Some(index) => self.center_at(index),
            None => self.range.0,
        }
    }

    /// Padded band bounds at `index`.
    pub fn band_at(&self, index: usize) -> (f64, f64) {
        let width = self.item_width();
        let inset = self.flip() * self.padding / 2.0;
        let start = self.range.0;
        (
            start + inset + index as f64 * width,
            start + (index + 1) as f64 * width - inset,
        )
    }

    /// Padded band bounds for a domain value. An unknown value collapses to
    /// `(start, start)`.
    pub fn band(&self, value: &str) -> (f64, f64) {
        match self.index_of(value) {
            Some(index) => self.band_at(index),
            None => (self.range.0, self.range.0),
        }
    }

    /// Band bounds for every domain value, in domain order.
    pub fn bands(&self) -> Vec<(f64, f64)> {
        (0..self.domain.len()).map(|i| self.band_at(i)).collect()
    }

    /// Maps a range coordinate back to the domain value whose band covers
    /// it, or `None` when the coordinate falls outside every band.
    pub fn invert(&self, value: f64) -> Option<&str> {
        let width = self.item_width();
        if width == 0.0 || !value.is_finite() {
            return None;
        }
        // test the quotient itself, trunc would fold -0.2 onto bucket zero
        let bucket = (value - self.range.0) / width;
        if bucket < 0.0 || bucket >= self.domain.len() as f64 {
            return None;
        }
        Some(self.domain[bucket as usize].as_str())
    }

    /// One tick per domain value, in domain order.
    pub fn ticks_in_domain(&self) -> Vec<ScaleValue> {
        self.domain
            .iter()
            .map(|d| ScaleValue::Category(d.clone()))
            .collect()
    }

    /// Band centers, in domain order.
    pub fn ticks_in_range(&self) -> Vec<f64> {
        (0..self.domain.len()).map(|i| self.center_at(i)).collect()
    }

    pub fn format_tick(&self, value: &str) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter.format(&ScaleValue::Category(value.to_string()));
        }
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn animals() -> BandScale {
        BandScale::new(["Hippo", "Turtle", "Rabbit"], (0.0, 9.0))
    }

    #[test]
    fn test_unpadded_bands_partition_range() {
        let scale = animals().with_padding(0.0).unwrap();
        assert_eq!(scale.bands(), vec![(0.0, 3.0), (3.0, 6.0), (6.0, 9.0)]);
        assert_eq!(scale.ticks_in_range(), vec![1.5, 4.5, 7.5]);
    }

    #[test]
    fn test_padding_narrows_bands_around_centers() {
        let scale = animals().with_padding(2.0).unwrap();
        assert_approx_eq!(f64, scale.center("Turtle"), 4.5);
        assert_eq!(scale.band("Hippo"), (1.0, 2.0));
        assert_eq!(scale.band("Turtle"), (4.0, 5.0));
    }

    #[test]
    fn test_step_and_band_width() {
        let scale = animals().with_padding(2.0).unwrap();
        assert_approx_eq!(f64, scale.step(), 3.0);
        let (start, end) = scale.band("Hippo");
        assert_approx_eq!(f64, scale.band_width(), end - start);

        let flipped = BandScale::new(["A", "B"], (8.0, 0.0)).with_padding(2.0).unwrap();
        assert_approx_eq!(f64, flipped.step(), -4.0);
        assert_approx_eq!(f64, flipped.band_width(), -2.0);

        let empty = BandScale::new(Vec::<String>::new(), (0.0, 9.0));
        assert_approx_eq!(f64, empty.band_width(), 0.0);
    }

    #[test]
    fn test_flipped_range_padding() {
        // descending range keeps the gap on the visually correct side
        let scale = BandScale::new(["A", "B"], (8.0, 0.0)).with_padding(2.0).unwrap();
        assert_approx_eq!(f64, scale.item_width(), -4.0);
        assert_eq!(scale.band("A"), (7.0, 5.0));
        assert_eq!(scale.band("B"), (3.0, 1.0));
        assert_approx_eq!(f64, scale.center("A"), 6.0);
    }

    #[test]
    fn test_unknown_value_sentinels() {
        let scale = animals();
        assert_approx_eq!(f64, scale.center("Moose"), 0.0);
        assert_eq!(scale.band("Moose"), (0.0, 0.0));
    }

    #[test]
    fn test_empty_domain_is_safe() {
        let scale = BandScale::new(Vec::<String>::new(), (0.0, 9.0));
        assert_approx_eq!(f64, scale.item_width(), 0.0);
        assert_eq!(scale.band("anything"), (0.0, 0.0));
        assert_eq!(scale.invert(4.0), None);
        assert!(scale.ticks_in_range().is_empty());
    }

    #[test]
    fn test_invert_buckets() {
        let scale = animals();
        assert_eq!(scale.invert(0.5), Some("Hippo"));
        assert_eq!(scale.invert(4.0), Some("Turtle"));
        assert_eq!(scale.invert(8.9), Some("Rabbit"));
        assert_eq!(scale.invert(9.5), None);
        assert_eq!(scale.invert(-0.1), None);
        assert_eq!(scale.invert(f64::NAN), None);
    }

    #[test]
    fn test_invert_flipped_range() {
        let scale = BandScale::new(["A", "B"], (8.0, 0.0));
        assert_eq!(scale.invert(7.0), Some("A"));
        assert_eq!(scale.invert(1.0), Some("B"));
    }

    #[test]
    fn test_oversized_padding_crosses_bounds() {
        let scale = BandScale::new(["A", "B"], (0.0, 4.0)).with_padding(3.0).unwrap();
        let (start, end) = scale.band("A");
        assert!(start > end);
    }

    #[test]
    fn test_negative_padding_rejected() {
        let result = animals().with_padding(-1.0);
        assert!(matches!(
            result,
            Err(ScaleError::InvalidScalePropertyValue(_))
        ));
    }
}
