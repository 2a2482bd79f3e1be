use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::array::{extent, nice_interval, NiceNumeric};
use crate::error::ScaleError;
use crate::formatter::{format_number, FormatterRef, TickFormatter};
use crate::scales::{TickSpec, DEFAULT_INTERVAL_COUNT};

/// Logarithm base the scale transforms with. Bases 2, e, and 10 each use
/// the dedicated std intrinsic rather than a generic change-of-base.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
pub enum LogBase {
    #[strum(serialize = "2")]
    #[serde(rename = "2")]
    Two,
    #[strum(serialize = "e")]
    #[serde(rename = "e")]
    E,
    #[default]
    #[strum(serialize = "10")]
    #[serde(rename = "10")]
    Ten,
}

impl LogBase {
    pub fn log(&self, value: f64) -> f64 {
        match self {
            LogBase::Two => value.log2(),
            LogBase::E => value.ln(),
            LogBase::Ten => value.log10(),
        }
    }

    pub fn pow(&self, value: f64) -> f64 {
        match self {
            LogBase::Two => 2f64.powf(value),
            LogBase::E => value.exp(),
            LogBase::Ten => 10f64.powf(value),
        }
    }
}

/// How values at or below zero, where the logarithm is undefined, are
/// treated: `Mask` and `Clip` both pin them to zero, `Sym` reflects the
/// transform around the origin.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NegativePolicy {
    #[default]
    Mask,
    Clip,
    Sym,
}

/// Continuous logarithmic scale.
///
/// The coordinate transform rescales the logged raw domain bounds; nice-ing
/// only drives tick placement and decimals, never the transform itself, so
/// tick positions are human-round in domain units rather than log units.
#[derive(Debug, Clone)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
    ticks: TickSpec,
    base: LogBase,
    negative: NegativePolicy,
    linear_range: Option<f64>,
    formatter: Option<FormatterRef>,
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (min, max) = domain;
        let domain = if min > max { (max, min) } else { (min, max) };
        Self {
            domain,
            range,
            ticks: TickSpec::Count(DEFAULT_INTERVAL_COUNT),
            base: LogBase::default(),
            negative: NegativePolicy::default(),
            linear_range: None,
            formatter: None,
        }
    }

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

    pub fn with_base(self, base: LogBase) -> Self {
        Self { base, ..self }
    }

    /// Parses a base from its display name, rejecting anything outside the
    /// supported set.
    pub fn with_base_named(self, name: &str) -> Result<Self, ScaleError> {
        let base = LogBase::from_str(name).map_err(|_| {
            ScaleError::InvalidScalePropertyValue(format!(
                "log_base must be one of 2, e, 10, got '{name}'"
            ))
        })?;
        Ok(Self { base, ..self })
    }

    pub fn with_negative_policy(self, negative: NegativePolicy) -> Self {
        Self { negative, ..self }
    }

    pub fn with_negative_policy_named(self, name: &str) -> Result<Self, ScaleError> {
        let negative = NegativePolicy::from_str(name).map_err(|_| {
            ScaleError::InvalidScalePropertyValue(format!(
                "negative_numbers must be one of mask, clip, sym, got '{name}'"
            ))
        })?;
        Ok(Self { negative, ..self })
    }

    /// Sets the half-width of the linear zone around zero. Values whose
    /// magnitude falls inside it skip the logarithm entirely.
    pub fn with_linear_range(self, threshold: f64) -> Result<Self, ScaleError> {
        if !(threshold > 0.0) {
            return Err(ScaleError::InvalidScalePropertyValue(format!(
                "linear_range must be a positive number, got {threshold}"
            )));
        }
        Ok(Self {
            linear_range: Some(threshold),
            ..self
        })
    }

    pub fn with_interval_count(self, count: usize) -> Self {
        Self {
            ticks: TickSpec::Count(count),
            ..self
        }
    }

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

    pub fn base(&self) -> LogBase {
        self.base
    }

    pub fn negative_policy(&self) -> NegativePolicy {
        self.negative
    }

    pub fn linear_range(&self) -> Option<f64> {
        self.linear_range
    }

    pub fn formatter(&self) -> Option<&FormatterRef> {
        self.formatter.as_ref()
    }

    /// Per-value logarithm under the scale's negative policy and linear zone.
    ///
    /// The linear zone covers non-negative values under every policy, but
    /// extends to negative values only under `Sym`; `Mask` and `Clip` pin
    /// negatives to zero whether or not they fall inside the zone.
    pub fn log_value(&self, value: f64) -> f64 {
        if let Some(threshold) = self.linear_range {
            if value.abs() < threshold
                && (value >= 0.0 || self.negative == NegativePolicy::Sym)
            {
                return value;
            }
        }
        if value == 0.0 {
            0.0
        } else if value < 0.0 {
            match self.negative {
                NegativePolicy::Mask | NegativePolicy::Clip => 0.0,
                NegativePolicy::Sym => -self.base.log(-value),
            }
        } else {
            self.base.log(value)
        }
    }

    /// Inverse of [`log_value`](Self::log_value), exact wherever the forward
    /// transform is one-to-one.
    fn unlog_value(&self, logged: f64) -> f64 {
        if let Some(threshold) = self.linear_range {
            if logged.abs() < threshold
                && (logged >= 0.0 || self.negative == NegativePolicy::Sym)
            {
                return logged;
            }
        }
        if logged < 0.0 && self.negative == NegativePolicy::Sym {
            -self.base.pow(-logged)
        } else {
            self.base.pow(logged)
        }
    }

    /// Maps a domain value into the range by rescaling its logarithm between
    /// the logged domain bounds. A domain whose logged bounds coincide
    /// degenerates to the range start.
    pub fn position(&self, value: f64) -> f64 {
        let l0 = self.log_value(self.domain.0);
        let l1 = self.log_value(self.domain.1);
        if l1 == l0 {
            return self.range.0;
        }
        let (r0, r1) = self.range;
        r0 + ((self.log_value(value) - l0) / (l1 - l0)) * (r1 - r0)
    }

    /// Maps a range coordinate back into the domain.
    pub fn invert(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        if r1 == r0 {
            return self.domain.0;
        }
        let l0 = self.log_value(self.domain.0);
        let l1 = self.log_value(self.domain.1);
        self.unlog_value(l0 + ((value - r0) / (r1 - r0)) * (l1 - l0))
    }

    fn nice(&self) -> NiceNumeric {
        let count = match &self.ticks {
            TickSpec::Count(count) => *count,
            TickSpec::Positions(positions) => positions.len(),
        };
        nice_interval(self.domain.0, self.domain.1, count)
    }

    /// Tick values in raw domain units. Computed ticks are nice-d over the
    /// unlogged domain so labels stay human-round; explicit positions are
    /// used verbatim even when they fall outside the domain.
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

    pub fn format_tick(&self, value: f64) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter.format(&value.into());
        }
        format_number(value, self.display_decimals())
    }
}
