//! Axis scales and tick generation for chart rendering.
//!
//! A scale maps values from a data domain onto a plotting-coordinate range
//! and decides where tick marks go and how their labels read. Four variants
//! are provided: [`LinearScale`] and [`LogScale`] for continuous numeric
//! data, [`BandScale`] for ordered categories, and [`TimeScale`] for
//! date-time data with calendar-correct tick stepping. The [`Scale`] enum
//! wraps any of them behind the uniform surface a renderer consumes.
//!
//! Scales are immutable values: every `with_*` builder returns a new scale
//! and derived state (nice domains, tick tables, transforms) is recomputed
//! on access, so a scale handed to another component can never observe a
//! stale configuration.

pub mod array;
pub mod error;
pub mod formatter;
pub mod scalar;
pub mod scales;

pub use error::ScaleError;
pub use formatter::{FormatterRef, TickFormatter};
pub use scalar::ScaleValue;
pub use scales::{
    BandScale, LinearScale, LogBase, LogScale, NegativePolicy, Scale, TickInterval, TickSpec,
    TimeScale, TimeUnit, DEFAULT_INTERVAL_COUNT, DEFAULT_PADDING,
};
