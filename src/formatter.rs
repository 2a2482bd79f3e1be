use std::fmt::Debug;
use std::sync::Arc;

use crate::scalar::ScaleValue;

/// Caller-supplied tick label formatter. When a scale carries one it takes
/// precedence over the scale's own formatting policy.
pub trait TickFormatter: Debug + Send + Sync + 'static {
    fn format(&self, value: &ScaleValue) -> String;
}

/// Shared handle to a formatter, cloneable across scale copies.
pub type FormatterRef = Arc<dyn TickFormatter>;

/// Renders a numeric tick under a fixed-decimals policy: whole numbers drop
/// the fraction entirely, everything else gets exactly `decimals` digits,
/// and a non-positive decimals setting falls back to the shortest
/// representation with trailing zeros stripped.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else if decimals > 0 {
        format!("{:.*}", decimals, value)
    } else {
        format!("{}", value)
    }
}
