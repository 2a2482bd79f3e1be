use chrono::NaiveDateTime;

use crate::error::ScaleError;

/// Dynamically typed value that a scale can position along an axis.
///
/// Numeric scales consume [`ScaleValue::Number`], temporal scales consume
/// [`ScaleValue::Timestamp`], and band scales consume [`ScaleValue::Category`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleValue {
    Number(f64),
    Timestamp(NaiveDateTime),
    Category(String),
}

impl ScaleValue {
    pub fn as_f64(&self) -> Result<f64, ScaleError> {
        match self {
            ScaleValue::Number(v) => Ok(*v),
            other => Err(ScaleError::ValueTypeMismatch(format!(
                "expected a number, found {:?}",
                other
            ))),
        }
    }

    pub fn as_timestamp(&self) -> Result<NaiveDateTime, ScaleError> {
        match self {
            ScaleValue::Timestamp(v) => Ok(*v),
            other => Err(ScaleError::ValueTypeMismatch(format!(
                "expected a timestamp, found {:?}",
                other
            ))),
        }
    }

    pub fn as_category(&self) -> Result<&str, ScaleError> {
        match self {
            ScaleValue::Category(v) => Ok(v.as_str()),
            other => Err(ScaleError::ValueTypeMismatch(format!(
                "expected a category, found {:?}",
                other
            ))),
        }
    }
}

impl From<f64> for ScaleValue {
    fn from(value: f64) -> Self {
        ScaleValue::Number(value)
    }
}

impl From<f32> for ScaleValue {
    fn from(value: f32) -> Self {
        ScaleValue::Number(value as f64)
    }
}

impl From<i32> for ScaleValue {
    fn from(value: i32) -> Self {
        ScaleValue::Number(value as f64)
    }
}

impl From<i64> for ScaleValue {
    fn from(value: i64) -> Self {
        ScaleValue::Number(value as f64)
    }
}

impl From<NaiveDateTime> for ScaleValue {
    fn from(value: NaiveDateTime) -> Self {
        ScaleValue::Timestamp(value)
    }
}

impl From<&str> for ScaleValue {
    fn from(value: &str) -> Self {
        ScaleValue::Category(value.to_string())
    }
}

impl From<String> for ScaleValue {
    fn from(value: String) -> Self {
        ScaleValue::Category(value)
    }
}
