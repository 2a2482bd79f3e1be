use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error("Invalid scale property value: {0}")]
    InvalidScalePropertyValue(String),

    #[error("Scale domain may not be empty")]
    EmptyDomain,

    #[error("Explicit tick positions may not be empty")]
    EmptyTickPositions,

    #[error("Scale value type mismatch: {0}")]
    ValueTypeMismatch(String),
}
