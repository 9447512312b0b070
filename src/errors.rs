use thiserror::Error;

/// Error type covering startup and configuration failures.
///
/// User input problems never surface here; they are reported through
/// [`crate::booking::FieldErrorSet`].
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Duplicate vehicle id in catalog: {0}")]
    DuplicateVehicle(String),
    #[error("Vehicle catalog is empty")]
    EmptyCatalog,
    #[error("Invalid vehicle `{id}`: {reason}")]
    InvalidVehicle { id: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
}
