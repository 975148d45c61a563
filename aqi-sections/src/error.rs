/// Error types for the section controllers
use aqi_api::ApiError;
use aqi_data::export::ExportError;
use thiserror::Error;

/// Why the browser could not provide a position
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    /// The browser has no geolocation API
    #[error("Geolocation is not supported by this browser")]
    Unsupported,

    #[error("Location access denied")]
    PermissionDenied,

    #[error("Location information unavailable")]
    Unavailable,

    #[error("Location request timed out")]
    Timeout,
}

#[derive(Error, Debug)]
pub enum SectionError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type Result<T> = std::result::Result<T, SectionError>;
