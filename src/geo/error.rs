use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("latitude must be within [-90, 90], given {0}")]
    InvalidLatitude(f64),

    #[error("longitude must be within [-180, 180], given {0}")]
    InvalidLongitude(f64),
}
