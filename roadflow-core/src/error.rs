use thiserror::Error;

use crate::JunctionId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Junction {0} not found")]
    JunctionNotFound(JunctionId),
    #[error("Source and destination are the same junction ({0})")]
    SameJunction(JunctionId),
    #[error("No road connects junctions {from} and {to}")]
    RoadNotFound { from: JunctionId, to: JunctionId },
    #[error("Traffic multiplier {value} is outside the allowed range [{min}, {max}]")]
    MultiplierOutOfRange { value: f64, min: f64, max: f64 },
    #[error("No path found from {from} to {to}")]
    NoPathFound { from: JunctionId, to: JunctionId },
    #[error("Route search was cancelled")]
    Cancelled,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Whether the error was caused by the request itself and may be shown
    /// to the caller verbatim.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Error::JunctionNotFound(_)
                | Error::SameJunction(_)
                | Error::RoadNotFound { .. }
                | Error::MultiplierOutOfRange { .. }
                | Error::NoPathFound { .. }
        )
    }
}
