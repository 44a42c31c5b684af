use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building trees or applying forces.
#[derive(Debug, Clone, PartialEq)]
pub enum ForceError {
    /// Indicates that a covering box or force was requested for zero points.
    EmptyPointSet,
    /// Indicates that a force was applied before it was initialized against a simulation state.
    NotInitialized,
    /// Indicates that the simulation state changed size after the force was initialized.
    NodeCountMismatch { expected: usize, found: usize },
    /// Indicates an axis index that does not exist in the simulation's dimension.
    AxisOutOfRange { axis: usize, dimensions: usize },
    /// A general error for configuration values that are out of range or non-finite.
    InvalidParameter(String),
}

impl fmt::Display for ForceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ForceError::EmptyPointSet => write!(f, "Cannot cover an empty point set"),
            ForceError::NotInitialized => write!(f, "Force applied before being initialized with a simulation state"),
            ForceError::NodeCountMismatch { expected, found } => {
                write!(f, "Force was initialized for {} nodes but the simulation has {}", expected, found)
            }
            ForceError::AxisOutOfRange { axis, dimensions } => {
                write!(f, "Axis {} is out of range for {} dimensions", axis, dimensions)
            }
            ForceError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl Error for ForceError {}
