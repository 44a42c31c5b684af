// src/utils/constants_config.rs
use crate::utils::{
    DEFAULT_SIMULATION_CONSTANTS,
    errors::ForceError
};

/// Cooling and damping parameters of a force simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConstants {
    /// Starting temperature; alpha scales every force contribution.
    pub alpha: f64,
    /// The simulation is considered settled once alpha drops below this.
    pub alpha_min: f64,
    /// Fraction of the distance to `alpha_target` covered each tick.
    pub alpha_decay: f64,
    pub alpha_target: f64,
    /// Velocities are multiplied by this after the forces ran.
    pub velocity_decay: f64,
}

impl Default for SimulationConstants {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONSTANTS
    }
}

impl SimulationConstants {
    pub fn new(
        alpha: Option<f64>,
        alpha_min: Option<f64>,
        alpha_decay: Option<f64>,
        alpha_target: Option<f64>,
        velocity_decay: Option<f64>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONSTANTS;
        Self {
            alpha: alpha.unwrap_or(default.alpha),
            alpha_min: alpha_min.unwrap_or(default.alpha_min),
            alpha_decay: alpha_decay.unwrap_or(default.alpha_decay),
            alpha_target: alpha_target.unwrap_or(default.alpha_target),
            velocity_decay: velocity_decay.unwrap_or(default.velocity_decay),
        }
    }

    /// Checks that every parameter is finite and within its meaningful range.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::utils::SimulationConstants;
    ///
    /// assert!(SimulationConstants::default().validate().is_ok());
    /// assert!(SimulationConstants::new(None, None, Some(1.5), None, None).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ForceError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ForceError::InvalidParameter("alpha must be finite and non-negative".to_string()));
        }
        if !self.alpha_min.is_finite() || self.alpha_min < 0.0 {
            return Err(ForceError::InvalidParameter("alpha_min must be finite and non-negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.alpha_decay) {
            return Err(ForceError::InvalidParameter("alpha_decay must be within [0, 1]".to_string()));
        }
        if !self.alpha_target.is_finite() || self.alpha_target < 0.0 {
            return Err(ForceError::InvalidParameter("alpha_target must be finite and non-negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.velocity_decay) {
            return Err(ForceError::InvalidParameter("velocity_decay must be within [0, 1]".to_string()));
        }
        Ok(())
    }

    /// Returns `alpha` moved one step towards `alpha_target`.
    pub fn cooled(&self, alpha: f64) -> f64 {
        alpha + (self.alpha_target - alpha) * self.alpha_decay
    }

    pub fn is_settled(&self, alpha: f64) -> bool {
        alpha < self.alpha_min
    }
}
