use crate::forces::Force;
use crate::models::Vector;
use crate::simulation::SimulationState;
use crate::utils::{ForceError, DEFAULT_CENTER_STRENGTH};

/// Translates all nodes so that their mean position moves towards `center`.
///
/// Acts on positions directly and leaves velocities and relative positions untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterForce<const D: usize> {
    center: Vector<D>,
    strength: f64,
}

impl<const D: usize> CenterForce<D> {
    pub fn new(center: Vector<D>) -> Self {
        CenterForce {
            center,
            strength: DEFAULT_CENTER_STRENGTH,
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn center(&self) -> Vector<D> {
        self.center
    }
}

impl<N, const D: usize> Force<N, D> for CenterForce<D> {
    fn initialize(&mut self, _state: &SimulationState<N, D>) -> Result<(), ForceError> {
        if !self.strength.is_finite() || !(0.0..=1.0).contains(&self.strength) {
            return Err(ForceError::InvalidParameter("center strength must be within [0, 1]".to_string()));
        }
        if !self.center.components().iter().all(|c| c.is_finite()) {
            return Err(ForceError::InvalidParameter("center must be finite".to_string()));
        }
        Ok(())
    }

    fn apply(&mut self, state: &mut SimulationState<N, D>) -> Result<(), ForceError> {
        if state.is_empty() {
            return Err(ForceError::EmptyPointSet);
        }
        let sum = state.positions.iter().fold(Vector::zero(), |sum, p| sum + *p);
        let mean = sum / state.len() as f64;
        let shift = (mean - self.center) * self.strength;
        for position in state.positions.iter_mut() {
            *position -= shift;
        }
        Ok(())
    }
}
