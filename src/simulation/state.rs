use crate::models::Vector;
use crate::utils::{ForceError, DEFAULT_SIMULATION_CONSTANTS};

/// Node data shared by every force, indexed by node position in `node_ids`.
///
/// Forces read and write these vectors during `apply`; they never hold on to
/// them between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState<N, const D: usize> {
    pub node_ids: Vec<N>,
    pub positions: Vec<Vector<D>>,
    pub velocities: Vec<Vector<D>>,
    pub alpha: f64,
}

impl<N, const D: usize> SimulationState<N, D> {
    /// Creates the state with zero velocities and the default starting alpha.
    ///
    /// # Errors
    ///
    /// Returns `ForceError::NodeCountMismatch` when `positions` and `node_ids`
    /// differ in length.
    pub fn new(node_ids: Vec<N>, positions: Vec<Vector<D>>) -> Result<Self, ForceError> {
        if node_ids.len() != positions.len() {
            return Err(ForceError::NodeCountMismatch {
                expected: node_ids.len(),
                found: positions.len(),
            });
        }
        let velocities = vec![Vector::zero(); positions.len()];
        Ok(SimulationState {
            node_ids,
            positions,
            velocities,
            alpha: DEFAULT_SIMULATION_CONSTANTS.alpha,
        })
    }

    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Damps every velocity by `velocity_decay` and moves each node by its velocity.
    pub fn integrate(&mut self, velocity_decay: f64) {
        for (position, velocity) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            *velocity *= velocity_decay;
            *position += *velocity;
        }
    }
}
