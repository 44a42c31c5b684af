use crate::forces::force::initialized_table;
use crate::forces::{Force, NodeValue};
use crate::simulation::SimulationState;
use crate::utils::ForceError;

/// Pulls every node towards a per-node target coordinate along one axis.
///
/// Each tick adds `(target - position[axis]) * strength * alpha` to the node's
/// velocity along `axis`.
///
/// # Examples
///
/// ```
/// use rs_force_layout::forces::{DirectionForce, NodeValue};
///
/// assert!(DirectionForce::<u32, 2>::new(1, NodeValue::Constant(0.0)).is_ok());
/// assert!(DirectionForce::<u32, 2>::new(2, NodeValue::Constant(0.0)).is_err());
/// ```
#[derive(Debug)]
pub struct DirectionForce<N, const D: usize> {
    axis: usize,
    target: NodeValue<N>,
    strength: NodeValue<N>,
    targets: Option<Vec<f64>>,
    strengths: Option<Vec<f64>>,
}

impl<N, const D: usize> DirectionForce<N, D> {
    /// Creates a force along `axis` with unit strength.
    ///
    /// # Errors
    ///
    /// Returns `ForceError::AxisOutOfRange` if `axis >= D`.
    pub fn new(axis: usize, target: NodeValue<N>) -> Result<Self, ForceError> {
        if axis >= D {
            return Err(ForceError::AxisOutOfRange { axis, dimensions: D });
        }
        Ok(DirectionForce {
            axis,
            target,
            strength: NodeValue::Constant(1.0),
            targets: None,
            strengths: None,
        })
    }

    pub fn with_strength(mut self, strength: NodeValue<N>) -> Self {
        self.strength = strength;
        self
    }

    pub fn axis(&self) -> usize {
        self.axis
    }
}

impl<N, const D: usize> Force<N, D> for DirectionForce<N, D> {
    fn initialize(&mut self, state: &SimulationState<N, D>) -> Result<(), ForceError> {
        let targets = self.target.resolve(&state.node_ids);
        let strengths = self.strength.resolve(&state.node_ids);
        if targets.iter().chain(&strengths).any(|v| !v.is_finite()) {
            return Err(ForceError::InvalidParameter(
                "direction targets and strengths must be finite".to_string(),
            ));
        }
        self.targets = Some(targets);
        self.strengths = Some(strengths);
        Ok(())
    }

    fn apply(&mut self, state: &mut SimulationState<N, D>) -> Result<(), ForceError> {
        let node_count = state.len();
        let targets = initialized_table(self.targets.as_deref(), node_count)?;
        let strengths = initialized_table(self.strengths.as_deref(), node_count)?;
        let axis = self.axis;
        let alpha = state.alpha;

        for (i, (position, velocity)) in state.positions.iter().zip(state.velocities.iter_mut()).enumerate() {
            velocity[axis] += (targets[i] - position[axis]) * strengths[i] * alpha;
        }
        Ok(())
    }
}
