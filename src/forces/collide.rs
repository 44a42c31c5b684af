use log::debug;

use crate::forces::force::initialized_table;
use crate::forces::{Force, NodeValue};
use crate::models::Vector;
use crate::simulation::SimulationState;
use crate::tree::{MaxRadiusAggregate, NdTree};
use crate::utils::{ForceError, DEFAULT_CLUSTER_DISTANCE, DEFAULT_COLLIDE_RADIUS};

/// Pushes apart nodes whose circles (or spheres) overlap.
///
/// Nodes are treated at their anticipated positions `position + velocity`. For
/// every overlapping pair the overlap, scaled by `strength`, is split between
/// the two velocities in proportion to the other node's squared radius, so a
/// small node bumping into a large one moves most. Pairs are resolved one node
/// at a time in index order, and each node's anticipated position includes the
/// pushes it already received from lower-indexed nodes. A [`MaxRadiusAggregate`]
/// tree skips subtrees that lie beyond the largest radius they hold.
///
/// # Examples
///
/// ```
/// use rs_force_layout::forces::{CollideForce, Force, NodeValue};
/// use rs_force_layout::models::Vector2;
/// use rs_force_layout::simulation::SimulationState;
///
/// let mut state = SimulationState::new(
///     vec!["a", "b"],
///     vec![Vector2::new([0.0, 0.0]), Vector2::new([3.0, 0.0])],
/// ).unwrap();
///
/// let mut force = CollideForce::new().with_radius(NodeValue::Constant(5.0));
/// force.initialize(&state).unwrap();
/// force.apply(&mut state).unwrap();
///
/// assert!(state.velocities[0][0] < 0.0);
/// assert!(state.velocities[1][0] > 0.0);
/// ```
#[derive(Debug)]
pub struct CollideForce<N> {
    radius: NodeValue<N>,
    strength: f64,
    iterations_per_tick: usize,
    cluster_distance: f64,
    radii: Option<Vec<f64>>,
}

impl<N> Default for CollideForce<N> {
    fn default() -> Self {
        CollideForce {
            radius: NodeValue::Constant(DEFAULT_COLLIDE_RADIUS),
            strength: 1.0,
            iterations_per_tick: 1,
            cluster_distance: DEFAULT_CLUSTER_DISTANCE,
            radii: None,
        }
    }
}

impl<N> CollideForce<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_radius(mut self, radius: NodeValue<N>) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_iterations_per_tick(mut self, iterations_per_tick: usize) -> Self {
        self.iterations_per_tick = iterations_per_tick;
        self
    }

    pub fn with_cluster_distance(mut self, cluster_distance: f64) -> Self {
        self.cluster_distance = cluster_distance;
        self
    }

    pub fn radii(&self) -> Option<&[f64]> {
        self.radii.as_deref()
    }

    fn validate(&self) -> Result<(), ForceError> {
        if !self.strength.is_finite() || self.strength < 0.0 {
            return Err(ForceError::InvalidParameter("strength must be finite and non-negative".to_string()));
        }
        if self.iterations_per_tick == 0 {
            return Err(ForceError::InvalidParameter("iterations_per_tick must be at least 1".to_string()));
        }
        if !self.cluster_distance.is_finite() || self.cluster_distance <= 0.0 {
            return Err(ForceError::InvalidParameter(
                "cluster_distance must be finite and positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl<N, const D: usize> Force<N, D> for CollideForce<N> {
    fn initialize(&mut self, state: &SimulationState<N, D>) -> Result<(), ForceError> {
        self.validate()?;
        let radii = self.radius.resolve(&state.node_ids);
        if let Some(i) = radii.iter().position(|r| !r.is_finite() || *r < 0.0) {
            return Err(ForceError::InvalidParameter(format!(
                "radius of node {} must be finite and non-negative, got {}", i, radii[i]
            )));
        }
        self.radii = Some(radii);
        Ok(())
    }

    fn apply(&mut self, state: &mut SimulationState<N, D>) -> Result<(), ForceError> {
        let radii = initialized_table(self.radii.as_deref(), state.len())?;
        let strength = self.strength;
        let SimulationState { positions, velocities, .. } = state;

        for iteration in 0..self.iterations_per_tick {
            let anticipated: Vec<Vector<D>> = positions
                .iter()
                .zip(velocities.iter())
                .map(|(position, velocity)| *position + *velocity)
                .collect();
            let tree = NdTree::from_points(&anticipated, self.cluster_distance, MaxRadiusAggregate::new(radii))?;
            let mut overlaps = 0usize;

            for i in 0..anticipated.len() {
                // Earlier pairs may already have pushed node i during this iteration.
                let anticipated_i = positions[i] + velocities[i];
                let radius_i = radii[i];
                let radius_i_squared = radius_i * radius_i;

                tree.visit(&mut |node| {
                    if node.is_filled_leaf() {
                        for j in node.node_indices().filter(|j| *j > i) {
                            let radius_j = radii[j];
                            let reach = radius_i + radius_j;
                            let delta = anticipated_i - (positions[j] + velocities[j]);
                            if delta.length_squared() >= reach * reach {
                                continue;
                            }

                            // Coincident nodes still need a direction to separate along.
                            let mut delta = delta.jiggled();
                            let length = delta.length();
                            let push = (reach - length) / length * strength;
                            let radius_j_squared = radius_j * radius_j;
                            let share = radius_j_squared / (radius_i_squared + radius_j_squared);

                            delta *= push;
                            velocities[i] += delta * share;
                            velocities[j] -= delta * (1.0 - share);
                            overlaps += 1;
                        }
                        return false;
                    }

                    let reach = node.aggregate().max_radius() + radius_i;
                    let bounds = node.bounds();
                    (0..D).all(|axis| {
                        bounds.p0[axis] <= anticipated_i[axis] + reach
                            && bounds.p1[axis] >= anticipated_i[axis] - reach
                    })
                });
            }

            debug!(
                "Collide iteration {} over {} node(s) resolved {} overlap(s)",
                iteration,
                anticipated.len(),
                overlaps
            );
        }
        Ok(())
    }
}
