use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::forces::force::{initialized_table, validate_positive};
use crate::forces::{Force, NodeValue};
use crate::models::Vector;
use crate::simulation::SimulationState;
use crate::tree::{MassAggregate, NdTree};
use crate::utils::{ForceError, DEFAULT_CLUSTER_DISTANCE, DEFAULT_DISTANCE_MIN, DEFAULT_THETA};

/// Pairwise attraction or repulsion between all nodes, approximated with Barnes-Hut.
///
/// Each application builds an [`NdTree`] over the current positions with a
/// [`MassAggregate`] and, for every node, walks it from the root. A subtree whose
/// box width is small compared to its distance from the node (`width / distance < theta`)
/// is treated as a single body at its centroid; otherwise the walk descends.
///
/// The contribution of a body of mass `m` at offset `v` is `v * strength * alpha * m / |v|²`,
/// added to the velocity after dividing by the node's own mass. A negative
/// strength repels, a positive one attracts. Squared distances below
/// `distance_min²` are softened and bodies farther than `distance_max` are ignored.
///
/// # Examples
///
/// ```
/// use rs_force_layout::forces::{Force, ManyBodyForce};
/// use rs_force_layout::models::Vector2;
/// use rs_force_layout::simulation::SimulationState;
///
/// let mut state = SimulationState::new(
///     vec![0, 1],
///     vec![Vector2::new([0.0, 0.0]), Vector2::new([4.0, 0.0])],
/// ).unwrap();
///
/// let mut force = ManyBodyForce::new(-30.0).with_theta(0.5);
/// force.initialize(&state).unwrap();
/// force.apply(&mut state).unwrap();
///
/// // Repulsion pushes the nodes apart along the x axis.
/// assert!(state.velocities[0][0] < 0.0);
/// assert!(state.velocities[1][0] > 0.0);
/// ```
#[derive(Debug)]
pub struct ManyBodyForce<N> {
    strength: f64,
    mass: NodeValue<N>,
    theta: f64,
    distance_min: f64,
    distance_max: f64,
    cluster_distance: f64,
    masses: Option<Vec<f64>>,
}

impl<N> ManyBodyForce<N> {
    /// Creates the force with unit mass for every node and default approximation parameters.
    pub fn new(strength: f64) -> Self {
        ManyBodyForce {
            strength,
            mass: NodeValue::Constant(1.0),
            theta: DEFAULT_THETA,
            distance_min: DEFAULT_DISTANCE_MIN,
            distance_max: f64::INFINITY,
            cluster_distance: DEFAULT_CLUSTER_DISTANCE,
            masses: None,
        }
    }

    pub fn with_mass(mut self, mass: NodeValue<N>) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    pub fn with_distance_min(mut self, distance_min: f64) -> Self {
        self.distance_min = distance_min;
        self
    }

    pub fn with_distance_max(mut self, distance_max: f64) -> Self {
        self.distance_max = distance_max;
        self
    }

    pub fn with_cluster_distance(mut self, cluster_distance: f64) -> Self {
        self.cluster_distance = cluster_distance;
        self
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Per-node masses resolved by the last `initialize`.
    pub fn masses(&self) -> Option<&[f64]> {
        self.masses.as_deref()
    }

    fn validate(&self) -> Result<(), ForceError> {
        if !self.strength.is_finite() {
            return Err(ForceError::InvalidParameter("strength must be finite".to_string()));
        }
        if !self.theta.is_finite() || self.theta < 0.0 {
            return Err(ForceError::InvalidParameter("theta must be finite and non-negative".to_string()));
        }
        if !self.distance_min.is_finite() || self.distance_min < 0.0 {
            return Err(ForceError::InvalidParameter(
                "distance_min must be finite and non-negative".to_string(),
            ));
        }
        if self.distance_max.is_nan() || self.distance_max < self.distance_min {
            return Err(ForceError::InvalidParameter(
                "distance_max must not be smaller than distance_min".to_string(),
            ));
        }
        if !self.cluster_distance.is_finite() || self.cluster_distance <= 0.0 {
            return Err(ForceError::InvalidParameter(
                "cluster_distance must be finite and positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl<N, const D: usize> Force<N, D> for ManyBodyForce<N> {
    fn initialize(&mut self, state: &SimulationState<N, D>) -> Result<(), ForceError> {
        self.validate()?;
        let masses = self.mass.resolve(&state.node_ids);
        validate_positive("mass", &masses)?;
        self.masses = Some(masses);
        Ok(())
    }

    fn apply(&mut self, state: &mut SimulationState<N, D>) -> Result<(), ForceError> {
        let masses = initialized_table(self.masses.as_deref(), state.len())?;
        let tree = NdTree::from_points(&state.positions, self.cluster_distance, MassAggregate::new(masses))?;

        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Many-body pass over {} node(s), tree depth {}, alpha {:.4}",
                state.len(),
                tree.depth(),
                state.alpha
            );
        }

        let query = BarnesHutQuery {
            strength: self.strength,
            alpha: state.alpha,
            theta_squared: self.theta * self.theta,
            distance_min_squared: self.distance_min * self.distance_min,
            distance_max_squared: self.distance_max * self.distance_max,
        };

        #[cfg(feature = "parallel")]
        let forces: Vec<Vector<D>> = state
            .positions
            .par_iter()
            .enumerate()
            .map(|(i, position)| query.force_on(&tree, i, position))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let forces: Vec<Vector<D>> = state
            .positions
            .iter()
            .enumerate()
            .map(|(i, position)| query.force_on(&tree, i, position))
            .collect();

        for ((velocity, force), mass) in state.velocities.iter_mut().zip(&forces).zip(masses) {
            *velocity += *force / *mass;
        }
        Ok(())
    }
}

/// Parameters of one many-body pass, shared by every per-node walk.
#[derive(Debug, Clone, Copy)]
struct BarnesHutQuery {
    strength: f64,
    alpha: f64,
    theta_squared: f64,
    distance_min_squared: f64,
    distance_max_squared: f64,
}

impl BarnesHutQuery {
    fn force_on<const D: usize>(
        &self,
        tree: &NdTree<D, MassAggregate<'_, D>>,
        i: usize,
        position: &Vector<D>,
    ) -> Vector<D> {
        let mut force = Vector::zero();

        tree.visit(&mut |node| {
            let aggregate = node.aggregate();
            let centroid = match aggregate.centroid() {
                Some(centroid) => centroid,
                None => return false,
            };

            let offset = centroid - *position;
            let box_width = node.bounds().width()[0];
            let mut distance_squared = offset.jiggled().length_squared();
            let far_enough = distance_squared * self.theta_squared > box_width * box_width;

            if distance_squared < self.distance_min_squared {
                distance_squared = (self.distance_min_squared * distance_squared).sqrt();
            }

            if far_enough {
                if distance_squared < self.distance_max_squared {
                    force += offset * (self.strength * self.alpha * aggregate.accumulated_mass() / distance_squared);
                }
                return false;
            }

            if !node.is_leaf() {
                return true;
            }

            // Near leaf: every resident except the node itself acts directly.
            if !node.holds_index(i) {
                force += offset * (self.strength * self.alpha * aggregate.accumulated_mass() / distance_squared);
            }
            false
        });

        force
    }
}
