use crate::models::Vector;

/// Statistics a [`NdTree`](crate::tree::NdTree) maintains for every subtree.
///
/// The tree calls `did_add_node` on every node along an insertion path and
/// `did_remove_node` along a removal path, so each node's aggregate always
/// describes exactly the points stored beneath it. `Clone` takes an independent
/// snapshot; `spawn` creates an empty aggregate with the same configuration for
/// freshly carved children.
pub trait TreeAggregate<const D: usize>: Clone {
    fn did_add_node(&mut self, id: usize, position: &Vector<D>);

    fn did_remove_node(&mut self, id: usize, position: &Vector<D>);

    fn spawn(&self) -> Self;
}

/// No statistics; turns the tree into a plain spatial index.
impl<const D: usize> TreeAggregate<D> for () {
    fn did_add_node(&mut self, _id: usize, _position: &Vector<D>) {}

    fn did_remove_node(&mut self, _id: usize, _position: &Vector<D>) {}

    fn spawn(&self) -> Self {}
}

/// Total mass, point count and mass-weighted position sum of a subtree.
///
/// Masses are looked up by point id in a table owned by the caller.
///
/// # Examples
///
/// ```
/// use rs_force_layout::models::Vector2;
/// use rs_force_layout::tree::{MassAggregate, TreeAggregate};
///
/// let masses = [1.0, 3.0];
/// let mut aggregate = MassAggregate::new(&masses);
/// aggregate.did_add_node(0, &Vector2::new([0.0, 0.0]));
/// aggregate.did_add_node(1, &Vector2::new([4.0, 0.0]));
///
/// assert_eq!(aggregate.accumulated_mass(), 4.0);
/// assert_eq!(aggregate.centroid(), Some(Vector2::new([3.0, 0.0])));
/// ```
#[derive(Debug, Clone)]
pub struct MassAggregate<'a, const D: usize> {
    masses: &'a [f64],
    accumulated_mass: f64,
    accumulated_count: usize,
    accumulated_mass_weighted_positions: Vector<D>,
}

impl<'a, const D: usize> MassAggregate<'a, D> {
    pub fn new(masses: &'a [f64]) -> Self {
        MassAggregate {
            masses,
            accumulated_mass: 0.0,
            accumulated_count: 0,
            accumulated_mass_weighted_positions: Vector::zero(),
        }
    }

    pub fn accumulated_mass(&self) -> f64 {
        self.accumulated_mass
    }

    pub fn accumulated_count(&self) -> usize {
        self.accumulated_count
    }

    pub fn accumulated_mass_weighted_positions(&self) -> Vector<D> {
        self.accumulated_mass_weighted_positions
    }

    /// Mass-weighted mean position, `None` for an empty subtree.
    pub fn centroid(&self) -> Option<Vector<D>> {
        if self.accumulated_count == 0 {
            return None;
        }
        Some(self.accumulated_mass_weighted_positions / self.accumulated_mass)
    }
}

impl<const D: usize> TreeAggregate<D> for MassAggregate<'_, D> {
    fn did_add_node(&mut self, id: usize, position: &Vector<D>) {
        let mass = self.masses[id];
        debug_assert!(mass > 0.0, "node {} has non-positive mass {}", id, mass);
        self.accumulated_count += 1;
        self.accumulated_mass += mass;
        self.accumulated_mass_weighted_positions += *position * mass;
    }

    fn did_remove_node(&mut self, id: usize, position: &Vector<D>) {
        let mass = self.masses[id];
        self.accumulated_count -= 1;
        self.accumulated_mass -= mass;
        self.accumulated_mass_weighted_positions -= *position * mass;
    }

    fn spawn(&self) -> Self {
        MassAggregate::new(self.masses)
    }
}

/// Largest radius of any point in a subtree.
///
/// Removing the point that holds the maximum resets it to zero instead of
/// rescanning the subtree, so after a removal the value is a lower bound of
/// the true maximum. Trees built by the collision force never have points removed.
#[derive(Debug, Clone)]
pub struct MaxRadiusAggregate<'a> {
    radii: &'a [f64],
    max_radius: f64,
}

impl<'a> MaxRadiusAggregate<'a> {
    pub fn new(radii: &'a [f64]) -> Self {
        MaxRadiusAggregate { radii, max_radius: 0.0 }
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }
}

impl<const D: usize> TreeAggregate<D> for MaxRadiusAggregate<'_> {
    fn did_add_node(&mut self, id: usize, _position: &Vector<D>) {
        self.max_radius = self.max_radius.max(self.radii[id]);
    }

    fn did_remove_node(&mut self, id: usize, _position: &Vector<D>) {
        if self.radii[id] >= self.max_radius {
            self.max_radius = 0.0;
        }
    }

    fn spawn(&self) -> Self {
        MaxRadiusAggregate::new(self.radii)
    }
}
