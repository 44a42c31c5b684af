use std::fmt;
use crate::simulation::SimulationState;
use crate::utils::ForceError;

/// A force acting on the nodes of a [`SimulationState`].
///
/// `initialize` is called once when the force is registered, and again whenever
/// the node set changes; it resolves per-node parameters into tables indexed
/// like the state. `apply` runs once per tick and mutates velocities (or, for
/// position-based forces, positions) in place.
pub trait Force<N, const D: usize> {
    fn initialize(&mut self, state: &SimulationState<N, D>) -> Result<(), ForceError>;

    fn apply(&mut self, state: &mut SimulationState<N, D>) -> Result<(), ForceError>;
}

/// A per-node parameter: either one value for every node or a function of the node id.
///
/// # Examples
///
/// ```
/// use rs_force_layout::forces::NodeValue;
///
/// let constant: NodeValue<&str> = NodeValue::Constant(2.0);
/// assert_eq!(constant.resolve(&["a", "b"]), vec![2.0, 2.0]);
///
/// let varied = NodeValue::varied(|id: &&str| id.len() as f64);
/// assert_eq!(varied.resolve(&["a", "bcd"]), vec![1.0, 3.0]);
/// ```
pub enum NodeValue<N> {
    Constant(f64),
    Varied(Box<dyn Fn(&N) -> f64 + Send + Sync>),
}

impl<N> NodeValue<N> {
    pub fn varied<F>(f: F) -> Self
    where
        F: Fn(&N) -> f64 + Send + Sync + 'static,
    {
        NodeValue::Varied(Box::new(f))
    }

    /// Evaluates the value for every node, in order.
    pub fn resolve(&self, node_ids: &[N]) -> Vec<f64> {
        match self {
            NodeValue::Constant(value) => vec![*value; node_ids.len()],
            NodeValue::Varied(f) => node_ids.iter().map(|id| f(id)).collect(),
        }
    }
}

impl<N> From<f64> for NodeValue<N> {
    fn from(value: f64) -> Self {
        NodeValue::Constant(value)
    }
}

impl<N> fmt::Debug for NodeValue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            NodeValue::Varied(_) => f.write_str("Varied(..)"),
        }
    }
}

/// Returns the table resolved by `initialize`, checked against the current node count.
pub(crate) fn initialized_table(table: Option<&[f64]>, node_count: usize) -> Result<&[f64], ForceError> {
    let table = table.ok_or(ForceError::NotInitialized)?;
    if table.len() != node_count {
        return Err(ForceError::NodeCountMismatch {
            expected: table.len(),
            found: node_count,
        });
    }
    Ok(table)
}

/// Rejects tables holding a non-finite or non-positive value.
pub(crate) fn validate_positive(name: &str, values: &[f64]) -> Result<(), ForceError> {
    match values.iter().position(|v| !v.is_finite() || *v <= 0.0) {
        Some(i) => Err(ForceError::InvalidParameter(format!(
            "{} of node {} must be finite and positive, got {}", name, i, values[i]
        ))),
        None => Ok(()),
    }
}
