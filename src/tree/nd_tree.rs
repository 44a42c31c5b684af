use log::{trace, warn};
use crate::models::{BoundingBox, Vector};
use crate::tree::TreeAggregate;
use crate::utils::ForceError;

/// A `2^D`-ary spatial partition tree with per-subtree aggregates.
///
/// Every node is either a leaf holding zero or more `(id, position)` entries or an
/// internal node with exactly `2^D` children, one per corner of its box. Children
/// are indexed by direction bits: bit `i` of the index is set when the child covers
/// the upper half of axis `i`.
///
/// Points closer than `cluster_distance` to every resident of a leaf are added to
/// that leaf's bucket instead of splitting it, which bounds the depth of the tree
/// for coincident or nearly coincident points.
///
/// # Examples
///
/// ```
/// use rs_force_layout::models::{BoundingBox, Vector2};
/// use rs_force_layout::tree::{MassAggregate, NdTree};
///
/// let positions = [
///     Vector2::new([0.0, 0.0]),
///     Vector2::new([10.0, 0.0]),
///     Vector2::new([0.0, 10.0]),
/// ];
/// let masses = [1.0, 1.0, 2.0];
///
/// let tree = NdTree::from_points(&positions, 1e-5, MassAggregate::new(&masses)).unwrap();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.aggregate().accumulated_mass(), 4.0);
/// assert!(tree.children().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct NdTree<const D: usize, A: TreeAggregate<D>> {
    bounds: BoundingBox<D>,
    children: Option<Box<[NdTree<D, A>]>>,
    entries: Vec<(usize, Vector<D>)>,
    cluster_distance: f64,
    aggregate: A,
}

impl<const D: usize, A: TreeAggregate<D>> NdTree<D, A> {
    /// Creates an empty leaf covering `bounds`.
    ///
    /// `aggregate` becomes the root aggregate and the template every child
    /// aggregate is spawned from, so it should describe no points yet.
    /// `cluster_distance` is expected to be finite and non-negative.
    pub fn new(bounds: BoundingBox<D>, cluster_distance: f64, aggregate: A) -> Self {
        NdTree {
            bounds,
            children: None,
            entries: Vec::new(),
            cluster_distance,
            aggregate,
        }
    }

    /// Builds a tree over the covering box of `points`, adding point `i` with id `i`.
    ///
    /// # Errors
    ///
    /// Returns `ForceError::EmptyPointSet` for an empty slice and
    /// `ForceError::InvalidParameter` if any position is not finite.
    pub fn from_points(points: &[Vector<D>], cluster_distance: f64, aggregate: A) -> Result<Self, ForceError> {
        let bounds = BoundingBox::cover(points)?;
        let mut tree = NdTree::new(bounds, cluster_distance, aggregate);
        for (id, position) in points.iter().enumerate() {
            tree.add(id, *position)?;
        }
        Ok(tree)
    }

    pub fn bounds(&self) -> &BoundingBox<D> {
        &self.bounds
    }

    pub fn aggregate(&self) -> &A {
        &self.aggregate
    }

    pub fn cluster_distance(&self) -> f64 {
        self.cluster_distance
    }

    /// The `2^D` children of an internal node, `None` for a leaf.
    pub fn children(&self) -> Option<&[NdTree<D, A>]> {
        self.children.as_deref()
    }

    /// `(id, position)` entries stored directly in this node; always empty for internal nodes.
    pub fn entries(&self) -> &[(usize, Vector<D>)] {
        &self.entries
    }

    pub fn node_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Position of the first point stored in this leaf.
    pub fn node_position(&self) -> Option<&Vector<D>> {
        self.entries.first().map(|(_, position)| position)
    }

    pub fn holds_index(&self, id: usize) -> bool {
        self.entries.iter().any(|(stored, _)| *stored == id)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_filled_leaf(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Total number of entries stored in this subtree.
    pub fn len(&self) -> usize {
        match &self.children {
            Some(children) => children.iter().map(Self::len).sum(),
            None => self.entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels below this node; zero for a leaf.
    pub fn depth(&self) -> usize {
        match &self.children {
            Some(children) => 1 + children.iter().map(Self::depth).max().unwrap_or(0),
            None => 0,
        }
    }

    /// Adds a point, growing the root box first if the point lies outside it.
    ///
    /// Every aggregate on the path from the root to the receiving leaf sees the
    /// point through `did_add_node`.
    ///
    /// # Errors
    ///
    /// Returns `ForceError::InvalidParameter` if `position` is not finite, or if
    /// it lies outside a root box that has no positive finite width on some axis
    /// and therefore cannot grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::models::{BoundingBox, Vector2};
    /// use rs_force_layout::tree::NdTree;
    ///
    /// let bounds = BoundingBox::new(Vector2::new([0.0, 0.0]), Vector2::new([1.0, 1.0]));
    /// let mut tree: NdTree<2, ()> = NdTree::new(bounds, 1e-5, ());
    ///
    /// tree.add(0, Vector2::new([0.5, 0.5])).unwrap();
    /// tree.add(1, Vector2::new([5.0, -3.0])).unwrap(); // outside, the root grows
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert!(tree.bounds().contains(&Vector2::new([5.0, -3.0])));
    /// ```
    pub fn add(&mut self, id: usize, position: Vector<D>) -> Result<(), ForceError> {
        if !position.components().iter().all(|c| c.is_finite()) {
            return Err(ForceError::InvalidParameter(format!(
                "position of point {} is not finite: {:?}", id, position
            )));
        }
        self.grow_to_cover(&position)?;
        self.add_within(id, position);
        Ok(())
    }

    fn add_within(&mut self, id: usize, position: Vector<D>) {
        self.aggregate.did_add_node(id, &position);
        let direction = self.bounds.direction_of(&position);

        if let Some(children) = self.children.as_mut() {
            children[direction].add_within(id, position);
            return;
        }

        let cluster_distance_squared = self.cluster_distance * self.cluster_distance;
        let clustered = self
            .entries
            .iter()
            .all(|(_, resident)| resident.distance_squared(&position) < cluster_distance_squared);

        if clustered || !self.can_subdivide() {
            self.entries.push((id, position));
            return;
        }

        self.subdivide();
        if let Some(children) = self.children.as_mut() {
            children[direction].add_within(id, position);
        }
    }

    /// A box may be split while its center lies strictly inside it on every axis
    /// and it is wider than the cluster distance on at least one axis.
    fn can_subdivide(&self) -> bool {
        let center = self.bounds.center();
        let width = self.bounds.width();
        (0..D).all(|i| self.bounds.p0[i] < center[i] && center[i] < self.bounds.p1[i])
            && (0..D).any(|i| width[i] > self.cluster_distance)
    }

    /// Turns this leaf into an internal node and re-adds its residents to the new children.
    fn subdivide(&mut self) {
        let mut children: Vec<NdTree<D, A>> = (0..BoundingBox::<D>::DIRECTIONS)
            .map(|direction| {
                NdTree::new(self.bounds.child(direction), self.cluster_distance, self.aggregate.spawn())
            })
            .collect();

        let residents = std::mem::take(&mut self.entries);
        trace!("Subdividing {:?} holding {} point(s)", self.bounds, residents.len());
        for (id, position) in residents {
            children[self.bounds.direction_of(&position)].add_within(id, position);
        }
        self.children = Some(children.into_boxed_slice());
    }

    /// Doubles the root box towards `position` until it is contained.
    ///
    /// The old root becomes one child of the new root, whose aggregate starts as a
    /// snapshot of the old root's aggregate.
    fn grow_to_cover(&mut self, position: &Vector<D>) -> Result<(), ForceError> {
        if self.bounds.contains(position) {
            return Ok(());
        }
        let width = self.bounds.width();
        if let Some(axis) = (0..D).find(|&i| !(width[i].is_finite() && width[i] > 0.0)) {
            return Err(ForceError::InvalidParameter(format!(
                "root box {:?} cannot grow along axis {} to cover {:?}", self.bounds, axis, position
            )));
        }

        while !self.bounds.contains(position) {
            let (bounds, direction) = self.bounds.expanded_towards(position);
            trace!("Growing root {:?} to {:?} to cover {:?}", self.bounds, bounds, position);

            let mut children: Vec<NdTree<D, A>> = (0..BoundingBox::<D>::DIRECTIONS)
                .map(|d| NdTree::new(bounds.child(d), self.cluster_distance, self.aggregate.spawn()))
                .collect();
            let cluster_distance = self.cluster_distance;
            let snapshot = self.aggregate.clone();
            let old_root = std::mem::replace(self, NdTree::new(bounds, cluster_distance, snapshot));
            children[direction] = old_root;
            self.children = Some(children.into_boxed_slice());
        }
        Ok(())
    }

    /// Removes point `id` previously added at `position`.
    ///
    /// Aggregates along the path are notified with the stored position. Internal
    /// nodes are kept even if their subtree becomes empty. Returns `false` when no
    /// such point is stored along the path to `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::models::Vector2;
    /// use rs_force_layout::tree::{MassAggregate, NdTree};
    ///
    /// let positions = [Vector2::new([0.0, 0.0]), Vector2::new([8.0, 8.0])];
    /// let masses = [1.0, 2.0];
    /// let mut tree = NdTree::from_points(&positions, 1e-5, MassAggregate::new(&masses)).unwrap();
    ///
    /// assert!(tree.remove(1, &positions[1]));
    /// assert_eq!(tree.aggregate().accumulated_mass(), 1.0);
    /// assert!(!tree.remove(1, &positions[1]));
    /// ```
    pub fn remove(&mut self, id: usize, position: &Vector<D>) -> bool {
        match self.remove_within(id, position) {
            Some(_) => true,
            None => {
                warn!("Point {} not found near {:?}, nothing removed", id, position);
                false
            }
        }
    }

    fn remove_within(&mut self, id: usize, position: &Vector<D>) -> Option<Vector<D>> {
        let direction = self.bounds.direction_of(position);
        let stored = match self.children.as_mut() {
            Some(children) => children[direction].remove_within(id, position)?,
            None => {
                let slot = self.entries.iter().position(|(stored, _)| *stored == id)?;
                self.entries.remove(slot).1
            }
        };
        self.aggregate.did_remove_node(id, &stored);
        Some(stored)
    }

    /// Pre-order traversal driven by `predicate`.
    ///
    /// `predicate` is called on every reached node. For an internal node, `true`
    /// descends into its children and `false` prunes the subtree; leaves have
    /// nothing to descend into, so the return value only matters for internal nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::models::Vector2;
    /// use rs_force_layout::tree::NdTree;
    ///
    /// let positions = [Vector2::new([0.0, 0.0]), Vector2::new([9.0, 9.0]), Vector2::new([9.0, 0.0])];
    /// let tree: NdTree<2, ()> = NdTree::from_points(&positions, 1e-5, ()).unwrap();
    ///
    /// let mut found = Vec::new();
    /// tree.visit(&mut |node| {
    ///     found.extend(node.node_indices());
    ///     true
    /// });
    /// found.sort();
    /// assert_eq!(found, vec![0, 1, 2]);
    /// ```
    pub fn visit<F>(&self, predicate: &mut F)
    where
        F: FnMut(&NdTree<D, A>) -> bool,
    {
        if !predicate(self) {
            return;
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.visit(predicate);
            }
        }
    }
}
