use crate::models::Vector;
use crate::utils::ForceError;

/// An axis-aligned box in `D`-dimensional space.
///
/// `p0` is the component-wise minimum corner and `p1` the component-wise maximum.
/// Containment is half-open on every axis: `p0[i] <= x[i] < p1[i]`, which keeps
/// points on a shared face of two sibling boxes from belonging to both.
///
/// # Examples
///
/// ```
/// use rs_force_layout::models::{BoundingBox, Vector2};
///
/// // Corners may be given in any order.
/// let bounds = BoundingBox::new(Vector2::new([4.0, 0.0]), Vector2::new([0.0, 4.0]));
/// assert_eq!(bounds.p0, Vector2::new([0.0, 0.0]));
/// assert_eq!(bounds.p1, Vector2::new([4.0, 4.0]));
///
/// assert!(bounds.contains(&Vector2::new([0.0, 0.0])));
/// assert!(!bounds.contains(&Vector2::new([4.0, 1.0]))); // upper bound is exclusive
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub p0: Vector<D>,
    pub p1: Vector<D>,
}

impl<const D: usize> BoundingBox<D> {
    /// Number of children a box is split into, one per corner.
    pub const DIRECTIONS: usize = 1 << D;

    /// Creates a box from two opposite corners, swapping components so that `p0 <= p1`.
    pub fn new(a: Vector<D>, b: Vector<D>) -> Self {
        let mut p0 = a;
        let mut p1 = b;
        for i in 0..D {
            if p1[i] < p0[i] {
                std::mem::swap(&mut p0[i], &mut p1[i]);
            }
        }
        BoundingBox { p0, p1 }
    }

    /// Returns the smallest box holding every point, with each upper bound raised by one unit.
    ///
    /// The extra unit makes the points on the upper faces strictly interior and
    /// guarantees the box is at least one unit wide on every axis.
    ///
    /// # Errors
    ///
    /// Returns `ForceError::EmptyPointSet` when `points` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::models::{BoundingBox, Vector2};
    ///
    /// let points = [Vector2::new([0.0, 2.0]), Vector2::new([3.0, -1.0])];
    /// let bounds = BoundingBox::cover(&points).unwrap();
    ///
    /// assert_eq!(bounds.p0, Vector2::new([0.0, -1.0]));
    /// assert_eq!(bounds.p1, Vector2::new([4.0, 3.0]));
    /// assert!(points.iter().all(|p| bounds.contains(p)));
    ///
    /// assert!(BoundingBox::<2>::cover(&[]).is_err());
    /// ```
    pub fn cover(points: &[Vector<D>]) -> Result<Self, ForceError> {
        let first = points.first().ok_or(ForceError::EmptyPointSet)?;
        let mut p0 = *first;
        let mut p1 = *first;
        for point in points {
            for i in 0..D {
                if point[i] < p0[i] {
                    p0[i] = point[i];
                }
                if point[i] > p1[i] {
                    p1[i] = point[i];
                }
            }
        }
        for i in 0..D {
            p1[i] += 1.0;
        }
        Ok(BoundingBox { p0, p1 })
    }

    /// Half-open containment test.
    pub fn contains(&self, point: &Vector<D>) -> bool {
        (0..D).all(|i| self.p0[i] <= point[i] && point[i] < self.p1[i])
    }

    pub fn center(&self) -> Vector<D> {
        (self.p0 + self.p1) / 2.0
    }

    /// Extent along every axis.
    pub fn width(&self) -> Vector<D> {
        self.p1 - self.p0
    }

    /// Returns the corner selected by the bits of `direction`.
    ///
    /// Bit `i` set picks `p1[i]`, cleared picks `p0[i]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::models::{BoundingBox, Vector2};
    ///
    /// let bounds = BoundingBox::new(Vector2::new([0.0, 0.0]), Vector2::new([2.0, 4.0]));
    /// assert_eq!(bounds.corner(0b00), Vector2::new([0.0, 0.0]));
    /// assert_eq!(bounds.corner(0b01), Vector2::new([2.0, 0.0]));
    /// assert_eq!(bounds.corner(0b10), Vector2::new([0.0, 4.0]));
    /// assert_eq!(bounds.corner(0b11), Vector2::new([2.0, 4.0]));
    /// ```
    pub fn corner(&self, direction: usize) -> Vector<D> {
        let mut corner = self.p0;
        for i in 0..D {
            if (direction >> i) & 1 == 1 {
                corner[i] = self.p1[i];
            }
        }
        corner
    }

    /// The child box spanned by `center` and `corner(direction)`.
    pub fn child(&self, direction: usize) -> Self {
        BoundingBox::new(self.center(), self.corner(direction))
    }

    /// Index of the child box that holds `point`; bit `i` is set when `point[i] >= center[i]`.
    pub fn direction_of(&self, point: &Vector<D>) -> usize {
        let center = self.center();
        (0..D).fold(0, |direction, i| {
            if point[i] >= center[i] {
                direction | (1 << i)
            } else {
                direction
            }
        })
    }

    /// Returns the box twice as wide on every axis that still holds `self` as one
    /// of its children, extended towards `point`, and the direction of `self` in it.
    ///
    /// Only makes progress on axes with a positive width.
    pub(crate) fn expanded_towards(&self, point: &Vector<D>) -> (Self, usize) {
        let width = self.width();
        let mut p0 = self.p0;
        let mut p1 = self.p1;
        let mut direction = 0;
        for i in 0..D {
            if point[i] < self.p0[i] {
                p0[i] -= width[i];
                direction |= 1 << i;
            } else {
                p1[i] += width[i];
            }
        }
        (BoundingBox { p0, p1 }, direction)
    }
}
