use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use approx::{AbsDiffEq, RelativeEq};
use crate::utils::JIGGLE_MAGNITUDE;

/// A point or displacement in `D`-dimensional space.
///
/// The dimension is a compile-time constant, so 2D and 3D layouts are just
/// [`Vector2`] and [`Vector3`] while higher dimensions need no extra code.
///
/// # Examples
///
/// ```
/// use rs_force_layout::models::Vector2;
///
/// let a = Vector2::new([3.0, 4.0]);
/// let b = Vector2::new([1.0, 1.0]);
///
/// assert_eq!(a.length(), 5.0);
/// assert_eq!((a - b)[0], 2.0);
/// assert_eq!((a * 2.0)[1], 8.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const D: usize>(pub [f64; D]);

pub type Vector2 = Vector<2>;
pub type Vector3 = Vector<3>;

impl<const D: usize> Vector<D> {
    pub fn new(components: [f64; D]) -> Self {
        Vector(components)
    }

    pub fn zero() -> Self {
        Vector([0.0; D])
    }

    pub fn splat(value: f64) -> Self {
        Vector([value; D])
    }

    pub fn components(&self) -> &[f64; D] {
        &self.0
    }

    pub fn length_squared(&self) -> f64 {
        self.0.iter().map(|c| c * c).sum()
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn distance_squared(&self, other: &Self) -> f64 {
        (*self - *other).length_squared()
    }

    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Returns a copy with every exactly-zero component replaced by a tiny random offset.
    ///
    /// Used before taking lengths of separation vectors so that coincident points
    /// still get a defined direction and a non-zero distance.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::models::Vector2;
    ///
    /// let v = Vector2::new([2.0, 0.0]).jiggled();
    /// assert_eq!(v[0], 2.0);
    /// assert!(v[1].abs() <= 5e-7);
    ///
    /// assert!(Vector2::zero().jiggled().length_squared() > 0.0);
    /// ```
    pub fn jiggled(&self) -> Self {
        let mut result = *self;
        for component in result.0.iter_mut() {
            if *component == 0.0 {
                *component = jiggle();
            }
        }
        result
    }
}

/// Uniform offset in `[-JIGGLE_MAGNITUDE / 2, JIGGLE_MAGNITUDE / 2)`, never exactly zero.
fn jiggle() -> f64 {
    loop {
        let offset = (rand::random::<f64>() - 0.5) * JIGGLE_MAGNITUDE;
        if offset != 0.0 {
            return offset;
        }
    }
}

impl<const D: usize> Default for Vector<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const D: usize> From<[f64; D]> for Vector<D> {
    fn from(components: [f64; D]) -> Self {
        Vector(components)
    }
}

impl<const D: usize> Index<usize> for Vector<D> {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl<const D: usize> IndexMut<usize> for Vector<D> {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        &mut self.0[axis]
    }
}

impl<const D: usize> Add for Vector<D> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const D: usize> AddAssign for Vector<D> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl<const D: usize> Sub for Vector<D> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<const D: usize> SubAssign for Vector<D> {
    fn sub_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
    }
}

impl<const D: usize> Mul<f64> for Vector<D> {
    type Output = Self;

    fn mul(mut self, rhs: f64) -> Self {
        self *= rhs;
        self
    }
}

impl<const D: usize> MulAssign<f64> for Vector<D> {
    fn mul_assign(&mut self, rhs: f64) {
        for a in self.0.iter_mut() {
            *a *= rhs;
        }
    }
}

impl<const D: usize> Div<f64> for Vector<D> {
    type Output = Self;

    fn div(mut self, rhs: f64) -> Self {
        self /= rhs;
        self
    }
}

impl<const D: usize> DivAssign<f64> for Vector<D> {
    fn div_assign(&mut self, rhs: f64) {
        for a in self.0.iter_mut() {
            *a /= rhs;
        }
    }
}

impl<const D: usize> Neg for Vector<D> {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl<const D: usize> AbsDiffEq for Vector<D> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const D: usize> RelativeEq for Vector<D> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
