use std::ops::{Add, Sub, Mul, Div, Neg};
use std::ops::{AddAssign, SubAssign, MulAssign, DivAssign};
use std::ops::{Index, IndexMut};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

/// A 2-dimensional vector type, used for particle positions, velocities and
/// the displacement between particles.
///
/// `a * b` between two vectors is the dot product.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D([f64; 2]);

impl Vector2D {
    /// Create a new `Vector2D` with components `x` and `y`
    pub fn new(x: f64, y: f64) -> Vector2D {
        Vector2D([x, y])
    }

    /// Create a new `Vector2D` with both components set to zero
    pub fn zero() -> Vector2D {
        Vector2D([0.0, 0.0])
    }

    /// Get the square of the euclidean norm of this vector
    #[inline]
    pub fn norm2(&self) -> f64 {
        self * self
    }

    /// Get the euclidean norm of this vector
    #[inline]
    pub fn norm(&self) -> f64 {
        f64::sqrt(self.norm2())
    }

    /// Check that both components of this vector are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0[0].is_finite() && self.0[1].is_finite()
    }

    /// Apply `function` to both components of this vector
    #[inline]
    pub fn map(self, function: impl Fn(f64) -> f64) -> Vector2D {
        Vector2D([function(self.0[0]), function(self.0[1])])
    }
}

impl Index<usize> for Vector2D {
    type Output = f64;
    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Vector2D {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl_arithmetic!(
    Vector2D, Vector2D, Add, add, Vector2D,
    self, other,
    Vector2D::new(self[0] + other[0], self[1] + other[1])
);

impl_arithmetic!(
    Vector2D, Vector2D, Sub, sub, Vector2D,
    self, other,
    Vector2D::new(self[0] - other[0], self[1] - other[1])
);

// dot product
impl_arithmetic!(
    Vector2D, Vector2D, Mul, mul, f64,
    self, other,
    self[0] * other[0] + self[1] * other[1]
);

lsh_scal_arithmetic!(
    Vector2D, Mul, mul, Vector2D,
    self, other,
    Vector2D::new(self[0] * other, self[1] * other)
);

rhs_scal_arithmetic!(
    Vector2D, Mul, mul, Vector2D,
    self, other,
    Vector2D::new(self * other[0], self * other[1])
);

lsh_scal_arithmetic!(
    Vector2D, Div, div, Vector2D,
    self, other,
    Vector2D::new(self[0] / other, self[1] / other)
);

impl_inplace_arithmetic!(
    Vector2D, Vector2D, AddAssign, add_assign,
    self, other,
    {
        self[0] += other[0];
        self[1] += other[1];
    }
);

impl_inplace_arithmetic!(
    Vector2D, Vector2D, SubAssign, sub_assign,
    self, other,
    {
        self[0] -= other[0];
        self[1] -= other[1];
    }
);

impl_inplace_arithmetic!(
    Vector2D, f64, MulAssign, mul_assign,
    self, other,
    {
        self[0] *= other;
        self[1] *= other;
    }
);

impl_inplace_arithmetic!(
    Vector2D, f64, DivAssign, div_assign,
    self, other,
    {
        self[0] /= other;
        self[1] /= other;
    }
);

impl Neg for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn neg(self) -> Vector2D {
        Vector2D::new(-self[0], -self[1])
    }
}

impl<'a> Neg for &'a Vector2D {
    type Output = Vector2D;
    #[inline]
    fn neg(self) -> Vector2D {
        Vector2D::new(-self[0], -self[1])
    }
}

impl AbsDiffEq for Vector2D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Vector2D, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self[0], &other[0], epsilon) &&
        f64::abs_diff_eq(&self[1], &other[1], epsilon)
    }
}

impl RelativeEq for Vector2D {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Vector2D, epsilon: f64, max_relative: f64) -> bool {
        f64::relative_eq(&self[0], &other[0], epsilon, max_relative) &&
        f64::relative_eq(&self[1], &other[1], epsilon, max_relative)
    }
}

impl UlpsEq for Vector2D {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Vector2D, epsilon: f64, max_ulps: u32) -> bool {
        f64::ulps_eq(&self[0], &other[0], epsilon, max_ulps) &&
        f64::ulps_eq(&self[1], &other[1], epsilon, max_ulps)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_ulps_eq;
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Vector2D::new(2.0, 3.5);
        let b = Vector2D::new(-1.0, 0.5);

        assert_eq!(a + b, Vector2D::new(1.0, 4.0));
        assert_eq!(&a - &b, Vector2D::new(3.0, 3.0));
        assert_eq!(a * b, -0.25);
        assert_eq!(2.0 * a, Vector2D::new(4.0, 7.0));
        assert_eq!(a / 2.0, Vector2D::new(1.0, 1.75));
        assert_eq!(-b, Vector2D::new(1.0, -0.5));

        let mut c = a;
        c += b;
        c -= Vector2D::new(1.0, 1.0);
        c *= 3.0;
        assert_eq!(c, Vector2D::new(0.0, 9.0));
        c /= 9.0;
        assert_eq!(c, Vector2D::new(0.0, 1.0));
    }

    #[test]
    fn norm() {
        let a = Vector2D::new(3.0, -4.0);
        assert_eq!(a.norm2(), 25.0);
        assert_ulps_eq!(a.norm(), 5.0);

        assert!(a.is_finite());
        assert!(!Vector2D::new(f64::NAN, 0.0).is_finite());
        assert!(!Vector2D::new(0.0, f64::INFINITY).is_finite());
    }
}
