//! The `SimulationBox` type represents the periodic square (or rectangular)
//! domain the particles live in.
use crate::Vector2D;

/// Convention used to bring a displacement back to its periodic image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub enum ImageConvention {
    /// Subtract `2 L trunc(Δ / L_min)` from each component. This is exact for
    /// particles inside the box, except for displacements of exactly `±L_min`
    /// which are mapped to `∓L_min`. Displacements larger than `2 L_min` (from
    /// particles outside of the box) are not handled.
    #[default]
    Truncate,
    /// Subtract `2 L round(Δ / 2 L_min)` from each component, which is the
    /// usual nearest image convention and works for any displacement.
    Round,
}

impl ImageConvention {
    /// Wrap a single component `delta` of a displacement, using `scale` as the
    /// half-length of the periodic image shift and `modulus` as the half-length
    /// used to count the number of images.
    #[inline]
    pub fn wrap(self, delta: f64, scale: f64, modulus: f64) -> f64 {
        match self {
            ImageConvention::Truncate => delta - 2.0 * scale * f64::trunc(delta / modulus),
            ImageConvention::Round => delta - 2.0 * scale * f64::round(0.5 * delta / modulus),
        }
    }
}

/// A `SimulationBox` defines the periodic boundaries of the system.
///
/// The box is centered on the origin. `half_length` (`L`) is the half-extent
/// used when shifting particles to their periodic images in trajectory
/// statistics, and `min_half_length` (`L_min`) the smallest half-extent of the
/// box, used to size the pair search grid and to count periodic images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    half_length: f64,
    min_half_length: f64,
}

impl SimulationBox {
    /// Create a new box with the given half-extent `L` and smallest
    /// half-extent `L_min`.
    pub fn new(half_length: f64, min_half_length: f64) -> SimulationBox {
        assert!(
            half_length > 0.0 && half_length.is_finite(),
            "box half length must be positive and finite"
        );
        assert!(
            min_half_length > 0.0 && min_half_length.is_finite(),
            "box minimal half length must be positive and finite"
        );

        SimulationBox {
            half_length: half_length,
            min_half_length: min_half_length,
        }
    }

    /// Create a square box spanning `[-half_length, half_length)` on both axes
    pub fn square(half_length: f64) -> SimulationBox {
        SimulationBox::new(half_length, half_length)
    }

    /// Create a rectangular box spanning `[-half_x, half_x)` and `[-half_y,
    /// half_y)`. `L` is taken along the first axis.
    pub fn rectangular(half_x: f64, half_y: f64) -> SimulationBox {
        SimulationBox::new(half_x, f64::min(half_x, half_y))
    }

    /// Get the half-extent `L` of this box
    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    /// Get the smallest half-extent `L_min` of this box
    pub fn min_half_length(&self) -> f64 {
        self.min_half_length
    }

    /// Check if `position` is inside `[-L_min, L_min)` on both axes
    pub fn contains(&self, position: Vector2D) -> bool {
        let l_min = self.min_half_length;
        position[0] >= -l_min && position[0] < l_min &&
        position[1] >= -l_min && position[1] < l_min
    }

    /// Get the periodic image of `position` inside `[-L_min, L_min)`
    pub fn wrap_position(&self, position: Vector2D) -> Vector2D {
        let l_min = self.min_half_length;
        position.map(|value| (value + l_min).rem_euclid(2.0 * l_min) - l_min)
    }

    /// Get the displacement between two positions, shifted to its periodic
    /// image with `L_min` for both the shift and the image count. This is the
    /// displacement used when searching for pairs.
    #[inline]
    pub fn pair_vector(&self, first: Vector2D, second: Vector2D, convention: ImageConvention) -> Vector2D {
        let l_min = self.min_half_length;
        (first - second).map(|delta| convention.wrap(delta, l_min, l_min))
    }

    /// Get the displacement between two positions, shifted to its periodic
    /// image by `2 L` for each image counted with `L_min`. This is the
    /// displacement used by the trajectory statistics.
    #[inline]
    pub fn separation(&self, first: Vector2D, second: Vector2D, convention: ImageConvention) -> Vector2D {
        let l = self.half_length;
        let l_min = self.min_half_length;
        (first - second).map(|delta| convention.wrap(delta, l, l_min))
    }
}
