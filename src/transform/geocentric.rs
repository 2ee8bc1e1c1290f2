//! Geographic to geocentric cartesian conversion, and back
use crate::authoring::*;

/// The conversion between geographic coordinates (longitude, latitude in
/// radians, ellipsoidal height in metres) and geocentric cartesian
/// coordinates on an ellipsoid.
///
/// The forward direction is closed form. The inverse starts from the closed
/// form solution by [Fukushima (1999)](crate::Bibliography::Fuk99), and
/// refines it by fixed point iteration, until the latitude changes by less
/// than `tolerance` radians, giving up after `max_iterations`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricConversion {
    ellipsoid: Ellipsoid,
    tolerance: f64,
    max_iterations: usize,
}

impl GeocentricConversion {
    pub const DEFAULT_TOLERANCE: f64 = 1e-11;
    pub const DEFAULT_MAX_ITERATIONS: usize = 10;

    pub fn new(ellipsoid: Ellipsoid) -> GeocentricConversion {
        GeocentricConversion {
            ellipsoid,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_tolerance(self, tolerance: f64) -> GeocentricConversion {
        GeocentricConversion { tolerance, ..self }
    }

    pub fn with_max_iterations(self, max_iterations: usize) -> GeocentricConversion {
        GeocentricConversion {
            max_iterations,
            ..self
        }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Geographic to geocentric
    pub fn fwd(&self, geographic: &Coor3D) -> Coor3D {
        self.ellipsoid.cartesian(geographic)
    }

    /// Geocentric to geographic. `None` if the iteration does not converge
    pub fn inv(&self, cartesian: &Coor3D) -> Option<Coor3D> {
        self.ellipsoid
            .geographic_iterative(cartesian, self.tolerance, self.max_iterations)
    }
}

// ----- T E S T S ---------------------------------------------------------------------
