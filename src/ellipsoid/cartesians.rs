use super::*;
use std::f64::consts::FRAC_PI_2;

impl Ellipsoid {
    // ----- Cartesian <--> Geographic conversion ----------------------------------

    /// Geographic to cartesian conversion. Input is longitude and latitude
    /// in radians, and ellipsoidal height in metres.
    #[must_use]
    #[allow(non_snake_case)] // make it possible to mimic math notation from original paper
    pub fn cartesian(&self, geographic: &Coor3D) -> Coor3D {
        let (lam, phi, h) = (geographic[0], geographic[1], geographic[2]);

        let N = self.prime_vertical_radius_of_curvature(phi);
        let (sinphi, cosphi) = phi.sin_cos();
        let (sinlam, coslam) = lam.sin_cos();

        let X = (N + h) * cosphi * coslam;
        let Y = (N + h) * cosphi * sinlam;
        let Z = (N * (1.0 - self.eccentricity_squared()) + h) * sinphi;

        Coor3D::raw(X, Y, Z)
    }

    /// Closed form cartesian to geographic conversion, following
    /// [Fukushima (1999)](crate::Bibliography::Fuk99), with the height
    /// computed as suggested by [Bowring (1985)](crate::Bibliography::Bow85).
    #[must_use]
    #[allow(non_snake_case)]
    pub fn geographic(&self, cartesian: &Coor3D) -> Coor3D {
        let (X, Y, Z) = (cartesian[0], cartesian[1], cartesian[2]);

        let b = self.semiminor_axis();
        let eps = self.second_eccentricity_squared();
        let es = self.eccentricity_squared();

        let lam = Y.atan2(X);

        // The perpendicular distance from the point coordinate to the Z-axis
        let p = X.hypot(Y);

        // Too close to the Z-axis: Snap to the pole given by the sign of Z
        if p < self.a * 1e-16 {
            let phi = FRAC_PI_2.copysign(Z);
            let h = Z.abs() - b;
            return Coor3D::raw(lam, phi, h);
        }

        let T = (Z * self.a) / (p * b);
        let c = 1.0 / (1.0 + T * T).sqrt();
        let s = c * T;

        let phi_num = Z + eps * b * s.powi(3);
        let phi_denom = p - es * self.a * c.powi(3);
        let phi = phi_num.atan2(phi_denom);

        Coor3D::raw(lam, phi, self.height_above(p, Z, phi))
    }

    /// Cartesian to geographic conversion, refining the closed form
    /// solution by fixed point iteration until the latitude changes by less
    /// than `tolerance` radians. Returns `None` if that does not happen within
    /// `max_iterations` iterations, or if the input is not a number.
    #[must_use]
    #[allow(non_snake_case)]
    pub fn geographic_iterative(
        &self,
        cartesian: &Coor3D,
        tolerance: f64,
        max_iterations: usize,
    ) -> Option<Coor3D> {
        if cartesian.is_nan() {
            return None;
        }
        let start = self.geographic(cartesian);
        let (lam, mut phi) = (start[0], start[1]);

        let (X, Y, Z) = (cartesian[0], cartesian[1], cartesian[2]);
        let p = X.hypot(Y);

        // Already snapped to a pole
        if p < self.a * 1e-16 {
            return Some(start);
        }

        let es = self.eccentricity_squared();
        for _ in 0..max_iterations {
            let sinphi = phi.sin();
            let N = self.a / (1.0 - sinphi * sinphi * es).sqrt();
            let next = (Z + es * N * sinphi).atan2(p);
            let change = (next - phi).abs();
            phi = next;
            if change < tolerance {
                return Some(Coor3D::raw(lam, phi, self.height_above(p, Z, phi)));
            }
        }
        None
    }

    // Bowring (1985), as quoted by Burtch (2006), suggests this expression
    // as more accurate than the commonly used h = p / cosphi - N
    #[allow(non_snake_case)]
    fn height_above(&self, p: f64, Z: f64, phi: f64) -> f64 {
        let (sinphi, cosphi) = phi.sin_cos();
        let N = self.a / (1.0 - sinphi * sinphi * self.eccentricity_squared()).sqrt();
        p * cosphi + Z * sinphi - self.a * self.a / N
    }
}

// ----- Tests ---------------------------------------------------------------------
