//! Lambert Conformal Conic
use crate::authoring::*;
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;

#[derive(Debug, Clone)]
pub(super) struct LambertConformalConic {
    e: f64,
    // Semimajor axis times scale
    ak_0: f64,
    lon_0: f64,
    x_0: f64,
    y_0: f64,
    n: f64,
    c: f64,
    rho0: f64,
}

impl LambertConformalConic {
    pub(super) fn new(
        ellps: Ellipsoid,
        parameters: &mut ProjectionParameters,
    ) -> Result<LambertConformalConic, Error> {
        if parameters.lat_2.is_nan() {
            parameters.lat_2 = parameters.lat_1;
        }
        let phi1 = parameters.lat_1.to_radians();
        let phi2 = parameters.lat_2.to_radians();

        if parameters.lat_0.is_nan() {
            parameters.lat_0 = 0.;
            if (phi1 - phi2).abs() < EPS10 {
                parameters.lat_0 = parameters.lat_1;
            }
        }
        let lat_0 = parameters.lat_0.to_radians();

        if (phi1 + phi2).abs() < EPS10 {
            return Err(Error::Configuration(
                "lcc: Invalid value for lat_1 and lat_2: |lat_1 + lat_2| should be > 0".to_string(),
            ));
        }
        let sc = phi1.sin_cos();
        if sc.1.abs() < EPS10 || phi1.abs() >= FRAC_PI_2 {
            return Err(Error::Configuration(
                "lcc: Invalid value for lat_1: |lat_1| should be < 90°".to_string(),
            ));
        }
        if phi2.cos().abs() < EPS10 || phi2.abs() >= FRAC_PI_2 {
            return Err(Error::Configuration(
                "lcc: Invalid value for lat_2: |lat_2| should be < 90°".to_string(),
            ));
        }

        let e = ellps.eccentricity();
        let es = ellps.eccentricity_squared();

        // Snyder (1987) eq. 14-15
        let m1 = ancillary::msfn(sc, es);
        // Snyder (1987) eq. 7-10: exp(-𝜓)
        let ml1 = ancillary::ts(sc, e);

        let mut n = sc.0;

        // Secant case?
        if (phi1 - phi2).abs() >= EPS10 {
            let sc = phi2.sin_cos();
            n = (m1 / ancillary::msfn(sc, es)).ln();
            let denom = (ml1 / ancillary::ts(sc, e)).ln();
            if n == 0. || denom == 0. {
                return Err(Error::Configuration(
                    "lcc: Invalid value for eccentricity".to_string(),
                ));
            }
            n /= denom;
        }

        let c = m1 * ml1.powf(-n) / n;
        let mut rho0 = 0.;
        if (lat_0.abs() - FRAC_PI_2).abs() > EPS10 {
            rho0 = c * ancillary::ts(lat_0.sin_cos(), e).powf(n);
        }

        Ok(LambertConformalConic {
            e,
            ak_0: ellps.semimajor_axis() * parameters.k_0,
            lon_0: parameters.lon_0.to_radians(),
            x_0: parameters.x_0,
            y_0: parameters.y_0,
            n,
            c,
            rho0,
        })
    }

    pub(super) fn project(&self, longitude: f64, latitude: f64) -> Option<(f64, f64)> {
        let lam = angular::normalize_symmetric(longitude - self.lon_0);
        let phi = latitude;
        let mut rho = 0.;

        // Close to one of the poles?
        if (phi.abs() - FRAC_PI_2).abs() < EPS10 {
            // The pole opposite the apex of the cone is at infinity
            if phi * self.n <= 0. {
                return None;
            }
        } else {
            rho = self.c * ancillary::ts(phi.sin_cos(), self.e).powf(self.n);
        }
        let sc = (lam * self.n).sin_cos();
        let easting = self.ak_0 * rho * sc.0 + self.x_0;
        let northing = self.ak_0 * (self.rho0 - rho * sc.1) + self.y_0;
        Some((easting, northing))
    }

    pub(super) fn unproject(&self, easting: f64, northing: f64) -> Option<(f64, f64)> {
        let mut x = (easting - self.x_0) / self.ak_0;
        let mut y = self.rho0 - (northing - self.y_0) / self.ak_0;
        let mut rho = x.hypot(y);

        // On one of the poles
        if rho == 0. {
            return Some((self.lon_0, FRAC_PI_2.copysign(self.n)));
        }

        // Standard parallel on the southern hemisphere?
        if self.n < 0. {
            rho = -rho;
            x = -x;
            y = -y;
        }

        let ts0 = (rho / self.c).powf(1. / self.n);
        let phi = ancillary::ts_to_latitude(ts0, self.e);
        if !phi.is_finite() {
            return None;
        }
        let lam = angular::normalize_symmetric(x.atan2(y) / self.n + self.lon_0);
        Some((lam, phi))
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::{geographic_on, ProjectionMethod};
    use super::*;
    use float_eq::assert_float_eq;

    fn lcc(parameters: ProjectionParameters) -> Result<Projection, Error> {
        let method = ProjectionMethod::LambertConformalConic;
        Projection::new(method, parameters, geographic_on("GRS80")?)
    }

    // Project, compare, and unproject
    fn check(lcc: &Projection, geo: &[(f64, f64)], projected: &[(f64, f64)]) -> Result<(), Error> {
        for (g, p) in geo.iter().zip(projected.iter()) {
            let Some((e, n)) = lcc.project(g.0.to_radians(), g.1.to_radians()) else {
                return Err(Error::General("lcc projection failed"));
            };
            assert_float_eq!(e, p.0, abs <= 2e-9);
            assert_float_eq!(n, p.1, abs <= 2e-9);

            let Some((lon, lat)) = lcc.unproject(e, n) else {
                return Err(Error::General("lcc unprojection failed"));
            };
            assert_float_eq!(lon.to_degrees(), g.0, abs <= 1e-10);
            assert_float_eq!(lat.to_degrees(), g.1, abs <= 1e-10);
        }
        Ok(())
    }

    #[test]
    fn one_standard_parallel() -> Result<(), Error> {
        let lcc = lcc(ProjectionParameters {
            lat_1: 57.,
            lon_0: 12.,
            ..Default::default()
        })?;

        // Validation values from PROJ:
        //     echo 10 55 0 0 | cct -d18 proj=lcc lat_1=57 lon_0=12  -- | clip
        //     echo 14 59 0 0 | cct -d18 proj=lcc lat_1=57 lon_0=12  -- | clip
        let geo = [(10., 55.), (14., 59.)];
        #[rustfmt::skip]
        let projected = [
            (-128046.4724386522429995, -220853.7001605064142495),
            ( 115005.41456620067765471, 224484.5143763388914522),
        ];
        check(&lcc, &geo, &projected)
    }

    #[test]
    fn two_standard_parallels() -> Result<(), Error> {
        let lcc = lcc(ProjectionParameters {
            lat_1: 33.,
            lat_2: 45.,
            lon_0: 10.,
            ..Default::default()
        })?;

        // Validation value from PROJ:
        // echo 12 40 0 0 | cct -d12 proj=lcc lat_1=33 lat_2=45 lon_0=10 -- | clip
        check(&lcc, &[(12., 40.)], &[(169863.026093938301, 4735925.219292450696)])
    }

    #[test]
    fn one_standard_parallel_and_latitudinal_offset() -> Result<(), Error> {
        let lcc = lcc(ProjectionParameters {
            lat_1: 39.,
            lat_0: 35.,
            lon_0: 10.,
            ..Default::default()
        })?;

        // Validation value from PROJ:
        // echo 12 40 0 0 | cct -d12 proj=lcc lat_1=39 lat_0=35 lon_0=10 -- | clip
        check(&lcc, &[(12., 40.)], &[(170800.011728740647, 557172.361112929415)])
    }

    #[test]
    fn two_sp_lat_offset_xy_offset() -> Result<(), Error> {
        let lcc = lcc(ProjectionParameters {
            lat_1: 33.,
            lat_2: 45.,
            lat_0: 35.,
            lon_0: 10.,
            x_0: 12345.,
            y_0: 67890.,
            ..Default::default()
        })?;

        // Validation value from PROJ:
        // echo 12 40 0 0 | cct -d12 proj=lcc lat_1=33 lat_2=45 lat_0=35 lon_0=10  x_0=12345 y_0=67890 -- | clip
        check(&lcc, &[(12., 40.)], &[(182208.026093938301, 622045.440793916583)])
    }

    #[test]
    fn poles() -> Result<(), Error> {
        let lcc = lcc(ProjectionParameters {
            lat_1: 57.,
            lon_0: 12.,
            ..Default::default()
        })?;
        // The south pole is at infinity for a cone with its apex over the north pole
        assert!(lcc.project(0., -FRAC_PI_2).is_none());
        let Some((e, n)) = lcc.project(0., FRAC_PI_2) else {
            return Err(Error::General("lcc projection of the north pole failed"));
        };
        let Some((_, lat)) = lcc.unproject(e, n) else {
            return Err(Error::General("lcc unprojection of the north pole failed"));
        };
        assert_float_eq!(lat, FRAC_PI_2, abs <= 1e-9);
        Ok(())
    }
}
