//! Transverse Mercator, following Engsager & Poder (2007)
use crate::authoring::*;

// Beyond this normalized distance from the central meridian, the series
// expansion breaks down
const MAX_NORMALIZED_EASTING: f64 = 2.623395162778;

#[rustfmt::skip]
const TRANSVERSE_MERCATOR: PolynomialCoefficients = PolynomialCoefficients {
    // Geodetic to TM. [Engsager & Poder, 2007](crate::Bibliography::Eng07)
    fwd: [
        [1./2.,   -2./3.,   5./16.,   41./180.,   -127./288.0 ,   7891./37800.],
        [0., 13./48.,   -3./5.,   557./1440.,   281./630.,   -1983433./1935360.],
        [0., 0., 61./240.,  -103./140.,   15061./26880.,   167603./181440.],
        [0., 0., 0., 49561./161280.,   -179./168.,   6601661./7257600.],
        [0., 0., 0., 0., 34729./80640.,   -3418889./1995840.],
        [0., 0., 0., 0., 0., 212378941./319334400.]
    ],

    // TM to Geodetic. [Engsager & Poder, 2007](crate::Bibliography::Eng07)
    inv: [
        [-1./2.,   2./3.,   -37./96.,   1./360.,   81./512.,   -96199./604800.],
        [0., -1./48.,   -1./15.,   437./1440.,   -46./105.,   1118711./3870720.],
        [0., 0., -17./480.,   37./840.,   209./4480.,   -5569./90720.],
        [0., 0., 0., -4397./161280.,   11./504.,   830251./7257600.],
        [0., 0., 0., 0., -4583./161280.,   108847./3991680.],
        [0., 0., 0., 0., 0., -20648693./638668800.]
    ]
};

#[derive(Debug, Clone)]
pub(super) struct TransverseMercator {
    ellps: Ellipsoid,
    lon_0: f64,
    x_0: f64,
    // The scaled spherical Earth radius - Qn in Engsager's notation
    qs: f64,
    // Origin northing minus true northing at the origin latitude
    zb: f64,
    tm: FourierCoefficients,
}

impl TransverseMercator {
    pub(super) fn new(
        ellps: Ellipsoid,
        parameters: &mut ProjectionParameters,
    ) -> Result<TransverseMercator, Error> {
        if parameters.lat_0.is_nan() {
            parameters.lat_0 = 0.;
        }
        if parameters.k_0 <= 0. {
            return Err(Error::Configuration(format!(
                "tmerc: k_0 must be positive, got {}",
                parameters.k_0
            )));
        }
        let lat_0 = parameters.lat_0.to_radians();
        let qs = parameters.k_0 * ellps.semimajor_axis() * ellps.normalized_meridian_arc_unit();

        // The Fourier series for the transverse mercator coordinates,
        // from [Engsager & Poder, 2007](crate::Bibliography::Eng07),
        // with extensions to 6th order by [Karney, 2011](crate::Bibliography::Kar11).
        let tm = fourier_coefficients(ellps.third_flattening(), &TRANSVERSE_MERCATOR);

        // Conformal latitude value of the latitude-of-origin - Z in Engsager's notation
        let z = ellps.latitude_geographic_to_conformal(lat_0);
        let zb = parameters.y_0 - qs * (z + fourier::sin(2. * z, &tm.fwd));

        Ok(TransverseMercator {
            ellps,
            lon_0: parameters.lon_0.to_radians(),
            x_0: parameters.x_0,
            qs,
            zb,
            tm,
        })
    }

    pub(super) fn project(&self, longitude: f64, latitude: f64) -> Option<(f64, f64)> {
        // --- 1. Geographical -> Conformal latitude, rotated longitude
        let lat = self.ellps.latitude_geographic_to_conformal(latitude);
        let lon = angular::normalize_symmetric(longitude - self.lon_0);

        // --- 2. Conformal LAT, LNG -> complex spherical LAT
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        let cos_lat_lon = cos_lat * cos_lon;
        let mut lat = sin_lat.atan2(cos_lat_lon);

        // --- 3. Complex spherical N, E -> ellipsoidal normalized N, E
        let mut lon = (sin_lon * cos_lat / sin_lat.hypot(cos_lat_lon)).asinh();
        let dc = fourier::complex_sin([2. * lat, 2. * lon], &self.tm.fwd);
        lat += dc[0];
        lon += dc[1];

        if lon.abs() > MAX_NORMALIZED_EASTING {
            return None;
        }

        // --- 4. ellipsoidal normalized N, E -> metric N, E
        Some((self.qs * lon + self.x_0, self.qs * lat + self.zb))
    }

    pub(super) fn unproject(&self, easting: f64, northing: f64) -> Option<(f64, f64)> {
        // --- 1. Normalize N, E
        let mut lon = (easting - self.x_0) / self.qs;
        let mut lat = (northing - self.zb) / self.qs;

        if lon.abs() > MAX_NORMALIZED_EASTING {
            return None;
        }

        // --- 2. Normalized N, E -> complex spherical LAT, LNG
        let dc = fourier::complex_sin([2. * lat, 2. * lon], &self.tm.inv);
        lat += dc[0];
        lon += dc[1];
        lon = gudermannian::fwd(lon);

        // --- 3. Complex spherical LAT -> Gaussian LAT, LNG
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        let cos_lat_lon = cos_lat * cos_lon;
        lon = sin_lon.atan2(cos_lat_lon);
        lat = (sin_lat * cos_lon).atan2(sin_lon.hypot(cos_lat_lon));

        // --- 4. Gaussian LAT, LNG -> ellipsoidal LAT, LNG
        let lon = angular::normalize_symmetric(lon + self.lon_0);
        let lat = self.ellps.latitude_conformal_to_geographic(lat);
        Some((lon, lat))
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::{geographic_on, ProjectionMethod};
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn utm() -> Result<(), Error> {
        let utm32 = Projection::utm(geographic_on("GRS80")?, 32, true)?;

        // Validation values from PROJ:
        // echo 12 55 0 0 | cct -d18 +proj=utm +zone=32 | clip
        #[rustfmt::skip]
        let geo: [(f64, f64); 4] = [
            ( 12., 55.),
            ( 12.,-55.),
            (-6.,  55.),
            (-6., -55.),
        ];

        #[rustfmt::skip]
        let projected = [
            ( 691_875.632_139_661, 6_098_907.825_005_012),
            ( 691_875.632_139_661,-6_098_907.825_005_012),
            (-455_673.814_189_040, 6_198_246.671_090_279),
            (-455_673.814_189_040,-6_198_246.671_090_279),
        ];

        for (g, p) in geo.iter().zip(projected.iter()) {
            let (lon, lat) = (g.0.to_radians(), g.1.to_radians());
            let Some((e, n)) = utm32.project(lon, lat) else {
                return Err(Error::General("utm projection failed"));
            };
            assert_float_eq!(e, p.0, abs <= 1e-8);
            assert_float_eq!(n, p.1, abs <= 1e-8);

            let Some((lon_back, lat_back)) = utm32.unproject(e, n) else {
                return Err(Error::General("utm unprojection failed"));
            };
            assert_float_eq!(lon_back.to_degrees(), g.0, abs <= 1e-10);
            assert_float_eq!(lat_back.to_degrees(), g.1, abs <= 1e-10);
        }
        Ok(())
    }

    #[test]
    fn utm_south() -> Result<(), Error> {
        let utm32s = Projection::utm(geographic_on("GRS80")?, 32, false)?;
        let Some((e, n)) = utm32s.project(12_f64.to_radians(), (-55_f64).to_radians()) else {
            return Err(Error::General("utm projection failed"));
        };
        assert_float_eq!(e, 691_875.632_139_661, abs <= 1e-8);
        assert_float_eq!(n, 1e7 - 6_098_907.825_005_012, abs <= 1e-8);
        Ok(())
    }

    #[test]
    fn offsets_and_scale() -> Result<(), Error> {
        // Test involving scale and all offsets, catching any double
        // correction for lat_0
        let parameters = ProjectionParameters {
            lat_0: 49.,
            lon_0: -2.,
            k_0: 0.9996012717,
            x_0: 400_000.,
            y_0: -100_000.,
            ..Default::default()
        };
        let airy = geographic_on("airy")?;
        let tm = Projection::new(ProjectionMethod::TransverseMercator, parameters, airy)?;

        // Expected value from PROJ:
        // echo 1 52 0 0 | cct -d 15 proj=tmerc lat_0=49 lon_0=-2 k_0=0.9996012717 x_0=400000 y_0=-100000 ellps=airy  --
        let Some((e, n)) = tm.project(1_f64.to_radians(), 52_f64.to_radians()) else {
            return Err(Error::General("tmerc projection failed"));
        };
        assert_float_eq!(e, 605909.130344302393496, abs <= 1e-8);
        assert_float_eq!(n, 237803.365171569399536, abs <= 1e-8);
        Ok(())
    }

    #[test]
    fn out_of_domain() -> Result<(), Error> {
        let utm32 = Projection::utm(geographic_on("GRS80")?, 32, true)?;
        // 86 degrees from the central meridian, on the equator
        assert!(utm32.project(95_f64.to_radians(), 0.).is_none());
        assert!(utm32.unproject(1e8, 0.).is_none());
        Ok(())
    }
}
