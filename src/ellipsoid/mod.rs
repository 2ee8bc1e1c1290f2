//! The ellipsoid of revolution: Shape, curvature, auxiliary latitudes, and
//! the conversion between geographic and cartesian coordinates.

use crate::authoring::*;

mod cartesians;
mod latitudes;

/// A biaxial ellipsoid, given by its semimajor axis and flattening
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7)
    }
}

// Name, semimajor axis, reciprocal flattening
#[rustfmt::skip]
const ELLIPSOID_LIST: [(&str, f64, f64); 9] = [
    ("GRS80",     6_378_137.0,   298.257_222_100_882_7),
    ("WGS84",     6_378_137.0,   298.257_223_563),
    ("intl",      6_378_388.0,   297.0),
    ("Helmert",   6_378_200.0,   298.3),
    ("clrk66",    6_378_206.4,   294.978_698_2),
    ("clrk80",    6_378_249.145, 293.465),
    ("clrk80ign", 6_378_249.2,   293.466_021_293_626_9),
    ("bessel",    6_377_397.155, 299.152_812_8),
    ("airy",      6_377_563.396, 299.324_964_6),
];

impl Ellipsoid {
    /// An ellipsoid given by its semimajor axis and flattening
    pub fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// Predefined ellipsoid, or an ad hoc `a, rf` pair, e.g. "6378137, 298.25"
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        if let Some((_, a, rf)) = ELLIPSOID_LIST.iter().find(|e| e.0 == name) {
            return Ok(Ellipsoid::new(*a, 1. / rf));
        }

        let parts: Vec<&str> = name.split(',').map(|p| p.trim()).collect();
        if parts.len() == 2 {
            if let (Ok(a), Ok(rf)) = (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
                let f = if rf == 0. { 0. } else { 1. / rf };
                return Ok(Ellipsoid::new(a, f));
            }
        }

        Err(Error::NotFound(name.to_string(), ": ellipsoid".to_string()))
    }

    // ----- Shape and size ---------------------------------------------------------

    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// b = a(1 - f)
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1. - self.f)
    }

    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// n = (a - b)/(a + b) = f/(2 - f)
    pub fn third_flattening(&self) -> f64 {
        self.f / (2. - self.f)
    }

    /// e² = (a² - b²)/a² = f(2 - f)
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2. - self.f)
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// e'² = (a² - b²)/b² = e²/(1 - e²)
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1. - es)
    }

    // ----- Curvatures ------------------------------------------------------------

    // W² = 1 - e²sin²φ
    fn w_squared(&self, latitude: f64) -> f64 {
        1. - self.eccentricity_squared() * latitude.sin().powi(2)
    }

    /// The radius of curvature in the prime vertical, N = a/W
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        self.a / self.w_squared(latitude).sqrt()
    }

    /// The normalized meridian arc unit, Qn: The mean length of one radian
    /// of the meridian, in units of the semimajor axis
    pub fn normalized_meridian_arc_unit(&self) -> f64 {
        let n = self.third_flattening();
        let coefficients = [1., 1. / 4., 1. / 64., 1. / 256., 25. / 16384.];
        taylor::horner(n * n, &coefficients) / (1. + n)
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named() -> Result<(), Error> {
        let ellps = Ellipsoid::named("intl")?;
        assert_eq!(ellps.flattening(), 1. / 297.);

        let ellps = Ellipsoid::named("GRS80")?;
        assert_eq!(ellps.semimajor_axis(), 6378137.0);
        assert_eq!(ellps, Ellipsoid::default());

        let ellps = Ellipsoid::named("6378137, 298.257223563")?;
        assert_eq!(ellps, Ellipsoid::named("WGS84")?);

        assert!(matches!(
            Ellipsoid::named("cucumber"),
            Err(Error::NotFound(_, _))
        ));
        Ok(())
    }

    #[test]
    fn shape_and_size() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        assert!((ellps.eccentricity() - 0.081819191).abs() < 1.0e-10);
        assert!((ellps.eccentricity_squared() - 0.00669_43800_22903_41574).abs() < 1.0e-10);
        assert!((ellps.semiminor_axis() - 6_356_752.31414_0347).abs() < 1e-9);
        // The length of the full meridian
        let circumference = std::f64::consts::TAU
            * ellps.normalized_meridian_arc_unit()
            * ellps.semimajor_axis();
        assert!((circumference - 40007862.9169218).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn curvatures() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let pole = 90_f64.to_radians();
        assert!((ellps.prime_vertical_radius_of_curvature(pole) - 6_399_593.6259).abs() < 1e-4);
        assert_eq!(ellps.prime_vertical_radius_of_curvature(0.0), 6_378_137.0);
        Ok(())
    }
}
