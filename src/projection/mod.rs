//! Map projections: The mapping between the internal coordinates of a
//! geographic CRS (longitude and latitude in radians, reckoned from its
//! prime meridian) and the internal coordinates of a projected CRS
//! (easting and northing in metres).

use crate::authoring::*;

mod lcc;
mod merc;
mod tmerc;

/// The projection methods supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMethod {
    TransverseMercator,
    Mercator,
    LambertConformalConic,
}

impl ProjectionMethod {
    /// Look up a method by its short name (as in PROJ: `tmerc`, `merc`,
    /// `lcc`), its full name, or its EPSG method code
    pub fn named(name: &str) -> Result<ProjectionMethod, Error> {
        use ProjectionMethod::*;
        let code = CrsCode::parse(name);
        #[rustfmt::skip]
        let method = match code.epsg_number() {
            Some(9807) => Some(TransverseMercator),
            Some(9804 | 9805 | 1024) => Some(Mercator),
            Some(9801 | 9802) => Some(LambertConformalConic),
            _ => match name.to_lowercase().as_str() {
                "tmerc" | "transverse mercator" => Some(TransverseMercator),
                "merc"  | "mercator" => Some(Mercator),
                "lcc"   | "lambert conic conformal" | "lambert conformal conic" => Some(LambertConformalConic),
                _ => None,
            },
        };
        method.ok_or_else(|| Error::NotFound(name.to_string(), ": projection method".to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectionMethod::TransverseMercator => "Transverse Mercator",
            ProjectionMethod::Mercator => "Mercator",
            ProjectionMethod::LambertConformalConic => "Lambert Conic Conformal",
        }
    }
}

/// The defining parameters of a projection. Angles in degrees, false
/// easting and northing in metres.
///
/// `lat_0` and `lat_2` may be given as `NaN`, meaning "not given": The
/// Lambert projection then uses `lat_1` for `lat_2`, and for `lat_0` in
/// the tangent case. Elsewhere, a missing `lat_0` is the equator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    pub lat_0: f64,
    pub lon_0: f64,
    pub lat_1: f64,
    pub lat_2: f64,
    pub lat_ts: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        ProjectionParameters {
            lat_0: f64::NAN,
            lon_0: 0.,
            lat_1: 0.,
            lat_2: f64::NAN,
            lat_ts: 0.,
            k_0: 1.,
            x_0: 0.,
            y_0: 0.,
        }
    }
}

impl ProjectionParameters {
    /// The Universal Transverse Mercator parameters for a zone
    pub fn utm(zone: usize, north: bool) -> Result<ProjectionParameters, Error> {
        if !(1..=60).contains(&zone) {
            error!("UTM: {zone}. Must be an integer in the interval 1..60");
            return Err(Error::BadParam("zone".to_string(), zone.to_string()));
        }
        Ok(ProjectionParameters {
            lat_0: 0.,
            lon_0: -183. + 6. * zone as f64,
            k_0: 0.9996,
            x_0: 500_000.,
            y_0: if north { 0. } else { 10_000_000. },
            ..Default::default()
        })
    }
}

// The precomputed state of each projection method
#[derive(Debug, Clone)]
enum Projector {
    TransverseMercator(tmerc::TransverseMercator),
    Mercator(merc::Mercator),
    LambertConformalConic(lcc::LambertConformalConic),
}

/// A map projection of a geographic CRS
#[derive(Debug, Clone)]
pub struct Projection {
    method: ProjectionMethod,
    parameters: ProjectionParameters,
    geographic: Arc<Crs>,
    projector: Projector,
}

impl Projection {
    /// Set up a projection of `geographic`, which must be a geographic CRS.
    /// Fails with `Error::Configuration` for invalid parameter combinations.
    pub fn new(
        method: ProjectionMethod,
        parameters: ProjectionParameters,
        geographic: Arc<Crs>,
    ) -> Result<Projection, Error> {
        if geographic.crs_type() != CrsType::Geographic {
            return Err(Error::Configuration(format!(
                "a projection needs a geographic CRS, got a {} CRS",
                geographic.crs_type()
            )));
        }
        let ellps = *geographic.datum().ellipsoid();
        let mut parameters = parameters;
        let projector = match method {
            ProjectionMethod::TransverseMercator => {
                Projector::TransverseMercator(tmerc::TransverseMercator::new(ellps, &mut parameters)?)
            }
            ProjectionMethod::Mercator => {
                Projector::Mercator(merc::Mercator::new(ellps, &mut parameters)?)
            }
            ProjectionMethod::LambertConformalConic => Projector::LambertConformalConic(
                lcc::LambertConformalConic::new(ellps, &mut parameters)?,
            ),
        };
        Ok(Projection {
            method,
            parameters,
            geographic,
            projector,
        })
    }

    /// Universal Transverse Mercator, zone 1..=60, northern or southern aspect
    pub fn utm(geographic: Arc<Crs>, zone: usize, north: bool) -> Result<Projection, Error> {
        let parameters = ProjectionParameters::utm(zone, north)?;
        Projection::new(ProjectionMethod::TransverseMercator, parameters, geographic)
    }

    pub fn method(&self) -> ProjectionMethod {
        self.method
    }

    /// The parameters, with defaults resolved
    pub fn parameters(&self) -> &ProjectionParameters {
        &self.parameters
    }

    /// The geographic CRS this projection is defined relative to
    pub fn geographic_crs(&self) -> &Arc<Crs> {
        &self.geographic
    }

    /// Longitude and latitude (radians) to easting and northing (metres).
    /// `None` for points outside of the domain of the projection.
    pub fn project(&self, longitude: f64, latitude: f64) -> Option<(f64, f64)> {
        let result = match &self.projector {
            Projector::TransverseMercator(p) => p.project(longitude, latitude),
            Projector::Mercator(p) => p.project(longitude, latitude),
            Projector::LambertConformalConic(p) => p.project(longitude, latitude),
        }?;
        (result.0.is_finite() && result.1.is_finite()).then_some(result)
    }

    /// Easting and northing (metres) to longitude and latitude (radians).
    /// `None` for points outside of the domain of the projection.
    pub fn unproject(&self, easting: f64, northing: f64) -> Option<(f64, f64)> {
        let result = match &self.projector {
            Projector::TransverseMercator(p) => p.unproject(easting, northing),
            Projector::Mercator(p) => p.unproject(easting, northing),
            Projector::LambertConformalConic(p) => p.unproject(easting, northing),
        }?;
        (result.0.is_finite() && result.1.is_finite()).then_some(result)
    }
}

impl PartialEq for Projection {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
            && self.parameters == other.parameters
            && *self.geographic == *other.geographic
    }
}

// ----- T E S T S ---------------------------------------------------------------------

/// Geographic CRS fixtures for the projection tests
#[cfg(test)]
pub(crate) fn geographic_on(ellipsoid: &str) -> Result<Arc<Crs>, Error> {
    let datum = GeodeticDatum::new(
        Identity::named(ellipsoid),
        Ellipsoid::named(ellipsoid)?,
        PrimeMeridian::greenwich(),
        None,
    );
    let axes = vec![Axis::longitude(Unit::DEGREE), Axis::latitude(Unit::DEGREE)];
    let crs = GeographicCrs::new(Identity::named(ellipsoid), Arc::new(datum), axes)?;
    Ok(Arc::new(Crs::Geographic(crs)))
}
