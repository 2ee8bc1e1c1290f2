use super::identity::Identity;
use crate::authoring::*;

/// A prime meridian, given by its longitude relative to Greenwich
#[derive(Debug, Clone, PartialEq)]
pub struct PrimeMeridian {
    longitude: f64,
    identity: Identity,
}

impl Default for PrimeMeridian {
    fn default() -> PrimeMeridian {
        PrimeMeridian::greenwich()
    }
}

impl PrimeMeridian {
    /// A prime meridian at `longitude` degrees east of Greenwich
    pub fn new(name: &str, longitude: f64) -> PrimeMeridian {
        PrimeMeridian {
            longitude,
            identity: Identity::named(name),
        }
    }

    pub fn greenwich() -> PrimeMeridian {
        PrimeMeridian::new("Greenwich", 0.)
    }

    /// The built in prime meridians, or a longitude in degrees
    pub fn named(name: &str) -> Result<PrimeMeridian, Error> {
        let longitude = match name.to_lowercase().as_str() {
            "greenwich" => 0.,
            "paris" => 2.337_229_166_666_667,
            "ferro" => -angular::dms_to_dd(17, 40, 0.),
            "rome" => angular::dms_to_dd(12, 27, 8.4),
            "oslo" => angular::dms_to_dd(10, 43, 22.5),
            _ => {
                let Ok(longitude) = name.parse::<f64>() else {
                    return Err(Error::NotFound(name.to_string(), ": prime meridian".to_string()));
                };
                return Ok(PrimeMeridian::new(name, longitude));
            }
        };
        let mut name = name.to_string();
        name[..1].make_ascii_uppercase();
        Ok(PrimeMeridian::new(&name, longitude))
    }

    /// Longitude relative to Greenwich, in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Longitude relative to Greenwich, in radians
    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }

    pub fn is_greenwich(&self) -> bool {
        self.longitude == 0.
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

/// A geodetic datum: The ellipsoid, the prime meridian, and (optionally)
/// the 7 parameter Helmert transformation taking geocentric coordinates
/// from this datum to WGS84, in the position vector convention.
#[derive(Debug, Clone)]
pub struct GeodeticDatum {
    ellipsoid: Ellipsoid,
    prime_meridian: PrimeMeridian,
    to_wgs84: Option<Helmert>,
    identity: Identity,
}

impl GeodeticDatum {
    pub fn new(
        identity: Identity,
        ellipsoid: Ellipsoid,
        prime_meridian: PrimeMeridian,
        to_wgs84: Option<Helmert>,
    ) -> GeodeticDatum {
        GeodeticDatum {
            ellipsoid,
            prime_meridian,
            to_wgs84,
            identity,
        }
    }

    /// The World Geodetic System 1984
    pub fn wgs84() -> GeodeticDatum {
        GeodeticDatum::new(
            Identity::new(CrsCode::epsg(6326), "World Geodetic System 1984"),
            Ellipsoid::new(6_378_137.0, 1. / 298.257_223_563),
            PrimeMeridian::greenwich(),
            Some(Helmert::default()),
        )
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn prime_meridian(&self) -> &PrimeMeridian {
        &self.prime_meridian
    }

    pub fn to_wgs84(&self) -> Option<&Helmert> {
        self.to_wgs84.as_ref()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Two datums are equivalent when they share ellipsoid and WGS84 relation.
    /// Without a WGS84 relation on both, they must also share identity.
    /// The prime meridian may differ, and is handled by longitude rotation.
    pub fn is_equivalent(&self, other: &GeodeticDatum) -> bool {
        if self.ellipsoid != other.ellipsoid {
            return false;
        }
        match (&self.to_wgs84, &other.to_wgs84) {
            (Some(a), Some(b)) => a == b,
            _ => self.identity == other.identity,
        }
    }
}

/// Equality ignores the identity metadata of datums related to WGS84
impl PartialEq for GeodeticDatum {
    fn eq(&self, other: &Self) -> bool {
        self.is_equivalent(other)
            && self.prime_meridian.longitude == other.prime_meridian.longitude
    }
}

// ----- T E S T S ---------------------------------------------------------------------
