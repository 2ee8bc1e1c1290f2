//! Mercator
use crate::authoring::*;
use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone)]
pub(super) struct Mercator {
    ellps: Ellipsoid,
    // Semimajor axis times scale
    ak_0: f64,
    lon_0: f64,
    x_0: f64,
    y_0: f64,
}

impl Mercator {
    pub(super) fn new(
        ellps: Ellipsoid,
        parameters: &mut ProjectionParameters,
    ) -> Result<Mercator, Error> {
        // The Mercator is always centered on the equator
        parameters.lat_0 = 0.;

        let lat_ts = parameters.lat_ts;
        if lat_ts.abs() >= 90. {
            return Err(Error::Configuration(format!(
                "merc: |lat_ts| should be < 90°, got {lat_ts}"
            )));
        }

        // lat_ts trumps k_0
        if lat_ts != 0.0 {
            let sc = lat_ts.to_radians().sin_cos();
            parameters.k_0 = ancillary::msfn(sc, ellps.eccentricity_squared());
        }
        if parameters.k_0 <= 0. {
            return Err(Error::Configuration(format!(
                "merc: k_0 must be positive, got {}",
                parameters.k_0
            )));
        }

        Ok(Mercator {
            ellps,
            ak_0: ellps.semimajor_axis() * parameters.k_0,
            lon_0: parameters.lon_0.to_radians(),
            x_0: parameters.x_0,
            y_0: parameters.y_0,
        })
    }

    pub(super) fn project(&self, longitude: f64, latitude: f64) -> Option<(f64, f64)> {
        // The poles are at infinity
        if latitude.abs() >= FRAC_PI_2 {
            return None;
        }
        let lon = angular::normalize_symmetric(longitude - self.lon_0);
        let easting = self.ak_0 * lon + self.x_0;
        let northing = self.ak_0 * self.ellps.latitude_geographic_to_isometric(latitude) + self.y_0;
        Some((easting, northing))
    }

    pub(super) fn unproject(&self, easting: f64, northing: f64) -> Option<(f64, f64)> {
        let lon = (easting - self.x_0) / self.ak_0 + self.lon_0;
        let psi = (northing - self.y_0) / self.ak_0;
        let lat = self.ellps.latitude_isometric_to_geographic(psi);
        Some((angular::normalize_symmetric(lon), lat))
    }
}

// ----- T E S T S ---------------------------------------------------------------------
