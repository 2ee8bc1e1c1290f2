use super::*;

// ----- Latitudes -------------------------------------------------------------
impl Ellipsoid {
    /// Geographic latitude, 𝜙, to isometric latitude, 𝜓
    #[must_use]
    pub fn latitude_geographic_to_isometric(&self, geographic: f64) -> f64 {
        let e = self.eccentricity();
        gudermannian::inv(geographic) - (e * geographic.sin()).atanh() * e
    }

    /// Isometric latitude, 𝜓, to geographic latitude, 𝜙
    #[must_use]
    pub fn latitude_isometric_to_geographic(&self, isometric: f64) -> f64 {
        let e = self.eccentricity();
        ancillary::sinhpsi_to_tanphi(isometric.sinh(), e).atan()
    }

    /// Geographic latitude, 𝜙, to conformal latitude, 𝜒.
    /// Since 𝜓 = asinh(tan 𝜒), this is the Gudermannian of the isometric latitude
    #[must_use]
    pub fn latitude_geographic_to_conformal(&self, geographic: f64) -> f64 {
        gudermannian::fwd(self.latitude_geographic_to_isometric(geographic))
    }

    /// Conformal latitude, 𝜒, to geographic latitude, 𝜙
    #[must_use]
    pub fn latitude_conformal_to_geographic(&self, conformal: f64) -> f64 {
        let e = self.eccentricity();
        ancillary::sinhpsi_to_tanphi(conformal.tan(), e).atan()
    }
}

// ----- Tests ---------------------------------------------------------------------
