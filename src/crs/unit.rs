use crate::Error;

/// The quantity measured by a [`Unit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Base unit: metre
    Linear,
    /// Base unit: radian
    Angular,
    /// Base unit: unity
    Scale,
}

/// A unit of measure, and its conversion factor to the base unit of its kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    name: &'static str,
    kind: UnitKind,
    factor: f64,
}

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.;
const GRAD_TO_RAD: f64 = std::f64::consts::PI / 200.;

impl Unit {
    pub const METRE: Unit = Unit::new("metre", UnitKind::Linear, 1.);
    pub const KILOMETRE: Unit = Unit::new("kilometre", UnitKind::Linear, 1000.);
    pub const FOOT: Unit = Unit::new("foot", UnitKind::Linear, 0.3048);
    pub const US_SURVEY_FOOT: Unit = Unit::new("US survey foot", UnitKind::Linear, 1200. / 3937.);
    pub const RADIAN: Unit = Unit::new("radian", UnitKind::Angular, 1.);
    pub const DEGREE: Unit = Unit::new("degree", UnitKind::Angular, DEG_TO_RAD);
    pub const GRAD: Unit = Unit::new("grad", UnitKind::Angular, GRAD_TO_RAD);
    pub const ARC_SECOND: Unit = Unit::new("arc-second", UnitKind::Angular, DEG_TO_RAD / 3600.);
    pub const UNITY: Unit = Unit::new("unity", UnitKind::Scale, 1.);
    pub const PPM: Unit = Unit::new("parts per million", UnitKind::Scale, 1e-6);

    pub const fn new(name: &'static str, kind: UnitKind, factor: f64) -> Unit {
        Unit { name, kind, factor }
    }

    /// Look up a unit by one of its common abbreviations
    pub fn named(name: &str) -> Result<Unit, Error> {
        UNITS
            .iter()
            .find(|u| u.0 == name)
            .map(|u| u.1)
            .ok_or_else(|| Error::NotFound(name.to_string(), ": unit".to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// The factor converting a value in this unit to the base unit
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Convert `value` from this unit to the base unit of its kind
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor
    }

    /// Convert `value` from the base unit of its kind to this unit
    pub fn from_base(&self, value: f64) -> f64 {
        value / self.factor
    }
}

#[rustfmt::skip]
const UNITS: [(&str, Unit); 14] = [
    ("m",      Unit::METRE),
    ("metre",  Unit::METRE),
    ("meter",  Unit::METRE),
    ("km",     Unit::KILOMETRE),
    ("ft",     Unit::FOOT),
    ("us-ft",  Unit::US_SURVEY_FOOT),
    ("deg",    Unit::DEGREE),
    ("degree", Unit::DEGREE),
    ("rad",    Unit::RADIAN),
    ("radian", Unit::RADIAN),
    ("grad",   Unit::GRAD),
    ("gon",    Unit::GRAD),
    ("arcsec", Unit::ARC_SECOND),
    ("ppm",    Unit::PPM),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() -> Result<(), Error> {
        assert_eq!(Unit::named("gon")?, Unit::GRAD);
        assert_eq!(Unit::named("us-ft")?.kind(), UnitKind::Linear);
        assert!((Unit::GRAD.to_base(100.) - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert!((Unit::DEGREE.from_base(std::f64::consts::PI) - 180.).abs() < 1e-12);
        assert!(Unit::named("furlong").is_err());
        Ok(())
    }
}
