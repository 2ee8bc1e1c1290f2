//! Classification of operation methods and operation parameters, given by
//! EPSG code or by name, into the transformation kinds supported.
//!
//! The classifiers never fail: Anything unknown is `NotSupported`, and it is
//! up to the caller to decide what that means.

use crate::authoring::*;

/// The operation methods supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedTransformation {
    LongitudeRotation,
    GeographicGeocentric,
    Helmert3,
    Helmert7,
    CoordinateFrameRotation,
    GeneralPolynomial2,
    GeneralPolynomial3,
    GeneralPolynomial4,
    GeneralPolynomial6,
    NotSupported,
}

#[rustfmt::skip]
const TRANSFORMATIONS: [(SupportedTransformation, &[&str], &[u32]); 9] = {
    use SupportedTransformation::*;
    [
        (LongitudeRotation, &["Longitude rotation"], &[9601]),
        (GeographicGeocentric, &["Geographic/geocentric conversions"], &[9602]),
        (Helmert3, &[
            "Geocentric translations",
            "Geocentric translations (geog2D domain)",
            "Geocentric translations (geocentric domain)",
        ], &[9603, 1031]),
        (Helmert7, &[
            "Position Vector 7-param. transformation",
            "Position Vector transformation (geog2D domain)",
            "Position Vector transformation (geocentric domain)",
        ], &[9606, 1033]),
        (CoordinateFrameRotation, &[
            "Coordinate Frame rotation",
            "Coordinate Frame rotation (geog2D domain)",
            "Coordinate Frame rotation (geocentric domain)",
        ], &[9607, 1032]),
        (GeneralPolynomial2, &["General polynomial of degree 2"], &[9645]),
        (GeneralPolynomial3, &["General polynomial of degree 3"], &[9646]),
        (GeneralPolynomial4, &["General polynomial of degree 4"], &[9647]),
        (GeneralPolynomial6, &["General polynomial of degree 6"], &[9648]),
    ]
};

impl SupportedTransformation {
    /// Scan the codes in order, and return the kind of the first one
    /// matching a supported method, by (case insensitive) name or by EPSG
    /// number. `NotSupported` if none match.
    pub fn from_codes(codes: &[CrsCode]) -> SupportedTransformation {
        for code in codes {
            for (kind, names, numbers) in TRANSFORMATIONS.iter() {
                if names.iter().any(|name| code.matches_name(name))
                    || numbers.iter().any(|number| code.matches_epsg(*number))
                {
                    return *kind;
                }
            }
        }
        SupportedTransformation::NotSupported
    }

    /// Classify a single name or code
    pub fn from_code(code: &str) -> SupportedTransformation {
        SupportedTransformation::from_codes(&[CrsCode::parse(code)])
    }

    pub fn is_supported(&self) -> bool {
        *self != SupportedTransformation::NotSupported
    }

    /// The degree of the general polynomial methods
    pub fn polynomial_degree(&self) -> Option<usize> {
        match self {
            SupportedTransformation::GeneralPolynomial2 => Some(2),
            SupportedTransformation::GeneralPolynomial3 => Some(3),
            SupportedTransformation::GeneralPolynomial4 => Some(4),
            SupportedTransformation::GeneralPolynomial6 => Some(6),
            _ => None,
        }
    }

    /// The primary name of the method
    pub fn name(&self) -> &'static str {
        TRANSFORMATIONS
            .iter()
            .find(|(kind, _, _)| kind == self)
            .map_or("Not supported", |(_, names, _)| names[0])
    }
}

/// The operation parameters supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SupportedTransformationParameter {
    XAxisTranslation,
    YAxisTranslation,
    ZAxisTranslation,
    XAxisRotation,
    YAxisRotation,
    ZAxisRotation,
    ScaleDifference,
    LongitudeOffset,
    /// Polynomial coefficient `A0`..`A27` of the first ordinate
    A(usize),
    /// Polynomial coefficient `B0`..`B27` of the second ordinate
    B(usize),
    SourceOrdinate1,
    SourceOrdinate2,
    TargetOrdinate1,
    TargetOrdinate2,
    PointScalingFactor,
    NotSupported,
}

// The number of polynomial coefficients per ordinate, for degree 6
const MAX_COEFFICIENTS: usize = 28;

#[rustfmt::skip]
const PARAMETERS: [(SupportedTransformationParameter, &str, Option<u32>); 13] = {
    use SupportedTransformationParameter::*;
    [
        (XAxisTranslation,   "X-axis translation",   Some(8605)),
        (YAxisTranslation,   "Y-axis translation",   Some(8606)),
        (ZAxisTranslation,   "Z-axis translation",   Some(8607)),
        (XAxisRotation,      "X-axis rotation",      Some(8608)),
        (YAxisRotation,      "Y-axis rotation",      Some(8609)),
        (ZAxisRotation,      "Z-axis rotation",      Some(8610)),
        (ScaleDifference,    "Scale difference",     Some(8611)),
        (LongitudeOffset,    "Longitude offset",     Some(8602)),
        (SourceOrdinate1,    "Ordinate 1 of evaluation point in source CRS", None),
        (SourceOrdinate2,    "Ordinate 2 of evaluation point in source CRS", None),
        (TargetOrdinate1,    "Ordinate 1 of evaluation point in target CRS", None),
        (TargetOrdinate2,    "Ordinate 2 of evaluation point in target CRS", None),
        (PointScalingFactor, "Point scaling factor", None),
    ]
};

// "A12" -> Some(('A', 12))
fn coefficient(code: &CrsCode) -> Option<(char, usize)> {
    let name = code.code();
    let mut chars = name.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if letter != 'A' && letter != 'B' {
        return None;
    }
    let index = chars.as_str().parse::<usize>().ok()?;
    (index < MAX_COEFFICIENTS).then_some((letter, index))
}

impl SupportedTransformationParameter {
    /// Scan the codes in order, and return the kind of the first one
    /// matching a supported parameter. `NotSupported` if none match.
    pub fn from_codes(codes: &[CrsCode]) -> SupportedTransformationParameter {
        for code in codes {
            for (kind, name, number) in PARAMETERS.iter() {
                if code.matches_name(name) || number.is_some_and(|n| code.matches_epsg(n)) {
                    return *kind;
                }
            }
            match coefficient(code) {
                Some(('A', index)) => return SupportedTransformationParameter::A(index),
                Some((_, index)) => return SupportedTransformationParameter::B(index),
                None => {}
            }
        }
        SupportedTransformationParameter::NotSupported
    }

    /// Classify a single name or code
    pub fn from_code(code: &str) -> SupportedTransformationParameter {
        SupportedTransformationParameter::from_codes(&[CrsCode::parse(code)])
    }

    pub fn is_supported(&self) -> bool {
        *self != SupportedTransformationParameter::NotSupported
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use SupportedTransformation::*;

    #[test]
    fn methods() {
        assert_eq!(SupportedTransformation::from_code("Position Vector 7-param. transformation"), Helmert7);
        assert_eq!(SupportedTransformation::from_code("position vector 7-PARAM. transformation"), Helmert7);
        assert_eq!(SupportedTransformation::from_code("bogus"), NotSupported);
        assert_eq!(SupportedTransformation::from_code("9603"), Helmert3);
        assert_eq!(SupportedTransformation::from_code("EPSG:9603"), Helmert3);
        assert_eq!(SupportedTransformation::from_code("urn:ogc:def:method:EPSG::9607"), CoordinateFrameRotation);
        assert_eq!(SupportedTransformation::from_code("http://www.opengis.net/def/method/EPSG/0/9601"), LongitudeRotation);
        assert_eq!(SupportedTransformation::from_code("http://www.opengis.net/gml/srs/epsg.xml#9602"), GeographicGeocentric);
        assert_eq!(SupportedTransformation::from_code("NTv2"), NotSupported);
        assert_eq!(SupportedTransformation::from_code("9646").polynomial_degree(), Some(3));

        // Another code space
        assert_eq!(SupportedTransformation::from_code("ESRI:9603"), NotSupported);
    }

    #[test]
    fn first_match_wins() {
        let codes = [CrsCode::parse("bogus"), CrsCode::parse("9606"), CrsCode::parse("9603")];
        assert_eq!(SupportedTransformation::from_codes(&codes), Helmert7);
        let codes = [CrsCode::parse("Geocentric translations"), CrsCode::parse("9606")];
        assert_eq!(SupportedTransformation::from_codes(&codes), Helmert3);
        assert_eq!(SupportedTransformation::from_codes(&[]), NotSupported);
        assert_eq!(Helmert3.name(), "Geocentric translations");
        assert!(!NotSupported.is_supported());
    }

    #[test]
    fn parameters() {
        use SupportedTransformationParameter as P;
        assert_eq!(P::from_code("8605"), P::XAxisTranslation);
        assert_eq!(P::from_code("EPSG:8611"), P::ScaleDifference);
        assert_eq!(P::from_code("z-axis rotation"), P::ZAxisRotation);
        assert_eq!(P::from_code("Longitude offset"), P::LongitudeOffset);
        assert_eq!(P::from_code("A0"), P::A(0));
        assert_eq!(P::from_code("b27"), P::B(27));
        assert_eq!(P::from_code("A28"), P::NotSupported);
        assert_eq!(P::from_code("Alpha"), P::NotSupported);
        assert_eq!(P::from_code("Point scaling factor"), P::PointScalingFactor);
        assert_eq!(P::from_code("Ordinate 2 of evaluation point in target CRS"), P::TargetOrdinate2);
        assert_eq!(P::from_code("bogus"), P::NotSupported);

        let codes = [CrsCode::parse("bogus"), CrsCode::parse("8607")];
        assert_eq!(P::from_codes(&codes), P::ZAxisTranslation);
    }
}
