//! *Coordinate reference systems, and the transformations between them*.
//!
//! The crate models geographic, geocentric, projected and compound
//! coordinate reference systems ([`Crs`]), and builds chains of concrete
//! transformation steps ([`Transformation`]) between them: Helmert
//! datum shifts, geographic/geocentric conversions, prime meridian
//! rotations, general polynomials and map projections.
//!
//! ```
//! use geocrs::prelude::*;
//! # fn main() -> Result<(), Error> {
//! let ctx = Minimal::new();
//! let utm32 = ctx.crs("EPSG:25832")?;
//! let etrs89 = ctx.crs("EPSG:4258")?;
//! let t = TransformationFactory::create(&etrs89, &utm32)?;
//! // EPSG:4258 is latitude/longitude, in degrees
//! let projected = t.do_transform(&[Coor3D::raw(55., 12., 0.)])?;
//! assert!((projected[0][0] - 691_875.632).abs() < 1e-3);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod coordinate;
pub mod crs;
pub mod ellipsoid;
pub mod factory;
pub mod math;
pub mod projection;
pub mod registry;
pub mod transform;

/// The bread-and-butter, shrink-wrapped and ready to use
pub mod prelude {
    pub use crate::classify::SupportedTransformation;
    pub use crate::classify::SupportedTransformationParameter;
    pub use crate::coordinate::Coor3D;
    pub use crate::coordinate::CoordinateSet;
    pub use crate::crs::Axis;
    pub use crate::crs::AxisOrientation;
    pub use crate::crs::CompoundCrs;
    pub use crate::crs::Crs;
    pub use crate::crs::CrsCode;
    pub use crate::crs::CrsType;
    pub use crate::crs::GeocentricCrs;
    pub use crate::crs::GeodeticDatum;
    pub use crate::crs::GeographicCrs;
    pub use crate::crs::Identity;
    pub use crate::crs::LongitudeRange;
    pub use crate::crs::PrimeMeridian;
    pub use crate::crs::ProjectedCrs;
    pub use crate::crs::Unit;
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::factory::OperationDefinition;
    pub use crate::factory::TransformationFactory;
    pub use crate::projection::Projection;
    pub use crate::projection::ProjectionParameters;
    pub use crate::registry::Minimal;
    pub use crate::registry::OpHandle;
    #[cfg(feature = "with_plain")]
    pub use crate::registry::Plain;
    pub use crate::registry::Registry;
    pub use crate::transform::GeocentricConversion;
    pub use crate::transform::Helmert;
    pub use crate::transform::HelmertConvention;
    pub use crate::transform::PolynomialTransformation;
    pub use crate::transform::Transformation;
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Direction::Inv;
    pub use crate::Error;
    pub use crate::Side;
}

/// Preamble for crate-internal modules, and for user supplied registries
pub mod authoring {
    pub use crate::prelude::*;

    pub use crate::math::*;
    pub use crate::registry::definition::split_into_parameters;
    pub use crate::registry::parameter::OpParameter;
    pub use crate::registry::parameter::ParsedParameters;
    pub use crate::transform::TransformKind;

    pub use log::debug;
    pub use log::error;
    pub use log::info;
    pub use log::trace;
    pub use log::warn;

    pub use std::collections::BTreeMap;
    pub use std::collections::BTreeSet;
    pub use std::sync::Arc;
}

// ----- E R R O R S ---------------------------------------------------------------

/// The two ends of a transformation, used for telling where a dimension
/// check went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

fn too_small_or_large(dimension: &usize) -> &'static str {
    if *dimension < 2 {
        "too small"
    } else {
        "too large"
    }
}

/// Error messaging is carried out by `Error`,
/// a wrapper around `thiserror`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("error: {0}")]
    General(&'static str),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("{side} dimension {dimension} is {} (must be in [2, 3])", too_small_or_large(.dimension))]
    Dimension { side: Side, dimension: usize },

    #[error("array length error: {0}")]
    ArrayLength(String),

    #[error("{operation} did not converge for point #{index}")]
    NonConvergence { operation: String, index: usize },

    #[error("point #{index} is outside the domain of {operation}")]
    OutOfDomain { operation: String, index: usize },
}

impl Error {
    /// Fatal errors are those stemming from the construction of CRSs and
    /// transformations. They will recur for every call with the same
    /// source/target pair, and may be cached as such. Non-fatal errors
    /// stem from the numerical treatment of individual points.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::ArrayLength(_) | Error::NonConvergence { .. } | Error::OutOfDomain { .. }
        )
    }
}

// ----- D I R E C T I O N ---------------------------------------------------------

/// `Fwd`: Indicate that a two-way operation should run in the *forward* direction.
/// `Inv`: Indicate that a two-way operation should run in the *inverse* direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Fwd,
    Inv,
}

impl std::ops::Not for Direction {
    type Output = Direction;
    fn not(self) -> Direction {
        match self {
            Direction::Fwd => Direction::Inv,
            Direction::Inv => Direction::Fwd,
        }
    }
}

// ----- B I B L I O G R A P H Y ---------------------------------------------------

/// Literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// B.R. Bowring (1976): *Transformation from spatial to geographical coordinates*.
    /// Survey Review 23(181), pp. 323–327.
    Bow76,

    /// B.R. Bowring (1985): *The accuracy of geodetic latitude and height equations*.
    /// Survey Review, 28(218), pp.202-206,
    /// [DOI](https://doi.org/10.1179/sre.1985.28.218.202)
    Bow85,

    /// Toshio Fukushima (1999): *Fast transform from geocentric to geodetic coordinates*.
    /// Journal of Geodesy, 73(11), pp.603–610
    /// [DOI](https://doi.org/10.1007/s001900050271)
    Fuk99,

    /// Knud Poder and Karsten Engsager (2007): *Some Conformal Mappings and Transformations
    /// for Geodesy and Topographic Cartography*. National Survey and Cadastre, Denmark.
    Eng07,

    /// Charles F.F. Karney (2011): *Transverse Mercator with an accuracy of a few nanometers*.
    /// J. Geodesy. 85(8): 475–485.
    /// [DOI](https://doi.org/10.1007/s00190-011-0445-3).
    Kar11,

    /// John P. Snyder (1987): *Map Projections: A Working Manual*.
    /// USGS Professional Paper 1395.
    /// [DOI](https://doi.org/10.3133/pp1395)
    Sny87,

    /// IOGP (2019): *Coordinate Conversions and Transformations including Formulas*.
    /// Geomatics Guidance Note 7, part 2.
    Iogp19,
}

// ----- T E S T S -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let e = Error::Dimension {
            side: Side::Source,
            dimension: 1,
        };
        assert_eq!(e.to_string(), "source dimension 1 is too small (must be in [2, 3])");
        let e = Error::Dimension {
            side: Side::Target,
            dimension: 4,
        };
        assert_eq!(e.to_string(), "target dimension 4 is too large (must be in [2, 3])");
        assert!(e.is_fatal());

        let e = Error::NonConvergence {
            operation: "Geographic-Geocentric".to_string(),
            index: 3,
        };
        assert!(!e.is_fatal());
        assert!(Error::Configuration("nope".to_string()).is_fatal());
    }

    #[test]
    fn direction() {
        assert_eq!(!Direction::Fwd, Direction::Inv);
        assert_eq!(!!Direction::Fwd, Direction::Fwd);
    }
}
