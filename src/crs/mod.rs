//! Coordinate reference systems: Geographic, geocentric, projected and
//! compound, with their axes, units, datums and identities.

use crate::authoring::*;
use once_cell::sync::Lazy;

mod axis;
mod compound;
mod datum;
mod geocentric;
mod geographic;
mod identity;
mod projected;
mod unit;

pub use axis::Axis;
pub use axis::AxisOrientation;
pub use compound::CompoundCrs;
pub use datum::GeodeticDatum;
pub use datum::PrimeMeridian;
pub use geocentric::GeocentricCrs;
pub use geographic::GeographicCrs;
pub use geographic::LongitudeRange;
pub use identity::CrsCode;
pub use identity::Identity;
pub use projected::ProjectedCrs;
pub use unit::Unit;
pub use unit::UnitKind;

/// The four kinds of CRS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsType {
    Geographic,
    Geocentric,
    Projected,
    Compound,
}

impl std::fmt::Display for CrsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CrsType::Geographic => "geographic",
            CrsType::Geocentric => "geocentric",
            CrsType::Projected => "projected",
            CrsType::Compound => "compound",
        };
        write!(f, "{name}")
    }
}

/// A coordinate reference system.
///
/// Built once (typically when a [`Registry`] is populated), immutable
/// afterwards, and shared as `Arc<Crs>`. Equality compares the CRS type,
/// the axes, the datum and the type specific payload, but not the identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Crs {
    Geographic(GeographicCrs),
    Geocentric(GeocentricCrs),
    Projected(ProjectedCrs),
    Compound(CompoundCrs),
}

static WGS84_LON_LAT: Lazy<Arc<Crs>> =
    Lazy::new(|| Arc::new(Crs::Geographic(GeographicCrs::wgs84_lon_lat())));
static WGS84_LAT_LON: Lazy<Arc<Crs>> =
    Lazy::new(|| Arc::new(Crs::Geographic(GeographicCrs::wgs84_lat_lon())));

impl Crs {
    /// The canonical WGS84 longitude/latitude CRS (`CRS:84`)
    pub fn wgs84_lon_lat() -> Arc<Crs> {
        WGS84_LON_LAT.clone()
    }

    /// The canonical WGS84 latitude/longitude CRS (`EPSG:4326`)
    pub fn wgs84_lat_lon() -> Arc<Crs> {
        WGS84_LAT_LON.clone()
    }

    pub fn crs_type(&self) -> CrsType {
        match self {
            Crs::Geographic(_) => CrsType::Geographic,
            Crs::Geocentric(_) => CrsType::Geocentric,
            Crs::Projected(_) => CrsType::Projected,
            Crs::Compound(_) => CrsType::Compound,
        }
    }

    /// The number of axes
    pub fn dimension(&self) -> usize {
        self.axes().len()
    }

    /// Read only view of the axes
    pub fn axes(&self) -> &[Axis] {
        match self {
            Crs::Geographic(crs) => crs.axes(),
            Crs::Geocentric(crs) => crs.axes(),
            Crs::Projected(crs) => crs.axes(),
            Crs::Compound(crs) => crs.axes(),
        }
    }

    /// A copy of the axes. Changing it has no effect on the CRS.
    pub fn axis(&self) -> Vec<Axis> {
        self.axes().to_vec()
    }

    pub fn datum(&self) -> &Arc<GeodeticDatum> {
        match self {
            Crs::Geographic(crs) => crs.datum(),
            Crs::Geocentric(crs) => crs.datum(),
            Crs::Projected(crs) => crs.datum(),
            Crs::Compound(crs) => crs.datum(),
        }
    }

    pub fn identity(&self) -> &Identity {
        match self {
            Crs::Geographic(crs) => crs.identity(),
            Crs::Geocentric(crs) => crs.identity(),
            Crs::Projected(crs) => crs.identity(),
            Crs::Compound(crs) => crs.identity(),
        }
    }

    /// The primary name, or the empty string
    pub fn name(&self) -> &str {
        self.identity().name()
    }

    pub fn as_geographic(&self) -> Option<&GeographicCrs> {
        match self {
            Crs::Geographic(crs) => Some(crs),
            _ => None,
        }
    }

    pub fn as_projected(&self) -> Option<&ProjectedCrs> {
        match self {
            Crs::Projected(crs) => Some(crs),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&CompoundCrs> {
        match self {
            Crs::Compound(crs) => Some(crs),
            _ => None,
        }
    }

    /// The type of the CRS, looking through a compound wrapper
    pub fn horizontal_type(&self) -> CrsType {
        match self {
            Crs::Compound(crs) => crs.underlying_crs().crs_type(),
            _ => self.crs_type(),
        }
    }

    /// Longitude wrapping convention. Geographic CRSs carry their own;
    /// everything else uses the signed range
    pub fn longitude_range(&self) -> LongitudeRange {
        match self {
            Crs::Geographic(crs) => crs.longitude_range(),
            Crs::Compound(crs) => crs.underlying_crs().longitude_range(),
            _ => LongitudeRange::Signed,
        }
    }

    /// Convert a tuple given in the axis order and units of the CRS to the
    /// internal convention: Longitude/latitude in radians for geographic
    /// CRSs, metres for everything else. Compound CRSs carry the height
    /// in the third ordinate.
    pub fn to_internal(&self, coord: &Coor3D) -> Coor3D {
        match self {
            Crs::Geographic(crs) => crs.to_internal(coord),
            Crs::Geocentric(crs) => crs.to_internal(coord),
            Crs::Projected(crs) => crs.to_internal(coord),
            Crs::Compound(crs) => crs.to_internal(coord),
        }
    }

    /// The inverse of [`Crs::to_internal`]
    pub fn from_internal(&self, coord: &Coor3D) -> Coor3D {
        match self {
            Crs::Geographic(crs) => crs.from_internal(coord),
            Crs::Geocentric(crs) => crs.from_internal(coord),
            Crs::Projected(crs) => crs.from_internal(coord),
            Crs::Compound(crs) => crs.from_internal(coord),
        }
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.identity().code() {
            Some(code) => write!(f, "{} ({code})", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn etrs89() -> Arc<GeodeticDatum> {
        Arc::new(GeodeticDatum::new(
            Identity::new(CrsCode::epsg(6258), "European Terrestrial Reference System 1989"),
            Ellipsoid::default(),
            PrimeMeridian::greenwich(),
            Some(Helmert::default()),
        ))
    }

    fn lat_lon(datum: Arc<GeodeticDatum>) -> Result<Arc<Crs>, Error> {
        let axes = vec![Axis::latitude(Unit::DEGREE), Axis::longitude(Unit::DEGREE)];
        let crs = GeographicCrs::new(Identity::new(CrsCode::epsg(4258), "ETRS89"), datum, axes)?;
        Ok(Arc::new(Crs::Geographic(crs)))
    }

    #[test]
    fn geographic() -> Result<(), Error> {
        let crs = lat_lon(etrs89())?;
        assert_eq!(crs.crs_type(), CrsType::Geographic);
        assert_eq!(crs.dimension(), 2);
        assert_eq!(crs.name(), "ETRS89");

        // Internal order is longitude, latitude - in radians
        let internal = crs.to_internal(&Coor3D::raw(55., 12., 0.));
        assert_float_eq!(internal[0], 12_f64.to_radians(), abs <= 1e-15);
        assert_float_eq!(internal[1], 55_f64.to_radians(), abs <= 1e-15);
        let back = crs.from_internal(&internal);
        assert_float_eq!(back[0], 55., abs <= 1e-12);
        assert_float_eq!(back[1], 12., abs <= 1e-12);

        // Exactly 2 axes, please
        let axes = vec![
            Axis::latitude(Unit::DEGREE),
            Axis::longitude(Unit::DEGREE),
            Axis::height(Unit::METRE),
        ];
        let err = GeographicCrs::new(Identity::named("3D"), etrs89(), axes);
        assert!(matches!(err, Err(Error::Configuration(_))));

        // ...and one of them must be a longitude
        let axes = vec![Axis::latitude(Unit::DEGREE), Axis::latitude(Unit::DEGREE)];
        assert!(GeographicCrs::new(Identity::named("lat/lat"), etrs89(), axes).is_err());

        // West and south oriented axes flip the sign
        let axes = vec![
            Axis::new("Westing", AxisOrientation::West, Unit::GRAD),
            Axis::new("Southing", AxisOrientation::South, Unit::GRAD),
        ];
        let crs = GeographicCrs::new(Identity::named("w/s"), etrs89(), axes)?;
        let internal = crs.to_internal(&Coor3D::raw(100., 50., 0.));
        assert_float_eq!(internal[0], -90_f64.to_radians(), abs <= 1e-15);
        assert_float_eq!(internal[1], -45_f64.to_radians(), abs <= 1e-15);
        Ok(())
    }

    #[test]
    fn defensive_copy() -> Result<(), Error> {
        let crs = lat_lon(etrs89())?;
        let mut axes = crs.axis();
        axes[0] = Axis::height(Unit::FOOT);
        axes.pop();
        assert_eq!(crs.axes().len(), 2);
        assert_eq!(crs.axes()[0], Axis::latitude(Unit::DEGREE));
        Ok(())
    }

    #[test]
    fn equality_ignores_identity() -> Result<(), Error> {
        let a = lat_lon(etrs89())?;
        let axes = vec![Axis::latitude(Unit::DEGREE), Axis::longitude(Unit::DEGREE)];
        let b = GeographicCrs::new(Identity::named("Same, but different"), etrs89(), axes)?;
        assert_eq!(*a, Crs::Geographic(b));

        // But the axis order matters
        assert_ne!(*Crs::wgs84_lon_lat(), *Crs::wgs84_lat_lon());

        // ...as does the datum
        assert_ne!(*a, *Crs::wgs84_lat_lon());
        Ok(())
    }

    #[test]
    fn canonical_instances_are_shared() {
        let a = Crs::wgs84_lon_lat();
        let b = Crs::wgs84_lon_lat();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.identity().code(), Some(&CrsCode::new("CRS", "84")));
        assert_eq!(Crs::wgs84_lat_lon().identity().code(), Some(&CrsCode::epsg(4326)));
    }

    #[test]
    fn geocentric() -> Result<(), Error> {
        let crs = GeocentricCrs::with_default_axes(Identity::named("ETRS89 geocentric"), etrs89());
        let crs = Crs::Geocentric(crs);
        assert_eq!(crs.dimension(), 3);
        assert_eq!(crs.axes()[0].orientation(), AxisOrientation::Front);

        let two = vec![Axis::easting(Unit::METRE), Axis::northing(Unit::METRE)];
        let err = GeocentricCrs::new(Identity::named("2D"), etrs89(), two);
        assert!(matches!(err, Err(Error::Configuration(_))));
        Ok(())
    }

    #[test]
    fn projected() -> Result<(), Error> {
        let base = lat_lon(etrs89())?;
        let projection = Projection::utm(base.clone(), 32, true)?;
        let axes = vec![Axis::easting(Unit::METRE), Axis::northing(Unit::METRE)];
        let crs = ProjectedCrs::new(Identity::new(CrsCode::epsg(25832), "UTM32"), projection, axes)?;
        assert_eq!(**crs.geographic_crs(), *base);
        assert_eq!(crs.datum(), base.datum());

        // Northing/easting in kilometres
        let projection = Projection::utm(base, 32, true)?;
        let axes = vec![Axis::northing(Unit::KILOMETRE), Axis::easting(Unit::KILOMETRE)];
        let crs = ProjectedCrs::new(Identity::named("UTM32 n,e km"), projection, axes)?;
        let internal = crs.to_internal(&Coor3D::raw(6000., 500., 0.));
        assert_eq!(internal, Coor3D::raw(500_000., 6_000_000., 0.));
        assert_eq!(crs.from_internal(&internal), Coor3D::raw(6000., 500., 0.));

        // Angular axes are not for projected CRSs
        let projection = Projection::utm(lat_lon(etrs89())?, 32, true)?;
        let axes = vec![Axis::latitude(Unit::DEGREE), Axis::longitude(Unit::DEGREE)];
        assert!(ProjectedCrs::new(Identity::named("bad"), projection, axes).is_err());
        Ok(())
    }

    #[test]
    fn compound() -> Result<(), Error> {
        let base = lat_lon(etrs89())?;
        let height = Axis::height(Unit::METRE);
        let crs = CompoundCrs::new(Identity::named("ETRS89 3D"), base.clone(), height.clone(), 0.)?;
        let crs = Arc::new(Crs::Compound(crs));
        assert_eq!(crs.dimension(), 3);
        assert_eq!(crs.horizontal_type(), CrsType::Geographic);
        assert_eq!(crs.datum(), base.datum());

        // NaN heights take the default height
        let internal = crs.to_internal(&Coor3D::raw(55., 12., f64::NAN));
        assert_eq!(internal[2], 0.);
        let internal = crs.to_internal(&Coor3D::raw(55., 12., 100.));
        assert_eq!(internal[2], 100.);

        // Compound over projected is fine
        let projection = Projection::utm(base, 32, true)?;
        let axes = vec![Axis::easting(Unit::METRE), Axis::northing(Unit::METRE)];
        let utm = ProjectedCrs::new(Identity::named("UTM32"), projection, axes)?;
        let utm = Arc::new(Crs::Projected(utm));
        let utm_3d = CompoundCrs::new(Identity::named("UTM32 3D"), utm, height.clone(), 0.)?;
        assert_eq!(utm_3d.axes()[2], height);

        // ...but compound over compound is not
        let err = CompoundCrs::new(Identity::named("Nested"), crs, height, 0.);
        assert!(matches!(err, Err(Error::Configuration(_))));
        Ok(())
    }
}
