use super::*;

/// The range into which longitudes are wrapped, when a longitude rotation
/// takes them out of their nominal range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongitudeRange {
    /// [-180°, 180°)
    #[default]
    Signed,
    /// [0°, 360°)
    Positive,
}

impl LongitudeRange {
    /// Wrap a longitude, given in radians
    pub fn wrap(&self, longitude: f64) -> f64 {
        match self {
            LongitudeRange::Signed => angular::normalize_symmetric(longitude),
            LongitudeRange::Positive => angular::normalize_positive(longitude),
        }
    }
}

/// A 2D geographic CRS: Latitude and longitude on the ellipsoid of its datum
#[derive(Debug, Clone)]
pub struct GeographicCrs {
    axes: Vec<Axis>,
    datum: Arc<GeodeticDatum>,
    longitude_range: LongitudeRange,
    identity: Identity,
    // Indices of the longitude and latitude axes
    order: [usize; 2],
}

impl GeographicCrs {
    /// A geographic CRS must have exactly two axes: One pointing east or west
    /// (the longitude), and one pointing north or south (the latitude), both
    /// in angular units.
    pub fn new(
        identity: Identity,
        datum: Arc<GeodeticDatum>,
        axes: Vec<Axis>,
    ) -> Result<GeographicCrs, Error> {
        if axes.len() != 2 {
            return Err(Error::Configuration(format!(
                "a geographic CRS needs exactly 2 axes, got {}",
                axes.len()
            )));
        }
        if axes.iter().any(|a| a.unit().kind() != UnitKind::Angular) {
            return Err(Error::Configuration(
                "the axes of a geographic CRS must have angular units".to_string(),
            ));
        }
        let order = horizontal_axis_order(&axes).ok_or_else(|| {
            Error::Configuration(
                "a geographic CRS needs a longitude axis and a latitude axis".to_string(),
            )
        })?;
        Ok(GeographicCrs::build(identity, datum, axes, order))
    }

    fn build(
        identity: Identity,
        datum: Arc<GeodeticDatum>,
        axes: Vec<Axis>,
        order: [usize; 2],
    ) -> GeographicCrs {
        GeographicCrs {
            axes,
            datum,
            longitude_range: LongitudeRange::default(),
            identity,
            order,
        }
    }

    /// Longitude/latitude in degrees, on the WGS84 datum
    pub(super) fn wgs84_lon_lat() -> GeographicCrs {
        let axes = vec![Axis::longitude(Unit::DEGREE), Axis::latitude(Unit::DEGREE)];
        let identity = Identity::new(CrsCode::new("CRS", "84"), "WGS 84 (longitude/latitude)");
        GeographicCrs::build(identity, Arc::new(GeodeticDatum::wgs84()), axes, [0, 1])
    }

    /// Latitude/longitude in degrees, on the WGS84 datum
    pub(super) fn wgs84_lat_lon() -> GeographicCrs {
        let axes = vec![Axis::latitude(Unit::DEGREE), Axis::longitude(Unit::DEGREE)];
        let identity = Identity::new(CrsCode::epsg(4326), "WGS 84");
        GeographicCrs::build(identity, Arc::new(GeodeticDatum::wgs84()), axes, [1, 0])
    }

    pub fn with_longitude_range(mut self, longitude_range: LongitudeRange) -> GeographicCrs {
        self.longitude_range = longitude_range;
        self
    }

    pub fn longitude_range(&self) -> LongitudeRange {
        self.longitude_range
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn datum(&self) -> &Arc<GeodeticDatum> {
        &self.datum
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Own axis order and units to longitude/latitude in radians
    pub fn to_internal(&self, coord: &Coor3D) -> Coor3D {
        let (lon, lat) = (&self.axes[self.order[0]], &self.axes[self.order[1]]);
        Coor3D::raw(
            lon.orientation().sign() * lon.unit().to_base(coord[self.order[0]]),
            lat.orientation().sign() * lat.unit().to_base(coord[self.order[1]]),
            0.,
        )
    }

    /// Longitude/latitude in radians to own axis order and units
    pub fn from_internal(&self, coord: &Coor3D) -> Coor3D {
        let (lon, lat) = (&self.axes[self.order[0]], &self.axes[self.order[1]]);
        let mut result = Coor3D::origin();
        result[self.order[0]] = lon.unit().from_base(lon.orientation().sign() * coord[0]);
        result[self.order[1]] = lat.unit().from_base(lat.orientation().sign() * coord[1]);
        result
    }
}

impl PartialEq for GeographicCrs {
    fn eq(&self, other: &Self) -> bool {
        self.axes == other.axes
            && *self.datum == *other.datum
            && self.longitude_range == other.longitude_range
    }
}

/// Indices of the east/west and north/south oriented axes among the first two
pub(super) fn horizontal_axis_order(axes: &[Axis]) -> Option<[usize; 2]> {
    use AxisOrientation::*;
    if axes.len() < 2 {
        return None;
    }
    let first = axes[0].orientation();
    let second = axes[1].orientation();
    match (first, second) {
        (East | West, North | South) => Some([0, 1]),
        (North | South, East | West) => Some([1, 0]),
        _ => None,
    }
}
