use super::*;

/// A geocentric (earth centered, earth fixed) cartesian CRS
#[derive(Debug, Clone)]
pub struct GeocentricCrs {
    axes: Vec<Axis>,
    datum: Arc<GeodeticDatum>,
    identity: Identity,
}

impl GeocentricCrs {
    /// A geocentric CRS must have exactly 3 axes, all in linear units
    pub fn new(
        identity: Identity,
        datum: Arc<GeodeticDatum>,
        axes: Vec<Axis>,
    ) -> Result<GeocentricCrs, Error> {
        if axes.len() != 3 {
            return Err(Error::Configuration(format!(
                "a geocentric CRS needs exactly 3 axes, got {}",
                axes.len()
            )));
        }
        if axes.iter().any(|a| a.unit().kind() != UnitKind::Linear) {
            return Err(Error::Configuration(
                "the axes of a geocentric CRS must have linear units".to_string(),
            ));
        }
        Ok(GeocentricCrs {
            axes,
            datum,
            identity,
        })
    }

    /// A geocentric CRS with the conventional X, Y, Z axes in metres
    pub fn with_default_axes(identity: Identity, datum: Arc<GeodeticDatum>) -> GeocentricCrs {
        GeocentricCrs {
            axes: GeocentricCrs::default_axes(),
            datum,
            identity,
        }
    }

    /// X toward the prime meridian, Y toward 90° east, Z toward the north pole
    pub fn default_axes() -> Vec<Axis> {
        vec![
            Axis::new("X", AxisOrientation::Front, Unit::METRE),
            Axis::new("Y", AxisOrientation::East, Unit::METRE),
            Axis::new("Z", AxisOrientation::North, Unit::METRE),
        ]
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

    pub fn to_internal(&self, coord: &Coor3D) -> Coor3D {
        let mut result = *coord;
        for (i, axis) in self.axes.iter().enumerate() {
            result[i] = axis.unit().to_base(coord[i]);
        }
        result
    }

    pub fn from_internal(&self, coord: &Coor3D) -> Coor3D {
        let mut result = *coord;
        for (i, axis) in self.axes.iter().enumerate() {
            result[i] = axis.unit().from_base(coord[i]);
        }
        result
    }
}

impl PartialEq for GeocentricCrs {
    fn eq(&self, other: &Self) -> bool {
        self.axes == other.axes && *self.datum == *other.datum
    }
}
