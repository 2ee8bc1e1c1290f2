use super::*;

/// A projected CRS: Easting and northing in the plane of a map projection
/// of a geographic CRS. The datum is that of the geographic CRS.
#[derive(Debug, Clone)]
pub struct ProjectedCrs {
    projection: Projection,
    axes: Vec<Axis>,
    identity: Identity,
    // Indices of the easting and northing axes
    order: [usize; 2],
}

impl ProjectedCrs {
    /// The first two axes must be the easting and northing axes (in any
    /// order), in linear units. Additional axes are passed through untouched.
    pub fn new(
        identity: Identity,
        projection: Projection,
        axes: Vec<Axis>,
    ) -> Result<ProjectedCrs, Error> {
        if axes.len() < 2 {
            return Err(Error::Configuration(format!(
                "a projected CRS needs at least 2 axes, got {}",
                axes.len()
            )));
        }
        if axes[..2].iter().any(|a| a.unit().kind() != UnitKind::Linear) {
            return Err(Error::Configuration(
                "the horizontal axes of a projected CRS must have linear units".to_string(),
            ));
        }
        let order = geographic::horizontal_axis_order(&axes).ok_or_else(|| {
            Error::Configuration(
                "a projected CRS needs an easting axis and a northing axis".to_string(),
            )
        })?;
        Ok(ProjectedCrs {
            projection,
            axes,
            identity,
            order,
        })
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The geographic CRS underlying the projection
    pub fn geographic_crs(&self) -> &Arc<Crs> {
        self.projection.geographic_crs()
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn datum(&self) -> &Arc<GeodeticDatum> {
        self.projection.geographic_crs().datum()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Own axis order and units to easting/northing in metres
    pub fn to_internal(&self, coord: &Coor3D) -> Coor3D {
        let (e, n) = (&self.axes[self.order[0]], &self.axes[self.order[1]]);
        let mut result = *coord;
        result[0] = e.orientation().sign() * e.unit().to_base(coord[self.order[0]]);
        result[1] = n.orientation().sign() * n.unit().to_base(coord[self.order[1]]);
        if self.axes.len() < 3 {
            result[2] = 0.;
        }
        result
    }

    /// Easting/northing in metres to own axis order and units
    pub fn from_internal(&self, coord: &Coor3D) -> Coor3D {
        let (e, n) = (&self.axes[self.order[0]], &self.axes[self.order[1]]);
        let mut result = *coord;
        result[self.order[0]] = e.unit().from_base(e.orientation().sign() * coord[0]);
        result[self.order[1]] = n.unit().from_base(n.orientation().sign() * coord[1]);
        if self.axes.len() < 3 {
            result[2] = 0.;
        }
        result
    }
}

impl PartialEq for ProjectedCrs {
    fn eq(&self, other: &Self) -> bool {
        self.axes == other.axes && self.projection == other.projection
    }
}
