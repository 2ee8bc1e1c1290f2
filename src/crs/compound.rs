use super::*;

/// A compound CRS: A horizontal CRS plus a height axis
#[derive(Debug, Clone)]
pub struct CompoundCrs {
    underlying: Arc<Crs>,
    height_axis: Axis,
    default_height: f64,
    axes: Vec<Axis>,
    identity: Identity,
}

impl CompoundCrs {
    /// The underlying CRS must be geographic, geocentric or projected, and
    /// have at least 2 axes. The compound CRS always has 3 axes: The first
    /// two of the underlying CRS, followed by the height axis.
    /// `default_height` replaces heights given as `NaN`.
    pub fn new(
        identity: Identity,
        underlying: Arc<Crs>,
        height_axis: Axis,
        default_height: f64,
    ) -> Result<CompoundCrs, Error> {
        if underlying.crs_type() == CrsType::Compound {
            return Err(Error::Configuration(
                "the underlying CRS of a compound CRS must be geographic, geocentric or projected"
                    .to_string(),
            ));
        }
        if underlying.dimension() < 2 {
            return Err(Error::Configuration(format!(
                "the underlying CRS of a compound CRS needs at least 2 axes, got {}",
                underlying.dimension()
            )));
        }
        if height_axis.unit().kind() != UnitKind::Linear {
            return Err(Error::Configuration(
                "the height axis of a compound CRS must have a linear unit".to_string(),
            ));
        }
        let underlying_axes = underlying.axes();
        let axes = vec![
            underlying_axes[0].clone(),
            underlying_axes[1].clone(),
            height_axis.clone(),
        ];
        Ok(CompoundCrs {
            underlying,
            height_axis,
            default_height,
            axes,
            identity,
        })
    }

    pub fn underlying_crs(&self) -> &Arc<Crs> {
        &self.underlying
    }

    pub fn height_axis(&self) -> &Axis {
        &self.height_axis
    }

    /// The height used when a coordinate comes without one, in metres
    pub fn default_height(&self) -> f64 {
        self.default_height
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn datum(&self) -> &Arc<GeodeticDatum> {
        self.underlying.datum()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn to_internal(&self, coord: &Coor3D) -> Coor3D {
        let mut result = self.underlying.to_internal(&Coor3D::raw(coord[0], coord[1], 0.));
        result[2] = if coord[2].is_nan() {
            self.default_height
        } else {
            self.height_axis.orientation().sign() * self.height_axis.unit().to_base(coord[2])
        };
        result
    }

    pub fn from_internal(&self, coord: &Coor3D) -> Coor3D {
        let horizontal = self.underlying.from_internal(&Coor3D::raw(coord[0], coord[1], 0.));
        let height = self
            .height_axis
            .unit()
            .from_base(self.height_axis.orientation().sign() * coord[2]);
        Coor3D::raw(horizontal[0], horizontal[1], height)
    }
}

impl PartialEq for CompoundCrs {
    fn eq(&self, other: &Self) -> bool {
        let same_default = self.default_height == other.default_height
            || (self.default_height.is_nan() && other.default_height.is_nan());
        *self.underlying == *other.underlying && self.height_axis == other.height_axis && same_default
    }
}
