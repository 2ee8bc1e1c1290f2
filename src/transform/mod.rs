//! Transformations: The concrete steps taking coordinates from one CRS to
//! another, and the concatenation of such steps into chains.
//!
//! A [`Transformation`] is a cheap, oriented handle to an immutable, shared
//! definition. Inverting it toggles the orientation, and never touches the
//! definition, nor the CRSs it refers to.

use crate::authoring::*;

mod geocentric;
mod helmert;
mod polynomial;

pub use geocentric::GeocentricConversion;
pub use helmert::Helmert;
pub use helmert::HelmertConvention;
pub use polynomial::PolynomialTransformation;

/// The kinds of transformation steps
#[derive(Debug, Clone)]
pub enum TransformKind {
    /// Axis order, unit and dimension adaption between two CRSs describing
    /// the same frame
    Identity,
    /// Between two geocentric CRSs
    Helmert(Helmert),
    /// From a geographic (or compound geographic) CRS to a geocentric CRS
    GeographicGeocentric(GeocentricConversion),
    /// Between two geographic CRSs differing by prime meridian. The offset,
    /// in radians, is added to the longitude
    LongitudeRotation(f64),
    /// Between the raw ordinates of any two CRSs
    Polynomial(PolynomialTransformation),
    /// From a geographic CRS to a projected CRS
    Projection(Projection),
    /// The first step followed by the second
    Concatenated(Transformation, Transformation),
}

impl TransformKind {
    pub fn implementation_name(&self) -> &'static str {
        match self {
            TransformKind::Identity => "Identity",
            TransformKind::Helmert(_) => "Helmert",
            TransformKind::GeographicGeocentric(_) => "Geographic-Geocentric",
            TransformKind::LongitudeRotation(_) => "Longitude-Rotation",
            TransformKind::Polynomial(_) => "Polynomial",
            TransformKind::Projection(_) => "Projection",
            TransformKind::Concatenated(..) => "Concatenated",
        }
    }
}

#[derive(Debug)]
struct Definition {
    kind: TransformKind,
    // A missing source CRS means "whatever the target CRS is"
    source: Option<Arc<Crs>>,
    target: Arc<Crs>,
    descriptor: Identity,
}

/// A transformation from a source CRS to a target CRS
#[derive(Debug, Clone)]
pub struct Transformation {
    definition: Arc<Definition>,
    inverted: bool,
}

// Check the type of a CRS at one end of a transformation step, looking
// through compound wrappers
fn require(crs: &Crs, wanted: CrsType, side: Side, operation: &str) -> Result<(), Error> {
    let actual = crs.horizontal_type();
    if actual != wanted {
        return Err(Error::Configuration(format!(
            "{operation}: the {side} CRS must be {wanted}, got {actual}"
        )));
    }
    Ok(())
}

// Same axes, and same longitude range: Tuples pass unchanged
fn same_frame(a: &Crs, b: &Crs) -> bool {
    a.axes() == b.axes() && a.longitude_range() == b.longitude_range()
}

// Axis order, unit and dimension adaption. A missing height, going into a
// compound CRS, takes the default height of the compound. Longitudes are
// wrapped into the range of a geographic target, if it differs from ours.
fn adapt(from: &Crs, to: &Crs, coord: &Coor3D) -> Coor3D {
    let mut internal = from.to_internal(coord);
    if from.dimension() < 3 {
        if let Some(compound) = to.as_compound() {
            internal[2] = compound.default_height();
        }
    }
    let range = to.longitude_range();
    if to.horizontal_type() == CrsType::Geographic && from.longitude_range() != range {
        internal[0] = range.wrap(internal[0]);
    }
    to.from_internal(&internal)
}

// ----- C O N S T R U C T O R S -------------------------------------------------------

impl Transformation {
    fn build(
        kind: TransformKind,
        source: Option<Arc<Crs>>,
        target: Arc<Crs>,
        descriptor: Identity,
    ) -> Transformation {
        let definition = Definition {
            kind,
            source,
            target,
            descriptor,
        };
        Transformation {
            definition: Arc::new(definition),
            inverted: false,
        }
    }

    fn between(kind: TransformKind, source: Arc<Crs>, target: Arc<Crs>) -> Transformation {
        let name = format!("{} to {}", source.name(), target.name());
        Transformation::build(kind, Some(source), target, Identity::named(&name))
    }

    /// Axis adaption from `source` to `target`. Without a source CRS, the
    /// tuples are left untouched.
    pub fn identity(source: Option<Arc<Crs>>, target: Arc<Crs>) -> Transformation {
        let descriptor = Identity::named("Identity");
        Transformation::build(TransformKind::Identity, source, target, descriptor)
    }

    /// A Helmert transformation between two geocentric CRSs
    pub fn helmert(
        helmert: Helmert,
        source: Arc<Crs>,
        target: Arc<Crs>,
    ) -> Result<Transformation, Error> {
        require(&source, CrsType::Geocentric, Side::Source, "Helmert")?;
        require(&target, CrsType::Geocentric, Side::Target, "Helmert")?;
        let kind = TransformKind::Helmert(helmert);
        Ok(Transformation::between(kind, source, target))
    }

    /// The conversion from a geographic CRS to a geocentric CRS
    pub fn geographic_geocentric(
        conversion: GeocentricConversion,
        source: Arc<Crs>,
        target: Arc<Crs>,
    ) -> Result<Transformation, Error> {
        let name = "Geographic-Geocentric";
        require(&source, CrsType::Geographic, Side::Source, name)?;
        require(&target, CrsType::Geocentric, Side::Target, name)?;
        let kind = TransformKind::GeographicGeocentric(conversion);
        Ok(Transformation::between(kind, source, target))
    }

    /// A rotation of `offset` radians around the polar axis between two
    /// geographic CRSs. The result is wrapped into the longitude range of
    /// the target CRS.
    pub fn longitude_rotation(
        offset: f64,
        source: Arc<Crs>,
        target: Arc<Crs>,
    ) -> Result<Transformation, Error> {
        let name = "Longitude-Rotation";
        require(&source, CrsType::Geographic, Side::Source, name)?;
        require(&target, CrsType::Geographic, Side::Target, name)?;
        let kind = TransformKind::LongitudeRotation(offset);
        Ok(Transformation::between(kind, source, target))
    }

    /// A general polynomial, operating on the raw ordinates in the axis
    /// order of the CRSs
    pub fn polynomial(
        polynomial: PolynomialTransformation,
        source: Arc<Crs>,
        target: Arc<Crs>,
    ) -> Transformation {
        let kind = TransformKind::Polynomial(polynomial);
        Transformation::between(kind, source, target)
    }

    /// The projection of `target`, which must be a projected CRS (or a
    /// compound CRS built on one), from the geographic CRS `source`
    pub fn projection(source: Arc<Crs>, target: Arc<Crs>) -> Result<Transformation, Error> {
        require(&source, CrsType::Geographic, Side::Source, "Projection")?;
        let projected = match target.as_ref() {
            Crs::Projected(crs) => Some(crs),
            Crs::Compound(crs) => crs.underlying_crs().as_projected(),
            _ => None,
        };
        let Some(projected) = projected else {
            return Err(Error::Configuration(format!(
                "Projection: the target CRS must be projected, got {}",
                target.horizontal_type()
            )));
        };
        let kind = TransformKind::Projection(projected.projection().clone());
        Ok(Transformation::between(kind, source, target))
    }

    /// `first` followed by `second`. Fails unless the target dimension of
    /// `first` equals the source dimension of `second`.
    pub fn concatenate(first: Transformation, second: Transformation) -> Result<Transformation, Error> {
        if first.target_dimension() != second.source_dimension() {
            return Err(Error::Configuration(format!(
                "can not concatenate: target dimension {} differs from source dimension {}",
                first.target_dimension(),
                second.source_dimension()
            )));
        }
        let source = first.source_crs().cloned();
        let target = second.resolved_target().clone();
        let name = format!("{} + {}", first.name(), second.name());
        let kind = TransformKind::Concatenated(first, second);
        Ok(Transformation::build(kind, source, target, Identity::named(&name)))
    }

    /// Concatenate a chain of steps, left to right, leaving out the
    /// identity steps. A chain of identities is an identity between the
    /// ends of the chain.
    pub fn concatenate_all(steps: Vec<Transformation>) -> Result<Transformation, Error> {
        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Err(Error::General("no transformation steps to concatenate"));
        };
        let source = first.source_crs().cloned();
        let target = last.resolved_target().clone();

        let mut kept = steps.into_iter().filter(|step| !step.is_identity());
        let Some(mut result) = kept.next() else {
            return Ok(Transformation::identity(source, target));
        };
        for step in kept {
            result = Transformation::concatenate(result, step)?;
        }
        Ok(result)
    }
}

// ----- A C C E S S O R S -------------------------------------------------------------

impl Transformation {
    pub fn kind(&self) -> &TransformKind {
        &self.definition.kind
    }

    /// Name, code and other metadata
    pub fn descriptor(&self) -> &Identity {
        &self.definition.descriptor
    }

    pub fn name(&self) -> &str {
        self.definition.descriptor.name()
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// The source CRS, as seen through the orientation of `self`
    pub fn source_crs(&self) -> Option<&Arc<Crs>> {
        if self.inverted {
            return Some(&self.definition.target);
        }
        self.definition.source.as_ref()
    }

    /// The target CRS, as seen through the orientation of `self`
    pub fn target_crs(&self) -> Option<&Arc<Crs>> {
        if self.inverted {
            return self.definition.source.as_ref();
        }
        Some(&self.definition.target)
    }

    // The target CRS, falling back to the source CRS when missing
    fn resolved_target(&self) -> &Arc<Crs> {
        if self.inverted {
            return self.definition.source.as_ref().unwrap_or(&self.definition.target);
        }
        &self.definition.target
    }

    // The source CRS, falling back to the target CRS when missing
    fn resolved_source(&self) -> &Arc<Crs> {
        if self.inverted {
            return &self.definition.target;
        }
        self.definition.source.as_ref().unwrap_or(&self.definition.target)
    }

    pub fn source_dimension(&self) -> usize {
        self.resolved_source().dimension()
    }

    pub fn target_dimension(&self) -> usize {
        self.resolved_target().dimension()
    }

    /// The same transformation, in the opposite direction
    pub fn inverse(&self) -> Transformation {
        Transformation {
            definition: self.definition.clone(),
            inverted: !self.inverted,
        }
    }

    /// Does the transformation leave every tuple unchanged?
    pub fn is_identity(&self) -> bool {
        let definition = &self.definition;
        let same_axes = match &definition.source {
            Some(source) => same_frame(source, &definition.target),
            None => true,
        };
        match &definition.kind {
            TransformKind::Identity => same_axes,
            TransformKind::Helmert(helmert) => same_axes && helmert.is_identity(),
            TransformKind::LongitudeRotation(offset) => same_axes && *offset == 0.,
            TransformKind::Polynomial(polynomial) => same_axes && polynomial.is_identity(),
            TransformKind::GeographicGeocentric(_) => false,
            TransformKind::Projection(_) => false,
            TransformKind::Concatenated(first, second) => first.is_identity() && second.is_identity(),
        }
    }

    /// Two transformations are considered each other's inverse when both are
    /// identities, and they run between the same CRSs in opposite directions.
    pub fn are_inverse(&self, other: &Transformation) -> bool {
        self.is_identity()
            && other.is_identity()
            && self.source_crs() == other.target_crs()
            && self.target_crs() == other.source_crs()
    }

    /// Do the two transformations run between the same CRSs?
    pub fn equal_on_crs(&self, other: &Transformation) -> bool {
        self.source_crs() == other.source_crs() && self.target_crs() == other.target_crs()
    }

    /// Is `crs` the source or target of any step of the transformation?
    pub fn contains(&self, crs: &Crs) -> bool {
        let definition = &self.definition;
        if *definition.target == *crs {
            return true;
        }
        if definition.source.as_deref() == Some(crs) {
            return true;
        }
        match &definition.kind {
            TransformKind::Concatenated(first, second) => first.contains(crs) || second.contains(crs),
            _ => false,
        }
    }

    pub fn implementation_name(&self) -> &'static str {
        self.definition.kind.implementation_name()
    }

    /// "Forward Helmert", "Inverse Projection", etc.
    pub fn transformation_name(&self) -> String {
        let direction = if self.inverted { "Inverse" } else { "Forward" };
        format!("{direction} {}", self.implementation_name())
    }

    /// The steps of the transformation in the order of application, e.g.
    /// `(0)Forward Geographic-Geocentric->(1)Forward Helmert`
    pub fn transformation_path(&self) -> String {
        let mut steps = Vec::new();
        self.collect_steps(Fwd, &mut steps);
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("({i}){step}"))
            .collect::<Vec<_>>()
            .join("->")
    }

    fn collect_steps(&self, direction: Direction, steps: &mut Vec<String>) {
        let direction = if self.inverted { !direction } else { direction };
        match &self.definition.kind {
            TransformKind::Concatenated(first, second) => {
                if direction == Fwd {
                    first.collect_steps(Fwd, steps);
                    second.collect_steps(Fwd, steps);
                } else {
                    second.collect_steps(Inv, steps);
                    first.collect_steps(Inv, steps);
                }
            }
            kind => {
                let name = if direction == Fwd { "Forward" } else { "Inverse" };
                steps.push(format!("{name} {}", kind.implementation_name()));
            }
        }
    }
}

impl std::fmt::Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.transformation_path())
    }
}

// ----- A P P L I C A T I O N ---------------------------------------------------------

impl Transformation {
    /// Source and target dimensions must be 2 or 3
    fn check_dimensions(&self) -> Result<(), Error> {
        for (side, dimension) in [
            (Side::Source, self.source_dimension()),
            (Side::Target, self.target_dimension()),
        ] {
            if !(2..=3).contains(&dimension) {
                return Err(Error::Dimension { side, dimension });
            }
        }
        Ok(())
    }

    /// Transform a set of coordinate tuples, given in the axis order and
    /// units of the source CRS. The input is left untouched.
    pub fn do_transform(&self, coordinates: &[Coor3D]) -> Result<Vec<Coor3D>, Error> {
        let mut result = coordinates.to_vec();
        self.apply(&mut result)?;
        Ok(result)
    }

    /// Transform a set of coordinate tuples in place. On error, the tuples
    /// before the failing one are transformed, the rest are untouched.
    pub fn apply(&self, operands: &mut dyn CoordinateSet) -> Result<usize, Error> {
        self.check_dimensions()?;
        for i in 0..operands.len() {
            let coord = self.run(Fwd, operands.get_coord(i), i)?;
            operands.set_coord(i, &coord);
        }
        Ok(operands.len())
    }

    /// Transform `length` values from `source`, starting at `source_offset`,
    /// packed as tuples of [`Self::source_dimension()`] values. The result is
    /// written into `destination`, starting at `destination_offset`, as
    /// tuples of [`Self::target_dimension()`] values. A missing destination
    /// is allocated, a too small one is grown.
    pub fn do_transform_flat(
        &self,
        source: &[f64],
        source_offset: usize,
        destination: Option<Vec<f64>>,
        destination_offset: usize,
        length: usize,
    ) -> Result<Vec<f64>, Error> {
        if source_offset > source.len() {
            return Err(Error::ArrayLength(format!(
                "source offset {source_offset} exceeds the source length {}",
                source.len()
            )));
        }
        if length > source.len() || source_offset + length > source.len() {
            return Err(Error::ArrayLength(format!(
                "{length} values from offset {source_offset} exceed the source length {}",
                source.len()
            )));
        }
        self.check_dimensions()?;

        let source_dimension = self.source_dimension();
        let target_dimension = self.target_dimension();
        if length % source_dimension != 0 {
            return Err(Error::ArrayLength(format!(
                "length {length} is not a multiple of the source dimension {source_dimension}"
            )));
        }
        let n = length / source_dimension;

        let mut destination = destination.unwrap_or_default();
        let needed = destination_offset + n * target_dimension;
        if destination.len() < needed {
            destination.resize(needed, 0.);
        }

        let mut buffer = Coor3D::origin();
        for i in 0..n {
            let from = source_offset + i * source_dimension;
            buffer[2] = 0.;
            for j in 0..source_dimension {
                buffer[j] = source[from + j];
            }
            buffer = self.run(Fwd, buffer, i)?;
            let to = destination_offset + i * target_dimension;
            for j in 0..target_dimension {
                destination[to + j] = buffer[j];
            }
        }
        Ok(destination)
    }

    // Run the transformation on a single tuple, in the direction given,
    // as seen through the orientation of `self`
    fn run(&self, direction: Direction, coord: Coor3D, index: usize) -> Result<Coor3D, Error> {
        let direction = if self.inverted { !direction } else { direction };
        let definition = &self.definition;
        let target = definition.target.as_ref();

        if let TransformKind::Identity = definition.kind {
            let Some(source) = definition.source.as_deref() else {
                return Ok(coord);
            };
            if same_frame(source, target) {
                return Ok(coord);
            }
            return Ok(match direction {
                Fwd => adapt(source, target, &coord),
                Inv => adapt(target, source, &coord),
            });
        }

        if let TransformKind::Concatenated(first, second) = &definition.kind {
            return match direction {
                Fwd => second.run(Fwd, first.run(Fwd, coord, index)?, index),
                Inv => first.run(Inv, second.run(Inv, coord, index)?, index),
            };
        }

        let Some(source) = definition.source.as_deref() else {
            return Err(Error::General("missing source CRS"));
        };

        // The CRS we come from, and the CRS we go to
        let (from, to) = match direction {
            Fwd => (source, target),
            Inv => (target, source),
        };

        match &definition.kind {
            TransformKind::Helmert(helmert) => {
                let c = helmert.apply(&from.to_internal(&coord), direction);
                Ok(to.from_internal(&c))
            }

            TransformKind::GeographicGeocentric(conversion) => {
                let c = from.to_internal(&coord);
                let c = match direction {
                    Fwd => conversion.fwd(&c),
                    Inv => conversion.inv(&c).ok_or_else(|| Error::NonConvergence {
                        operation: "Geographic-Geocentric".to_string(),
                        index,
                    })?,
                };
                Ok(to.from_internal(&c))
            }

            TransformKind::LongitudeRotation(offset) => {
                let mut c = from.to_internal(&coord);
                let offset = if direction == Fwd { *offset } else { -offset };
                c[0] = to.longitude_range().wrap(c[0] + offset);
                Ok(to.from_internal(&c))
            }

            TransformKind::Polynomial(polynomial) => match direction {
                Fwd => Ok(polynomial.fwd(&coord)),
                Inv => polynomial.inv(&coord).ok_or_else(|| Error::NonConvergence {
                    operation: "Polynomial".to_string(),
                    index,
                }),
            },

            TransformKind::Projection(projection) => {
                let c = from.to_internal(&coord);
                let out_of_domain = || Error::OutOfDomain {
                    operation: "Projection".to_string(),
                    index,
                };
                let (a, b) = match direction {
                    Fwd => projection.project(c[0], c[1]),
                    Inv => projection.unproject(c[0], c[1]),
                }
                .ok_or_else(out_of_domain)?;
                Ok(to.from_internal(&Coor3D::raw(a, b, c[2])))
            }

            TransformKind::Identity | TransformKind::Concatenated(..) => Ok(coord),
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn datum(ellipsoid: &str, pm: &str) -> Result<Arc<GeodeticDatum>, Error> {
        Ok(Arc::new(GeodeticDatum::new(
            Identity::named(ellipsoid),
            Ellipsoid::named(ellipsoid)?,
            PrimeMeridian::named(pm)?,
            None,
        )))
    }

    fn lat_lon(datum: &Arc<GeodeticDatum>) -> Result<Arc<Crs>, Error> {
        let axes = vec![Axis::latitude(Unit::DEGREE), Axis::longitude(Unit::DEGREE)];
        let crs = GeographicCrs::new(Identity::named("lat/lon"), datum.clone(), axes)?;
        Ok(Arc::new(Crs::Geographic(crs)))
    }

    fn lon_lat(datum: &Arc<GeodeticDatum>) -> Result<Arc<Crs>, Error> {
        let axes = vec![Axis::longitude(Unit::DEGREE), Axis::latitude(Unit::DEGREE)];
        let crs = GeographicCrs::new(Identity::named("lon/lat"), datum.clone(), axes)?;
        Ok(Arc::new(Crs::Geographic(crs)))
    }

    fn geocentric(datum: &Arc<GeodeticDatum>) -> Arc<Crs> {
        let crs = GeocentricCrs::with_default_axes(Identity::named("geocentric"), datum.clone());
        Arc::new(Crs::Geocentric(crs))
    }

    fn utm32(base: &Arc<Crs>) -> Result<Arc<Crs>, Error> {
        let projection = Projection::utm(base.clone(), 32, true)?;
        let axes = vec![Axis::easting(Unit::METRE), Axis::northing(Unit::METRE)];
        let crs = ProjectedCrs::new(Identity::named("UTM 32"), projection, axes)?;
        Ok(Arc::new(Crs::Projected(crs)))
    }

    #[test]
    fn identity() -> Result<(), Error> {
        let grs80 = datum("GRS80", "greenwich")?;
        let t = Transformation::identity(None, lat_lon(&grs80)?);
        assert!(t.is_identity());
        assert_eq!(t.source_dimension(), 2);

        // Flat packing, 2D to 2D
        let values = [1., 2., 3., 4., 5., 6.];
        let result = t.do_transform_flat(&values, 0, None, 0, 6)?;
        assert_eq!(result, values);

        // Axis swapping
        let t = Transformation::identity(Some(lat_lon(&grs80)?), lon_lat(&grs80)?);
        assert!(!t.is_identity());
        let result = t.do_transform(&[Coor3D::raw(55., 12., 0.)])?;
        assert_float_eq!(result[0][0], 12., abs <= 1e-12);
        assert_float_eq!(result[0][1], 55., abs <= 1e-12);
        let back = t.inverse().do_transform(&result)?;
        assert_float_eq!(back[0][0], 55., abs <= 1e-12);
        Ok(())
    }

    #[test]
    fn flat_packing() -> Result<(), Error> {
        let grs80 = datum("GRS80", "greenwich")?;
        let geo = lat_lon(&grs80)?;
        let height = Axis::height(Unit::METRE);
        let geo_3d = CompoundCrs::new(Identity::named("3D"), geo.clone(), height, 0.)?;
        let geo_3d = Arc::new(Crs::Compound(geo_3d));

        // 3D source, 2D target: 6 values in, 4 values out
        let t = Transformation::identity(Some(geo_3d.clone()), geo.clone());
        let result = t.do_transform_flat(&[55., 12., 100., 56., 13., 200.], 0, None, 0, 6)?;
        assert_eq!(result.len(), 4);
        assert_float_eq!(result[2], 56., abs <= 1e-12);

        // Offsets, and a destination to grow
        let result = t.do_transform_flat(&[0., 55., 12., 100.], 1, Some(vec![7.]), 1, 3)?;
        assert_eq!(result.len(), 3);
        assert_eq!(result[0], 7.);

        // Bad offsets and lengths
        let values = [1., 2., 3., 4., 5., 6.];
        let t = Transformation::identity(None, geo);
        assert!(matches!(t.do_transform_flat(&values, 7, None, 0, 0), Err(Error::ArrayLength(_))));
        assert!(matches!(t.do_transform_flat(&values, 0, None, 0, 7), Err(Error::ArrayLength(_))));
        assert!(matches!(t.do_transform_flat(&values, 2, None, 0, 6), Err(Error::ArrayLength(_))));
        assert!(matches!(t.do_transform_flat(&values, 0, None, 0, 5), Err(Error::ArrayLength(_))));
        assert!(!Error::ArrayLength(String::new()).is_fatal());
        Ok(())
    }

    #[test]
    fn dimension_errors() -> Result<(), Error> {
        let grs80 = datum("GRS80", "greenwich")?;
        let projection = Projection::utm(lat_lon(&grs80)?, 32, true)?;
        let axes = vec![
            Axis::easting(Unit::METRE),
            Axis::northing(Unit::METRE),
            Axis::height(Unit::METRE),
            Axis::new("Time", AxisOrientation::Other, Unit::METRE),
        ];
        let crs = ProjectedCrs::new(Identity::named("4D"), projection, axes)?;
        let t = Transformation::identity(None, Arc::new(Crs::Projected(crs)));
        let err = t.do_transform_flat(&[1., 2., 3., 4.], 0, None, 0, 4);
        let Err(err) = err else {
            return Err(Error::General("4D source accepted"));
        };
        assert_eq!(err.to_string(), "source dimension 4 is too large (must be in [2, 3])");
        Ok(())
    }

    #[test]
    fn orientation() -> Result<(), Error> {
        let grs80 = datum("GRS80", "greenwich")?;
        let geo = lat_lon(&grs80)?;
        let cart = geocentric(&grs80);
        let conversion = GeocentricConversion::new(*grs80.ellipsoid());
        let t = Transformation::geographic_geocentric(conversion, geo.clone(), cart.clone())?;

        assert_eq!(t.transformation_name(), "Forward Geographic-Geocentric");
        assert_eq!(t.inverse().transformation_name(), "Inverse Geographic-Geocentric");
        assert_eq!(t.inverse().source_crs(), Some(&cart));
        assert_eq!(t.inverse().target_crs(), Some(&geo));
        assert_eq!(t.inverse().inverse().is_inverted(), t.is_inverted());
        assert_eq!(t.source_dimension(), 2);
        assert_eq!(t.target_dimension(), 3);
        assert_eq!(t.inverse().source_dimension(), 3);

        // Wrong CRS types
        let err = Transformation::geographic_geocentric(conversion, cart, geo);
        assert!(matches!(err, Err(Error::Configuration(_))));
        Ok(())
    }

    #[test]
    fn geographic_geocentric() -> Result<(), Error> {
        let grs80 = datum("GRS80", "greenwich")?;
        let geo = lat_lon(&grs80)?;
        let conversion = GeocentricConversion::new(*grs80.ellipsoid());
        let height = Axis::height(Unit::METRE);
        let geo_3d = CompoundCrs::new(Identity::named("3D"), geo, height, 0.)?;
        let geo_3d = Arc::new(Crs::Compound(geo_3d));
        let t = Transformation::geographic_geocentric(conversion, geo_3d, geocentric(&grs80))?;

        // Validation value from PROJ: echo 10 55 -100000 0 | cct -d 15 cart ellps=GRS80
        let cart = t.do_transform(&[Coor3D::raw(55., 10., -100_000.)])?;
        assert_float_eq!(cart[0][0], 3_554_403.475_871_930_4, abs <= 1e-6);
        assert_float_eq!(cart[0][1], 626_737.233_120_170_7, abs <= 1e-6);
        assert_float_eq!(cart[0][2], 5_119_468.318_659_256, abs <= 1e-6);

        let geo = t.inverse().do_transform(&cart)?;
        assert_float_eq!(geo[0][0], 55., abs <= 1e-9);
        assert_float_eq!(geo[0][1], 10., abs <= 1e-9);
        assert_float_eq!(geo[0][2], -100_000., abs <= 1e-3);

        // Non-convergence is reported with the index of the failing point
        let conversion = conversion.with_max_iterations(0);
        let geo = lat_lon(&grs80)?;
        let t = Transformation::geographic_geocentric(conversion, geo, geocentric(&grs80))?;
        let cart = [cart[0], cart[0]];
        let Err(err) = t.inverse().do_transform(&cart) else {
            return Err(Error::General("expected non-convergence"));
        };
        assert!(matches!(err, Error::NonConvergence { index: 0, .. }));
        assert!(!err.is_fatal());
        Ok(())
    }

    #[test]
    fn longitude_rotation() -> Result<(), Error> {
        let paris = lat_lon(&datum("clrk80ign", "paris")?)?;
        let greenwich = lat_lon(&datum("clrk80ign", "greenwich")?)?;
        let offset = PrimeMeridian::named("paris")?.longitude_radians();
        let t = Transformation::longitude_rotation(offset, paris, greenwich)?;
        let c = t.do_transform(&[Coor3D::raw(48., 179., 0.)])?;
        assert_float_eq!(c[0][1], 181.337_229_166_666_67 - 360., abs <= 1e-9);
        let back = t.inverse().do_transform(&c)?;
        assert_float_eq!(back[0][1], 179., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn projection() -> Result<(), Error> {
        let grs80 = datum("GRS80", "greenwich")?;
        let geo = lat_lon(&grs80)?;
        let utm = utm32(&geo)?;
        let t = Transformation::projection(geo.clone(), utm.clone())?;
        let projected = t.do_transform(&[Coor3D::raw(55., 12., 0.)])?;
        assert_float_eq!(projected[0][0], 691_875.632_139_661, abs <= 1e-8);
        assert_float_eq!(projected[0][1], 6_098_907.825_005_012, abs <= 1e-8);

        let Err(err) = t.do_transform(&[Coor3D::raw(55., 12., 0.), Coor3D::raw(0., 99., 0.)]) else {
            return Err(Error::General("expected out of domain"));
        };
        assert!(matches!(err, Error::OutOfDomain { index: 1, .. }));

        // The target must be projected
        assert!(Transformation::projection(geo.clone(), geo).is_err());
        Ok(())
    }

    #[test]
    fn concatenation() -> Result<(), Error> {
        let intl = datum("intl", "greenwich")?;
        let wgs84 = datum("WGS84", "greenwich")?;
        let ed50 = lat_lon(&intl)?;
        let wgs84_geo = lat_lon(&wgs84)?;
        let ed50_cart = geocentric(&intl);
        let wgs84_cart = geocentric(&wgs84);

        let steps = vec![
            Transformation::geographic_geocentric(GeocentricConversion::new(*intl.ellipsoid()), ed50.clone(), ed50_cart.clone())?,
            Transformation::helmert(Helmert::translation(-87., -98., -121.), ed50_cart.clone(), wgs84_cart.clone())?,
            Transformation::helmert(Helmert::default(), wgs84_cart.clone(), wgs84_cart.clone())?,
            Transformation::geographic_geocentric(GeocentricConversion::new(*wgs84.ellipsoid()), wgs84_geo.clone(), wgs84_cart.clone())?.inverse(),
        ];
        let t = Transformation::concatenate_all(steps)?;
        assert_eq!(
            t.transformation_path(),
            "(0)Forward Geographic-Geocentric->(1)Forward Helmert->(2)Inverse Geographic-Geocentric"
        );
        assert_eq!(
            t.inverse().transformation_path(),
            "(0)Forward Geographic-Geocentric->(1)Inverse Helmert->(2)Inverse Geographic-Geocentric"
        );
        assert!(t.contains(&ed50_cart));
        assert!(!t.contains(&Crs::wgs84_lon_lat()));
        assert_eq!(t.source_crs(), Some(&ed50));
        assert_eq!(t.target_crs(), Some(&wgs84_geo));

        // ED50 to WGS84 moves points by some 100 m
        let p = [Coor3D::raw(55., 12., 0.)];
        let q = t.do_transform(&p)?;
        assert!((q[0][0] - 55.).abs() > 1e-4);
        let back = t.inverse().do_transform(&q)?;
        assert_float_eq!(back[0][0], 55., abs <= 1e-9);
        assert_float_eq!(back[0][1], 12., abs <= 1e-9);

        // Concatenating mismatched dimensions fails at construction
        let geo_cart = Transformation::geographic_geocentric(GeocentricConversion::new(*intl.ellipsoid()), ed50.clone(), ed50_cart)?;
        let err = Transformation::concatenate(geo_cart.clone(), geo_cart);
        assert!(matches!(err, Err(Error::Configuration(_))));
        Ok(())
    }

    #[test]
    fn identities() -> Result<(), Error> {
        let grs80 = datum("GRS80", "greenwich")?;
        let a = lat_lon(&grs80)?;
        let b = lon_lat(&grs80)?;

        let t = Transformation::identity(Some(a.clone()), a.clone());
        let u = Transformation::identity(Some(a.clone()), a.clone()).inverse();
        assert!(t.are_inverse(&u));
        assert!(t.equal_on_crs(&u));

        // Not identities: Never inverse
        let t = Transformation::identity(Some(a.clone()), b.clone());
        assert!(!t.are_inverse(&t.inverse()));
        assert!(!t.equal_on_crs(&t.inverse()));

        // Chains of identities collapse into one
        let steps = vec![
            Transformation::identity(Some(a.clone()), a.clone()),
            Transformation::identity(Some(a.clone()), a.clone()).inverse(),
        ];
        let t = Transformation::concatenate_all(steps)?;
        assert_eq!(t.transformation_path(), "(0)Forward Identity");
        assert!(Transformation::concatenate_all(Vec::new()).is_err());
        Ok(())
    }

    #[test]
    fn longitude_range_adaption() -> Result<(), Error> {
        let grs80 = datum("GRS80", "greenwich")?;
        let signed = lat_lon(&grs80)?;
        let axes = vec![Axis::latitude(Unit::DEGREE), Axis::longitude(Unit::DEGREE)];
        let positive = GeographicCrs::new(Identity::named("lat/lon"), grs80.clone(), axes)?
            .with_longitude_range(LongitudeRange::Positive);
        let positive = Arc::new(Crs::Geographic(positive));

        // Same axes, different ranges: Not an identity, and kept in chains
        let t = Transformation::identity(Some(signed.clone()), positive.clone());
        assert!(!t.is_identity());
        let conversion = GeocentricConversion::new(*grs80.ellipsoid());
        let cart = geocentric(&grs80);
        let to_cart = Transformation::geographic_geocentric(conversion, signed.clone(), cart)?;
        let chain = Transformation::concatenate_all(vec![to_cart.inverse(), t.clone()])?;
        let expected = "(0)Inverse Geographic-Geocentric->(1)Forward Identity";
        assert_eq!(chain.transformation_path(), expected);

        let result = t.do_transform(&[Coor3D::raw(55., -10., 0.)])?;
        assert_float_eq!(result[0][0], 55., abs <= 1e-12);
        assert_float_eq!(result[0][1], 350., abs <= 1e-9);
        let back = t.inverse().do_transform(&result)?;
        assert_float_eq!(back[0][1], -10., abs <= 1e-9);

        // Axis swap into the positive range wraps as well
        let t = Transformation::identity(Some(lon_lat(&grs80)?), positive);
        let result = t.do_transform(&[Coor3D::raw(-170., 55., 0.)])?;
        assert_float_eq!(result[0][1], 190., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn polynomial() -> Result<(), Error> {
        let grs80 = datum("GRS80", "greenwich")?;
        let utm = utm32(&lat_lon(&grs80)?)?;
        let p = PolynomialTransformation::new(1, &[1., 0., 0.], &[-1., 0., 0.], [0.; 2], [0.; 2], 1.)?;
        let t = Transformation::polynomial(p, utm.clone(), utm);
        let c = t.do_transform(&[Coor3D::raw(500_000., 6_000_000., 0.)])?;
        assert_eq!(c[0], Coor3D::raw(500_001., 5_999_999., 0.));
        let back = t.inverse().do_transform(&c)?;
        assert_eq!(back[0], Coor3D::raw(500_000., 6_000_000., 0.));
        Ok(())
    }

    #[test]
    fn thread_safety() {
        fn is_send_and_sync<T: Send + Sync>() {}
        is_send_and_sync::<Transformation>();
        is_send_and_sync::<Crs>();
    }
}
