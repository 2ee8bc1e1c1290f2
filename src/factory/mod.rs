//! Construction of transformations: Between two CRSs, from their datum
//! definitions, or from an explicitly given operation method and its
//! parameters.
use crate::authoring::*;

/// Builds the chain of concrete steps taking coordinates from one CRS
/// to another
pub struct TransformationFactory;

impl TransformationFactory {
    /// The transformation from `source` to `target`.
    ///
    /// Projected CRSs are unprojected onto (or projected from) their
    /// geographic CRS. Between the geodetic bases we use an axis adaption,
    /// a prime meridian rotation, or (when the datums differ) a trip
    /// through geocentric space and WGS84. Identity steps are dropped.
    pub fn create(source: &Arc<Crs>, target: &Arc<Crs>) -> Result<Transformation, Error> {
        if source == target {
            debug!("{source} and {target} are equal: identity");
            return Ok(Transformation::identity(Some(source.clone()), target.clone()));
        }

        let mut steps = Vec::new();

        let source_base = geodetic_base(source)?;
        if let Some(base) = &source_base {
            trace!("unprojecting {source}");
            steps.push(Transformation::projection(base.clone(), source.clone())?.inverse());
        }
        let target_base = geodetic_base(target)?;

        let from = source_base.unwrap_or_else(|| source.clone());
        let to = target_base.clone().unwrap_or_else(|| target.clone());
        steps.extend(Self::geodetic(&from, &to)?);

        if let Some(base) = target_base {
            trace!("projecting to {target}");
            steps.push(Transformation::projection(base, target.clone())?);
        }

        Transformation::concatenate_all(steps)
    }

    // The steps between two geographic or geocentric CRSs (possibly with a
    // height axis)
    fn geodetic(source: &Arc<Crs>, target: &Arc<Crs>) -> Result<Vec<Transformation>, Error> {
        let source_datum = source.datum();
        let target_datum = target.datum();
        let both_geographic = source.horizontal_type() == CrsType::Geographic
            && target.horizontal_type() == CrsType::Geographic;

        if source == target {
            return Ok(vec![Transformation::identity(Some(source.clone()), target.clone())]);
        }

        if both_geographic && source_datum.is_equivalent(target_datum) {
            let offset = source_datum.prime_meridian().longitude_radians()
                - target_datum.prime_meridian().longitude_radians();
            if offset == 0. {
                debug!("same datum: axis adaption from {source} to {target}");
                return Ok(vec![Transformation::identity(Some(source.clone()), target.clone())]);
            }
            debug!("same datum: longitude rotation from {source} to {target}");
            return Ok(vec![Transformation::longitude_rotation(
                offset,
                source.clone(),
                target.clone(),
            )?]);
        }

        debug!("going through geocentric space from {source} to {target}");
        let mut steps = Vec::new();

        // Down to geocentric space, on the source datum
        let source_cartesian = Self::to_geocentric(source, &mut steps)?;

        // The datum shift
        let mut back = Vec::new();
        let target_cartesian = Self::to_geocentric(target, &mut back)?;
        if source_datum.is_equivalent(target_datum) {
            steps.push(Transformation::identity(
                Some(source_cartesian),
                target_cartesian,
            ));
        } else {
            let (Some(source_shift), Some(target_shift)) =
                (source_datum.to_wgs84(), target_datum.to_wgs84())
            else {
                return Err(Error::Unsupported(format!(
                    "no datum shift from {} to {}: missing WGS84 relation",
                    source_datum.identity().name(),
                    target_datum.identity().name()
                )));
            };
            let wgs84 = geocentric_on(&GeodeticDatum::wgs84(), "WGS 84 (geocentric)");
            steps.push(Transformation::helmert(*source_shift, source_cartesian, wgs84.clone())?);
            steps.push(Transformation::helmert(*target_shift, target_cartesian, wgs84)?.inverse());
        }

        // And back up again, on the target datum
        steps.extend(back.into_iter().rev().map(|step| step.inverse()));
        Ok(steps)
    }

    // Push the steps taking `crs` to a geocentric CRS on the same datum (with
    // the prime meridian at Greenwich), and return that CRS
    fn to_geocentric(crs: &Arc<Crs>, steps: &mut Vec<Transformation>) -> Result<Arc<Crs>, Error> {
        if crs.horizontal_type() == CrsType::Geocentric {
            return Ok(crs.clone());
        }

        let datum = crs.datum();
        let mut geographic = crs.clone();
        if !datum.prime_meridian().is_greenwich() {
            let rotated = at_greenwich(crs)?;
            let offset = datum.prime_meridian().longitude_radians();
            steps.push(Transformation::longitude_rotation(offset, crs.clone(), rotated.clone())?);
            geographic = rotated;
        }

        let datum = geographic.datum().clone();
        let title = format!("{} (geocentric)", datum.identity().name());
        let cartesian = geocentric_on(&datum, &title);
        let conversion = GeocentricConversion::new(*datum.ellipsoid());
        steps.push(Transformation::geographic_geocentric(
            conversion,
            geographic,
            cartesian.clone(),
        )?);
        Ok(cartesian)
    }

    /// The transformation given by an operation method and its parameters,
    /// from `source` to `target`.
    ///
    /// Unknown parameters are ignored, with a warning. Helmert operations
    /// between geographic CRSs are wrapped in the conversions to and from
    /// geocentric space.
    pub fn from_operation(
        definition: &OperationDefinition,
        source: &Arc<Crs>,
        target: &Arc<Crs>,
    ) -> Result<Transformation, Error> {
        let method = SupportedTransformation::from_codes(&definition.method);
        if !method.is_supported() {
            let name = definition.method.first().map(|c| c.to_string()).unwrap_or_default();
            return Err(Error::Unsupported(format!("operation method '{name}'")));
        }
        debug!("operation method: {}", method.name());
        let parameters = definition.classified()?;

        use SupportedTransformation::*;
        use SupportedTransformationParameter as P;
        match method {
            LongitudeRotation => {
                let offset = required(&parameters, P::LongitudeOffset)?;
                Transformation::longitude_rotation(offset, source.clone(), target.clone())
            }

            GeographicGeocentric => {
                if source.horizontal_type() == CrsType::Geocentric {
                    let conversion = GeocentricConversion::new(*target.datum().ellipsoid());
                    let t = Transformation::geographic_geocentric(
                        conversion,
                        target.clone(),
                        source.clone(),
                    )?;
                    return Ok(t.inverse());
                }
                let conversion = GeocentricConversion::new(*source.datum().ellipsoid());
                Transformation::geographic_geocentric(conversion, source.clone(), target.clone())
            }

            Helmert3 | Helmert7 | CoordinateFrameRotation => {
                let translation = [
                    required(&parameters, P::XAxisTranslation)?,
                    required(&parameters, P::YAxisTranslation)?,
                    required(&parameters, P::ZAxisTranslation)?,
                ];
                let helmert = if method == Helmert3 {
                    Helmert::new(translation, [0.; 3], 0., HelmertConvention::PositionVector)
                } else {
                    let rotation = [
                        required(&parameters, P::XAxisRotation)?,
                        required(&parameters, P::YAxisRotation)?,
                        required(&parameters, P::ZAxisRotation)?,
                    ];
                    let scale = required(&parameters, P::ScaleDifference)?;
                    let convention = if method == Helmert7 {
                        HelmertConvention::PositionVector
                    } else {
                        HelmertConvention::CoordinateFrame
                    };
                    Helmert::new(translation, rotation, scale, convention)
                };
                Self::wrapped_helmert(helmert, source, target)
            }

            GeneralPolynomial2 | GeneralPolynomial3 | GeneralPolynomial4 | GeneralPolynomial6 => {
                let degree = method.polynomial_degree().unwrap_or(2);
                let coefficients = |wanted: fn(usize) -> P| -> Vec<f64> {
                    let terms = parameters
                        .keys()
                        .filter_map(|p| match p {
                            P::A(i) | P::B(i) if *p == wanted(*i) => Some(i + 1),
                            _ => None,
                        })
                        .max()
                        .unwrap_or(0);
                    (0..terms)
                        .map(|i| parameters.get(&wanted(i)).copied().unwrap_or(0.))
                        .collect()
                };
                let a = coefficients(P::A);
                let b = coefficients(P::B);
                let source_origin = [
                    required(&parameters, P::SourceOrdinate1)?,
                    required(&parameters, P::SourceOrdinate2)?,
                ];
                let target_origin = [
                    required(&parameters, P::TargetOrdinate1)?,
                    required(&parameters, P::TargetOrdinate2)?,
                ];
                let scaling = required(&parameters, P::PointScalingFactor)?;
                let polynomial = PolynomialTransformation::new(
                    degree,
                    &a,
                    &b,
                    source_origin,
                    target_origin,
                    scaling,
                )?;
                Ok(Transformation::polynomial(polynomial, source.clone(), target.clone()))
            }

            NotSupported => Err(Error::Unsupported(method.name().to_string())),
        }
    }

    // Helmert between geocentric CRSs as is. Between geographic CRSs, by
    // way of geocentric space.
    fn wrapped_helmert(
        helmert: Helmert,
        source: &Arc<Crs>,
        target: &Arc<Crs>,
    ) -> Result<Transformation, Error> {
        let mut steps = Vec::new();
        let source_cartesian = Self::to_geocentric(source, &mut steps)?;
        let mut back = Vec::new();
        let target_cartesian = Self::to_geocentric(target, &mut back)?;
        steps.push(Transformation::helmert(helmert, source_cartesian, target_cartesian)?);
        steps.extend(back.into_iter().rev().map(|step| step.inverse()));
        Transformation::concatenate_all(steps)
    }
}

// The geographic CRS under a projected CRS. For a compound CRS over a
// projected CRS, the same compound over the geographic CRS.
fn geodetic_base(crs: &Arc<Crs>) -> Result<Option<Arc<Crs>>, Error> {
    match crs.as_ref() {
        Crs::Projected(projected) => Ok(Some(projected.geographic_crs().clone())),
        Crs::Compound(compound) => {
            let Some(projected) = compound.underlying_crs().as_projected() else {
                return Ok(None);
            };
            let geographic = projected.geographic_crs().clone();
            let name = format!("{} + height", geographic.name());
            let base = CompoundCrs::new(
                Identity::named(&name),
                geographic,
                compound.height_axis().clone(),
                compound.default_height(),
            )?;
            Ok(Some(Arc::new(Crs::Compound(base))))
        }
        _ => Ok(None),
    }
}

// A copy of a geographic CRS (possibly wrapped in a compound), with the
// prime meridian moved to Greenwich
fn at_greenwich(crs: &Arc<Crs>) -> Result<Arc<Crs>, Error> {
    match crs.as_ref() {
        Crs::Geographic(geographic) => {
            let datum = geographic.datum();
            let datum = GeodeticDatum::new(
                datum.identity().clone(),
                *datum.ellipsoid(),
                PrimeMeridian::greenwich(),
                datum.to_wgs84().copied(),
            );
            let name = format!("{} (Greenwich)", crs.name());
            let rotated = GeographicCrs::new(
                Identity::named(&name),
                Arc::new(datum),
                geographic.axes().to_vec(),
            )?
            .with_longitude_range(geographic.longitude_range());
            Ok(Arc::new(Crs::Geographic(rotated)))
        }
        Crs::Compound(compound) => {
            let underlying = at_greenwich(compound.underlying_crs())?;
            let name = format!("{} (Greenwich)", crs.name());
            let rotated = CompoundCrs::new(
                Identity::named(&name),
                underlying,
                compound.height_axis().clone(),
                compound.default_height(),
            )?;
            Ok(Arc::new(Crs::Compound(rotated)))
        }
        _ => Err(Error::Configuration(format!(
            "expected a geographic CRS, got {}",
            crs.crs_type()
        ))),
    }
}

fn geocentric_on(datum: &GeodeticDatum, title: &str) -> Arc<Crs> {
    let crs = GeocentricCrs::with_default_axes(Identity::named(title), Arc::new(datum.clone()));
    Arc::new(Crs::Geocentric(crs))
}

fn required(
    parameters: &BTreeMap<SupportedTransformationParameter, f64>,
    parameter: SupportedTransformationParameter,
) -> Result<f64, Error> {
    parameters
        .get(&parameter)
        .copied()
        .ok_or_else(|| Error::MissingParam(format!("{parameter:?}")))
}

// ----- O P E R A T I O N   D E F I N I T I O N S ---------------------------------------

/// One parameter of an [`OperationDefinition`]: The codes naming it, its
/// value, and the unit of the value. Without a unit, the value is taken to
/// be in the customary unit of the parameter: Metres for translations,
/// arc seconds for rotations, ppm for scale differences, and degrees for
/// longitude offsets.
#[derive(Debug, Clone)]
pub struct OperationParameterValue {
    pub codes: Vec<CrsCode>,
    pub value: f64,
    pub unit: Option<Unit>,
}

/// An operation method and its parameter values, in the shape of an EPSG
/// coordinate operation
#[derive(Debug, Clone, Default)]
pub struct OperationDefinition {
    pub method: Vec<CrsCode>,
    pub parameters: Vec<OperationParameterValue>,
}

impl OperationDefinition {
    /// A definition with a method given by name or code
    pub fn new(method: &str) -> OperationDefinition {
        OperationDefinition {
            method: vec![CrsCode::parse(method)],
            parameters: Vec::new(),
        }
    }

    /// Add a parameter given by name or code, in its customary unit
    pub fn with(mut self, parameter: &str, value: f64) -> OperationDefinition {
        self.parameters.push(OperationParameterValue {
            codes: vec![CrsCode::parse(parameter)],
            value,
            unit: None,
        });
        self
    }

    /// Add a parameter given by name or code, and a unit
    pub fn with_unit(mut self, parameter: &str, value: f64, unit: Unit) -> OperationDefinition {
        self.parameters.push(OperationParameterValue {
            codes: vec![CrsCode::parse(parameter)],
            value,
            unit: Some(unit),
        });
        self
    }

    // The supported parameters, with values converted to the units used
    // by the transformation constructors
    fn classified(&self) -> Result<BTreeMap<SupportedTransformationParameter, f64>, Error> {
        use SupportedTransformationParameter as P;
        let mut parameters = BTreeMap::new();
        for parameter in &self.parameters {
            let kind = P::from_codes(&parameter.codes);
            let name = parameter.codes.first().map(|c| c.to_string()).unwrap_or_default();
            if !kind.is_supported() {
                warn!("ignoring unsupported operation parameter '{name}'");
                continue;
            }

            // The customary unit, and the unit expected by the constructors
            let (customary, wanted) = match kind {
                P::XAxisTranslation | P::YAxisTranslation | P::ZAxisTranslation => {
                    (Unit::METRE, Unit::METRE)
                }
                P::XAxisRotation | P::YAxisRotation | P::ZAxisRotation => {
                    (Unit::ARC_SECOND, Unit::ARC_SECOND)
                }
                P::ScaleDifference => (Unit::PPM, Unit::PPM),
                P::LongitudeOffset => (Unit::DEGREE, Unit::RADIAN),
                _ => {
                    parameters.insert(kind, parameter.value);
                    continue;
                }
            };
            let unit = parameter.unit.unwrap_or(customary);
            if unit.kind() != wanted.kind() {
                return Err(Error::BadParam(
                    name,
                    format!("unit '{}' is not {:?}", unit.name(), wanted.kind()),
                ));
            }
            parameters.insert(kind, wanted.from_base(unit.to_base(parameter.value)));
        }
        Ok(parameters)
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn equal_crs() -> Result<(), Error> {
        let ctx = Minimal::new();
        let wgs84 = ctx.crs("EPSG:4326")?;
        let t = TransformationFactory::create(&wgs84, &ctx.crs("urn:ogc:def:crs:EPSG::4326")?)?;
        assert!(t.is_identity());
        assert_eq!(t.transformation_path(), "(0)Forward Identity");

        // Axis swap only
        let t = TransformationFactory::create(&wgs84, &ctx.crs("CRS:84")?)?;
        assert_eq!(t.transformation_path(), "(0)Forward Identity");
        let result = t.do_transform(&[Coor3D::raw(55., 12., 0.)])?;
        assert!(result[0].hypot3(&Coor3D::raw(12., 55., 0.)) < 1e-12);
        Ok(())
    }

    #[test]
    fn ed50_to_wgs84() -> Result<(), Error> {
        let ctx = Minimal::new();
        let ed50 = ctx.crs("EPSG:4230")?;
        let wgs84 = ctx.crs("EPSG:4326")?;
        let t = TransformationFactory::create(&ed50, &wgs84)?;
        assert_eq!(
            t.transformation_path(),
            "(0)Forward Geographic-Geocentric->(1)Forward Helmert->(2)Inverse Geographic-Geocentric"
        );

        // Around 100 m east and 100 m north of where we started
        let p = [Coor3D::raw(55., 12., 0.)];
        let q = t.do_transform(&p)?;
        let dlat = (q[0][0] - 55.) * 111_000.;
        let dlon = (q[0][1] - 12.) * 64_000.;
        assert!(dlat.abs() > 50. && dlat.abs() < 200., "{dlat}");
        assert!(dlon.abs() > 50. && dlon.abs() < 200., "{dlon}");

        let back = TransformationFactory::create(&wgs84, &ed50)?.do_transform(&q)?;
        assert_float_eq!(back[0][0], 55., abs <= 1e-9);
        assert_float_eq!(back[0][1], 12., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn ntf_paris() -> Result<(), Error> {
        let ctx = Minimal::new();
        let paris = ctx.crs("EPSG:4807")?;
        let ntf = ctx.crs("EPSG:4275")?;

        // Same datum, different prime meridians: Only a longitude rotation.
        // NTF (Paris) is latitude/longitude in grads
        let t = TransformationFactory::create(&paris, &ntf)?;
        assert_eq!(t.transformation_path(), "(0)Forward Longitude-Rotation");
        let q = t.do_transform(&[Coor3D::raw(51., 0., 0.)])?;
        assert_float_eq!(q[0][0], 45.9, abs <= 1e-12);
        assert_float_eq!(q[0][1], 2.337_229_166_666_667, abs <= 1e-12);

        // To WGS84, the rotation comes first
        let t = TransformationFactory::create(&paris, &ctx.crs("EPSG:4326")?)?;
        assert!(t.transformation_path().starts_with("(0)Forward Longitude-Rotation->(1)Forward Geographic-Geocentric"));
        let q = t.do_transform(&[Coor3D::raw(51., 0., 0.)])?;
        let back = t.inverse().do_transform(&q)?;
        assert_float_eq!(back[0][0], 51., abs <= 1e-9);
        assert_float_eq!(back[0][1], 0., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn projected_chains() -> Result<(), Error> {
        let ctx = Minimal::new();
        let etrs89 = ctx.crs("EPSG:4258")?;
        let utm32 = ctx.crs("EPSG:25832")?;
        let utm33 = ctx.crs("EPSG:25833")?;

        let t = TransformationFactory::create(&etrs89, &utm32)?;
        assert_eq!(t.transformation_path(), "(0)Forward Projection");
        let p = t.do_transform(&[Coor3D::raw(55., 12., 0.)])?;
        assert_float_eq!(p[0][0], 691_875.632_139_661, abs <= 1e-3);
        assert_float_eq!(p[0][1], 6_098_907.825_005_012, abs <= 1e-3);

        // Zone to zone: Unproject, then project
        let t = TransformationFactory::create(&utm32, &utm33)?;
        assert_eq!(t.transformation_path(), "(0)Inverse Projection->(1)Forward Projection");
        let q = t.do_transform(&p)?;
        let back = t.inverse().do_transform(&q)?;
        assert_float_eq!(back[0][0], p[0][0], abs <= 1e-3);
        assert_float_eq!(back[0][1], p[0][1], abs <= 1e-3);

        // ETRS89 and WGS84 differ in ellipsoid only, so go through geocentric
        // space, where the identity Helmerts are dropped
        let t = TransformationFactory::create(&utm32, &ctx.crs("EPSG:32632")?)?;
        assert_eq!(
            t.transformation_path(),
            "(0)Inverse Projection->(1)Forward Geographic-Geocentric->(2)Inverse Geographic-Geocentric->(3)Forward Projection"
        );
        let q = t.do_transform(&p)?;
        assert_float_eq!(q[0][0], p[0][0], abs <= 1e-3);
        assert_float_eq!(q[0][1], p[0][1], abs <= 1e-3);
        Ok(())
    }

    #[test]
    fn missing_datum_shift() -> Result<(), Error> {
        let ctx = Minimal::new();
        let datum = GeodeticDatum::new(
            Identity::named("Unknown"),
            Ellipsoid::named("bessel")?,
            PrimeMeridian::greenwich(),
            None,
        );
        let axes = vec![Axis::latitude(Unit::DEGREE), Axis::longitude(Unit::DEGREE)];
        let unknown = GeographicCrs::new(Identity::named("Unknown"), Arc::new(datum), axes)?;
        let unknown = Arc::new(Crs::Geographic(unknown));
        let err = TransformationFactory::create(&unknown, &ctx.crs("EPSG:4326")?);
        assert!(matches!(err, Err(Error::Unsupported(_))));
        Ok(())
    }

    #[test]
    fn same_ellipsoid_without_datum_shift() -> Result<(), Error> {
        let mut ctx = Minimal::new();
        ctx.register_definition("LOCAL:1", "geographic title=Tokyo datum=Tokyo ellps=bessel axis=lat,lon")?;
        ctx.register_definition(
            "LOCAL:2",
            "geographic title=DHDN datum=Deutsches_Hauptdreiecksnetz ellps=bessel axis=lat,lon",
        )?;

        // Different datums on the same ellipsoid: No way between them
        let err = ctx.transformation_between("LOCAL:1", "LOCAL:2");
        assert!(matches!(err, Err(Error::Unsupported(_))));

        // ... but the same datum seen in two axis orders is fine
        ctx.register_definition("LOCAL:3", "geographic title=Tokyo_lon_lat datum=Tokyo ellps=bessel")?;
        let t = ctx.transformation_between("LOCAL:1", "LOCAL:3")?;
        assert_eq!(t.transformation_path(), "(0)Forward Identity");
        Ok(())
    }

    #[test]
    fn operations() -> Result<(), Error> {
        let ctx = Minimal::new();
        let ed50 = ctx.crs("EPSG:4230")?;
        let wgs84 = ctx.crs("EPSG:4326")?;

        // The same shift as the one derived from the datum definitions
        let definition = OperationDefinition::new("EPSG:9603")
            .with("X-axis translation", -87.)
            .with("EPSG:8606", -98.)
            .with("urn:ogc:def:parameter:EPSG::8607", -121.)
            .with("Flux capacitor setting", 1.21);
        let t = TransformationFactory::from_operation(&definition, &ed50, &wgs84)?;
        let u = TransformationFactory::create(&ed50, &wgs84)?;
        let p = [Coor3D::raw(55., 12., 0.)];
        let (q, r) = (t.do_transform(&p)?, u.do_transform(&p)?);
        assert_float_eq!(q[0][0], r[0][0], abs <= 1e-12);
        assert_float_eq!(q[0][1], r[0][1], abs <= 1e-12);

        // Required parameters
        let definition = OperationDefinition::new("Geocentric translations")
            .with("X-axis translation", -87.)
            .with("Y-axis translation", -98.);
        let err = TransformationFactory::from_operation(&definition, &ed50, &wgs84);
        assert!(matches!(err, Err(Error::MissingParam(_))));

        // Unsupported methods
        let definition = OperationDefinition::new("NTv2");
        let err = TransformationFactory::from_operation(&definition, &ed50, &wgs84);
        assert!(matches!(err, Err(Error::Unsupported(_))));

        // Units
        let ntf = ctx.crs("EPSG:4275")?;
        let paris = ctx.crs("EPSG:4807")?;
        let definition = OperationDefinition::new("Longitude rotation")
            .with_unit("Longitude offset", 2.596_921_296_3, Unit::GRAD);
        let t = TransformationFactory::from_operation(&definition, &paris, &ntf)?;
        let q = t.do_transform(&[Coor3D::raw(51., 0., 0.)])?;
        assert_float_eq!(q[0][1], 2.337_229_166_666_667, abs <= 1e-9);
        let definition = OperationDefinition::new("9601").with_unit("8602", 1., Unit::METRE);
        let err = TransformationFactory::from_operation(&definition, &paris, &ntf);
        assert!(matches!(err, Err(Error::BadParam(..))));
        Ok(())
    }

    #[test]
    fn polynomial_operation() -> Result<(), Error> {
        let ctx = Minimal::new();
        let utm32 = ctx.crs("EPSG:25832")?;
        let definition = OperationDefinition::new("General polynomial of degree 2")
            .with("Ordinate 1 of evaluation point in source CRS", 500_000.)
            .with("Ordinate 2 of evaluation point in source CRS", 6_000_000.)
            .with("Ordinate 1 of evaluation point in target CRS", 500_000.)
            .with("Ordinate 2 of evaluation point in target CRS", 6_000_000.)
            .with("Point scaling factor", 1e-3)
            .with("A0", 1.)
            .with("B2", 0.5);
        let t = TransformationFactory::from_operation(&definition, &utm32, &utm32)?;
        let q = t.do_transform(&[Coor3D::raw(501_000., 6_002_000., 0.)])?;
        assert_float_eq!(q[0][0], 501_001., abs <= 1e-9);
        assert_float_eq!(q[0][1], 6_002_001., abs <= 1e-9);

        let definition = OperationDefinition::new("9645").with("A0", 1.);
        let err = TransformationFactory::from_operation(&definition, &utm32, &utm32);
        assert!(matches!(err, Err(Error::MissingParam(_))));
        Ok(())
    }
}
