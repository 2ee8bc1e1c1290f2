//! The text form of CRS definitions:
//!
//! ```txt
//! geographic title=ED50 ellps=intl towgs84=-87,-98,-121 axis=lat,lon unit=deg pm=greenwich
//! geocentric title=WGS_84 ellps=WGS84 towgs84=0,0,0
//! projected  title=ETRS89_/_UTM_32N base=EPSG:4258 proj=utm zone=32 axis=e,n
//! compound   title=WGS_84_3D base=EPSG:4326 height=0 height_unit=m
//! ```
//!
//! The first word gives the kind of CRS, the rest are `key=value` pairs.
//! Underscores in `title` and `datum` are read as spaces.
use crate::authoring::*;
use crate::crs::UnitKind;
use crate::projection::ProjectionMethod;

#[rustfmt::skip]
const GEOGRAPHIC: [OpParameter; 8] = [
    OpParameter::Text   { key: "title",   default: Some("") },
    OpParameter::Text   { key: "datum",   default: Some("") },
    OpParameter::Text   { key: "ellps",   default: Some("GRS80") },
    OpParameter::Series { key: "towgs84", default: Some("") },
    OpParameter::Text   { key: "pm",      default: Some("greenwich") },
    OpParameter::Text   { key: "axis",    default: Some("lon,lat") },
    OpParameter::Text   { key: "unit",    default: Some("deg") },
    OpParameter::Text   { key: "range",   default: Some("signed") },
];

#[rustfmt::skip]
const GEOCENTRIC: [OpParameter; 6] = [
    OpParameter::Text   { key: "title",   default: Some("") },
    OpParameter::Text   { key: "datum",   default: Some("") },
    OpParameter::Text   { key: "ellps",   default: Some("GRS80") },
    OpParameter::Series { key: "towgs84", default: Some("") },
    OpParameter::Text   { key: "pm",      default: Some("greenwich") },
    OpParameter::Text   { key: "unit",    default: Some("m") },
];

#[rustfmt::skip]
const PROJECTED: [OpParameter; 15] = [
    OpParameter::Text    { key: "title",  default: Some("") },
    OpParameter::Text    { key: "base",   default: None },
    OpParameter::Text    { key: "proj",   default: None },
    OpParameter::Natural { key: "zone",   default: Some(0) },
    OpParameter::Flag    { key: "south" },
    OpParameter::Real    { key: "lat_0",  default: Some(f64::NAN) },
    OpParameter::Real    { key: "lon_0",  default: Some(0.) },
    OpParameter::Real    { key: "lat_1",  default: Some(0.) },
    OpParameter::Real    { key: "lat_2",  default: Some(f64::NAN) },
    OpParameter::Real    { key: "lat_ts", default: Some(0.) },
    OpParameter::Real    { key: "k_0",    default: Some(1.) },
    OpParameter::Real    { key: "x_0",    default: Some(0.) },
    OpParameter::Real    { key: "y_0",    default: Some(0.) },
    OpParameter::Text    { key: "axis",   default: Some("e,n") },
    OpParameter::Text    { key: "unit",   default: Some("m") },
];

#[rustfmt::skip]
const COMPOUND: [OpParameter; 5] = [
    OpParameter::Text { key: "title",       default: Some("") },
    OpParameter::Text { key: "base",        default: None },
    OpParameter::Real { key: "height",      default: Some(0.) },
    OpParameter::Text { key: "height_unit", default: Some("m") },
    OpParameter::Text { key: "height_axis", default: Some("up") },
];

/// Split a definition into a map of `key=value` pairs. A leading bare word
/// is stored under the key `name`, other bare words (flags) get the value
/// `true`.
pub fn split_into_parameters(definition: &str) -> BTreeMap<String, String> {
    // Conflate contiguous whitespace, then remove whitespace around {"=", ","}
    let definition = definition.trim().to_string();
    let elements: Vec<_> = definition.split_whitespace().collect();
    let definition = elements
        .join(" ")
        .replace("= ", "=")
        .replace(", ", ",")
        .replace(" =", "=")
        .replace(" ,", ",");

    let mut params = BTreeMap::new();
    for element in definition.split_whitespace() {
        // Split a key=value-pair into key and value parts
        let (key, value) = element.split_once('=').unwrap_or((element, "true"));

        // If the first arg is a key-without-value, it is the kind of definition
        if params.is_empty() && !element.contains('=') {
            params.insert(String::from("name"), String::from(key));
            continue;
        }

        params.insert(String::from(key), String::from(value));
    }

    params
}

/// Parse the text `definition` of the CRS with code `code`. CRSs referred
/// to by the definition (through `base=...`) are looked up by `lookup`.
pub fn parse(
    code: &str,
    definition: &str,
    lookup: &dyn Fn(&str) -> Result<Arc<Crs>, Error>,
) -> Result<Crs, Error> {
    let kind = split_into_parameters(definition)
        .remove("name")
        .unwrap_or_default();
    trace!("{code}: parsing {kind} definition");
    match kind.as_str() {
        "geographic" => geographic(code, definition),
        "geocentric" => geocentric(code, definition),
        "projected" => projected(code, definition, lookup),
        "compound" => compound(code, definition, lookup),
        _ => Err(Error::BadParam(
            code.to_string(),
            format!("unknown kind of CRS: '{kind}'"),
        )),
    }
}

fn identity(code: &str, params: &ParsedParameters, fallback: &str) -> Result<Identity, Error> {
    let title = params.text("title")?.replace('_', " ");
    let title = if title.is_empty() { fallback.to_string() } else { title };
    Ok(Identity::new(CrsCode::parse(code), &title))
}

fn unit(params: &ParsedParameters, key: &str, kind: UnitKind) -> Result<Unit, Error> {
    let unit = Unit::named(&params.text(key)?)?;
    if unit.kind() != kind {
        return Err(Error::BadParam(
            key.to_string(),
            format!("expected a {kind:?} unit, got '{}'", unit.name()),
        ));
    }
    Ok(unit)
}

fn datum(params: &ParsedParameters, title: &str) -> Result<Arc<GeodeticDatum>, Error> {
    let name = params.text("datum")?.replace('_', " ");
    let name = if name.is_empty() { title.to_string() } else { name };
    let ellipsoid = Ellipsoid::named(&params.text("ellps")?)?;
    let prime_meridian = PrimeMeridian::named(&params.text("pm")?)?;
    let to_wgs84 = params.series("towgs84").map(Helmert::from_towgs84).transpose()?;
    Ok(Arc::new(GeodeticDatum::new(
        Identity::named(&name),
        ellipsoid,
        prime_meridian,
        to_wgs84,
    )))
}

// The comma separated orientations of the `axis` parameter
fn axes(params: &ParsedParameters, unit: Unit, projected: bool) -> Result<Vec<Axis>, Error> {
    let given = params.text("axis")?;
    let mut axes = Vec::new();
    for abbreviation in given.split(',') {
        let Some(orientation) = AxisOrientation::parse(abbreviation.trim()) else {
            return Err(Error::BadParam("axis".to_string(), given.clone()));
        };
        use AxisOrientation::*;
        let name = match (orientation, projected) {
            (North | South, false) => "Latitude",
            (East | West, false) => "Longitude",
            (North | South, true) => "Northing",
            (East | West, true) => "Easting",
            _ => "Height",
        };
        axes.push(Axis::new(name, orientation, unit));
    }
    Ok(axes)
}

fn geographic(code: &str, definition: &str) -> Result<Crs, Error> {
    let params = ParsedParameters::new(definition, &GEOGRAPHIC)?;
    let identity = identity(code, &params, code)?;
    let datum = datum(&params, identity.name())?;
    let unit = unit(&params, "unit", UnitKind::Angular)?;
    let axes = axes(&params, unit, false)?;
    let range = match params.text("range")?.as_str() {
        "signed" => LongitudeRange::Signed,
        "positive" => LongitudeRange::Positive,
        other => return Err(Error::BadParam("range".to_string(), other.to_string())),
    };
    let crs = GeographicCrs::new(identity, datum, axes)?.with_longitude_range(range);
    Ok(Crs::Geographic(crs))
}

fn geocentric(code: &str, definition: &str) -> Result<Crs, Error> {
    let params = ParsedParameters::new(definition, &GEOCENTRIC)?;
    let identity = identity(code, &params, code)?;
    let datum = datum(&params, identity.name())?;
    let unit = unit(&params, "unit", UnitKind::Linear)?;
    let axes = GeocentricCrs::default_axes()
        .iter()
        .map(|axis| axis.with_unit(unit))
        .collect();
    Ok(Crs::Geocentric(GeocentricCrs::new(identity, datum, axes)?))
}

fn projected(
    code: &str,
    definition: &str,
    lookup: &dyn Fn(&str) -> Result<Arc<Crs>, Error>,
) -> Result<Crs, Error> {
    let params = ParsedParameters::new(definition, &PROJECTED)?;
    let identity = identity(code, &params, code)?;
    let base = lookup(&params.text("base")?)?;
    let proj = params.text("proj")?;

    let projection = if proj == "utm" {
        let zone = params.natural("zone")?;
        Projection::utm(base, zone, !params.boolean("south"))?
    } else {
        let method = ProjectionMethod::named(&proj)?;
        let parameters = ProjectionParameters {
            lat_0: params.real("lat_0")?,
            lon_0: params.real("lon_0")?,
            lat_1: params.real("lat_1")?,
            lat_2: params.real("lat_2")?,
            lat_ts: params.real("lat_ts")?,
            k_0: params.real("k_0")?,
            x_0: params.real("x_0")?,
            y_0: params.real("y_0")?,
        };
        Projection::new(method, parameters, base)?
    };

    let unit = unit(&params, "unit", UnitKind::Linear)?;
    let axes = axes(&params, unit, true)?;
    Ok(Crs::Projected(ProjectedCrs::new(identity, projection, axes)?))
}

fn compound(
    code: &str,
    definition: &str,
    lookup: &dyn Fn(&str) -> Result<Arc<Crs>, Error>,
) -> Result<Crs, Error> {
    let params = ParsedParameters::new(definition, &COMPOUND)?;
    let base = lookup(&params.text("base")?)?;
    let identity = identity(code, &params, &format!("{} + height", base.name()))?;
    let unit = unit(&params, "height_unit", UnitKind::Linear)?;
    let orientation = match AxisOrientation::parse(&params.text("height_axis")?) {
        Some(o @ (AxisOrientation::Up | AxisOrientation::Down)) => o,
        _ => {
            return Err(Error::BadParam(
                "height_axis".to_string(),
                params.text("height_axis")?,
            ))
        }
    };
    let height_axis = Axis::new("Height", orientation, unit);
    let height = params.real("height")?;
    let crs = CompoundCrs::new(identity, base, height_axis, height)?;
    Ok(Crs::Compound(crs))
}

// ----- T E S T S ------------------------------------------------------------------
