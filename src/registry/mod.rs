//! Registries: The mode of communication between the library and its
//! surroundings, i.e. the CRS definitions available, and the
//! transformations instantiated.
use crate::authoring::*;

pub mod definition;
mod minimal;
pub mod parameter;
#[cfg(feature = "with_plain")]
mod plain;

pub use minimal::Minimal;
#[cfg(feature = "with_plain")]
pub use plain::Plain;

/// Handle to a transformation instantiated by a [`Registry`]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct OpHandle(uuid::Uuid);

impl OpHandle {
    pub fn new() -> Self {
        OpHandle(uuid::Uuid::new_v4())
    }
}

impl Default for OpHandle {
    fn default() -> Self {
        OpHandle::new()
    }
}

// ----- T H E   R E G I S T R Y   T R A I T ---------------------------------------------

/// The `Registry` trait defines how CRSs are looked up by code, and how
/// transformations between them are instantiated and applied.
///
/// Codes are normalized through [`CrsCode`], so `epsg:4326`,
/// `urn:ogc:def:crs:EPSG::4326` and `EPSG:4326` all refer to the same
/// entry.
pub trait Registry {
    /// In general, implementations should make sure that `new` differs from
    /// `default` only by adding the built in CRS definitions
    fn new() -> Self
    where
        Self: Sized;

    /// Look up the CRS registered under `code`
    fn crs(&self, code: &str) -> Result<Arc<Crs>, Error>;

    /// Register `crs` under `code`, replacing any earlier registration
    fn register(&mut self, code: &str, crs: Arc<Crs>);

    /// Parse the text `definition`, and register the result under `code`
    fn register_definition(&mut self, code: &str, definition: &str) -> Result<Arc<Crs>, Error> {
        let crs = definition::parse(code, definition, &|base| self.crs(base))?;
        let crs = Arc::new(crs);
        self.register(code, crs.clone());
        Ok(crs)
    }

    /// Instantiate the transformation from `source` to `target`
    fn op(&mut self, source: &str, target: &str) -> Result<OpHandle, Error>;

    /// The transformation instantiated as `op`
    fn transformation(&self, op: OpHandle) -> Result<&Transformation, Error>;

    /// Apply the transformation `op` to `operands`, in the direction given
    fn apply(
        &self,
        op: OpHandle,
        direction: Direction,
        operands: &mut dyn CoordinateSet,
    ) -> Result<usize, Error> {
        let transformation = self.transformation(op)?;
        match direction {
            Fwd => transformation.apply(operands),
            Inv => transformation.inverse().apply(operands),
        }
    }

    /// The transformation between the CRSs registered as `source` and
    /// `target`, without instantiating it in the registry
    fn transformation_between(&self, source: &str, target: &str) -> Result<Transformation, Error> {
        TransformationFactory::create(&self.crs(source)?, &self.crs(target)?)
    }
}

/// The canonical form of a CRS code, used as registry key
pub fn normalized(code: &str) -> String {
    CrsCode::parse(code).to_string()
}

// The CRSs known by all registries. Bases before the CRSs built on them.
#[rustfmt::skip]
pub const BUILTIN_CRS: [(&str, &str); 13] = [
    ("EPSG:4978",  "geocentric title=WGS_84 datum=World_Geodetic_System_1984 ellps=WGS84 towgs84=0,0,0"),
    ("EPSG:4979",  "compound title=WGS_84_(3D) base=EPSG:4326 height=0"),
    ("EPSG:4258",  "geographic title=ETRS89 datum=European_Terrestrial_Reference_System_1989 ellps=GRS80 towgs84=0,0,0 axis=lat,lon"),
    ("EPSG:4230",  "geographic title=ED50 datum=European_Datum_1950 ellps=intl towgs84=-87,-98,-121 axis=lat,lon"),
    ("EPSG:4275",  "geographic title=NTF datum=Nouvelle_Triangulation_Francaise ellps=clrk80ign towgs84=-168,-60,320 axis=lat,lon"),
    ("EPSG:4807",  "geographic title=NTF_(Paris) datum=Nouvelle_Triangulation_Francaise_(Paris) ellps=clrk80ign towgs84=-168,-60,320 pm=paris axis=lat,lon unit=grad"),
    ("EPSG:25832", "projected title=ETRS89_/_UTM_zone_32N base=EPSG:4258 proj=utm zone=32"),
    ("EPSG:25833", "projected title=ETRS89_/_UTM_zone_33N base=EPSG:4258 proj=utm zone=33"),
    ("EPSG:32632", "projected title=WGS_84_/_UTM_zone_32N base=EPSG:4326 proj=utm zone=32"),
    ("EPSG:32633", "projected title=WGS_84_/_UTM_zone_33N base=EPSG:4326 proj=utm zone=33"),
    ("EPSG:32732", "projected title=WGS_84_/_UTM_zone_32S base=EPSG:4326 proj=utm zone=32 south"),
    ("EPSG:3395",  "projected title=WGS_84_/_World_Mercator base=EPSG:4326 proj=merc"),
    ("EPSG:3034",  "projected title=ETRS89-extended_/_LCC_Europe base=EPSG:4258 proj=lcc lat_0=52 lon_0=10 lat_1=35 lat_2=65 x_0=4000000 y_0=2800000 axis=n,e"),
];

/// Register the canonical WGS84 instances, and the built in definitions.
/// The built ins are known to be good, so a failing one is logged, not
/// propagated.
pub fn register_builtins(registry: &mut dyn Registry) {
    registry.register("EPSG:4326", Crs::wgs84_lat_lon());
    registry.register("CRS:84", Crs::wgs84_lon_lat());
    for (code, definition) in BUILTIN_CRS {
        if let Err(e) = registry.register_definition(code, definition) {
            error!("built in CRS {code}: {e}");
        }
    }
}
