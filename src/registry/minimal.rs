use super::*;

// ----- T H E   M I N I M A L   R E G I S T R Y -----------------------------------------

/// A minimalistic registry, supporting only built in and run-time defined
/// CRSs. Usually sufficient for cartographic uses, and for internal test
/// authoring.
#[derive(Debug, Default)]
pub struct Minimal {
    /// The CRSs known, by normalized code
    crs: BTreeMap<String, Arc<Crs>>,
    /// Instantiations of transformations
    transformations: BTreeMap<OpHandle, Transformation>,
}

const BAD_ID_MESSAGE: Error = Error::General("Minimal: Unknown transformation id");

impl Registry for Minimal {
    fn new() -> Minimal {
        let mut registry = Minimal::default();
        register_builtins(&mut registry);
        registry
    }

    fn crs(&self, code: &str) -> Result<Arc<Crs>, Error> {
        self.crs
            .get(&normalized(code))
            .cloned()
            .ok_or_else(|| Error::NotFound(code.to_string(), ": CRS".to_string()))
    }

    fn register(&mut self, code: &str, crs: Arc<Crs>) {
        self.crs.insert(normalized(code), crs);
    }

    fn op(&mut self, source: &str, target: &str) -> Result<OpHandle, Error> {
        let transformation = self.transformation_between(source, target)?;
        let id = OpHandle::new();
        self.transformations.insert(id, transformation);
        Ok(id)
    }

    fn transformation(&self, op: OpHandle) -> Result<&Transformation, Error> {
        self.transformations.get(&op).ok_or(BAD_ID_MESSAGE)
    }
}

// ----- T E S T S ------------------------------------------------------------------
