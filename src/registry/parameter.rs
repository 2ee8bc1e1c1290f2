//! The typed parameters of a CRS definition
use crate::authoring::*;

/// The `OpParameter` enumeration is used to represent which defining
/// parameters are valid for a given kind of CRS definition.
///
/// Each kind of definition uses these to define the types of the parameters
/// accepted, and whether they are *required* (in which case the default
/// value is set to `None`), or *optional* (in which case a default value of
/// the proper type is provided). The odd man out here is the `Flag` type:
/// Since a flag is a boolean which is true if present and false if not, it
/// does not make much sense to provide a default in this case.
///
/// Any other parameters given are ignored, but warned about.
///
/// For a given kind of definition, the union of the sets of its required and
/// optional parameters is called the *gamut* of the definition.
#[derive(Debug)]
pub enum OpParameter {
    /// A flag is a boolean that is true if present, false if not
    Flag { key: &'static str },
    /// The natural numbers + zero (𝐍₀ or 𝐖 in math terms)
    Natural {
        key: &'static str,
        default: Option<usize>,
    },
    /// Reals (𝐑 in math terms)
    Real {
        key: &'static str,
        default: Option<f64>,
    },
    /// A series of reals (𝐑ⁿ in math terms). An empty default means
    /// "absent unless given"
    Series {
        key: &'static str,
        default: Option<&'static str>,
    },
    /// Any kind of text
    Text {
        key: &'static str,
        default: Option<&'static str>,
    },
}

impl OpParameter {
    fn key(&self) -> &'static str {
        match self {
            OpParameter::Flag { key } => key,
            OpParameter::Natural { key, .. } => key,
            OpParameter::Real { key, .. } => key,
            OpParameter::Series { key, .. } => key,
            OpParameter::Text { key, .. } => key,
        }
    }
}

/// The parameters of a definition, parsed according to a gamut, and placed
/// in bins by type
#[derive(Debug, Clone, Default)]
pub struct ParsedParameters {
    /// The first bare word of the definition
    pub name: String,
    pub boolean: BTreeSet<&'static str>,
    pub natural: BTreeMap<&'static str, usize>,
    pub real: BTreeMap<&'static str, f64>,
    pub series: BTreeMap<&'static str, Vec<f64>>,
    pub text: BTreeMap<&'static str, String>,
    /// Parameters given, but not in the gamut
    pub ignored: Vec<String>,
    pub given: BTreeMap<String, String>,
}

// Accessors
impl ParsedParameters {
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean.contains(key)
    }
    pub fn natural(&self, key: &str) -> Result<usize, Error> {
        if let Some(value) = self.natural.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn real(&self, key: &str) -> Result<f64, Error> {
        if let Some(value) = self.real.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    /// `None` if neither given, nor defaulted
    pub fn series(&self, key: &str) -> Option<&[f64]> {
        self.series.get(key).map(|s| s.as_slice())
    }
    pub fn text(&self, key: &str) -> Result<String, Error> {
        if let Some(value) = self.text.get(key) {
            return Ok(value.to_string());
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn ignored(&self) -> Vec<String> {
        self.ignored.clone()
    }
}

impl ParsedParameters {
    pub fn new(definition: &str, gamut: &[OpParameter]) -> Result<ParsedParameters, Error> {
        let given = split_into_parameters(definition);
        let mut boolean = BTreeSet::<&'static str>::new();
        let mut natural = BTreeMap::<&'static str, usize>::new();
        let mut real = BTreeMap::<&'static str, f64>::new();
        let mut series = BTreeMap::<&'static str, Vec<f64>>::new();
        let mut text = BTreeMap::<&'static str, String>::new();

        // Try to locate all accepted parameters, type check, and place them into
        // their proper bins
        for p in gamut {
            match *p {
                OpParameter::Flag { key } => {
                    if let Some(value) = given.get(key) {
                        if value.is_empty() || value.to_lowercase() == "true" {
                            boolean.insert(key);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a boolean constant!");
                        return Err(Error::BadParam(key.to_string(), value.to_string()));
                    }
                    // Flags are always optional (i.e. implicitly false when not given)
                    continue;
                }

                OpParameter::Natural { key, default } => {
                    if let Some(value) = given.get(key) {
                        if let Ok(v) = value.parse::<usize>() {
                            natural.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a natural number!");
                        return Err(Error::BadParam(key.to_string(), value.to_string()));
                    }

                    // Key not found - default given?
                    if let Some(value) = default {
                        natural.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Real { key, default } => {
                    if let Some(value) = given.get(key) {
                        if let Ok(v) = value.parse::<f64>() {
                            real.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a real number");
                        return Err(Error::BadParam(key.to_string(), value.to_string()));
                    }

                    if let Some(value) = default {
                        real.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Series { key, default } => {
                    let value = match (given.get(key), default) {
                        (Some(value), _) => value.as_str(),
                        // Defaults to nothing, so we just continue with the next parameter
                        (None, Some("")) => continue,
                        (None, Some(value)) => value,
                        (None, None) => {
                            error!("Missing required parameter '{key}'");
                            return Err(Error::MissingParam(key.to_string()));
                        }
                    };
                    let mut elements = Vec::<f64>::new();
                    for element in value.split(',') {
                        let Ok(v) = element.trim().parse::<f64>() else {
                            warn!("Cannot parse {key}:{value} as a series");
                            return Err(Error::BadParam(key.to_string(), value.to_string()));
                        };
                        elements.push(v);
                    }
                    series.insert(key, elements);
                }

                OpParameter::Text { key, default } => {
                    if let Some(value) = given.get(key) {
                        text.insert(key, value.to_string());
                        continue;
                    }

                    if let Some(value) = default {
                        text.insert(key, value.to_string());
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }
            };
        }

        let name = given.get("name").cloned().unwrap_or_default();
        let ignored: Vec<String> = given
            .keys()
            .filter(|key| *key != "name" && !gamut.iter().any(|p| p.key() == key.as_str()))
            .cloned()
            .collect();
        for key in &ignored {
            warn!("{name}: ignoring unknown parameter '{key}'");
        }

        Ok(ParsedParameters {
            name,
            boolean,
            natural,
            real,
            series,
            text,
            ignored,
            given,
        })
    }
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const GAMUT: [OpParameter; 6] = [
        OpParameter::Flag    { key: "flag" },
        OpParameter::Natural { key: "natural",  default: Some(0) },
        OpParameter::Real    { key: "real",     default: Some(1.25) },
        OpParameter::Series  { key: "series",   default: Some("1,2,3,4") },
        OpParameter::Series  { key: "absent",   default: Some("") },
        OpParameter::Text    { key: "text",     default: Some("text") },
    ];

    #[test]
    fn basic() -> Result<(), Error> {
        let p = ParsedParameters::new("cucumber flag real = 2.5 bogus=1", &GAMUT)?;
        assert_eq!(p.name, "cucumber");

        // Booleans correctly parsed?
        assert!(p.boolean("flag"));
        assert!(!p.boolean("galf"));

        // Series correctly parsed?
        let series = p.series("series").unwrap_or_default();
        assert_eq!(series.len(), 4);
        assert_eq!(series[0], 1.);
        assert_eq!(series[3], 4.);
        assert!(p.series("absent").is_none());

        // Etc.
        assert_eq!(p.natural("natural")?, 0_usize);
        assert_eq!(p.real("real")?, 2.5);
        assert_eq!(p.text("text")?, "text");
        assert_eq!(p.ignored(), ["bogus"]);
        Ok(())
    }

    #[test]
    fn malformed() {
        assert!(matches!(
            ParsedParameters::new("cucumber natural=-1", &GAMUT),
            Err(Error::BadParam(..))
        ));
        assert!(matches!(
            ParsedParameters::new("cucumber series=1,two", &GAMUT),
            Err(Error::BadParam(..))
        ));
        let gamut = [OpParameter::Real { key: "required", default: None }];
        assert!(matches!(
            ParsedParameters::new("cucumber", &gamut),
            Err(Error::MissingParam(_))
        ));
    }
}
