use std::fmt;

/// A code identifying a CRS, an operation method, or an operation parameter.
///
/// The many spellings of an EPSG code are reduced to a code space and a
/// code: `EPSG:4326`, `urn:ogc:def:crs:EPSG::4326`,
/// `urn:ogc:def:crs:EPSG:6.11:4326`, `http://www.opengis.net/def/crs/EPSG/0/4326`
/// and `http://www.opengis.net/gml/srs/epsg.xml#4326` all parse to
/// code space `EPSG` and code `4326`. Anything else is kept as a plain name
/// with an empty code space.
#[derive(Debug, Clone)]
pub struct CrsCode {
    code_space: String,
    code: String,
    original: String,
}

impl CrsCode {
    pub fn new(code_space: &str, code: &str) -> CrsCode {
        let original = if code_space.is_empty() {
            code.to_string()
        } else {
            format!("{code_space}:{code}")
        };
        CrsCode {
            code_space: code_space.to_string(),
            code: code.to_string(),
            original,
        }
    }

    /// An EPSG code
    pub fn epsg(code: u32) -> CrsCode {
        CrsCode::new("EPSG", &code.to_string())
    }

    pub fn parse(text: &str) -> CrsCode {
        let original = text.trim().to_string();
        // ASCII only, so byte offsets in `lower` are valid in `original`
        let lower = original.to_ascii_lowercase();

        // http://www.opengis.net/gml/srs/epsg.xml#4326
        if let Some(pos) = lower.find("epsg.xml#") {
            let code = &original[pos + "epsg.xml#".len()..];
            return CrsCode::with_original("EPSG", code, &original);
        }

        // http://www.opengis.net/def/crs/EPSG/0/4326
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let parts: Vec<&str> = original.trim_end_matches('/').split('/').collect();
            if parts.len() >= 3 {
                let n = parts.len();
                return CrsCode::with_original(parts[n - 3], parts[n - 1], &original);
            }
        }

        // urn:ogc:def:crs:EPSG::4326 or urn:ogc:def:crs:EPSG:6.11:4326
        if lower.starts_with("urn:") {
            let parts: Vec<&str> = original.split(':').collect();
            if parts.len() >= 6 {
                let n = parts.len();
                return CrsCode::with_original(parts[4], parts[n - 1], &original);
            }
        }

        // EPSG:4326, CRS:84
        let parts: Vec<&str> = original.split(':').collect();
        if parts.len() == 2 {
            return CrsCode::with_original(parts[0].trim(), parts[1].trim(), &original);
        }

        CrsCode::with_original("", &original, &original)
    }

    fn with_original(code_space: &str, code: &str, original: &str) -> CrsCode {
        CrsCode {
            code_space: code_space.to_uppercase(),
            code: code.to_string(),
            original: original.to_string(),
        }
    }

    pub fn code_space(&self) -> &str {
        &self.code_space
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// The code as given, before parsing
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The numeric part, if the code space is EPSG (or absent)
    pub fn epsg_number(&self) -> Option<u32> {
        if !self.code_space.is_empty() && self.code_space != "EPSG" {
            return None;
        }
        self.code.parse::<u32>().ok()
    }

    pub fn matches_epsg(&self, number: u32) -> bool {
        self.epsg_number() == Some(number)
    }

    /// Case insensitive comparison of the code (or the name) part
    pub fn matches_name(&self, name: &str) -> bool {
        self.code.eq_ignore_ascii_case(name) || self.original.eq_ignore_ascii_case(name)
    }
}

/// Two codes are equal when their code spaces and codes are, no matter
/// how they were spelled originally
impl PartialEq for CrsCode {
    fn eq(&self, other: &Self) -> bool {
        self.code_space == other.code_space && self.code == other.code
    }
}

impl Eq for CrsCode {}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code_space.is_empty() {
            return write!(f, "{}", self.code);
        }
        write!(f, "{}:{}", self.code_space, self.code)
    }
}

/// The metadata of a registry object: Parallel lists of codes, names,
/// versions, descriptions and areas of use. Slot `i` of each list belongs
/// to the same registry entry, so the lists always have equal lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identity {
    codes: Vec<CrsCode>,
    names: Vec<String>,
    versions: Vec<String>,
    descriptions: Vec<String>,
    areas_of_use: Vec<String>,
}

impl Identity {
    pub fn new(code: CrsCode, name: &str) -> Identity {
        let mut identity = Identity::default();
        identity.push(code, name, "", "", "");
        identity
    }

    /// An identity with a name, but no code
    pub fn named(name: &str) -> Identity {
        Identity::new(CrsCode::new("", ""), name)
    }

    pub fn push(
        &mut self,
        code: CrsCode,
        name: &str,
        version: &str,
        description: &str,
        area_of_use: &str,
    ) {
        self.codes.push(code);
        self.names.push(name.to_string());
        self.versions.push(version.to_string());
        self.descriptions.push(description.to_string());
        self.areas_of_use.push(area_of_use.to_string());
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> &[CrsCode] {
        &self.codes
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn areas_of_use(&self) -> &[String] {
        &self.areas_of_use
    }

    /// The first name, or the empty string
    pub fn name(&self) -> &str {
        self.names.first().map(|n| n.as_str()).unwrap_or("")
    }

    /// The first non-empty code, if any
    pub fn code(&self) -> Option<&CrsCode> {
        self.codes.iter().find(|c| !c.code().is_empty())
    }

    pub fn has_code(&self, code: &CrsCode) -> bool {
        self.codes.contains(code)
    }
}

// ----- T E S T S ---------------------------------------------------------------------
