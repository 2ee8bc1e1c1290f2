use super::*;
use std::path::{Path, PathBuf};

// ----- T H E   P L A I N   R E G I S T R Y ---------------------------------------------

/// A registry supporting the built in CRSs, plus CRS definitions read from
/// files with the extension `crs` in the directories `./geocrs` and
/// `geocrs` under the platform's local data directory.
///
/// Each line of a `crs` file holds a code, followed by a definition.
/// Empty lines and lines starting with `#` are ignored:
///
/// ```txt
/// # Local grid
/// LOCAL:1  projected base=EPSG:4258 proj=tmerc lon_0=12 k_0=1 x_0=200000
/// ```
#[derive(Debug)]
pub struct Plain {
    crs: BTreeMap<String, Arc<Crs>>,
    transformations: BTreeMap<OpHandle, Transformation>,
    paths: Vec<PathBuf>,
}

const BAD_ID_MESSAGE: Error = Error::General("Plain: Unknown transformation id");

impl Default for Plain {
    fn default() -> Plain {
        let mut paths = Vec::new();

        let localpath: PathBuf = [".", "geocrs"].iter().collect();
        paths.push(localpath);

        if let Some(mut userpath) = dirs::data_local_dir() {
            userpath.push("geocrs");
            paths.push(userpath);
        }

        Plain {
            crs: BTreeMap::new(),
            transformations: BTreeMap::new(),
            paths,
        }
    }
}

impl Plain {
    /// The built ins, plus the definitions from the `crs` files in `paths`.
    /// Unlike `new()`, any unreadable file or malformed definition is an
    /// error.
    pub fn with_paths(paths: &[PathBuf]) -> Result<Plain, Error> {
        let mut registry = Plain {
            crs: BTreeMap::new(),
            transformations: BTreeMap::new(),
            paths: paths.to_vec(),
        };
        register_builtins(&mut registry);
        for path in paths {
            for file in crs_files(path)? {
                registry.load(&file, true)?;
            }
        }
        Ok(registry)
    }

    /// The directories searched for `crs` files
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    // Register the definitions of one `crs` file. Unless `strict`, bad
    // lines are logged and skipped
    fn load(&mut self, file: &Path, strict: bool) -> Result<usize, Error> {
        let text = std::fs::read_to_string(file)?;
        let mut count = 0;
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (code, definition) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            match self.register_definition(code, definition.trim()) {
                Ok(_) => count += 1,
                Err(e) => {
                    error!("{}:{}: rejecting {code}: {e}", file.display(), number + 1);
                    if strict {
                        return Err(e);
                    }
                }
            }
        }
        debug!("{}: {count} CRS definitions", file.display());
        Ok(count)
    }
}

// The `crs` files in `dir`, in alphabetical order
fn crs_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "crs") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl Registry for Plain {
    fn new() -> Plain {
        let mut registry = Plain::default();
        register_builtins(&mut registry);
        for path in registry.paths.clone() {
            // Missing directories are the common case
            let Ok(files) = crs_files(&path) else {
                continue;
            };
            for file in files {
                if let Err(e) = registry.load(&file, false) {
                    error!("{}: {e}", file.display());
                }
            }
        }
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
