use std::fmt;
use std::path::PathBuf;

use glob::glob;

use crate::errors::{Error, Result};

/// The files holding one run variant for one experiment, resolution, level type and member kind.
///
/// Files live in `directory` and are matched by the glob `pattern`, usually
/// `<run-variant>*<suffix>`.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileGroup {
    pub directory: PathBuf,
    pub pattern: String,
}

impl FileGroup {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(directory: P, pattern: S) -> Self {
        Self {
            directory: directory.into(),
            pattern: pattern.into(),
        }
    }

    /// The full glob, directory included.
    ///
    pub fn glob(&self) -> String {
        self.directory.join(&self.pattern).to_string_lossy().into_owned()
    }

    /// Expand the glob into the sorted list of matching files.
    ///
    /// A group that matches nothing can't be loaded, so that is reported as a load failure.
    ///
    pub fn paths(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.glob();
        let entries = glob(&pattern).map_err(|err| Error::load(pattern.as_str(), err))?;

        let mut paths = vec![];
        for entry in entries {
            let path = entry.map_err(|err| Error::load(pattern.as_str(), err))?;
            if path.is_file() {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(Error::load(pattern, "no files match"));
        }
        paths.sort();

        Ok(paths)
    }
}

impl fmt::Display for FileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glob())
    }
}
