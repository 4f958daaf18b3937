use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

/// Opens `path` for reading. `kind` names the file in the error message (e.g.
/// "project").
pub fn open(path: &Path, kind: &str) -> Result<File> {
    File::open(path).with_context(|| format!("Opening {} file `{}`", kind, path.display()))
}
