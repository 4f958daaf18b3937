//! The content repository boundary. A [`ContentSource`] hands the pipeline
//! every [`ContentRecord`] in one query; the pipeline never reads content
//! files itself.

use crate::record::ContentRecord;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Supplies the full, unordered list of content records for one build.
pub trait ContentSource {
    fn query(&self) -> Result<Vec<ContentRecord>>;
}

impl ContentSource for [ContentRecord] {
    fn query(&self) -> Result<Vec<ContentRecord>> {
        Ok(self.to_vec())
    }
}

impl ContentSource for Vec<ContentRecord> {
    fn query(&self) -> Result<Vec<ContentRecord>> {
        self.as_slice().query()
    }
}

/// Reads records from a manifest file: a YAML (`.yaml`, `.yml`) or JSON
/// (`.json`) sequence of records. For example:
///
/// ```yaml
/// - storage_path: pages/blog/hello/index.md
///   type: post
///   date: 2021-04-16
///   title: Hello, world!
///   categories: [Meta]
///   tags: [greet]
/// - storage_path: pages/about.md
///   type: page
/// ```
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> ManifestSource {
        ManifestSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for ManifestSource {
    fn query(&self) -> Result<Vec<ContentRecord>> {
        let file = File::open(&self.path).map_err(|err| QueryError::Open {
            path: self.path.clone(),
            err,
        })?;
        let records = match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_reader(file).map_err(|err| {
                QueryError::Json {
                    path: self.path.clone(),
                    err,
                }
            })?,
            _ => serde_yaml::from_reader(file).map_err(|err| QueryError::Yaml {
                path: self.path.clone(),
                err,
            })?,
        };
        log::debug!("read manifest `{}`", self.path.display());
        Ok(records)
    }
}

/// The result of a content query.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Reported by a [`ContentSource`] when the query can't be answered. The
/// pipeline treats every variant as fatal.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Returned when the manifest file can't be opened.
    #[error("opening manifest `{}`: {err}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when a YAML manifest is malformed.
    #[error("parsing manifest `{}`: {err}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        err: serde_yaml::Error,
    },

    /// Returned when a JSON manifest is malformed.
    #[error("parsing manifest `{}`: {err}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        err: serde_json::Error,
    },

    /// Any other failure reported by a source.
    #[error("{0}")]
    Other(String),
}
