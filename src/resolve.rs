//! Maps a record's storage path onto its canonical URL path ([`Slug`]).
//!
//! The storage path is made relative to a configured base path, stripped of
//! its extension, and a trailing `index` segment is dropped so that
//! `pages/blog/hello/index.md` and `pages/blog/hello.md` both resolve to
//! `/blog/hello/`.

use serde::Serialize;
use std::fmt;

/// A canonical URL path, always beginning and ending with `/`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

const INDEX_STEM: &str = "index";

/// Resolves `storage_path` to a [`Slug`] relative to `base_path`. Both paths
/// may use either `/` or `\` as separators.
pub fn resolve(storage_path: &str, base_path: &str) -> Result<Slug> {
    let path = segments(storage_path)?;
    let base = segments(base_path)?;

    let rest = match path.strip_prefix(base.as_slice()) {
        Some(rest) => rest,
        None => {
            return Err(Error::OutsideBase {
                path: storage_path.to_owned(),
                base: base_path.to_owned(),
            })
        }
    };

    let (file_name, dirs) = match rest.split_last() {
        Some(split) => split,
        None => return Err(Error::Empty(storage_path.to_owned())),
    };

    let mut parts: Vec<&str> = dirs.to_vec();
    let stem = strip_extension(file_name);
    if stem != INDEX_STEM {
        parts.push(stem);
    }

    if parts.is_empty() {
        return Ok(Slug(String::from("/")));
    }
    Ok(Slug(format!("/{}/", parts.join("/"))))
}

fn segments(path: &str) -> Result<Vec<&str>> {
    path.split(|c| c == '/' || c == '\\')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| match s {
            ".." => Err(Error::ParentSegment(path.to_owned())),
            s => Ok(s),
        })
        .collect()
}

// A leading dot marks a hidden file, not an extension.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(i) if i > 0 => &file_name[..i],
        _ => file_name,
    }
}

/// The result of resolving a slug.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a storage path that can't be mapped onto a slug.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Returned when the storage path doesn't live under the base path.
    #[error("storage path `{path}` lies outside of base path `{base}`")]
    OutsideBase { path: String, base: String },

    /// Returned when a path contains a `..` segment.
    #[error("path `{0}` contains a parent-directory segment")]
    ParentSegment(String),

    /// Returned when nothing is left of the storage path once the base path is
    /// removed.
    #[error("storage path `{0}` names the base directory itself")]
    Empty(String),
}
