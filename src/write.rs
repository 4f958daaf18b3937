//! Hands the finished page set to the rendering layer as JSON.

use crate::page::PageDescriptor;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes `pages` to `w` as a pretty-printed JSON array of
/// `{path, template, context}` objects.
pub fn write_descriptors<W: Write>(mut w: W, pages: &[PageDescriptor]) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, pages)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Writes `pages` to the file at `path`. The descriptors go to a temporary file
/// next to `path` which replaces `path` only once it is complete, so readers
/// never see a partial page set.
pub fn write_to_path(path: &Path, pages: &[PageDescriptor]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    write_descriptors(io::BufWriter::new(file.as_file_mut()), pages)?;
    file.persist(path).map_err(|e| Error::Persist {
        path: path.to_owned(),
        err: e.error,
    })?;
    log::info!("wrote {} pages to `{}`", pages.len(), path.display());
    Ok(())
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error serializing the descriptors.
    #[error("serializing pages: {0}")]
    Json(#[from] serde_json::Error),

    /// An error writing the output.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// An error moving the finished file into place.
    #[error("replacing `{}`: {err}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        err: io::Error,
    },
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::{Context, PostContext, TemplateId};
    use crate::record::Date;
    use crate::resolve::resolve;

    fn pages() -> Vec<PageDescriptor> {
        let slug = resolve("pages/hello.md", "pages").unwrap();
        vec![PageDescriptor {
            path: slug.to_string(),
            template: TemplateId::Post,
            context: Context::Post(PostContext {
                slug: slug.clone(),
                previous: Some(crate::page::PostSummary {
                    slug: resolve("pages/older.md", "pages").unwrap(),
                    title: None,
                    date: Date::from_ymd(2020, 1, 1).unwrap(),
                }),
                next: None,
            }),
        }]
    }

    #[test]
    fn test_write_descriptors_json_shape() -> anyhow::Result<()> {
        let mut out: Vec<u8> = Vec::new();
        write_descriptors(&mut out, &pages())?;
        let value: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(
            serde_json::json!([{
                "path": "/hello/",
                "template": "Post",
                "context": {
                    "slug": "/hello/",
                    "previous": {
                        "slug": "/older/",
                        "title": null,
                        "date": "2020-01-01T00:00:00+00:00"
                    },
                    "next": null
                }
            }]),
            value
        );
        Ok(())
    }

    #[test]
    fn test_write_to_path_replaces_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pages.json");
        std::fs::write(&path, "stale")?;
        write_to_path(&path, &pages())?;
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(1, value.as_array().map(Vec::len).unwrap_or_default());
        Ok(())
    }
}
