//! Turns the unordered records of a [`ContentSource`] into the canonical
//! sequence of [`OrderedPost`]s every later step works from: posts only,
//! newest first, each with its resolved [`Slug`] and position.

use crate::record::{ContentRecord, ContentType, Date};
use crate::resolve::{self, Slug};
use crate::source::{ContentSource, QueryError};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// A post in the recency-sorted sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderedPost {
    pub record: ContentRecord,
    pub date: Date,
    pub slug: Slug,

    /// Zero-based position in the sequence; 0 is the most recent post.
    pub position: usize,
}

/// Queries `source` and normalizes the result. A failed query aborts
/// normalization with [`Error::Upstream`].
pub fn normalize_source<S>(source: &S, base_path: &str) -> Result<Vec<OrderedPost>>
where
    S: ContentSource + ?Sized,
{
    normalize(source.query()?, base_path)
}

/// Resolves every record's slug against `base_path`, then filters the records
/// down to posts sorted newest first. Posts with equal dates keep their input
/// order. Slugs must be unique across all records, pages included.
pub fn normalize(records: Vec<ContentRecord>, base_path: &str) -> Result<Vec<OrderedPost>> {
    let resolved: Vec<Slug> = {
        let mut seen_paths: HashSet<&str> = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen_paths.insert(&record.storage_path) {
                return Err(Error::DuplicateStoragePath(record.storage_path.clone()));
            }
        }

        let mut slugs: HashMap<Slug, &str> = HashMap::with_capacity(records.len());
        let mut resolved: Vec<Slug> = Vec::with_capacity(records.len());
        for record in &records {
            let slug = resolve::resolve(&record.storage_path, base_path)?;
            if let Some(first) = slugs.insert(slug.clone(), &record.storage_path) {
                return Err(Error::DuplicateSlug {
                    slug,
                    first: first.to_owned(),
                    second: record.storage_path.clone(),
                });
            }
            resolved.push(slug);
        }
        resolved
    };

    let mut posts: Vec<(usize, Date, Slug, ContentRecord)> = Vec::new();
    for (index, (record, slug)) in records.into_iter().zip(resolved).enumerate() {
        if record.kind != ContentType::Post {
            continue;
        }
        match record.date {
            Some(date) => posts.push((index, date, slug, record)),
            None => return Err(Error::MissingDate(record.storage_path)),
        }
    }

    posts.sort_unstable_by(|(a_index, a_date, _, _), (b_index, b_date, _, _)| {
        recency(a_date, *a_index, b_date, *b_index)
    });

    let ordered: Vec<OrderedPost> = posts
        .into_iter()
        .enumerate()
        .map(|(position, (_, date, slug, record))| OrderedPost {
            record,
            date,
            slug,
            position,
        })
        .collect();

    log::info!("normalized {} posts", ordered.len());
    Ok(ordered)
}

// Newest first; ties go to whichever record came first in the input.
fn recency(a_date: &Date, a_index: usize, b_date: &Date, b_index: usize) -> Ordering {
    b_date.cmp(a_date).then(a_index.cmp(&b_index))
}

/// The result of normalization.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to build the ordered post sequence. Every variant
/// aborts the build.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the content source reported an error.
    #[error("content query failed: {0}")]
    Upstream(#[from] QueryError),

    /// Returned when a record's storage path can't be mapped onto a slug.
    #[error("resolving slug: {0}")]
    Resolution(#[from] resolve::Error),

    /// Returned when a post has no date.
    #[error("post `{0}` has no date")]
    MissingDate(String),

    /// Returned when two records share a storage path.
    #[error("storage path `{0}` appears more than once")]
    DuplicateStoragePath(String),

    /// Returned when two records resolve to the same slug.
    #[error("`{first}` and `{second}` both resolve to `{slug}`")]
    DuplicateSlug {
        slug: Slug,
        first: String,
        second: String,
    },
}
