//! Aggregates the distinct categories and tags across all posts into
//! [`TaxonomyTerm`]s, one per index page.
//!
//! Terms are collected in first-seen order (newest post first, then the order
//! in which a post lists them) and deduplicated by exact, case-sensitive
//! match. Each term's slug fragment is derived according to [`SlugMode`]. When
//! two distinct terms produce the same fragment (e.g. `Go` and `go`), the
//! [`CollisionPolicy`] decides whether they share a page or abort the build.

use crate::normalize::OrderedPost;
use crate::resolve::Slug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// The two independent term namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Category,
    Tag,
}

impl TermKind {
    fn terms(self, post: &OrderedPost) -> &[String] {
        match self {
            TermKind::Category => &post.record.categories,
            TermKind::Tag => &post.record.tags,
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TermKind::Category => "category",
            TermKind::Tag => "tag",
        })
    }
}

/// How a term's slug fragment is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Lowercase the term and replace each space with `-`. Other whitespace,
    /// punctuation and non-ASCII characters pass through untouched.
    #[default]
    Compat,

    /// Transliterate to ASCII and collapse everything that isn't alphanumeric
    /// into single hyphens (see [`slug::slugify`]).
    Strict,
}

impl SlugMode {
    pub fn fragment(self, term: &str) -> String {
        match self {
            SlugMode::Compat => term.to_lowercase().replace(' ', "-"),
            SlugMode::Strict => slug::slugify(term),
        }
    }
}

/// What to do when distinct terms share a slug fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The terms share one page; counts and posts are combined.
    #[default]
    Merge,

    /// The build fails with [`Error::Collision`].
    Fail,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TaxonomyOptions {
    pub slug_mode: SlugMode,
    pub collision_policy: CollisionPolicy,
}

/// A distinct category or tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaxonomyTerm {
    pub kind: TermKind,

    /// The first-seen spelling.
    pub name: String,

    /// Every distinct spelling that maps onto this term, in first-seen order.
    /// Contains `name` as its first element.
    pub variants: Vec<String>,

    /// The normalized path fragment for the term's index page.
    pub slug: String,

    /// The posts referencing the term, newest first, each listed once.
    pub posts: Vec<Slug>,
}

impl TaxonomyTerm {
    /// The number of distinct posts referencing the term.
    pub fn count(&self) -> usize {
        self.posts.len()
    }
}

/// Collects the distinct terms of `kind` across `posts`.
pub fn aggregate(
    posts: &[OrderedPost],
    kind: TermKind,
    options: &TaxonomyOptions,
) -> Result<Vec<TaxonomyTerm>> {
    let (terms, _) = posts.iter().try_fold(
        (Vec::<TaxonomyTerm>::new(), HashMap::<String, usize>::new()),
        |acc, post| fold_post(acc, post, kind, options),
    )?;
    log::info!("aggregated {} {} terms", terms.len(), kind);
    Ok(terms)
}

type Accumulator = (Vec<TaxonomyTerm>, HashMap<String, usize>);

fn fold_post(
    (mut terms, mut by_slug): Accumulator,
    post: &OrderedPost,
    kind: TermKind,
    options: &TaxonomyOptions,
) -> Result<Accumulator> {
    // A post listing the same term (or two merged spellings) twice still
    // counts once.
    let mut counted: HashSet<usize> = HashSet::new();

    for name in kind.terms(post) {
        if name.is_empty() {
            return Err(Error::EmptyTerm {
                kind,
                post: post.slug.clone(),
            });
        }

        let fragment = options.slug_mode.fragment(name);
        if fragment.is_empty() {
            return Err(Error::EmptySlug {
                kind,
                term: name.clone(),
                post: post.slug.clone(),
            });
        }
        let index = match by_slug.get(&fragment).copied() {
            Some(index) => {
                let term = &mut terms[index];
                if !term.variants.contains(name) {
                    match options.collision_policy {
                        CollisionPolicy::Fail => {
                            return Err(Error::Collision {
                                kind,
                                slug: fragment,
                                first: term.name.clone(),
                                second: name.clone(),
                            })
                        }
                        CollisionPolicy::Merge => {
                            log::warn!(
                                "{} `{}` shares the slug `{}` with `{}`; merging",
                                kind,
                                name,
                                fragment,
                                term.name
                            );
                            term.variants.push(name.clone());
                        }
                    }
                }
                index
            }
            None => {
                by_slug.insert(fragment.clone(), terms.len());
                terms.push(TaxonomyTerm {
                    kind,
                    name: name.clone(),
                    variants: vec![name.clone()],
                    slug: fragment,
                    posts: Vec::new(),
                });
                terms.len() - 1
            }
        };

        if counted.insert(index) {
            terms[index].posts.push(post.slug.clone());
        }
    }

    Ok((terms, by_slug))
}

/// The result of aggregating terms.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a term set that can't be turned into index pages.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Returned under [`CollisionPolicy::Fail`] when two distinct terms share a
    /// slug fragment.
    #[error("{kind} `{second}` collides with `{first}` on slug `{slug}`")]
    Collision {
        kind: TermKind,
        slug: String,
        first: String,
        second: String,
    },

    /// Returned when a post lists an empty term.
    #[error("post `{post}` has an empty {kind}")]
    EmptyTerm { kind: TermKind, post: Slug },

    /// Returned when a term has no characters left once slugified (e.g.
    /// `!!!` under [`SlugMode::Strict`]).
    #[error("{kind} `{term}` of post `{post}` has an empty slug")]
    EmptySlug {
        kind: TermKind,
        term: String,
        post: Slug,
    },
}
