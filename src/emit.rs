//! Merges the post, archive and taxonomy outputs into the final list of
//! [`PageDescriptor`]s and guarantees that no two descriptors share a path.

use crate::neighbor::NeighborLink;
use crate::normalize::OrderedPost;
use crate::page::*;
use crate::paginate::ArchivePage;
use crate::taxonomy::{TaxonomyTerm, TermKind};
use std::collections::HashMap;

/// Everything the emitter merges. Each field is the output of one independent
/// pipeline step.
pub struct Emission<'a> {
    pub links: &'a [NeighborLink<'a>],
    pub archive: &'a [ArchivePage<'a, OrderedPost>],
    pub categories: &'a [TaxonomyTerm],
    pub tags: &'a [TaxonomyTerm],

    /// The prefix for category pages, e.g. `/categories`.
    pub categories_prefix: &'a str,

    /// The prefix for tag pages, e.g. `/tags`.
    pub tags_prefix: &'a str,

    /// Whether to emit the category and tag overview pages.
    pub taxonomy_overview: bool,
}

/// Returns the path of the index page for `slug` under `prefix`, e.g.
/// `/categories/systems-design/`.
pub fn term_path(prefix: &str, slug: &str) -> String {
    format!("{}/{}/", prefix.trim_end_matches('/'), slug)
}

fn overview_path(prefix: &str) -> String {
    format!("{}/", prefix.trim_end_matches('/'))
}

/// Creates all descriptors: posts, then archive pages, then category and tag
/// pages, then the overview pages if enabled.
pub fn emit(emission: &Emission) -> Result<Vec<PageDescriptor>> {
    let mut pages: Vec<PageDescriptor> = Vec::with_capacity(
        emission.links.len()
            + emission.archive.len()
            + emission.categories.len()
            + emission.tags.len()
            + 2,
    );

    pages.extend(post_pages(emission.links));
    pages.extend(archive_pages(emission.archive));
    pages.extend(term_pages(emission.categories, emission.categories_prefix));
    pages.extend(term_pages(emission.tags, emission.tags_prefix));
    if emission.taxonomy_overview {
        pages.push(overview_page(
            TermKind::Category,
            emission.categories,
            emission.categories_prefix,
        ));
        pages.push(overview_page(
            TermKind::Tag,
            emission.tags,
            emission.tags_prefix,
        ));
    }

    check_unique(&pages)?;
    for page in &pages {
        log::debug!("page {} ({:?})", page.path, page.template);
    }
    log::info!("emitted {} pages", pages.len());
    Ok(pages)
}

fn post_pages<'a>(links: &'a [NeighborLink<'a>]) -> impl Iterator<Item = PageDescriptor> + 'a {
    links.iter().map(|link| PageDescriptor {
        path: link.post.slug.to_string(),
        template: TemplateId::Post,
        context: Context::Post(PostContext {
            slug: link.post.slug.clone(),
            previous: link.previous.map(PostSummary::from),
            next: link.next.map(PostSummary::from),
        }),
    })
}

fn archive_pages<'a>(
    archive: &'a [ArchivePage<'a, OrderedPost>],
) -> impl Iterator<Item = PageDescriptor> + 'a {
    archive.iter().map(|page| PageDescriptor {
        path: page.path.clone(),
        template: TemplateId::Archive,
        context: Context::Archive(ArchiveContext::from(page)),
    })
}

fn term_pages<'a>(
    terms: &'a [TaxonomyTerm],
    prefix: &'a str,
) -> impl Iterator<Item = PageDescriptor> + 'a {
    terms.iter().map(move |term| PageDescriptor {
        path: term_path(prefix, &term.slug),
        template: match term.kind {
            TermKind::Category => TemplateId::Category,
            TermKind::Tag => TemplateId::Tag,
        },
        context: Context::Term(TermContext::from(term)),
    })
}

fn overview_page(kind: TermKind, terms: &[TaxonomyTerm], prefix: &str) -> PageDescriptor {
    PageDescriptor {
        path: overview_path(prefix),
        template: match kind {
            TermKind::Category => TemplateId::CategoryList,
            TermKind::Tag => TemplateId::TagList,
        },
        context: Context::TermList(TermListContext {
            terms: terms
                .iter()
                .map(|term| TermSummary {
                    name: term.name.clone(),
                    slug: term.slug.clone(),
                    path: term_path(prefix, &term.slug),
                    count: term.count(),
                })
                .collect(),
        }),
    }
}

// `/2` and `/2/` address the same page.
fn path_key(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn check_unique(pages: &[PageDescriptor]) -> Result<()> {
    let mut seen: HashMap<&str, &PageDescriptor> = HashMap::with_capacity(pages.len());
    for page in pages {
        if let Some(first) = seen.insert(path_key(&page.path), page) {
            return Err(Error::PathCollision {
                path: page.path.clone(),
                first: first.template,
                second: page.template,
            });
        }
    }
    Ok(())
}

/// The result of emitting descriptors.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a descriptor set that can't be published.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Returned when two descriptors resolve to the same path.
    #[error("{second:?} page collides with {first:?} page at `{path}`")]
    PathCollision {
        path: String,
        first: TemplateId,
        second: TemplateId,
    },
}
