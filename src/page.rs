//! Defines [`PageDescriptor`], the unit handed to the rendering layer, and the
//! per-template context payloads.

use crate::normalize::OrderedPost;
use crate::paginate::ArchivePage;
use crate::record::Date;
use crate::resolve::Slug;
use crate::taxonomy::TaxonomyTerm;
use serde::Serialize;

/// Identifies the template a page is rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TemplateId {
    Post,
    Archive,
    Category,
    Tag,
    CategoryList,
    TagList,
}

/// One page that must exist in the built site.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageDescriptor {
    /// The page's URL path. Unique within a build.
    pub path: String,

    pub template: TemplateId,

    /// The data the template needs.
    pub context: Context,
}

/// Template data. Serialized without a variant tag; the [`TemplateId`] says
/// which shape to expect.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Context {
    Post(PostContext),
    Archive(ArchiveContext),
    Term(TermContext),
    TermList(TermListContext),
}

/// The summary of a post shown in neighbor links and archive listings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PostSummary {
    pub slug: Slug,
    pub title: Option<String>,
    pub date: Date,
}

impl From<&OrderedPost> for PostSummary {
    fn from(post: &OrderedPost) -> PostSummary {
        PostSummary {
            slug: post.slug.clone(),
            title: post.record.title.clone(),
            date: post.date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PostContext {
    pub slug: Slug,

    /// The next older post.
    pub previous: Option<PostSummary>,

    /// The next newer post.
    pub next: Option<PostSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArchiveContext {
    pub items: Vec<PostSummary>,
    pub page_number: usize,
    pub human_page_number: usize,
    pub number_of_pages: usize,
    pub skip: usize,
    pub limit: usize,
    pub previous_page_path: Option<String>,
    pub next_page_path: Option<String>,
}

impl From<&ArchivePage<'_, OrderedPost>> for ArchiveContext {
    fn from(page: &ArchivePage<'_, OrderedPost>) -> ArchiveContext {
        ArchiveContext {
            items: page.items.iter().map(PostSummary::from).collect(),
            page_number: page.page_number,
            human_page_number: page.human_page_number(),
            number_of_pages: page.number_of_pages,
            skip: page.skip,
            limit: page.limit,
            previous_page_path: page.previous_page_path.clone(),
            next_page_path: page.next_page_path.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TermContext {
    pub term: String,
    pub variants: Vec<String>,
    pub slug: String,
    pub count: usize,
    pub posts: Vec<Slug>,
}

impl From<&TaxonomyTerm> for TermContext {
    fn from(term: &TaxonomyTerm) -> TermContext {
        TermContext {
            term: term.name.clone(),
            variants: term.variants.clone(),
            slug: term.slug.clone(),
            count: term.count(),
            posts: term.posts.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TermListContext {
    pub terms: Vec<TermSummary>,
}

/// A term as listed on an overview page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TermSummary {
    pub name: String,
    pub slug: String,
    pub path: String,
    pub count: usize,
}
