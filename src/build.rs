//! Exports the [`build_site`] function which stitches together the high-level
//! steps of deriving a site's page set: normalizing the content records
//! ([`crate::normalize`]), linking neighbors ([`crate::neighbor`]), paginating
//! the archive ([`crate::paginate`]), aggregating categories and tags
//! ([`crate::taxonomy`]) and emitting the page descriptors
//! ([`crate::emit`]).
//!
//! Linking, pagination and aggregation only read the normalized posts, so they
//! run in parallel. Any error aborts the whole build; no partial page set is
//! ever returned.

use crate::config::Config;
use crate::emit::{self, Emission};
use crate::neighbor;
use crate::normalize;
use crate::page::PageDescriptor;
use crate::paginate;
use crate::source::ContentSource;
use crate::taxonomy::{self, TaxonomyOptions, TermKind};

/// Derives every page of the site from the records in `source`.
pub fn build_site<S>(config: &Config, source: &S) -> Result<Vec<PageDescriptor>>
where
    S: ContentSource + ?Sized,
{
    let posts = normalize::normalize_source(source, &config.base_path)?;

    let options = TaxonomyOptions {
        slug_mode: config.slug_mode,
        collision_policy: config.collision_policy,
    };
    let (links, (archive, (categories, tags))) = rayon::join(
        || neighbor::link(&posts),
        || {
            rayon::join(
                || paginate::paginate(&posts, config.page_size, &config.path_prefix),
                || {
                    rayon::join(
                        || taxonomy::aggregate(&posts, TermKind::Category, &options),
                        || taxonomy::aggregate(&posts, TermKind::Tag, &options),
                    )
                },
            )
        },
    );
    let categories = categories?;
    let tags = tags?;

    let pages = emit::emit(&Emission {
        links: &links,
        archive: &archive,
        categories: &categories,
        tags: &tags,
        categories_prefix: &config.categories_prefix,
        tags_prefix: &config.tags_prefix,
        taxonomy_overview: config.taxonomy_overview,
    })?;
    Ok(pages)
}

/// The result of a build.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Every variant is fatal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the content can't be queried or normalized.
    #[error(transparent)]
    Normalize(#[from] normalize::Error),

    /// Returned when taxonomy terms collide under the fail policy, or a term is
    /// empty.
    #[error(transparent)]
    Taxonomy(#[from] taxonomy::Error),

    /// Returned when two pages share a path.
    #[error(transparent)]
    Emit(#[from] emit::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::{Context, PostContext, TemplateId};
    use crate::record::{ContentRecord, Date};
    use crate::source::QueryError;
    use crate::taxonomy::CollisionPolicy;
    use std::num::NonZeroUsize;

    /// 25 posts dated 2020-01-01 through 2020-01-25, supplied oldest first.
    fn january() -> Vec<ContentRecord> {
        (1..=25)
            .map(|day| {
                ContentRecord::post(
                    format!("pages/blog/jan-{:02}/index.md", day),
                    Date::from_ymd(2020, 1, day).unwrap(),
                )
                .with_title(format!("January {}", day))
                .with_categories(match day % 2 {
                    0 => vec!["Even Days"],
                    _ => vec!["Odd Days"],
                })
                .with_tags(["winter"])
            })
            .collect()
    }

    fn post_context<'a>(pages: &'a [PageDescriptor], path: &str) -> &'a PostContext {
        let page = pages
            .iter()
            .find(|p| p.path == path)
            .unwrap_or_else(|| panic!("no page at {}", path));
        match &page.context {
            Context::Post(ctx) => ctx,
            other => panic!("unexpected context {:?}", other),
        }
    }

    fn neighbor_slug(summary: &Option<crate::page::PostSummary>) -> Option<&str> {
        summary.as_ref().map(|s| s.slug.as_str())
    }

    #[test]
    fn test_build_january() -> Result<()> {
        let pages = build_site(&Config::default(), &january())?;

        let archive: Vec<&PageDescriptor> = pages
            .iter()
            .filter(|p| p.template == TemplateId::Archive)
            .collect();
        assert_eq!(3, archive.len());
        let sizes: Vec<usize> = archive
            .iter()
            .map(|p| match &p.context {
                Context::Archive(ctx) => ctx.items.len(),
                other => panic!("unexpected context {:?}", other),
            })
            .collect();
        assert_eq!(vec![10, 10, 5], sizes);

        let newest = post_context(&pages, "/blog/jan-25/");
        assert_eq!(None, newest.next);
        assert_eq!(Some("/blog/jan-24/"), neighbor_slug(&newest.previous));

        let oldest = post_context(&pages, "/blog/jan-01/");
        assert_eq!(None, oldest.previous);
        assert_eq!(Some("/blog/jan-02/"), neighbor_slug(&oldest.next));

        let middle = post_context(&pages, "/blog/jan-15/");
        assert_eq!(Some("/blog/jan-14/"), neighbor_slug(&middle.previous));
        assert_eq!(Some("/blog/jan-16/"), neighbor_slug(&middle.next));

        let categories: Vec<&str> = pages
            .iter()
            .filter(|p| p.template == TemplateId::Category)
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(vec!["/categories/odd-days/", "/categories/even-days/"], categories);
        assert_eq!(
            1,
            pages.iter().filter(|p| p.template == TemplateId::Tag).count()
        );

        // 25 posts + 3 archive pages + 2 categories + 1 tag
        assert_eq!(31, pages.len());
        Ok(())
    }

    #[test]
    fn test_build_first_archive_page_holds_newest() -> Result<()> {
        let pages = build_site(&Config::default(), &january())?;
        let first = pages.iter().find(|p| p.path == "/").unwrap();
        match &first.context {
            Context::Archive(ctx) => {
                assert_eq!("/blog/jan-25/", ctx.items[0].slug.as_str());
                assert_eq!("/blog/jan-16/", ctx.items[9].slug.as_str());
                assert_eq!(Some("/2".to_owned()), ctx.next_page_path);
            }
            other => panic!("unexpected context {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_build_is_idempotent() -> Result<()> {
        let config = Config {
            page_size: NonZeroUsize::new(4).unwrap(),
            taxonomy_overview: true,
            ..Config::default()
        };
        let records = january();
        assert_eq!(build_site(&config, &records)?, build_site(&config, &records)?);
        Ok(())
    }

    #[test]
    fn test_build_no_posts() -> Result<()> {
        let records = vec![ContentRecord::page("pages/about.md")];
        assert!(build_site(&Config::default(), &records)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_build_path_prefix() -> Result<()> {
        let config = Config {
            path_prefix: String::from("/archive/"),
            ..Config::default()
        };
        let pages = build_site(&config, &january())?;
        let archive: Vec<&str> = pages
            .iter()
            .filter(|p| p.template == TemplateId::Archive)
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(vec!["/archive", "/archive/2", "/archive/3"], archive);
        Ok(())
    }

    #[test]
    fn test_build_collision_fail_policy() {
        let config = Config {
            collision_policy: CollisionPolicy::Fail,
            ..Config::default()
        };
        let records = vec![
            ContentRecord::post("pages/a.md", Date::from_ymd(2020, 1, 1).unwrap())
                .with_categories(["Go"]),
            ContentRecord::post("pages/b.md", Date::from_ymd(2020, 1, 2).unwrap())
                .with_categories(["go"]),
        ];
        assert!(matches!(
            build_site(&config, &records),
            Err(Error::Taxonomy(taxonomy::Error::Collision { .. }))
        ));
    }

    struct Offline;

    impl ContentSource for Offline {
        fn query(&self) -> crate::source::Result<Vec<ContentRecord>> {
            Err(QueryError::Other("offline".to_owned()))
        }
    }

    #[test]
    fn test_build_upstream_error() {
        assert!(matches!(
            build_site(&Config::default(), &Offline),
            Err(Error::Normalize(normalize::Error::Upstream(_)))
        ));
    }
}
