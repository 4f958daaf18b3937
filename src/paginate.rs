//! Splits an ordered sequence into fixed-size archive pages.
//!
//! The first page lives at the bare path prefix; every later page appends its
//! human (1-based) page number, so with the prefix `/` the pages are `/`, `/2`,
//! `/3`, and with `/blog` they are `/blog`, `/blog/2`, `/blog/3`.

use std::num::NonZeroUsize;

/// One page of an archive.
#[derive(Clone, Debug, PartialEq)]
pub struct ArchivePage<'a, T> {
    /// The page's own path.
    pub path: String,

    /// Zero-based page index.
    pub page_number: usize,

    pub number_of_pages: usize,

    /// The number of items on earlier pages.
    pub skip: usize,

    /// The page size the archive was cut with.
    pub limit: usize,

    /// The items on this page, in sequence order.
    pub items: &'a [T],

    /// The path of the page with newer items, if any.
    pub previous_page_path: Option<String>,

    /// The path of the page with older items, if any.
    pub next_page_path: Option<String>,
}

impl<T> ArchivePage<'_, T> {
    pub fn human_page_number(&self) -> usize {
        self.page_number + 1
    }
}

/// Paginates `items` into pages of `page_size`. An empty sequence yields no
/// pages at all.
pub fn paginate<'a, T>(
    items: &'a [T],
    page_size: NonZeroUsize,
    path_prefix: &str,
) -> Vec<ArchivePage<'a, T>> {
    let page_size = page_size.get();
    let number_of_pages = items.len().div_ceil(page_size);
    let prefix = path_prefix.trim_end_matches('/');

    items
        .chunks(page_size)
        .enumerate()
        .map(|(i, chunk)| ArchivePage {
            path: page_path(prefix, i),
            page_number: i,
            number_of_pages,
            skip: i * page_size,
            limit: page_size,
            items: chunk,
            previous_page_path: match i {
                0 => None,
                _ => Some(page_path(prefix, i - 1)),
            },
            next_page_path: match i + 1 < number_of_pages {
                false => None,
                true => Some(page_path(prefix, i + 1)),
            },
        })
        .collect()
}

// `prefix` must already be stripped of its trailing slash.
fn page_path(prefix: &str, page_number: usize) -> String {
    match (page_number, prefix.is_empty()) {
        (0, true) => String::from("/"),
        (0, false) => prefix.to_owned(),
        (i, _) => format!("{}/{}", prefix, i + 1),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn lens<T>(pages: &[ArchivePage<'_, T>]) -> Vec<usize> {
        pages.iter().map(|p| p.items.len()).collect()
    }

    #[test]
    fn test_paginate_empty_yields_no_pages() {
        let items: Vec<u32> = Vec::new();
        assert!(paginate(&items, size(10), "/").is_empty());
    }

    #[test]
    fn test_paginate_partial_last_page() {
        let items: Vec<u32> = (0..25).collect();
        let pages = paginate(&items, size(10), "/");
        assert_eq!(vec![10, 10, 5], lens(&pages));
        assert_eq!(&items[..10], pages[0].items);
        assert_eq!(&items[20..], pages[2].items);
    }

    #[test]
    fn test_paginate_evenly_divisible() {
        let items: Vec<u32> = (0..20).collect();
        assert_eq!(vec![10, 10], lens(&paginate(&items, size(10), "/")));
    }

    #[test]
    fn test_paginate_fewer_than_page_size() {
        let items: Vec<u32> = (0..3).collect();
        let pages = paginate(&items, size(10), "/");
        assert_eq!(vec![3], lens(&pages));
        assert_eq!(None, pages[0].previous_page_path);
        assert_eq!(None, pages[0].next_page_path);
    }

    #[test]
    fn test_paginate_page_count_is_ceiling() {
        for n in 0..40 {
            let items: Vec<usize> = (0..n).collect();
            for s in 1..12 {
                let pages = paginate(&items, size(s), "/");
                assert_eq!((n + s - 1) / s, pages.len(), "n = {}, size = {}", n, s);
                assert_eq!(n, pages.iter().map(|p| p.items.len()).sum::<usize>());
            }
        }
    }

    #[test]
    fn test_paginate_root_prefix_paths() {
        let items: Vec<u32> = (0..25).collect();
        let pages = paginate(&items, size(10), "/");
        assert_eq!(
            vec!["/", "/2", "/3"],
            pages.iter().map(|p| p.path.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(None, pages[0].previous_page_path);
        assert_eq!(Some("/2".to_owned()), pages[0].next_page_path);
        assert_eq!(Some("/".to_owned()), pages[1].previous_page_path);
        assert_eq!(Some("/3".to_owned()), pages[1].next_page_path);
        assert_eq!(Some("/2".to_owned()), pages[2].previous_page_path);
        assert_eq!(None, pages[2].next_page_path);
    }

    #[test]
    fn test_paginate_nested_prefix_paths() {
        let items: Vec<u32> = (0..5).collect();
        for prefix in ["/blog", "/blog/"] {
            let pages = paginate(&items, size(2), prefix);
            assert_eq!(
                vec!["/blog", "/blog/2", "/blog/3"],
                pages.iter().map(|p| p.path.as_str()).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_paginate_empty_prefix_is_root() {
        let items: Vec<u32> = (0..3).collect();
        let pages = paginate(&items, size(2), "");
        assert_eq!("/", pages[0].path);
        assert_eq!("/2", pages[1].path);
    }

    #[test]
    fn test_paginate_counters() {
        let items: Vec<u32> = (0..25).collect();
        let pages = paginate(&items, size(10), "/");
        assert_eq!(2, pages[2].page_number);
        assert_eq!(3, pages[2].human_page_number());
        assert_eq!(3, pages[2].number_of_pages);
        assert_eq!(20, pages[2].skip);
        assert_eq!(10, pages[2].limit);
    }
}
