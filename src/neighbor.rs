//! Links each post to its chronological neighbors.

use crate::normalize::OrderedPost;

/// The posts adjacent to one post in the recency order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborLink<'a> {
    /// The post itself.
    pub post: &'a OrderedPost,

    /// The next older post, if any.
    pub previous: Option<&'a OrderedPost>,

    /// The next newer post, if any.
    pub next: Option<&'a OrderedPost>,
}

/// Creates one [`NeighborLink`] per post. `posts` must be sorted newest first
/// (as returned by [`crate::normalize::normalize`]).
pub fn link(posts: &[OrderedPost]) -> Vec<NeighborLink<'_>> {
    posts
        .iter()
        .enumerate()
        .map(|(i, post)| NeighborLink {
            post,
            previous: posts.get(i + 1),
            next: match i {
                0 => None,
                _ => posts.get(i - 1),
            },
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalize::normalize;
    use crate::record::{ContentRecord, Date};

    fn posts(n: u32) -> Vec<OrderedPost> {
        normalize(
            (1..=n)
                .map(|day| {
                    ContentRecord::post(
                        format!("pages/{}.md", day),
                        Date::from_ymd(2020, 1, day).unwrap(),
                    )
                })
                .collect(),
            "pages",
        )
        .unwrap()
    }

    fn slug(post: Option<&OrderedPost>) -> Option<&str> {
        post.map(|p| p.slug.as_str())
    }

    #[test]
    fn test_link_empty() {
        assert!(link(&[]).is_empty());
    }

    #[test]
    fn test_link_single() {
        let posts = posts(1);
        let links = link(&posts);
        assert_eq!(1, links.len());
        assert_eq!(None, links[0].previous);
        assert_eq!(None, links[0].next);
    }

    #[test]
    fn test_link_boundaries_and_interior() {
        let posts = posts(5);
        let links = link(&posts);

        // newest
        assert_eq!("/5/", links[0].post.slug.as_str());
        assert_eq!(None, slug(links[0].next));
        assert_eq!(Some("/4/"), slug(links[0].previous));

        // oldest
        assert_eq!("/1/", links[4].post.slug.as_str());
        assert_eq!(None, slug(links[4].previous));
        assert_eq!(Some("/2/"), slug(links[4].next));

        for (i, l) in links.iter().enumerate().skip(1).take(3) {
            assert_eq!(Some(&posts[i - 1]), l.next);
            assert_eq!(Some(&posts[i + 1]), l.previous);
        }
    }
}
