//! Wall feed ordering and tag lookup.

use crate::models::WallPost;

/// Pinned posts first, everything else after; input order is kept within
/// each group. Apply the collection filter before calling this.
#[must_use]
pub fn feed<'a, I>(posts: I) -> Vec<&'a WallPost>
where
    I: IntoIterator<Item = &'a WallPost>,
{
    let (mut pinned, rest): (Vec<&WallPost>, Vec<&WallPost>) =
        posts.into_iter().partition(|p| p.is_pinned);
    pinned.extend(rest);
    pinned
}

/// Posts carrying `tag` (ASCII case-insensitive), in input order.
#[must_use]
pub fn with_tag<'a>(posts: &'a [WallPost], tag: &str) -> Vec<&'a WallPost> {
    posts.iter().filter(|p| p.has_tag(tag)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{FilterState, Selector, filter};
    use crate::models::WallField;
    use crate::test_utils::*;

    #[test]
    fn test_pinned_posts_lead_the_feed() {
        let posts = sample_wall_posts();
        let ids: Vec<i64> = feed(&posts).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4, 5]);
    }

    #[test]
    fn test_feed_after_filter() {
        let posts = sample_wall_posts();
        let state =
            FilterState::new().with_selector(WallField::Kind, Selector::is("announcement"));

        let ids: Vec<i64> = feed(filter(&posts, &state)).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_with_tag_is_case_insensitive() {
        let posts = sample_wall_posts();
        let tagged = with_tag(&posts, "meeting");
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].id, 2);
        assert!(with_tag(&posts, "unknown").is_empty());
    }
}
