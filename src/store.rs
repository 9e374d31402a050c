//! Post store
//!
//! The item data source behind the fetch handler: given filter criteria and
//! a page number it returns an ordered page of posts plus listing totals.
//! Queries are read-only; the store never mutates between requests.

use crate::error::Result;
use crate::types::{Post, PostPage, QueryCriteria};
use async_trait::async_trait;

/// Data source for listing pages
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Query one page of posts matching the criteria
    ///
    /// Returns at most `page_size` posts; an out-of-range page yields an
    /// empty page with the totals intact.
    async fn query(
        &self,
        criteria: &QueryCriteria,
        page: u32,
        page_size: usize,
    ) -> Result<PostPage>;
}

/// In-memory store seeded from a feed definition
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    posts: Vec<Post>,
}

impl MemoryStore {
    /// Create a store over the given posts (listing order preserved)
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Number of posts in the store, ignoring criteria
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the store holds no posts
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn matches(post: &Post, criteria: &QueryCriteria) -> bool {
        if post.post_type != criteria.post_type || post.status != criteria.status {
            return false;
        }
        match &criteria.category {
            Some(wanted) => post.category.as_deref() == Some(wanted.as_str()),
            None => true,
        }
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn query(
        &self,
        criteria: &QueryCriteria,
        page: u32,
        page_size: usize,
    ) -> Result<PostPage> {
        let matching: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| Self::matches(p, criteria))
            .collect();

        let total_posts = matching.len();
        let total_pages = total_pages(total_posts, page_size);

        let start = (page.max(1) as usize - 1).saturating_mul(page_size);
        let posts: Vec<Post> = matching
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        Ok(PostPage {
            posts,
            total_posts,
            total_pages,
            has_more: page < total_pages,
        })
    }
}

/// Total page count for a result set at the given page size
pub fn total_pages(total_posts: usize, page_size: usize) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_posts.div_ceil(page_size) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PostFormat, PostStatus};
    use test_case::test_case;

    fn post(id: u64) -> Post {
        Post {
            id,
            title: format!("Post {id}"),
            excerpt: String::new(),
            date: chrono::NaiveDate::from_ymd_opt(2026, 1, id as u32 % 28 + 1).unwrap(),
            format: PostFormat::Standard,
            status: PostStatus::Publish,
            post_type: "post".to_string(),
            category: if id % 2 == 0 {
                Some("news".to_string())
            } else {
                None
            },
        }
    }

    fn store(count: u64) -> MemoryStore {
        MemoryStore::new((1..=count).map(post).collect())
    }

    #[test_case(0, 5, 0 ; "empty set")]
    #[test_case(1, 5, 1 ; "single post")]
    #[test_case(5, 5, 1 ; "exactly one page")]
    #[test_case(6, 5, 2 ; "one over")]
    #[test_case(12, 5, 3 ; "partial last page")]
    #[test_case(10, 0, 0 ; "zero page size")]
    fn test_total_pages(total: usize, size: usize, expected: u32) {
        assert_eq!(total_pages(total, size), expected);
    }

    #[tokio::test]
    async fn test_query_never_exceeds_page_size() {
        let store = store(12);
        let criteria = QueryCriteria::default();

        for page in 1..=3 {
            let result = store.query(&criteria, page, 5).await.unwrap();
            assert!(result.posts.len() <= 5, "page {page} overflowed");
        }

        // Last page carries the remainder
        let last = store.query(&criteria, 3, 5).await.unwrap();
        assert_eq!(last.posts.len(), 2);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn test_query_preserves_order_and_totals() {
        let store = store(7);
        let criteria = QueryCriteria::default();

        let page = store.query(&criteria, 2, 3).await.unwrap();
        let ids: Vec<u64> = page.posts.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![4, 5, 6]);
        assert_eq!(page.total_posts, 7);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_more);
    }

    #[tokio::test]
    async fn test_query_out_of_range_page_is_empty() {
        let store = store(4);
        let criteria = QueryCriteria::default();

        let page = store.query(&criteria, 5, 5).await.unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.total_posts, 4);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_query_filters_by_status_and_type() {
        let mut posts: Vec<Post> = (1..=4).map(post).collect();
        posts[1].status = PostStatus::Draft;
        posts[2].post_type = "page".to_string();
        let store = MemoryStore::new(posts);

        let page = store
            .query(&QueryCriteria::default(), 1, 10)
            .await
            .unwrap();
        let ids: Vec<u64> = page.posts.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_query_category_extension_point() {
        let store = store(6);
        let criteria = QueryCriteria::default().with_category("news");

        let page = store.query(&criteria, 1, 10).await.unwrap();
        let ids: Vec<u64> = page.posts.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![2, 4, 6]);
    }
}
