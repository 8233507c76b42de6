mod dynamo;
mod error;
mod in_memory;
mod types;

pub use dynamo::DynamoPostsDB;
pub use error::Error;
pub use in_memory::InMemoryPostsDB;
pub use types::PostEntry;

use async_trait::async_trait;
use shared::{Page, PostInfo};

pub use self::error::Result;

pub fn post_key(slug: &str) -> String {
    format!("posts/post-{slug}.json")
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn get(&self, slug: &str) -> Result<PostEntry>;
    async fn put(&self, post: PostEntry) -> Result<()>;
    async fn add(&self, post: PostEntry) -> Result<()>;
    async fn delete(&self, slug: &str) -> Result<bool>;
    async fn list(&self, page: usize, page_size: usize) -> Result<Page<PostInfo>>;
    async fn list_all(&self) -> Result<Vec<PostInfo>>;
}

/// Slices a newest-first post list into a 1-based page.
fn paginate(posts: Vec<PostInfo>, page: usize, page_size: usize) -> Page<PostInfo> {
    let page = page.max(1);
    let total_items = posts.len();
    let start = page.saturating_sub(1).saturating_mul(page_size);

    let items = posts.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        page,
        page_size,
        total_items,
    }
}

fn sort_newest_first(posts: &mut [PostInfo]) {
    posts.sort_by(|a, b| {
        b.create_time_unix
            .cmp(&a.create_time_unix)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn posts(count: usize) -> Vec<PostInfo> {
        (0..count)
            .map(|i| PostInfo {
                slug: format!("post-{i}"),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_paginate_remainder() {
        let page = paginate(posts(11), 3, 5);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_items, 11);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_paginate_out_of_range() {
        let page = paginate(posts(4), 7, 5);

        assert_eq!(page.items.len(), 0);
        assert_eq!(page.total_items, 4);
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_paginate_clamps_page_zero() {
        let page = paginate(posts(4), 0, 5);

        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 4);
    }
}
