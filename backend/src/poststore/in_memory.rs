use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use shared::{Page, PostInfo};
use tokio::sync::Mutex;
use tracing::instrument;

use super::{
    error::{Error, Result},
    paginate, post_key, sort_newest_first, PostEntry, PostStore,
};

#[derive(Default)]
pub struct InMemoryPostsDB {
    pub db: Arc<Mutex<HashMap<String, PostEntry>>>,
}

#[async_trait]
impl PostStore for InMemoryPostsDB {
    #[instrument(skip(self), err)]
    async fn get(&self, slug: &str) -> Result<PostEntry> {
        let db = self.db.lock().await;

        db.get(&post_key(slug)).cloned().ok_or(Error::ItemNotFound)
    }

    #[instrument(skip(self, post), err)]
    #[allow(clippy::significant_drop_tightening)]
    async fn put(&self, post: PostEntry) -> Result<()> {
        let key = post_key(&post.post.slug);

        let mut db = self.db.lock().await;

        if let Some(db_post) = db.get_mut(&key) {
            if post.version <= db_post.version {
                return Err(Error::Concurrency);
            }
            *db_post = post;
        } else {
            db.insert(key, post);
        }

        Ok(())
    }

    #[instrument(skip(self, post), err)]
    #[allow(clippy::significant_drop_tightening)]
    async fn add(&self, post: PostEntry) -> Result<()> {
        let key = post_key(&post.post.slug);

        let mut db = self.db.lock().await;

        if db.contains_key(&key) {
            return Err(Error::Conflict);
        }

        db.insert(key, post);

        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, slug: &str) -> Result<bool> {
        Ok(self.db.lock().await.remove(&post_key(slug)).is_some())
    }

    #[instrument(skip(self), err)]
    async fn list(&self, page: usize, page_size: usize) -> Result<Page<PostInfo>> {
        Ok(paginate(self.sorted().await, page, page_size))
    }

    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<Vec<PostInfo>> {
        Ok(self.sorted().await)
    }
}

impl InMemoryPostsDB {
    async fn sorted(&self) -> Vec<PostInfo> {
        let db = self.db.lock().await;

        let mut posts: Vec<PostInfo> = db.values().map(|entry| entry.post.clone()).collect();
        sort_newest_first(&mut posts);

        posts
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(slug: &str, create_time_unix: i64) -> PostEntry {
        PostEntry::new(PostInfo {
            slug: slug.to_string(),
            create_time_unix,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_add_conflict_keeps_original() {
        let db = InMemoryPostsDB::default();

        let mut first = entry("abc", 1);
        first.post.views = 5;
        db.add(first.clone()).await.unwrap();

        let res = db.add(entry("abc", 2)).await;

        assert!(matches!(res, Err(Error::Conflict)));
        assert_eq!(db.get("abc").await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_put_rejects_stale_version() {
        let db = InMemoryPostsDB::default();
        db.add(entry("abc", 1)).await.unwrap();

        let stale = db.get("abc").await.unwrap();
        let res = db.put(stale).await;

        assert!(matches!(res, Err(Error::Concurrency)));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = InMemoryPostsDB::default();
        db.add(entry("old", 10)).await.unwrap();
        db.add(entry("new", 20)).await.unwrap();
        db.add(entry("mid", 15)).await.unwrap();

        let page = db.list(1, 2).await.unwrap();

        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(
            page.items
                .iter()
                .map(|post| post.slug.as_str())
                .collect::<Vec<_>>(),
            vec!["new", "mid"]
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let db = InMemoryPostsDB::default();
        db.add(entry("abc", 1)).await.unwrap();

        assert!(db.delete("abc").await.unwrap());
        assert!(!db.delete("abc").await.unwrap());
        assert!(matches!(db.get("abc").await, Err(Error::ItemNotFound)));
    }
}
