use std::sync::Arc;

use shared::{AddPost, AddPostErrors, EditPost, Page, PostInfo, ValidationError, POSTS_PER_PAGE};

use crate::{
    error::{InternalError, Result},
    poststore::{PostEntry, PostStore},
    tracker::{RegisteredView, ViewTracker},
    utils::{format_timestamp, timestamp_now},
};

#[derive(Clone)]
pub struct App {
    posts: Arc<dyn PostStore>,
    tracker: ViewTracker,
}

impl App {
    pub fn new(posts: Arc<dyn PostStore>, tracker: ViewTracker) -> Self {
        Self { posts, tracker }
    }

    pub async fn add_post(&self, request: AddPost) -> Result<PostInfo> {
        let mut errors = AddPostErrors::default();
        errors.check(&request.data.title, &request.data.body);

        let slug = shared::slugify(&request.data.title);
        if slug.is_empty() && errors.title.is_none() {
            errors.title = Some(ValidationError::Empty);
        }

        if errors.has_any() {
            return Err(InternalError::Validation(errors));
        }

        let now = timestamp_now();
        let post = PostInfo {
            slug,
            data: request.data,
            views: 0,
            create_time_unix: now,
            last_edit_unix: now,
            create_time_utc: format_timestamp(now),
        };

        self.posts.add(PostEntry::new(post.clone())).await?;

        tracing::info!("post added: {}", post.slug);

        Ok(post)
    }

    /// Returns the post together with the outcome of the view
    /// registration, so the web layer can hand the (possibly fresh)
    /// token back to the client.
    pub async fn view_post(
        &self,
        slug: &str,
        token_id: Option<&str>,
    ) -> Result<(PostInfo, RegisteredView)> {
        let registered = self.tracker.register_view(slug, token_id).await?;

        let entry = self.posts.get(slug).await?;

        Ok((entry.post, registered))
    }

    pub async fn edit_post(&self, slug: &str, request: EditPost) -> Result<PostInfo> {
        let mut errors = AddPostErrors::default();
        errors.check(&request.data.title, &request.data.body);

        if errors.has_any() {
            return Err(InternalError::Validation(errors));
        }

        let mut entry = self.posts.get(slug).await?;

        // the slug stays put, posts do not move when retitled
        entry.post.data = request.data;
        entry.post.last_edit_unix = timestamp_now();
        entry.bump_version();

        self.posts.put(entry.clone()).await?;

        tracing::info!("post edited: {slug}");

        Ok(entry.post)
    }

    pub async fn delete_post(&self, slug: &str) -> Result<bool> {
        let deleted = self.posts.delete(slug).await?;

        if deleted {
            tracing::info!("post deleted: {slug}");
        }

        Ok(deleted)
    }

    pub async fn list_posts(&self, page: usize) -> Result<Page<PostInfo>> {
        Ok(self.posts.list(page, POSTS_PER_PAGE).await?)
    }

    pub async fn archive(&self) -> Result<Vec<PostInfo>> {
        Ok(self.posts.list_all().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test {
    use pretty_assertions::assert_eq;
    use shared::PostData;

    use super::*;
    use crate::{
        poststore::{self, InMemoryPostsDB},
        tokens::InMemoryTokens,
        tracker::SystemClock,
    };

    fn test_app() -> App {
        let posts = Arc::new(InMemoryPostsDB::default());
        let tracker = ViewTracker::new(
            Arc::clone(&posts) as Arc<dyn PostStore>,
            Arc::new(InMemoryTokens::default()),
            Arc::new(SystemClock),
        );

        App::new(posts, tracker)
    }

    fn add_request(title: &str) -> AddPost {
        AddPost {
            data: PostData {
                title: title.to_string(),
                body: String::from("some body text"),
                tags: std::collections::HashSet::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_add_derives_slug() {
        let app = test_app();

        let post = app.add_post(add_request("Hello World!")).await.unwrap();

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.views, 0);
    }

    #[tokio::test]
    async fn test_add_duplicate_title_conflicts() {
        let app = test_app();
        app.add_post(add_request("Hello World")).await.unwrap();

        let res = app.add_post(add_request("Hello World")).await;

        assert!(matches!(
            res,
            Err(InternalError::PostsDB(poststore::Error::Conflict))
        ));
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_input() {
        let app = test_app();

        let res = app.add_post(add_request("??")).await;

        assert!(matches!(res, Err(InternalError::Validation(_))));
    }

    #[tokio::test]
    async fn test_view_counts_once_per_token() {
        let app = test_app();
        app.add_post(add_request("Hello World")).await.unwrap();

        let (post, registered) = app.view_post("hello-world", None).await.unwrap();
        assert_eq!(post.views, 1);
        assert!(registered.counted);

        let (post, repeat) = app
            .view_post("hello-world", Some(&registered.token.id))
            .await
            .unwrap();
        assert_eq!(post.views, 1);
        assert!(!repeat.counted);
    }

    #[tokio::test]
    async fn test_view_after_delete_is_not_found() {
        let app = test_app();
        app.add_post(add_request("Hello World")).await.unwrap();

        assert!(app.delete_post("hello-world").await.unwrap());

        let res = app.view_post("hello-world", None).await;

        assert!(matches!(
            res,
            Err(InternalError::PostsDB(poststore::Error::ItemNotFound))
        ));
    }

    #[tokio::test]
    async fn test_edit_keeps_slug_and_views() {
        let app = test_app();
        app.add_post(add_request("Hello World")).await.unwrap();
        app.view_post("hello-world", None).await.unwrap();

        let edited = app
            .edit_post(
                "hello-world",
                EditPost {
                    data: PostData {
                        title: String::from("Hello Again"),
                        body: String::from("new body"),
                        tags: std::collections::HashSet::new(),
                    },
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.slug, "hello-world");
        assert_eq!(edited.views, 1);
        assert_eq!(edited.data.title, "Hello Again");
    }

    #[tokio::test]
    async fn test_listing_pages() {
        let app = test_app();
        for i in 0..7 {
            app.add_post(add_request(&format!("Post Number {i}")))
                .await
                .unwrap();
        }

        let page = app.list_posts(2).await.unwrap();

        assert_eq!(page.total_items, 7);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages(), 2);

        let all = app.archive().await.unwrap();
        assert_eq!(all.len(), 7);
    }
}
