use std::sync::Arc;

use crate::{
    poststore::{self, PostStore},
    tokens::{ClientToken, TokenStore},
    utils::timestamp_now,
};

#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        timestamp_now()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisteredView {
    pub counted: bool,
    pub token: ClientToken,
}

/// Decides whether a page view is attributed to the post's view count.
///
/// At most one increment per post is attributed within a token's
/// validity window. Two racing first views of the same client may both
/// count before a token exists, de-duplication is best effort, not
/// exactly once.
#[derive(Clone)]
pub struct ViewTracker {
    posts: Arc<dyn PostStore>,
    tokens: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
}

impl ViewTracker {
    pub fn new(
        posts: Arc<dyn PostStore>,
        tokens: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            tokens,
            clock,
        }
    }

    /// An expired or unknown incoming token behaves as if none was
    /// presented. If the count write fails no token is issued or
    /// extended, so the caller must not assume the view was counted.
    pub async fn register_view(
        &self,
        slug: &str,
        incoming: Option<&str>,
    ) -> poststore::Result<RegisteredView> {
        let now = self.clock.now_unix();

        let token = match incoming {
            Some(id) => self
                .tokens
                .get(id)
                .await
                .filter(|token| !token.is_expired(now)),
            None => None,
        };

        if let Some(token) = token.clone().filter(|token| token.marks(slug)) {
            tracing::debug!("view of {slug} already counted for {}", token.id);

            return Ok(RegisteredView {
                counted: false,
                token,
            });
        }

        let mut entry = self.posts.get(slug).await?;
        entry.post.views += 1;
        entry.bump_version();
        self.posts.put(entry).await?;

        let mut token = token.unwrap_or_else(|| ClientToken::issue(now));
        token.mark(slug, now);
        self.tokens.put(&token).await;

        tracing::debug!("counted view of {slug} for {}", token.id);

        Ok(RegisteredView {
            counted: true,
            token,
        })
    }
}
