use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::instrument;

use super::{ClientToken, TokenStore};
use crate::utils::timestamp_now;

pub struct RedisTokens {
    redis: deadpool_redis::Pool,
}

impl RedisTokens {
    pub const fn new(pool: deadpool_redis::Pool) -> Self {
        Self { redis: pool }
    }
}

fn create_key(id: &str) -> String {
    format!("viewed/{id}")
}

// Failures here are logged and swallowed: a lost token only means a
// later view may count again, the count write path never depends on it.
#[async_trait]
impl TokenStore for RedisTokens {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Option<ClientToken> {
        let mut db = self.redis.get().await.ok()?;

        let raw: String = db.get(create_key(id)).await.ok()?;

        serde_json::from_str(&raw)
            .map_err(|e| tracing::error!("malformed token {id}: {e}"))
            .ok()
    }

    #[instrument(skip(self, token))]
    async fn put(&self, token: &ClientToken) {
        let raw = match serde_json::to_string(token) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("token serialize error: {e}");
                return;
            }
        };

        let ttl = usize::try_from(token.expires_unix.saturating_sub(timestamp_now()))
            .unwrap_or_default()
            .max(1);

        if let Ok(mut db) = self.redis.get().await {
            let key = create_key(&token.id);
            db.set::<_, _, ()>(key.clone(), raw).await.ok();
            db.expire::<_, isize>(key, ttl).await.ok();
        }
    }
}
