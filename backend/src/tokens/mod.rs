mod in_memory;
mod redis;

pub use in_memory::InMemoryTokens;
pub use redis::RedisTokens;

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Per-browser marker used to deduplicate view counts.
///
/// The client only ever carries the opaque `id`, the viewed-set and
/// expiry live in the token store. A token is never shared across
/// clients.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ClientToken {
    pub id: String,
    pub viewed: HashSet<String>,
    #[serde(rename = "expiresUnix")]
    pub expires_unix: i64,
}

impl ClientToken {
    #[must_use]
    pub fn issue(now: i64) -> Self {
        Self {
            id: Ulid::new().to_string(),
            viewed: HashSet::new(),
            expires_unix: now + TOKEN_TTL_SECONDS,
        }
    }

    #[must_use]
    pub const fn is_expired(&self, now: i64) -> bool {
        self.expires_unix <= now
    }

    #[must_use]
    pub fn marks(&self, slug: &str) -> bool {
        self.viewed.contains(slug)
    }

    pub fn mark(&mut self, slug: &str, now: i64) {
        self.viewed.insert(slug.to_string());
        self.expires_unix = now + TOKEN_TTL_SECONDS;
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, id: &str) -> Option<ClientToken>;
    async fn put(&self, token: &ClientToken);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_token_lifecycle() {
        let mut token = ClientToken::issue(100);

        assert!(!token.is_expired(100 + TOKEN_TTL_SECONDS - 1));
        assert!(token.is_expired(100 + TOKEN_TTL_SECONDS));
        assert!(!token.marks("abc"));

        token.mark("abc", 200);

        assert!(token.marks("abc"));
        assert_eq!(token.expires_unix, 200 + TOKEN_TTL_SECONDS);
    }
}
