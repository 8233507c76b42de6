use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ClientToken, TokenStore};

#[derive(Default)]
pub struct InMemoryTokens {
    pub db: Arc<Mutex<HashMap<String, ClientToken>>>,
}

#[async_trait]
impl TokenStore for InMemoryTokens {
    async fn get(&self, id: &str) -> Option<ClientToken> {
        self.db.lock().await.get(id).cloned()
    }

    async fn put(&self, token: &ClientToken) {
        self.db
            .lock()
            .await
            .insert(token.id.clone(), token.clone());
    }
}
