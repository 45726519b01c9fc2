use std::sync::Arc;

use tokio::sync::Mutex;

use crate::model::Webhook;

use super::i_registry::IWebhookRegistry;

/// In-memory registry. Cloning yields another handle onto the same list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    webhooks: Arc<Mutex<Vec<Webhook>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_many(&self, webhooks: impl IntoIterator<Item = Webhook>) -> Vec<Webhook> {
        let added: Vec<Webhook> = webhooks.into_iter().collect();
        self.webhooks.lock().await.extend(added.iter().cloned());
        added
    }

    /// Drops every registration. Admin and test use only.
    pub async fn reset(&self) {
        self.webhooks.lock().await.clear();
        tracing::debug!("registry reset");
    }
}

impl IWebhookRegistry for InMemoryRegistry {
    async fn add(&self, webhook: Webhook) -> anyhow::Result<Webhook> {
        let mut webhooks = self.webhooks.lock().await;
        webhooks.push(webhook.clone());
        tracing::debug!(url = webhook.url(), total = webhooks.len(), "webhook stored");
        Ok(webhook)
    }

    async fn list(&self) -> anyhow::Result<Vec<Webhook>> {
        Ok(self.webhooks.lock().await.clone())
    }
}
