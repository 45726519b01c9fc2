use crate::model::Webhook;

/// Storage for registered webhooks. Any backing store satisfies it; errors are
/// generic storage failures surfaced upstream as internal errors.
pub trait IWebhookRegistry: Send + Sync + 'static {
    /// Stores an already validated webhook. Visible to any `list` issued after
    /// this resolves.
    fn add(&self, webhook: Webhook) -> impl Future<Output = anyhow::Result<Webhook>> + Send;

    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<Webhook>>> + Send;
}
