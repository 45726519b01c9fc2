use anyhow::Context;
use reqwest::StatusCode;

use crate::model::error::AppError;
use crate::model::{
    OutcomeReport, Payload, RegisterRequest, ResponseEnvelope, TriggerRequest, Webhook,
};

use super::delivery::DeliveryEngine;
use super::i_notify::IWebhookNotifyService;
use super::i_registry::IWebhookRegistry;
use super::registry::InMemoryRegistry;

#[derive(Debug, Clone)]
pub struct WebhookNotifyServiceImpl<Registry: IWebhookRegistry + Clone = InMemoryRegistry> {
    registry: Registry,
    engine: DeliveryEngine,
}

impl<Registry> WebhookNotifyServiceImpl<Registry>
where
    Registry: IWebhookRegistry + Clone,
{
    pub fn new(registry: Registry, engine: DeliveryEngine) -> Self {
        Self { registry, engine }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl<Registry> IWebhookNotifyService for WebhookNotifyServiceImpl<Registry>
where
    Registry: IWebhookRegistry + Clone,
{
    async fn register(&self, request: RegisterRequest) -> Result<ResponseEnvelope, AppError> {
        let webhook = Webhook::try_from(request)?;
        let stored = self
            .registry
            .add(webhook)
            .await
            .context("failed to store webhook")?;
        tracing::info!("registered webhook for {}", stored.url());

        let result = OutcomeReport {
            url: Some(stored.url().to_string()),
            status_code: StatusCode::OK.as_u16(),
            message: format!(
                "Success creating webhook with url: {} and token: {}",
                stored.url(),
                stored.token()
            ),
        };
        Ok(ResponseEnvelope::build(vec![result], vec![]))
    }

    async fn trigger(&self, request: TriggerRequest) -> Result<ResponseEnvelope, AppError> {
        let payload = Payload::try_from(request)?;
        let webhooks = self
            .registry
            .list()
            .await
            .context("failed to list webhooks")?;
        tracing::info!("dispatching payload to {} webhooks", webhooks.len());
        Ok(self.engine.dispatch(&payload, &webhooks).await)
    }
}
