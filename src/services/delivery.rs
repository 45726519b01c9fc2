use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::model::error::DeliveryError;
use crate::model::{DeliveryOutcome, OutcomeReport, Payload, ResponseEnvelope, Webhook};

/// Body posted to every registered endpoint.
#[derive(Debug, Serialize)]
struct WireBody<'a> {
    token: &'a str,
    payload: &'a Value,
}

/// Fans a payload out to a set of webhooks: one POST per webhook, all in flight at
/// once, joined before returning.
#[derive(Debug, Clone)]
pub struct DeliveryEngine {
    client: reqwest::Client,
    timeout: Duration,
}

impl DeliveryEngine {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn from_config(cnf: &Config) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .tcp_keepalive(Duration::from_secs(cnf.tcp_keepalive_secs))
            .connect_timeout(cnf.delivery_connect_timeout())
            .build()
            .context("failed to build outbound http client")?;
        Ok(Self::new(client, cnf.delivery_timeout()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Delivers `payload` once to each of `webhooks` and waits for every delivery
    /// to settle. Exactly one outcome per webhook; a failing endpoint only shows
    /// up in `errors`.
    #[tracing::instrument(level = "debug", skip_all, fields(webhooks = webhooks.len()))]
    pub async fn dispatch(&self, payload: &Payload, webhooks: &[Webhook]) -> ResponseEnvelope {
        if webhooks.is_empty() {
            tracing::debug!("no webhooks registered, nothing to dispatch");
            return ResponseEnvelope::dispatched(vec![]);
        }

        let mut handlers = Vec::with_capacity(webhooks.len());
        for webhook in webhooks {
            let migrating_self = self.clone();
            let webhook = webhook.clone();
            let payload = payload.clone();
            handlers.push(tokio::spawn(async move {
                migrating_self.deliver(&webhook, &payload).await
            }));
        }
        let joined = futures::future::join_all(handlers).await;

        let outcomes: Vec<DeliveryOutcome> = webhooks
            .iter()
            .zip(joined)
            .map(|(webhook, joined)| match joined {
                Ok(outcome) => outcome,
                Err(e) => failure(webhook, DeliveryError::Aborted(e)),
            })
            .collect();

        let envelope = ResponseEnvelope::dispatched(outcomes);
        tracing::debug!(
            delivered = envelope.results.len(),
            failed = envelope.errors.len(),
            "fan-out joined"
        );
        envelope
    }

    /// One delivery attempt, classified. Never fails: errors become a failure
    /// outcome here.
    async fn deliver(&self, webhook: &Webhook, payload: &Payload) -> DeliveryOutcome {
        let start = std::time::Instant::now();
        let res = self.push_webhook(webhook, payload).await;
        tracing::debug!("elapsed time for delivery to {}: {:?}", webhook.url(), start.elapsed());
        match res {
            Ok((status, body)) => DeliveryOutcome::Success(OutcomeReport {
                url: Some(webhook.url().to_string()),
                status_code: status.as_u16(),
                message: format!("Success posting to {}: {}", webhook.url(), body),
            }),
            Err(e) => {
                let outcome = failure(webhook, e);
                tracing::warn!("delivery failed: {}", outcome.report().message);
                outcome
            }
        }
    }

    async fn push_webhook(
        &self,
        webhook: &Webhook,
        payload: &Payload,
    ) -> Result<(reqwest::StatusCode, String), DeliveryError> {
        let body = WireBody {
            token: webhook.token(),
            payload: payload.value(),
        };
        let resp = self
            .client
            .post(webhook.url())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = resp.status();
        // body read shares the request timeout
        let text = resp.text().await.map_err(DeliveryError::Transport)?;
        if status.is_success() {
            Ok((status, text))
        } else {
            Err(DeliveryError::Rejected { status, body: text })
        }
    }
}

fn failure(webhook: &Webhook, err: DeliveryError) -> DeliveryOutcome {
    DeliveryOutcome::Failure(OutcomeReport {
        url: Some(webhook.url().to_string()),
        status_code: err.status_code().as_u16(),
        message: format!("Error posting to {}: {}", webhook.url(), err.detail()),
    })
}
