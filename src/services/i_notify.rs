use crate::model::error::AppError;
use crate::model::{RegisterRequest, ResponseEnvelope, TriggerRequest};

pub trait IWebhookNotifyService: Send + Sync + 'static {
    /// Validates and stores one webhook, answering with a single-result envelope.
    fn register(
        &self,
        request: RegisterRequest,
    ) -> impl Future<Output = Result<ResponseEnvelope, AppError>> + Send;

    /// Validates the payload, then fans it out to every registered webhook.
    /// Fails only on invalid input or a storage error; delivery failures are
    /// carried inside the envelope.
    fn trigger(
        &self,
        request: TriggerRequest,
    ) -> impl Future<Output = Result<ResponseEnvelope, AppError>> + Send;
}
