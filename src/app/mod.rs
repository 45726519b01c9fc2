use crate::services::i_notify::IWebhookNotifyService;
use crate::services::notify::WebhookNotifyServiceImpl;

/// Handles shared by every route.
#[derive(Debug, Clone)]
pub struct AppEnv<NotifyService: IWebhookNotifyService + Clone = WebhookNotifyServiceImpl> {
    pub notify_svc: NotifyService,
}

impl<NotifyService> AppEnv<NotifyService>
where
    NotifyService: IWebhookNotifyService + Clone,
{
    pub fn new(notify_svc: NotifyService) -> Self {
        Self { notify_svc }
    }
}
