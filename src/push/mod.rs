mod onesignal_client;

use async_trait::async_trait;
pub use onesignal_client::OneSignalClient;

/// A single notification addressed to one provider subscriber.
#[derive(Debug)]
pub struct PushNotification<'a> {
    pub provider_app_id: &'a str,
    pub subscriber_id: &'a str,
    pub message: &'a str,
    pub url: Option<&'a str>,
}

/// What the provider answered. Non-2xx answers are still a `ProviderResponse`;
/// only transport failures surface as errors.
#[derive(Debug)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

#[async_trait]
pub trait PushProvider: Send + Sync {
    async fn send_notification(
        &self,
        notification: &PushNotification<'_>,
    ) -> Result<ProviderResponse, anyhow::Error>;
}
