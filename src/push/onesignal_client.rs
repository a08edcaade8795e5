use crate::configuration::OneSignalSettings;
use crate::push::{ProviderResponse, PushNotification, PushProvider};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

pub struct OneSignalClient {
    http_client: Client,
    base_url: String,
    rest_api_key: Secret<String>,
}

#[derive(serde::Serialize)]
struct SendNotificationRequest<'a> {
    app_id: &'a str,
    include_player_ids: [&'a str; 1],
    contents: Contents<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct Contents<'a> {
    en: &'a str,
}

impl OneSignalClient {
    pub fn new(
        base_url: String,
        rest_api_key: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the OneSignal HTTP client.")?;
        Ok(Self {
            http_client,
            base_url,
            rest_api_key,
        })
    }

    pub fn from_settings(settings: &OneSignalSettings) -> Result<Self, anyhow::Error> {
        Self::new(
            settings.base_url.clone(),
            settings.rest_api_key.clone(),
            settings.timeout(),
        )
    }
}

#[async_trait]
impl PushProvider for OneSignalClient {
    #[tracing::instrument(
        name = "Send a notification through OneSignal",
        skip(self, notification),
        fields(provider_app_id = %notification.provider_app_id)
    )]
    async fn send_notification(
        &self,
        notification: &PushNotification<'_>,
    ) -> Result<ProviderResponse, anyhow::Error> {
        let url = format!(
            "{}/api/v1/notifications",
            self.base_url.trim_end_matches('/')
        );
        let request_body = SendNotificationRequest {
            app_id: notification.provider_app_id,
            include_player_ids: [notification.subscriber_id],
            contents: Contents {
                en: notification.message,
            },
            url: notification.url,
        };
        let response = self
            .http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Basic {}", self.rest_api_key.expose_secret()),
            )
            .json(&request_body)
            .send()
            .await
            .context("Failed to reach OneSignal.")?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .context("Failed to read the OneSignal response body.")?;
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
        if status >= 300 {
            tracing::warn!(status, "OneSignal rejected the notification");
        }
        Ok(ProviderResponse { status, body })
    }
}
