//! Webhook endpoints.

use crate::{DiscordClient, DiscordResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Webhook object as returned by the API.
///
/// `token` is only present for incoming webhooks the caller can manage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Webhook snowflake
    pub id: String,
    /// Webhook type (1 incoming, 2 channel follower, 3 application)
    #[serde(rename = "type", default)]
    pub kind: u8,
    /// Guild the webhook belongs to
    #[serde(default)]
    pub guild_id: Option<String>,
    /// Channel the webhook posts to
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Default name
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar hash
    #[serde(default)]
    pub avatar: Option<String>,
    /// Secure token
    #[serde(default)]
    pub token: Option<String>,
    /// Owning application
    #[serde(default)]
    pub application_id: Option<String>,
    /// Execution URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Body for `POST /channels/{channel_id}/webhooks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateWebhookRequest {
    /// Webhook name
    pub name: String,
    /// Base64 image data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Body for `PATCH /webhooks/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifyWebhookRequest {
    /// Webhook name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Base64 image data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Channel to move the webhook to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl DiscordClient {
    /// `POST /channels/{channel_id}/webhooks`
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_webhook(
        &self,
        channel_id: &str,
        request: &CreateWebhookRequest,
    ) -> DiscordResult<Webhook> {
        self.post(&format!("/channels/{channel_id}/webhooks"), request)
            .await
    }

    /// `GET /webhooks/{id}`
    #[instrument(skip(self))]
    pub async fn get_webhook(&self, webhook_id: &str) -> DiscordResult<Webhook> {
        self.get(&format!("/webhooks/{webhook_id}")).await
    }

    /// `PATCH /webhooks/{id}`
    #[instrument(skip(self, request))]
    pub async fn modify_webhook(
        &self,
        webhook_id: &str,
        request: &ModifyWebhookRequest,
    ) -> DiscordResult<Webhook> {
        self.patch(&format!("/webhooks/{webhook_id}"), request)
            .await
    }

    /// `DELETE /webhooks/{id}`
    #[instrument(skip(self))]
    pub async fn delete_webhook(&self, webhook_id: &str) -> DiscordResult<()> {
        self.delete(&format!("/webhooks/{webhook_id}")).await
    }

    /// Execution URL for a webhook, preferring the one the API returned.
    pub fn webhook_url(&self, webhook: &Webhook) -> Option<String> {
        webhook.url.clone().or_else(|| {
            webhook
                .token
                .as_ref()
                .map(|token| format!("{}/webhooks/{}/{}", self.base_url(), webhook.id, token))
        })
    }
}
