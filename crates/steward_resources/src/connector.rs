//! Connectors: resolve credentials and bind a fresh client per pass.

use crate::{
    ApplicationAdapter, ChannelAdapter, GuildAdapter, IntegrationAdapter, InviteAdapter,
    MemberAdapter, RoleAdapter, UserAdapter, WebhookAdapter,
};
use async_trait::async_trait;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use steward_core::Managed;
use steward_discord::{ClientFactory, DiscordClient};
use steward_error::{CredentialError, CredentialErrorKind, StewardResult};
use steward_interface::{Connector, CredentialResolver, ExternalClient, ProviderConfigStore};
use tracing::{debug, instrument};

/// Adapters that wrap a bound remote API client.
pub trait FromDiscordClient {
    /// Wrap `client`.
    fn from_client(client: DiscordClient) -> Self;
}

/// Connector for adapter `A`.
///
/// Every [`connect`](Connector::connect) resolves the resource's provider
/// config to a token and builds a new client, so no state is shared between
/// resources or passes.
///
/// # Example
///
/// ```rust,ignore
/// let connector = GuildConnector::new(configs, secrets, Arc::new(HttpClientFactory::default()));
/// let adapter = connector.connect(&guild).await?;
/// let observation = adapter.observe(&mut guild).await?;
/// ```
pub struct DiscordConnector<A> {
    configs: Arc<dyn ProviderConfigStore>,
    secrets: Arc<dyn CredentialResolver>,
    factory: Arc<dyn ClientFactory>,
    adapter: PhantomData<fn() -> A>,
}

impl<A> DiscordConnector<A> {
    /// Connector using the given collaborators.
    pub fn new(
        configs: Arc<dyn ProviderConfigStore>,
        secrets: Arc<dyn CredentialResolver>,
        factory: Arc<dyn ClientFactory>,
    ) -> Self {
        Self {
            configs,
            secrets,
            factory,
            adapter: PhantomData,
        }
    }
}

impl<A> Clone for DiscordConnector<A> {
    fn clone(&self) -> Self {
        Self {
            configs: Arc::clone(&self.configs),
            secrets: Arc::clone(&self.secrets),
            factory: Arc::clone(&self.factory),
            adapter: PhantomData,
        }
    }
}

impl<A> fmt::Debug for DiscordConnector<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConnector")
            .field("adapter", &std::any::type_name::<A>())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<A> Connector for DiscordConnector<A>
where
    A: ExternalClient + FromDiscordClient + 'static,
{
    type Client = A;

    #[instrument(skip(self, mr), fields(resource = %mr.name()))]
    async fn connect(&self, mr: &Managed<A::Spec, A::Observation>) -> StewardResult<A> {
        let reference = mr.provider_config_ref().ok_or_else(|| {
            CredentialError::new(CredentialErrorKind::MissingProviderConfigRef(
                mr.name().to_string(),
            ))
        })?;

        let config = self.configs.provider_config(&reference.name).await?;
        let selector = config.credentials().secret_ref.as_ref().ok_or_else(|| {
            CredentialError::new(CredentialErrorKind::MissingSecretRef(
                config.name().clone(),
            ))
        })?;

        let token = self.secrets.resolve(selector).await?;
        let client = self.factory.build(&token)?;
        debug!(provider_config = %reference.name, "Connected");
        Ok(A::from_client(client))
    }
}

/// Connector for guilds.
pub type GuildConnector = DiscordConnector<GuildAdapter>;
/// Connector for channels.
pub type ChannelConnector = DiscordConnector<ChannelAdapter>;
/// Connector for roles.
pub type RoleConnector = DiscordConnector<RoleAdapter>;
/// Connector for webhooks.
pub type WebhookConnector = DiscordConnector<WebhookAdapter>;
/// Connector for invites.
pub type InviteConnector = DiscordConnector<InviteAdapter>;
/// Connector for guild members.
pub type MemberConnector = DiscordConnector<MemberAdapter>;
/// Connector for users.
pub type UserConnector = DiscordConnector<UserAdapter>;
/// Connector for applications.
pub type ApplicationConnector = DiscordConnector<ApplicationAdapter>;
/// Connector for integrations.
pub type IntegrationConnector = DiscordConnector<IntegrationAdapter>;
