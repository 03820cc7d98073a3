#![allow(dead_code)]

use steward_discord::{ApiSettings, DiscordClient};
use steward_error::{ReconcileErrorKind, StewardError, StewardErrorKind};
use steward_resources::FromDiscordClient;
use wiremock::MockServer;

pub const GUILD_ID: &str = "197038439483310086";
pub const CHANNEL_ID: &str = "41771983423143937";
pub const ROLE_ID: &str = "41771983423143936";
pub const WEBHOOK_ID: &str = "223704706495545344";
pub const USER_ID: &str = "80351110224678912";
pub const OTHER_USER_ID: &str = "80351110224678913";
pub const APPLICATION_ID: &str = "172150183260323840";
pub const INTEGRATION_ID: &str = "33590653072239123";

/// Adapter bound to a client pointed at the mock server.
pub fn adapter<A: FromDiscordClient>(server: &MockServer) -> A {
    let settings = ApiSettings::default().with_base_url(server.uri());
    A::from_client(DiscordClient::new(&settings, "test-token").expect("client builds"))
}

/// Number of requests the mock server has seen.
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}

/// Whether the error is a local capability refusal.
pub fn is_refusal(err: &StewardError) -> bool {
    match err.kind() {
        StewardErrorKind::Reconcile(inner) => {
            matches!(inner.kind(), ReconcileErrorKind::UnsupportedOperation { .. })
        }
        _ => false,
    }
}

/// Whether the error is a refused modification of someone else's identity.
pub fn is_foreign_identity(err: &StewardError) -> bool {
    match err.kind() {
        StewardErrorKind::Reconcile(inner) => {
            matches!(inner.kind(), ReconcileErrorKind::ForeignIdentity { .. })
        }
        _ => false,
    }
}
