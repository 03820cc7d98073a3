//! Wire-level behavior of the Discord REST client against a mock server.

use serde_json::json;
use steward_discord::{
    ApiSettings, CreateChannelRequest, CreateRoleRequest, DiscordClient, ModifyGuildRequest,
    ModifyMemberRequest,
};
use steward_error::DiscordErrorKind;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn client_for(server: &MockServer) -> DiscordClient {
    let settings = ApiSettings::default().with_base_url(server.uri());
    DiscordClient::new(&settings, TOKEN).expect("client builds")
}

#[tokio::test]
async fn sends_bot_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/guilds/197038439483310086"))
        .and(header("authorization", "Bot test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "197038439483310086",
            "name": "Discord Developers"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let guild = client_for(&server)
        .get_guild("197038439483310086")
        .await
        .expect("guild");
    assert_eq!(guild.name, "Discord Developers");
    assert!(guild.features.is_empty());
}

#[tokio::test]
async fn custom_auth_scheme_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .and(header("authorization", "Bearer oauth-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "80351110224678912",
            "username": "nelly"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ApiSettings::default()
        .with_base_url(server.uri())
        .with_auth_scheme("Bearer");
    let client = DiscordClient::new(&settings, "oauth-token").expect("client builds");
    let user = client.current_user().await.expect("user");
    assert_eq!(user.username, "nelly");
}

#[tokio::test]
async fn unset_optional_fields_are_omitted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/guilds/G1/channels"))
        .and(body_json(json!({"name": "general", "type": 0})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "C1",
            "type": 0,
            "name": "general"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateChannelRequest {
        name: "general".into(),
        ..Default::default()
    };
    let channel = client_for(&server)
        .create_channel("G1", &request)
        .await
        .expect("channel");
    assert_eq!(channel.id, "C1");
}

#[tokio::test]
async fn patch_carries_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/guilds/197038439483310086"))
        .and(body_json(json!({"name": "Renamed", "afk_timeout": 300})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "197038439483310086",
            "name": "Renamed",
            "afk_timeout": 300
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ModifyGuildRequest {
        name: Some("Renamed".into()),
        afk_timeout: Some(300),
        ..Default::default()
    };
    let guild = client_for(&server)
        .modify_guild("197038439483310086", &request)
        .await
        .expect("guild");
    assert_eq!(guild.afk_timeout, 300);
}

#[tokio::test]
async fn member_roles_replace_as_a_list() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/guilds/1/members/2"))
        .and(body_json(json!({"roles": ["10", "11"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "roles": ["10", "11"],
            "deaf": false,
            "mute": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ModifyMemberRequest {
        roles: Some(vec!["10".into(), "11".into()]),
        ..Default::default()
    };
    let member = client_for(&server)
        .modify_member("1", "2", &request)
        .await
        .expect("member");
    assert_eq!(member.roles.len(), 2);
}

#[tokio::test]
async fn client_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/guilds/1/roles"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_string(r#"{"message":"Missing Permissions","code":50013}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_role("1", &CreateRoleRequest::default())
        .await
        .expect_err("403 is an error");
    assert_eq!(err.status(), Some(403));
    assert!(!err.is_not_found());
    match err.kind() {
        DiscordErrorKind::Api { body, .. } => assert!(body.contains("Missing Permissions")),
        other => panic!("unexpected error kind: {other}"),
    }
}

#[tokio::test]
async fn server_error_without_body_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/guilds/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_guild("1")
        .await
        .expect_err("500 is an error");
    assert_eq!(err.status(), Some(500));
    match err.kind() {
        DiscordErrorKind::Api { body, .. } => assert!(body.is_empty()),
        other => panic!("unexpected error kind: {other}"),
    }
}

#[tokio::test]
async fn not_found_status_is_recognized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/404404404404404404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"message":"Unknown Channel"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_channel("404404404404404404")
        .await
        .expect_err("404 is an error");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn rate_limit_is_an_ordinary_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/webhooks/1"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "message": "You are being rate limited.",
            "retry_after": 1.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_webhook("1")
        .await
        .expect_err("429 is an error");
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn undecodable_success_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invites/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_invite("abc123")
        .await
        .expect_err("decode failure");
    assert!(matches!(err.kind(), DiscordErrorKind::Decode(_)));
}

#[tokio::test]
async fn role_lookup_scans_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/guilds/1/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "10", "name": "@everyone", "permissions": "0"},
            {"id": "11", "name": "mods", "permissions": "8", "hoist": true}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let role = client.get_role("1", "11").await.expect("role");
    assert_eq!(role.name, "mods");
    assert!(role.hoist);

    let err = client.get_role("1", "12").await.expect_err("missing role");
    assert!(err.is_not_found());
    assert!(matches!(err.kind(), DiscordErrorKind::NotFound { .. }));
}

#[tokio::test]
async fn integration_lookup_scans_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/guilds/1/integrations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "33", "name": "twitch sub", "type": "twitch", "enabled": true,
             "account": {"id": "abc", "name": "streamer"}}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let integration = client.get_integration("1", "33").await.expect("integration");
    assert_eq!(integration.kind, "twitch");
    assert_eq!(integration.account.map(|a| a.name).as_deref(), Some("streamer"));
    assert!(client.get_integration("1", "34").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/channels/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_channel("1")
        .await
        .expect("delete succeeds");
}

#[test]
fn webhook_url_falls_back_to_token() {
    let settings = ApiSettings::default().with_base_url("https://discord.test/api/v10/");
    let client = DiscordClient::new(&settings, TOKEN).expect("client builds");
    let webhook: steward_discord::Webhook = serde_json::from_value(json!({
        "id": "55",
        "type": 1,
        "token": "secret"
    }))
    .expect("webhook decodes");

    assert_eq!(
        client.webhook_url(&webhook).as_deref(),
        Some("https://discord.test/api/v10/webhooks/55/secret")
    );
    assert_eq!(client.invite_url("abc"), "https://discord.gg/abc");
}
