//! Invite, member, user, application and integration adapters.
//!
//! These kinds refuse some verbs outright. Refusals must never reach the
//! remote API.

mod common;

use common::{
    APPLICATION_ID, CHANNEL_ID, GUILD_ID, INTEGRATION_ID, OTHER_USER_ID, USER_ID, adapter,
    is_foreign_identity, is_refusal, request_count,
};
use serde_json::json;
use steward_core::{ConditionReason, ConditionType, Operation, ResourceKind};
use steward_interface::ExternalClient;
use steward_resources::{
    ApplicationAdapter, ApplicationResource, ApplicationSpec, IntegrationAdapter,
    IntegrationResource, IntegrationSpec, InviteAdapter, InviteResource, InviteSpec,
    MemberAdapter, MemberResource, MemberSpec, UserAdapter, UserResource, UserSpec,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INVITE_CODE: &str = "abc123XY";

fn invite_body() -> serde_json::Value {
    json!({
        "code": INVITE_CODE,
        "guild": {"id": GUILD_ID, "name": "Steward HQ"},
        "channel": {"id": CHANNEL_ID, "name": "general", "type": 0},
        "max_age": 3600,
        "max_uses": 0,
        "temporary": false
    })
}

fn invite_spec() -> InviteSpec {
    InviteSpec {
        channel_id: CHANNEL_ID.into(),
        max_age: Some(3600),
        ..Default::default()
    }
}

#[tokio::test]
async fn invite_create_returns_url_and_observes_up_to_date() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/channels/{CHANNEL_ID}/invites")))
        .and(body_json(json!({"max_age": 3600})))
        .respond_with(ResponseTemplate::new(200).set_body_json(invite_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/invites/{INVITE_CODE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(invite_body()))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: InviteAdapter = adapter(&server);
    let mut mr = InviteResource::new("welcome", invite_spec());

    let creation = adapter.create(&mut mr).await.expect("create");
    assert_eq!(mr.external_name(), Some(INVITE_CODE));
    assert_eq!(
        creation.connection_details.get_str("url"),
        Some("https://discord.gg/abc123XY")
    );

    let observation = adapter.observe(&mut mr).await.expect("observe");
    assert!(observation.resource_exists);
    assert!(observation.resource_up_to_date);
    assert_eq!(
        mr.observed().and_then(|o| o.guild_id.as_deref()),
        Some(GUILD_ID)
    );
}

#[tokio::test]
async fn invite_update_never_calls_remote() {
    let server = MockServer::start().await;
    let adapter: InviteAdapter = adapter(&server);
    let mut mr = InviteResource::new("welcome", invite_spec()).with_external_name(INVITE_CODE);

    adapter.update(&mut mr).await.expect("update is a no-op");
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn invite_with_malformed_code_is_not_looked_up() {
    let server = MockServer::start().await;
    let adapter: InviteAdapter = adapter(&server);
    let mut mr = InviteResource::new("welcome", invite_spec()).with_external_name("my-invite");

    assert!(!adapter.observe(&mut mr).await.unwrap().resource_exists);
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn invite_delete_twice_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/invites/{INVITE_CODE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(invite_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/invites/{INVITE_CODE}")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Unknown Invite"})),
        )
        .mount(&server)
        .await;

    let adapter: InviteAdapter = adapter(&server);
    let mut mr = InviteResource::new("welcome", invite_spec()).with_external_name(INVITE_CODE);

    adapter.delete(&mut mr).await.expect("first delete");
    adapter.delete(&mut mr).await.expect("second delete");
}

fn member_spec() -> MemberSpec {
    MemberSpec {
        guild_id: GUILD_ID.into(),
        user_id: Some(USER_ID.into()),
        nick: Some("Nelly".into()),
        roles: Some(vec!["41771983423143936".into(), "41771983423143937".into()]),
        ..Default::default()
    }
}

#[tokio::test]
async fn member_is_discovered_from_spec_and_adopted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/guilds/{GUILD_ID}/members/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": USER_ID, "username": "nelly"},
            "nick": "Nelly",
            "roles": ["41771983423143937", "41771983423143936"],
            "deaf": false,
            "mute": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let adapter: MemberAdapter = adapter(&server);
    let mut mr = MemberResource::new("nelly", member_spec());

    let observation = adapter.observe(&mut mr).await.expect("observe");
    assert!(observation.resource_exists);
    assert!(observation.resource_up_to_date);
    assert_eq!(mr.external_name(), Some(USER_ID));

    adapter.update(&mut mr).await.expect("no-op update");
}

#[tokio::test]
async fn member_update_replaces_roles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/guilds/{GUILD_ID}/members/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": USER_ID, "username": "nelly"},
            "nick": "Nelly",
            "roles": ["41771983423143936"],
            "deaf": false,
            "mute": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/guilds/{GUILD_ID}/members/{USER_ID}")))
        .and(body_json(json!({
            "roles": ["41771983423143936", "41771983423143937"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": USER_ID, "username": "nelly"},
            "nick": "Nelly",
            "roles": ["41771983423143936", "41771983423143937"],
            "deaf": false,
            "mute": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: MemberAdapter = adapter(&server);
    let mut mr = MemberResource::new("nelly", member_spec());

    assert!(!adapter.observe(&mut mr).await.unwrap().resource_up_to_date);
    adapter.update(&mut mr).await.expect("update");
    assert_eq!(mr.observed().map(|o| o.roles.len()), Some(2));
}

#[tokio::test]
async fn member_that_left_is_reported_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/guilds/{GUILD_ID}/members/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": USER_ID, "username": "nelly"},
            "nick": "Nelly",
            "roles": [],
            "deaf": false,
            "mute": false
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/guilds/{GUILD_ID}/members/{USER_ID}")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "Unknown Member", "code": 10007})),
        )
        .mount(&server)
        .await;

    let adapter: MemberAdapter = adapter(&server);
    let mut mr = MemberResource::new("nelly", member_spec());

    assert!(adapter.observe(&mut mr).await.unwrap().resource_exists);
    assert!(mr.observed().is_some());

    let observation = adapter.observe(&mut mr).await.expect("observe");
    assert!(!observation.resource_exists);
    assert!(mr.observed().is_none());
    assert_eq!(
        mr.condition(ConditionType::Ready).map(|c| c.reason),
        Some(ConditionReason::Unavailable)
    );
    assert_eq!(mr.external_name(), Some(USER_ID));
}

#[tokio::test]
async fn member_without_user_id_is_absent_without_calls() {
    let server = MockServer::start().await;
    let adapter: MemberAdapter = adapter(&server);
    let mut mr = MemberResource::new(
        "nobody",
        MemberSpec {
            guild_id: GUILD_ID.into(),
            ..Default::default()
        },
    );

    assert!(!adapter.observe(&mut mr).await.unwrap().resource_exists);
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn member_already_absent_delete_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/guilds/{GUILD_ID}/members/{USER_ID}")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "Unknown Member", "code": 10007})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let adapter: MemberAdapter = adapter(&server);
    let mut mr = MemberResource::new("nelly", member_spec()).with_external_name(USER_ID);

    adapter.delete(&mut mr).await.expect("already gone");
    adapter.delete(&mut mr).await.expect("still gone");
}

#[tokio::test]
async fn member_create_is_refused_locally() {
    let server = MockServer::start().await;
    let adapter: MemberAdapter = adapter(&server);
    let mut mr = MemberResource::new("nelly", member_spec());

    let err = adapter.create(&mut mr).await.expect_err("refused");
    assert!(is_refusal(&err));
    assert!(err.to_string().contains("invite or OAuth2"));
    assert_eq!(request_count(&server).await, 0);
}

fn me_body() -> serde_json::Value {
    json!({"id": USER_ID, "username": "steward-bot", "bot": true})
}

#[tokio::test]
async fn user_defaults_to_the_authenticated_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_body()))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: UserAdapter = adapter(&server);
    let mut mr = UserResource::new("me", UserSpec::default());

    let observation = adapter.observe(&mut mr).await.expect("observe");
    assert!(observation.resource_exists);
    assert!(observation.resource_up_to_date);
    assert_eq!(mr.external_name(), Some(USER_ID));
}

#[tokio::test]
async fn user_updates_own_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/@me"))
        .and(body_json(json!({"username": "steward"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": USER_ID,
            "username": "steward",
            "bot": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: UserAdapter = adapter(&server);
    let mut mr = UserResource::new(
        "me",
        UserSpec {
            username: Some("steward".into()),
            ..Default::default()
        },
    );

    assert!(!adapter.observe(&mut mr).await.unwrap().resource_up_to_date);
    adapter.update(&mut mr).await.expect("update");
    assert_eq!(mr.observed().map(|o| o.username.as_str()), Some("steward"));
}

#[tokio::test]
async fn user_refuses_to_modify_someone_else() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{OTHER_USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": OTHER_USER_ID,
            "username": "someone"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_body()))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let adapter: UserAdapter = adapter(&server);
    let mut mr = UserResource::new(
        "someone",
        UserSpec {
            user_id: Some(OTHER_USER_ID.into()),
            username: Some("renamed".into()),
            avatar: None,
        },
    );

    assert!(!adapter.observe(&mut mr).await.unwrap().resource_up_to_date);
    let err = adapter.update(&mut mr).await.expect_err("foreign identity");
    assert!(is_foreign_identity(&err));
}

#[tokio::test]
async fn user_with_malformed_external_name_is_not_rebound() {
    let server = MockServer::start().await;
    let adapter: UserAdapter = adapter(&server);
    let mut mr = UserResource::new("u", UserSpec::default()).with_external_name("my-user");

    assert!(!adapter.observe(&mut mr).await.unwrap().resource_exists);
    assert_eq!(mr.external_name(), Some("my-user"));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn user_create_refused_and_delete_only_untracks() {
    let server = MockServer::start().await;
    let adapter: UserAdapter = adapter(&server);
    let mut mr = UserResource::new("me", UserSpec::default()).with_external_name(USER_ID);

    assert!(is_refusal(&adapter.create(&mut mr).await.unwrap_err()));
    adapter.delete(&mut mr).await.expect("untrack");
    adapter.delete(&mut mr).await.expect("untrack again");
    assert_eq!(request_count(&server).await, 0);
}

fn own_application() -> serde_json::Value {
    json!({
        "id": APPLICATION_ID,
        "name": "Steward",
        "description": "old",
        "tags": ["moderation", "utility"],
        "owner": {"id": USER_ID, "username": "nelly"}
    })
}

#[tokio::test]
async fn application_patches_only_drifted_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(own_application()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/applications/@me"))
        .and(body_json(json!({"description": "new"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": APPLICATION_ID,
            "name": "Steward",
            "description": "new",
            "tags": ["moderation", "utility"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: ApplicationAdapter = adapter(&server);
    let mut mr = ApplicationResource::new(
        "steward",
        ApplicationSpec {
            description: Some("new".into()),
            tags: Some(vec!["utility".into(), "moderation".into()]),
            icon: Some("data:image/png;base64,AAAA".into()),
            ..Default::default()
        },
    );

    let observation = adapter.observe(&mut mr).await.expect("observe");
    assert!(!observation.resource_up_to_date);
    assert_eq!(mr.external_name(), Some(APPLICATION_ID));

    adapter.update(&mut mr).await.expect("update");
    assert_eq!(mr.observed().map(|o| o.description.as_str()), Some("new"));
}

#[tokio::test]
async fn foreign_application_is_read_through_rpc() {
    let other = "172150183260323841";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(own_application()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/applications/{other}/rpc")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": other,
            "name": "Someone Else",
            "description": "theirs"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: ApplicationAdapter = adapter(&server);
    let mut mr = ApplicationResource::new(
        "other",
        ApplicationSpec {
            application_id: Some(other.into()),
            description: Some("mine now".into()),
            ..Default::default()
        },
    );

    let observation = adapter.observe(&mut mr).await.expect("observe");
    assert!(observation.resource_exists);
    assert!(!observation.resource_up_to_date);
    assert_eq!(mr.external_name(), Some(other));

    let err = adapter.update(&mut mr).await.expect_err("foreign identity");
    assert!(is_foreign_identity(&err));
}

#[tokio::test]
async fn application_with_malformed_external_name_is_not_rebound() {
    let server = MockServer::start().await;
    let adapter: ApplicationAdapter = adapter(&server);
    let mut mr =
        ApplicationResource::new("app", ApplicationSpec::default()).with_external_name("my-app");

    assert!(!adapter.observe(&mut mr).await.unwrap().resource_exists);
    assert_eq!(mr.external_name(), Some("my-app"));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn foreign_application_is_observed_when_own_lookup_fails() {
    let other = "172150183260323841";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/@me"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Unknown Application"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/applications/{other}/rpc")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": other,
            "name": "Someone Else",
            "description": "theirs"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: ApplicationAdapter = adapter(&server);
    let mut mr = ApplicationResource::new(
        "other",
        ApplicationSpec {
            application_id: Some(other.into()),
            ..Default::default()
        },
    );

    let observation = adapter.observe(&mut mr).await.expect("observe");
    assert!(observation.resource_exists);
    assert!(observation.resource_up_to_date);
    assert_eq!(mr.observed().map(|o| o.name.as_str()), Some("Someone Else"));
}

#[tokio::test]
async fn application_create_refused_and_delete_only_untracks() {
    let server = MockServer::start().await;
    let adapter: ApplicationAdapter = adapter(&server);
    let mut mr = ApplicationResource::new("steward", ApplicationSpec::default());

    assert!(is_refusal(&adapter.create(&mut mr).await.unwrap_err()));
    adapter.delete(&mut mr).await.expect("untrack");
    assert_eq!(request_count(&server).await, 0);
}

fn integrations_body() -> serde_json::Value {
    json!([
        {
            "id": INTEGRATION_ID,
            "name": "Twitch Subs",
            "type": "twitch",
            "enabled": true,
            "account": {"id": "12345", "name": "streamer"}
        }
    ])
}

#[tokio::test]
async fn integration_is_observed_through_list_scan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/guilds/{GUILD_ID}/integrations")))
        .respond_with(ResponseTemplate::new(200).set_body_json(integrations_body()))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: IntegrationAdapter = adapter(&server);
    let mut mr = IntegrationResource::new(
        "twitch",
        IntegrationSpec {
            guild_id: GUILD_ID.into(),
            integration_id: Some(INTEGRATION_ID.into()),
        },
    );

    let observation = adapter.observe(&mut mr).await.expect("observe");
    assert!(observation.resource_exists);
    assert!(observation.resource_up_to_date);
    assert_eq!(mr.external_name(), Some(INTEGRATION_ID));
    assert_eq!(
        mr.observed().and_then(|o| o.account_name.as_deref()),
        Some("streamer")
    );
}

#[tokio::test]
async fn integration_missing_from_list_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/guilds/{GUILD_ID}/integrations")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let adapter: IntegrationAdapter = adapter(&server);
    let mut mr = IntegrationResource::new(
        "twitch",
        IntegrationSpec {
            guild_id: GUILD_ID.into(),
            integration_id: Some(INTEGRATION_ID.into()),
        },
    );

    assert!(!adapter.observe(&mut mr).await.unwrap().resource_exists);
    assert!(mr.external_name().is_none());
}

#[tokio::test]
async fn integration_create_and_update_are_refused_locally() {
    let server = MockServer::start().await;
    let adapter: IntegrationAdapter = adapter(&server);
    let mut mr = IntegrationResource::new(
        "twitch",
        IntegrationSpec {
            guild_id: GUILD_ID.into(),
            integration_id: Some(INTEGRATION_ID.into()),
        },
    )
    .with_external_name(INTEGRATION_ID);

    assert!(is_refusal(&adapter.create(&mut mr).await.unwrap_err()));
    let err = adapter.update(&mut mr).await.unwrap_err();
    assert!(is_refusal(&err));
    assert!(err.to_string().contains("no modify endpoint"));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn integration_delete_twice_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/guilds/{GUILD_ID}/integrations/{INTEGRATION_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/guilds/{GUILD_ID}/integrations/{INTEGRATION_ID}")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Unknown Integration"})),
        )
        .mount(&server)
        .await;

    let adapter: IntegrationAdapter = adapter(&server);
    let mut mr = IntegrationResource::new(
        "twitch",
        IntegrationSpec {
            guild_id: GUILD_ID.into(),
            integration_id: None,
        },
    )
    .with_external_name(INTEGRATION_ID);

    adapter.delete(&mut mr).await.expect("first delete");
    adapter.delete(&mut mr).await.expect("second delete");
}

#[test]
fn refused_verbs_match_the_capability_matrix() {
    for kind in [
        ResourceKind::Member,
        ResourceKind::User,
        ResourceKind::Application,
        ResourceKind::Integration,
    ] {
        assert!(!kind.capabilities().permits(Operation::Create), "{kind}");
    }
    assert!(!ResourceKind::Integration.capabilities().permits(Operation::Update));
    assert!(ResourceKind::Invite.capabilities().permits(Operation::Update));
}
