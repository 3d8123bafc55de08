//! Integration tests for endpoint routing.
//!
//! These tests verify the parameters and schema keys each endpoint verb
//! sends, parent URL kwarg accumulation across nested routes, and the
//! endpoints attached to the resources that come back.

mod common;

use std::sync::Arc;

use serde_json::json;

use cloudlaunch::rest::{ApiContext, Endpoint, ParentUrlKwargs, ResourceId, Route, Subroute};
use cloudlaunch::{ApiClient, ApiConfig, ConfigError, ResourceError, ResourceKind};

use common::{params, RecordingTransport};

static CHILD: Route = Route::new("children", &["parents", "children"], ResourceKind::Generic)
    .with_parent_url_kwarg("parent_pk");

static PARENT_SUBROUTES: [Subroute; 1] = [("children", &CHILD)];

static PARENT: Route = Route::new("parents", &["grandparents", "parents"], ResourceKind::Generic)
    .with_parent_url_kwarg("grandparent_pk")
    .with_subroutes(&PARENT_SUBROUTES);

fn context(transport: &Arc<RecordingTransport>) -> Arc<ApiContext> {
    let config = ApiConfig::builder()
        .url("http://localhost:8000/api/v1")
        .token("test-token")
        .build();
    Arc::new(ApiContext::new(config, Arc::clone(transport) as _))
}

// ============================================================================
// Parent URL kwargs
// ============================================================================

#[tokio::test]
async fn test_three_level_chain_sends_every_ancestor_id() {
    let transport = RecordingTransport::new();
    let kwargs = ParentUrlKwargs::from([("grandparent_pk".to_string(), ResourceId::from(33))]);
    let endpoint = Endpoint::with_parent(&CHILD, context(&transport), Some(12.into()), kwargs);

    endpoint.get(22, params(json!({}))).await.unwrap();

    let call = transport.last_call();
    assert_eq!(call.keys(), "parents.children.read");
    assert_eq!(
        call.params,
        params(json!({"id": 22, "parent_pk": 12, "grandparent_pk": 33}))
    );
    assert!(call.validate);
}

#[tokio::test]
async fn test_child_endpoint_inherits_ancestor_ids() {
    let transport = RecordingTransport::new();
    let parent = Endpoint::with_parent(&PARENT, context(&transport), Some(33.into()), ParentUrlKwargs::new());

    let child = parent.subroute("children", Some(12.into())).unwrap();
    assert_eq!(child.route(), &CHILD);
    assert_eq!(child.parent_url_kwargs()["grandparent_pk"], ResourceId::from(33));
    assert_eq!(child.parent_url_kwargs()["parent_pk"], ResourceId::from(12));

    let by_kind = parent.subroute_for(ResourceKind::Generic, Some(12.into())).unwrap();
    assert_eq!(by_kind.parent_url_kwargs(), child.parent_url_kwargs());
    assert!(parent.subroute("siblings", Some(12.into())).is_none());
}

#[tokio::test]
async fn test_parent_id_ignored_without_parent_url_kwarg() {
    let transport = RecordingTransport::new();
    let client = common::client(Arc::clone(&transport));
    let endpoint = Endpoint::with_parent(
        &cloudlaunch::rest::routes::DEPLOYMENTS,
        Arc::clone(client.deployments().context()),
        Some(9.into()),
        ParentUrlKwargs::new(),
    );
    assert!(endpoint.parent_url_kwargs().is_empty());
}

// ============================================================================
// Verbs
// ============================================================================

#[tokio::test]
async fn test_list_wires_each_result_to_its_own_subroutes() {
    let transport = RecordingTransport::new();
    transport.respond_with(json!({
        "count": 3,
        "next": null,
        "previous": null,
        "results": [
            {"id": 12, "name": "one"},
            {"id": 201, "name": "two"},
            {"id": 202, "name": "three"}
        ]
    }));
    let client = common::client(Arc::clone(&transport));

    let deployments = client.deployments().list(params(json!({"archived": false}))).await.unwrap();

    assert_eq!(deployments.len(), 3);
    for (deployment, id) in deployments.iter().zip([12, 201, 202]) {
        assert_eq!(deployment.kind(), ResourceKind::Deployment);
        let tasks = deployment.subroute("tasks").unwrap();
        assert_eq!(tasks.parent_url_kwargs()["deployment_pk"], ResourceId::from(id));
    }

    let call = transport.last_call();
    assert_eq!(call.keys(), "deployments.list");
    assert_eq!(call.params, params(json!({"archived": false})));
}

#[tokio::test]
async fn test_list_without_results_is_malformed() {
    let transport = RecordingTransport::new();
    transport.respond_with(json!({"count": 0}));
    let client = common::client(Arc::clone(&transport));

    let result = client.clouds().list(params(json!({}))).await;
    assert!(matches!(result, Err(ResourceError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_delete_issues_one_call_with_the_id() {
    let transport = RecordingTransport::new();
    transport.respond_with(json!(null));
    let client = common::client(Arc::clone(&transport));

    client.deployments().delete(12).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].keys(), "deployments.delete");
    assert_eq!(calls[0].params, params(json!({"id": 12})));
}

#[tokio::test]
async fn test_update_skips_validation_and_partial_update_keeps_it() {
    let transport = RecordingTransport::new();
    let client = common::client(Arc::clone(&transport));
    let deployments = client.deployments();

    deployments.update(22, params(json!({"name": "renamed"}))).await.unwrap();
    let call = transport.last_call();
    assert_eq!(call.keys(), "deployments.update");
    assert!(!call.validate);
    assert_eq!(call.params, params(json!({"id": 22, "name": "renamed"})));

    deployments.partial_update(22, params(json!({"archived": true}))).await.unwrap();
    let call = transport.last_call();
    assert_eq!(call.keys(), "deployments.partial_update");
    assert!(call.validate);
    assert_eq!(call.params, params(json!({"id": 22, "archived": true})));
}

#[tokio::test]
async fn test_create_on_nested_route_adds_parent_kwargs() {
    let transport = RecordingTransport::new();
    let client = common::client(Arc::clone(&transport));

    let tasks = client.deployments().subroute("tasks", Some(12.into())).unwrap();
    let task = tasks.create(params(json!({"action": "RESTART"}))).await.unwrap();

    let call = transport.last_call();
    assert_eq!(call.keys(), "deployments.tasks.create");
    assert_eq!(call.params, params(json!({"action": "RESTART", "deployment_pk": 12})));
    assert_eq!(task.kind(), ResourceKind::Task);
    assert!(task.update_endpoint().is_some());
}

#[tokio::test]
async fn test_slug_routes_use_their_id_param() {
    let transport = RecordingTransport::new();
    let client = common::client(Arc::clone(&transport));

    client.applications().get("galaxy", params(json!({}))).await.unwrap();
    assert_eq!(transport.last_call().params, params(json!({"slug": "galaxy"})));

    let regions = client.clouds().subroute("regions", Some("aws".into())).unwrap();
    let zones = regions.subroute("zones", Some("us-east-1".into())).unwrap();
    zones.get("us-east-1a", params(json!({}))).await.unwrap();

    let call = transport.last_call();
    assert_eq!(call.keys(), "infrastructure.clouds.regions.zones.read");
    assert_eq!(
        call.params,
        params(json!({"zone_id": "us-east-1a", "region_pk": "us-east-1", "cloud_pk": "aws"}))
    );
}

#[tokio::test]
async fn test_parent_kwargs_override_caller_params() {
    let transport = RecordingTransport::new();
    let client = common::client(Arc::clone(&transport));

    let tasks = client.deployments().subroute("tasks", Some(12.into())).unwrap();
    let _ = tasks.list(params(json!({"deployment_pk": 99}))).await;

    assert_eq!(transport.last_call().params["deployment_pk"], json!(12));
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_missing_auth_fails_before_any_call() {
    let transport = RecordingTransport::new();
    let client = ApiClient::with_transport(ApiConfig::default(), Arc::clone(&transport) as _);

    let error = client.clouds().list(params(json!({}))).await.unwrap_err();

    assert!(matches!(error, ResourceError::Config(ConfigError::MissingAuth)));
    assert_eq!(error.to_string(), "Auth token and url are required.");
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_config_changes_apply_to_existing_endpoints() {
    let transport = RecordingTransport::new();
    let client = ApiClient::with_transport(ApiConfig::default(), Arc::clone(&transport) as _);
    let clouds = client.clouds();

    client.set_url(Some("http://localhost:8000/api/v1".to_string()));
    client.set_token(Some(cloudlaunch::AuthToken::new("abc123").unwrap()));

    transport.respond_with(json!({"results": []}));
    assert!(clouds.list(params(json!({}))).await.unwrap().is_empty());
}
