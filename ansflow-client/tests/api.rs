//! Client behaviour against an in-process backend

mod common;

use std::sync::Arc;
use std::time::Duration;

use ansflow_client::session::AUTH_TOKEN_KEY;
use ansflow_client::{
    ClientError, DashboardPoller, MemoryTokenStore, ResourceTable, Session, SessionState,
};
use ansflow_core::domain::docker::{DockerRegistry, RegistryType};
use ansflow_core::domain::execution::ExecutionStatus;
use ansflow_core::domain::project::Project;
use ansflow_core::dto::cicd::ExecutionFilter;
use ansflow_core::dto::docker::{CreateRegistry, UpdateRegistry};
use ansflow_core::dto::project::CreateProject;
use axum::http::Method;
use common::{TEST_TOKEN, TestServer, execution, inventory, pipeline, registry, tool};
use serde_json::json;

#[tokio::test]
async fn envelope_and_raw_array_yield_same_items() {
    let server = TestServer::start().await;
    server.seed(
        "/ansible/inventories/",
        vec![inventory(1, "production"), inventory(2, "staging")],
        true,
    );
    let client = server.client();

    let paginated = client.get_ansible_inventories().await.unwrap();
    assert_eq!(paginated.len(), 2);

    server.seed(
        "/ansible/inventories/",
        vec![inventory(1, "production"), inventory(2, "staging")],
        false,
    );
    let raw = client.get_ansible_inventories().await.unwrap();

    let paginated: Vec<String> = paginated.into_iter().map(|i| i.name).collect();
    let raw: Vec<String> = raw.into_iter().map(|i| i.name).collect();
    assert_eq!(paginated, raw);
}

#[tokio::test]
async fn data_wrapper_is_unwrapped() {
    let server = TestServer::start().await;
    server.respond(
        "/analytics/tool-usage/",
        200,
        json!({"data": [
            {"tool_type": "jenkins", "count": 4},
            {"tool_type": "gitlab_ci", "count": 1}
        ]}),
    );

    let usage = server.client().get_tool_usage().await.unwrap();
    assert_eq!(usage.len(), 2);
    assert_eq!(usage[0].count, 4);
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let server = TestServer::start().await;
    server.seed("/cicd/tools/", vec![tool(1, "jenkins-main")], false);

    server.client().get_tools().await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {}", TEST_TOKEN).as_str())
    );
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let server = TestServer::start().await;
    server.seed("/cicd/tools/", vec![], false);

    server
        .client_with_session(Session::in_memory())
        .get_tools()
        .await
        .unwrap();

    assert!(server.requests()[0].authorization.is_none());
}

#[tokio::test]
async fn unauthorized_clears_token_and_requests_login() {
    let server = TestServer::start().await;
    server.seed("/cicd/tools/", vec![tool(1, "jenkins-main")], false);
    server.accept_only("some-other-token");

    let store = Arc::new(MemoryTokenStore::with_token(TEST_TOKEN));
    let client = server.client_with_session(Session::new(store.clone()));
    let mut state = client.session().subscribe();

    let err = client.get_tools().await.unwrap_err();

    match err {
        ClientError::Unauthorized { redirect_to } => assert_eq!(redirect_to, "/login"),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
    assert!(
        ansflow_client::TokenStore::get(store.as_ref(), AUTH_TOKEN_KEY)
            .unwrap()
            .is_none()
    );
    assert!(state.has_changed().unwrap());
    assert_eq!(
        *state.borrow_and_update(),
        SessionState::LoginRequired {
            redirect_to: "/login".to_string()
        }
    );
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn login_stores_tokens_for_later_requests() {
    let server = TestServer::start().await;
    server.respond(
        "/auth/token/",
        200,
        json!({"access": "fresh-access", "refresh": "fresh-refresh"}),
    );
    server.seed("/projects/projects/", vec![], true);

    let client = server.client_with_session(Session::in_memory());
    assert!(!client.is_authenticated());

    client.login("admin", "admin123").await.unwrap();
    assert!(client.is_authenticated());
    assert_eq!(client.session().refresh_token().as_deref(), Some("fresh-refresh"));

    client.get_projects().await.unwrap();
    let last = server.requests().pop().unwrap();
    assert_eq!(last.authorization.as_deref(), Some("Bearer fresh-access"));

    client.logout().unwrap();
    assert!(!client.is_authenticated());
    assert_eq!(client.session().state(), SessionState::Anonymous);
}

#[tokio::test]
async fn invalid_project_name_never_reaches_the_network() {
    let server = TestServer::start().await;
    server.seed("/projects/projects/", vec![], true);
    let client = server.client();

    let err = client
        .create_project(&CreateProject::new("my project"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(ref e) if e.field == "name"));

    let mut table: ResourceTable<Project> = ResourceTable::new(client);
    let err = table
        .create(&CreateProject::new("my project"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn registry_create_posts_once_then_refetches() {
    let server = TestServer::start().await;
    server.seed("/docker/registries/", vec![registry(1, "dockerhub")], true);

    let mut table: ResourceTable<DockerRegistry> = ResourceTable::new(server.client());
    table.load().await.unwrap();
    assert_eq!(table.len(), 1);

    let created = table
        .create(&CreateRegistry::new(
            "myrepo",
            "https://registry.example.com",
            RegistryType::Private,
        ))
        .await
        .unwrap();
    assert_eq!(created.name, "myrepo");

    let posts = server.requests_to(Method::POST, "/docker/registries/");
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].body,
        Some(json!({
            "name": "myrepo",
            "url": "https://registry.example.com",
            "registry_type": "private",
            "is_default": false,
        }))
    );

    // initial load plus the refetch after create
    assert_eq!(server.requests_to(Method::GET, "/docker/registries/").len(), 2);
    assert_eq!(table.len(), 2);
    assert_eq!(table.find_by_name("MYREPO").len(), 1);
}

#[tokio::test]
async fn delete_refetches_and_drops_row() {
    let server = TestServer::start().await;
    server.seed(
        "/docker/registries/",
        vec![registry(1, "dockerhub"), registry(2, "harbor")],
        false,
    );

    let mut table: ResourceTable<DockerRegistry> = ResourceTable::new(server.client());
    table.load().await.unwrap();
    table.delete(2).await.unwrap();

    assert_eq!(table.len(), 1);
    assert!(table.find(2).is_none());
    assert_eq!(server.rows("/docker/registries/").len(), 1);
}

#[tokio::test]
async fn update_patches_once_then_refetches() {
    let server = TestServer::start().await;
    server.seed("/docker/registries/", vec![registry(1, "dockerhub")], true);

    let mut table: ResourceTable<DockerRegistry> = ResourceTable::new(server.client());
    table.load().await.unwrap();

    let rename = UpdateRegistry {
        name: Some("renamed".to_string()),
        ..Default::default()
    };
    table.update(1, &rename).await.unwrap();

    let patches = server.requests_to(Method::PATCH, "/docker/registries/1/");
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].body, Some(json!({"name": "renamed"})));
    assert_eq!(server.requests_to(Method::GET, "/docker/registries/").len(), 2);

    let names: Vec<&str> = table.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["renamed"]);
}

#[tokio::test]
async fn invalid_update_sends_nothing() {
    let server = TestServer::start().await;
    server.seed("/docker/registries/", vec![registry(1, "dockerhub")], true);

    let mut table: ResourceTable<DockerRegistry> = ResourceTable::new(server.client());
    table.load().await.unwrap();

    let rename = UpdateRegistry {
        name: Some("my registry".to_string()),
        ..Default::default()
    };
    let err = table.update(1, &rename).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(ref e) if e.field == "name"));
    assert_eq!(server.requests().len(), 1);
    assert_eq!(table.rows()[0].name, "dockerhub");
}

#[tokio::test]
async fn failed_mutation_leaves_rows_untouched() {
    let server = TestServer::start().await;
    server.seed("/docker/registries/", vec![registry(1, "dockerhub")], false);

    let mut table: ResourceTable<DockerRegistry> = ResourceTable::new(server.client());
    table.load().await.unwrap();

    let err = table.delete(42).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(table.len(), 1);
    assert_eq!(server.requests_to(Method::GET, "/docker/registries/").len(), 1);
}

#[tokio::test]
async fn backend_field_errors_are_readable() {
    let server = TestServer::start().await;
    server.respond(
        "/docker/registries/",
        400,
        json!({"name": ["registry with this name already exists."]}),
    );

    let err = server
        .client()
        .create_docker_registry(&CreateRegistry::new(
            "dockerhub",
            "https://index.docker.io",
            RegistryType::Dockerhub,
        ))
        .await
        .unwrap_err();

    match err {
        ClientError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "name: registry with this name already exists.");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn execution_filter_becomes_query() {
    let server = TestServer::start().await;
    server.seed("/cicd/executions/", vec![execution(7, 3, "running")], true);

    let filter = ExecutionFilter {
        pipeline: Some(3),
        status: Some(ExecutionStatus::Running),
        ..Default::default()
    };
    let page = server.client().get_executions_page(&filter).await.unwrap();

    assert_eq!(page.count, Some(1));
    assert_eq!(page.results[0].status, ExecutionStatus::Running);
    let query = server.requests()[0].query.clone().unwrap();
    assert!(query.contains("pipeline=3"));
    assert!(query.contains("status=running"));
}

#[tokio::test]
async fn empty_action_body_is_success() {
    let server = TestServer::start().await;
    server.respond("/docker/containers/5/start/", 200, json!({}));

    let result = server.client().start_docker_container(5).await.unwrap();
    assert!(!result.is_failure());
    assert_eq!(server.requests_to(Method::POST, "/docker/containers/5/start/").len(), 1);
}

#[tokio::test]
async fn host_membership_requires_hosts() {
    let server = TestServer::start().await;

    let err = server
        .client()
        .add_hosts_to_group(1, Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn analytics_fall_back_to_simulated_data() {
    let server = TestServer::start().await;
    server.respond("/analytics/execution-trends/", 500, json!({"error": "boom"}));
    server.seed("/pipelines/pipelines/", vec![pipeline(1, "build")], false);

    let client = server.client();
    let trend = client.execution_trends_or_simulated(7).await.unwrap();
    assert!(trend.simulated);
    assert_eq!(trend.points.len(), 7);

    // pipeline-stats is unknown to the fake backend and answers 404
    let stats = client.pipeline_stats_or_simulated().await.unwrap();
    assert_eq!(stats.len(), 1);
    assert!(stats[0].simulated);
    assert_eq!(stats[0].pipeline_name, "build");

    let overview = client.analytics_overview_or_simulated(&trend).await.unwrap();
    assert!(overview.simulated);
    assert_eq!(overview.total_executions, trend.total());
}

#[tokio::test]
async fn analytics_prefer_backend_data() {
    let server = TestServer::start().await;
    server.respond(
        "/analytics/execution-trends/",
        200,
        json!([{"date": "2025-07-15", "total": 3, "success": 2, "failed": 1}]),
    );

    let trend = server.client().execution_trends_or_simulated(1).await.unwrap();
    assert!(!trend.simulated);
    assert_eq!(trend.total(), 3);
    assert_eq!(
        server.requests()[0].query.as_deref(),
        Some("days=1")
    );
}

#[tokio::test]
async fn analytics_fallback_does_not_hide_unauthorized() {
    let server = TestServer::start().await;
    server.accept_only("some-other-token");

    let err = server
        .client()
        .execution_trends_or_simulated(7)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

fn seed_dashboard(server: &TestServer) {
    server.seed("/cicd/tools/", vec![tool(1, "jenkins-main")], true);
    server.seed(
        "/cicd/executions/",
        vec![execution(1, 1, "success"), execution(2, 1, "failed")],
        true,
    );
    server.respond(
        "/cicd/executions/statistics/",
        200,
        json!({
            "total_executions": 2,
            "successful_executions": 1,
            "failed_executions": 1,
            "success_rate": 50.0
        }),
    );
    server.seed(
        "/pipelines/pipelines/",
        vec![pipeline(1, "build"), pipeline(2, "deploy")],
        true,
    );
}

#[tokio::test]
async fn dashboard_loads_all_sections() {
    let server = TestServer::start().await;
    seed_dashboard(&server);

    let snapshot = DashboardPoller::new(server.client()).poll_once().await.unwrap();

    assert_eq!(snapshot.tools.len(), 1);
    assert_eq!(snapshot.recent_executions.len(), 2);
    assert_eq!(snapshot.statistics.total_executions, 2);
    assert_eq!(snapshot.active_pipelines(), 2);
    assert_eq!(server.requests().len(), 4);
}

#[tokio::test]
async fn dashboard_polling_stops_after_unauthorized() {
    let server = TestServer::start().await;
    seed_dashboard(&server);
    server.accept_only("some-other-token");

    let poller =
        DashboardPoller::new(server.client()).with_interval(Duration::from_millis(10));
    let mut failures = 0;
    let cycles = tokio::time::timeout(
        Duration::from_secs(5),
        poller.run(|result| {
            if result.is_err() {
                failures += 1;
            }
        }),
    )
    .await
    .unwrap();

    assert_eq!(cycles, 1);
    assert_eq!(failures, 1);
}

#[tokio::test]
async fn dashboard_polling_survives_failed_cycles() {
    let server = TestServer::start().await;
    seed_dashboard(&server);
    server.respond("/cicd/executions/statistics/", 500, json!({"detail": "down"}));

    let client = server.client();
    let poller = DashboardPoller::new(client.clone()).with_interval(Duration::from_millis(10));
    let mut seen = 0;
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        poller.run(|result| {
            assert!(result.is_err());
            seen += 1;
            if seen == 3 {
                client.session().expire();
            }
        }),
    )
    .await
    .unwrap();

    assert_eq!(result, 3);
}
