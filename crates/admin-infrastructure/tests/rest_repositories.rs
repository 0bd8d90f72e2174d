//! Table repositories against a mocked PostgREST endpoint

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use admin_core::domain::{MediaKind, ProfileStatus, Role, RoleMenu, UserFlowQuery};
use admin_core::error::DomainError;
use admin_core::repositories::{
    MenuRepository, ProfileRepository, RoleMenuRepository, UserFlowRepository,
    UserRoleRepository, WorkflowRepository,
};
use admin_infrastructure::{
    GatewayClient, RestMenuRepository, RestProfileRepository, RestRoleMenuRepository,
    RestUserFlowRepository, RestUserRoleRepository, RestWorkflowRepository,
};
use admin_shared::config::GatewaySettings;

fn client(server: &MockServer) -> GatewayClient {
    GatewayClient::new(&GatewaySettings {
        url: server.uri(),
        api_key: "anon-key".to_string(),
        service_key: "service-key".to_string(),
        timeout_seconds: 5,
        jwt_secret: None,
        jwt_audience: "authenticated".to_string(),
    })
    .unwrap()
}

fn flow_row(flow_id: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "flow_id": flow_id,
        "user_id": "desktop-42",
        "flow_name": "Setup wizard",
        "flow_description": null,
        "client_version": "2.1.0",
        "platform": "windows",
        "package_hash": null,
        "package_size": 1024,
        "package_url": null,
        "status": "INIT",
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_menus_default_nullable_columns() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/rest/v1/menus"))
        .and(query_param("order", "sort_order.asc"))
        .and(header("apikey", "service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": id,
            "name": "Dashboard",
            "path": "/dashboard",
            "icon": null,
            "parent_id": null,
            "sort_order": null,
            "is_visible": null
        }])))
        .mount(&server)
        .await;

    let menus = RestMenuRepository::new(client(&server)).list_all().await.unwrap();

    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].id, id);
    assert_eq!(menus[0].sort_order, 0);
    assert!(menus[0].is_visible);
}

#[tokio::test]
async fn test_menu_update_without_row_is_not_found() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/menus"))
        .and(query_param("id", format!("eq.{}", id)))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let draft = serde_json::from_value(json!({"name": "Reports"})).unwrap();
    let result = RestMenuRepository::new(client(&server)).update(&id, &draft).await;

    assert_eq!(result, Err(DomainError::MenuNotFound(id)));
}

#[tokio::test]
async fn test_role_grants_insert_as_one_batch() {
    let server = MockServer::start().await;
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/rest/v1/role_menus"))
        .and(body_json(json!([
            {"role": "user", "menu_id": a},
            {"role": "user", "menu_id": b}
        ])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    RestRoleMenuRepository::new(client(&server))
        .insert_many(&[RoleMenu::new(Role::User, a), RoleMenu::new(Role::User, b)])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_menu_ids_for_role_filters_by_role() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/rest/v1/role_menus"))
        .and(query_param("role", "eq.admin"))
        .and(query_param("select", "menu_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"menu_id": id}])))
        .mount(&server)
        .await;

    let ids = RestRoleMenuRepository::new(client(&server))
        .menu_ids_for_role(Role::Admin)
        .await
        .unwrap();
    assert_eq!(ids, vec![id]);
}

#[tokio::test]
async fn test_set_role_inserts_when_no_row_updated() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/user_roles"))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/user_roles"))
        .and(body_json(json!({"user_id": user_id, "role": "admin"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([{"user_id": user_id, "role": "admin"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    RestUserRoleRepository::new(client(&server))
        .set_role(&user_id, Role::Admin)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_profile_status_defaults_when_missing() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": Uuid::new_v4(),
            "user_id": user_id,
            "username": "alice",
            "email": "alice@example.com",
            "avatar_url": null,
            "status": null,
            "created_at": "2024-05-01T10:00:00Z"
        }])))
        .mount(&server)
        .await;

    let profile = RestProfileRepository::new(client(&server))
        .find_by_user_id(&user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.status, ProfileStatus::Active);
}

#[tokio::test]
async fn test_profile_count_reads_content_range() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/profiles"))
        .and(header("Prefer", "count=exact"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "*/17"))
        .mount(&server)
        .await;

    let count = RestProfileRepository::new(client(&server)).count().await.unwrap();
    assert_eq!(count, 17);
}

#[tokio::test]
async fn test_public_workflows_and_legacy_media_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/workflows"))
        .and(query_param("is_public", "eq.true"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": Uuid::new_v4(),
            "title": "Install guide",
            "description": null,
            "markdown_content": "# Steps",
            "media_type": null,
            "video_path": "videos/1714557600000-abc1234.mp4",
            "video_size": 2048,
            "is_public": true,
            "created_by": null,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": null
        }])))
        .mount(&server)
        .await;

    let workflows = RestWorkflowRepository::new(client(&server))
        .list_public()
        .await
        .unwrap();
    assert_eq!(workflows.len(), 1);
    assert_eq!(workflows[0].media_type, Some(MediaKind::Video));
    assert_eq!(workflows[0].updated_at, workflows[0].created_at);
}

#[tokio::test]
async fn test_user_flow_search_pages_with_exact_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_flows"))
        .and(query_param("flow_id", "eq.F-1"))
        .and(query_param("flow_name", "ilike.*setup*"))
        .and(header("Range", "10-19"))
        .and(header("Prefer", "count=exact"))
        .respond_with(
            ResponseTemplate::new(206)
                .insert_header("Content-Range", "10-10/11")
                .set_body_json(json!([flow_row("F-1")])),
        )
        .mount(&server)
        .await;

    let query = UserFlowQuery::new(Some("F-1".to_string()), Some("setup".to_string()), 2);
    let page = RestUserFlowRepository::new(client(&server))
        .search(&query)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 11);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page, 2);
}

#[tokio::test]
async fn test_user_flow_page_past_end_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_flows"))
        .respond_with(ResponseTemplate::new(416).set_body_json(json!({
            "code": "PGRST103",
            "message": "Requested range not satisfiable"
        })))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/user_flows"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "*/3"))
        .mount(&server)
        .await;

    let page = RestUserFlowRepository::new(client(&server))
        .search(&UserFlowQuery::new(None, None, 5))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 5);
}

#[tokio::test]
async fn test_unique_violation_maps_to_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/menus"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"menus_path_key\""
        })))
        .mount(&server)
        .await;

    let draft = serde_json::from_value(json!({"name": "Dashboard", "path": "/dashboard"})).unwrap();
    let result = RestMenuRepository::new(client(&server)).create(&draft).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}
