// src/routes.rs

use std::path::Path;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState, static_dir: Option<&Path>) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/guest", post(handlers::auth::guest))
        .route("/me", get(handlers::auth::get_me));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .route("/health", get(handlers::dashboard::health))
        .route("/dashboard", get(handlers::dashboard::get_summary))
        .route(
            "/members",
            get(handlers::members::list_members)
                .post(handlers::members::create_member)
                .patch(handlers::members::update_member),
        )
        .route("/members/{id}", delete(handlers::members::delete_member))
        .route(
            "/resources",
            get(handlers::resources::list_resources)
                .post(handlers::resources::create_resource)
                .patch(handlers::resources::update_resource),
        )
        .route("/resources/{id}", delete(handlers::resources::delete_resource))
        .route(
            "/inventory",
            get(handlers::inventory::list_inventory)
                .post(handlers::inventory::record_inventory)
                .patch(handlers::inventory::update_inventory),
        )
        .route("/inventory/current", get(handlers::inventory::current_inventory))
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks)
                .post(handlers::tasks::create_task)
                .patch(handlers::tasks::update_task),
        )
        .route("/tasks/{id}", delete(handlers::tasks::delete_task))
        .route(
            "/task-completions",
            get(handlers::task_completions::list_completions)
                .post(handlers::task_completions::create_completion)
                .patch(handlers::task_completions::update_completion),
        )
        .route("/task-completions/summary", get(handlers::task_completions::completion_summary))
        .route("/task-completions/{id}", delete(handlers::task_completions::delete_completion))
        .route(
            "/strikes",
            get(handlers::strikes::list_strikes)
                .post(handlers::strikes::issue_strike)
                .patch(handlers::strikes::update_strike),
        )
        .route("/strikes/summary", get(handlers::strikes::strike_summary))
        .route("/strikes/{id}", delete(handlers::strikes::delete_strike))
        .route(
            "/crafted-items",
            get(handlers::crafted_items::list_crafted_items)
                .post(handlers::crafted_items::create_crafted_item)
                .patch(handlers::crafted_items::update_crafted_item),
        )
        .route("/crafted-items/{id}", delete(handlers::crafted_items::delete_crafted_item))
        .route(
            "/orders",
            get(handlers::orders::list_orders)
                .post(handlers::orders::create_order)
                .patch(handlers::orders::update_order),
        )
        .route("/orders/{id}", delete(handlers::orders::delete_order))
        .method_not_allowed_fallback(api_method_not_allowed)
        .fallback(api_not_found);

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes);

    // Anything outside /api is the single-page frontend.
    if let Some(dir) = static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "API endpoint not found" })))
}

async fn api_method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, Json(json!({ "error": "Method not allowed" })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::test_support::TestApp;

    #[tokio::test]
    async fn health_and_unknown_api_paths() {
        let app = TestApp::new().await;

        let (status, _) = app.request("GET", "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app.request("GET", "/api/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "API endpoint not found" }));
    }

    #[tokio::test]
    async fn wrong_method_on_a_known_path_keeps_the_error_shape() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (status, body) = app
            .request("PUT", "/api/members", Some(&token), Some(json!({ "name": "Sweet" })))
            .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));

        let (status, body) = app.request("POST", "/api/inventory/current", Some(&token), None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(body["error"].is_string());

        let (status, body) = app.request("DELETE", "/api/inventory/abc", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn login_returns_token_and_capabilities() {
        let app = TestApp::new().await;

        let (status, body) = app
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "username": TestApp::ADMIN, "password": TestApp::PASSWORD })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], TestApp::ADMIN);
        assert_eq!(body["role"], "admin");
        assert_eq!(body["capabilities"]["can_write"], true);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let token = body["token"].as_str().unwrap().to_string();
        let (status, me) = app.request("GET", "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["username"], TestApp::ADMIN);
        assert!(me.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn bad_credentials_and_missing_fields() {
        let app = TestApp::new().await;

        let (status, wrong) = app
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "username": TestApp::ADMIN, "password": "nope" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, unknown) = app
            .request("POST", "/api/auth/login", None, Some(json!({ "username": "ghost", "password": "nope" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong, unknown);

        let (status, _) = app
            .request("POST", "/api/auth/login", None, Some(json!({ "username": TestApp::ADMIN })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn guests_can_read_but_not_write() {
        let app = TestApp::new().await;

        let (status, guest) = app.request("POST", "/api/auth/guest", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(guest, json!({ "role": "guest", "capabilities": { "can_write": false } }));

        let (status, body) = app.request("GET", "/api/members", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, _) = app
            .request("POST", "/api/members", None, Some(json!({ "name": "Big Smoke" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .request("POST", "/api/members", Some("not-a-token"), Some(json!({ "name": "Big Smoke" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.request("DELETE", "/api/members/abc", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_admin_tokens_are_forbidden_from_writes() {
        let app = TestApp::new().await;
        let token = app.member_token().await;

        let (status, _) = app.request("GET", "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .request("POST", "/api/members", Some(&token), Some(json!({ "name": "Big Smoke" })))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn member_create_list_patch_delete() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (status, created) = app
            .request("POST", "/api/members", Some(&token), Some(json!({ "name": "Sweet", "tag": "OG" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        let created = created.as_array().cloned().unwrap_or_default();
        assert_eq!(created.len(), 1);
        let id = created[0]["id"].as_str().unwrap().to_string();
        assert_eq!(created[0]["added_by"], TestApp::ADMIN);

        let (_, listed) = app.request("GET", "/api/members", None, None).await;
        assert_eq!(listed[0]["id"], id.as_str());

        let (status, patched) = app
            .request("PATCH", "/api/members", Some(&token), Some(json!({ "id": id, "tag": null })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched[0]["name"], "Sweet");
        assert_eq!(patched[0]["tag"], Value::Null);

        let (status, _) = app
            .request("DELETE", &format!("/api/members/{id}"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .request("DELETE", &format!("/api/members/{id}"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, listed) = app.request("GET", "/api/members", None, None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn validation_and_patch_errors() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (status, body) = app.request("POST", "/api/members", Some(&token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = app
            .request("PATCH", "/api/members", Some(&token), Some(json!({ "name": "x" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ID is required");

        let (status, body) = app
            .request("PATCH", "/api/members", Some(&token), Some(json!({ "id": "missing", "name": "x" })))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Member not found");

        let (status, _) = app
            .request("POST", "/api/strikes", Some(&token), Some(json!({ "member_id": "m", "points": 0 })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn text_longer_than_its_column_is_a_validation_error() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (status, body) = app
            .request("POST", "/api/members", Some(&token), Some(json!({ "name": "x".repeat(256) })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["name"].is_array());

        let (status, _) = app
            .request("POST", "/api/resources", Some(&token), Some(json!({ "name": "Autoparts", "unit": "u".repeat(51) })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, listed) = app.request("GET", "/api/members", None, None).await;
        assert_eq!(listed, json!([]));
    }

    struct CrudCase {
        path: &'static str,
        create: Value,
        patch: Value,
        changed: (&'static str, Value),
        kept: (&'static str, Value),
        deletable: bool,
    }

    fn crud_cases() -> Vec<CrudCase> {
        vec![
            CrudCase {
                path: "/api/members",
                create: json!({ "name": "Sweet", "tag": "OG" }),
                patch: json!({ "tag": "Families" }),
                changed: ("tag", json!("Families")),
                kept: ("name", json!("Sweet")),
                deletable: true,
            },
            CrudCase {
                path: "/api/resources",
                create: json!({ "name": "Autoparts", "unit": "box" }),
                patch: json!({ "description": "From the docks" }),
                changed: ("description", json!("From the docks")),
                kept: ("unit", json!("box")),
                deletable: true,
            },
            CrudCase {
                path: "/api/inventory",
                create: json!({ "resource_id": "r1", "quantity": 5 }),
                patch: json!({ "quantity": 6 }),
                changed: ("quantity", json!(6)),
                kept: ("resource_id", json!("r1")),
                deletable: false,
            },
            CrudCase {
                path: "/api/tasks",
                create: json!({ "title": "Collect autoparts", "required_amount": 5, "recurrence": "once" }),
                patch: json!({ "required_amount": 7 }),
                changed: ("required_amount", json!(7)),
                kept: ("recurrence", json!("once")),
                deletable: true,
            },
            CrudCase {
                path: "/api/task-completions",
                create: json!({ "task_id": "t1", "member_id": "m1", "amount_collected": 10 }),
                patch: json!({ "completed": true }),
                changed: ("completed", json!(true)),
                kept: ("amount_collected", json!(10)),
                deletable: true,
            },
            CrudCase {
                path: "/api/strikes",
                create: json!({ "member_id": "m1", "points": 2 }),
                patch: json!({ "reason": "Late to the meet" }),
                changed: ("reason", json!("Late to the meet")),
                kept: ("points", json!(2)),
                deletable: true,
            },
            CrudCase {
                path: "/api/crafted-items",
                create: json!({ "item_name": "Lockpick", "quantity": 3 }),
                patch: json!({ "quantity": 5 }),
                changed: ("quantity", json!(5)),
                kept: ("item_name", json!("Lockpick")),
                deletable: true,
            },
            CrudCase {
                path: "/api/orders",
                create: json!({
                    "reference_id": "ORD-002",
                    "items": "Vests",
                    "quantity": 2,
                    "customer_name": "Bob"
                }),
                patch: json!({ "notes": "Rush" }),
                changed: ("notes", json!("Rush")),
                kept: ("customer_name", json!("Bob")),
                deletable: true,
            },
        ]
    }

    fn with_id(patch: &Value, id: &str) -> Value {
        let mut patch = patch.clone();
        if let Some(fields) = patch.as_object_mut() {
            fields.insert("id".to_string(), json!(id));
        }
        patch
    }

    #[tokio::test]
    async fn every_entity_honours_the_crud_contract() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        for case in crud_cases() {
            let path = case.path;

            let (status, created) = app.request("POST", path, Some(&token), Some(case.create.clone())).await;
            assert_eq!(status, StatusCode::OK, "create {path}: {created}");
            assert_eq!(created.as_array().map(Vec::len), Some(1), "create {path}");
            let id = created[0]["id"].as_str().unwrap().to_string();

            let (status, patched) = app
                .request("PATCH", path, Some(&token), Some(with_id(&case.patch, &id)))
                .await;
            assert_eq!(status, StatusCode::OK, "patch {path}: {patched}");
            assert_eq!(patched[0]["id"], id.as_str(), "patch {path}");
            assert_eq!(patched[0][case.changed.0], case.changed.1, "patch {path} changed field");
            assert_eq!(patched[0][case.kept.0], case.kept.1, "patch {path} kept field");

            let (status, body) = app
                .request("PATCH", path, Some(&token), Some(with_id(&case.patch, "no-such-id")))
                .await;
            assert_eq!(status, StatusCode::NOT_FOUND, "patch unknown {path}");
            assert!(body["error"].as_str().is_some_and(|e| e.ends_with("not found")), "patch unknown {path}");

            let (_, listed) = app.request("GET", path, None, None).await;
            assert_eq!(listed.as_array().map(Vec::len), Some(1), "list {path} after unknown patch");
            assert_eq!(listed[0][case.kept.0], case.kept.1, "list {path}");

            let delete_uri = format!("{path}/{id}");
            if case.deletable {
                for _ in 0..2 {
                    let (status, _) = app.request("DELETE", &delete_uri, Some(&token), None).await;
                    assert_eq!(status, StatusCode::NO_CONTENT, "delete {path}");
                }
                let (_, listed) = app.request("GET", path, None, None).await;
                assert_eq!(listed, json!([]), "list {path} after delete");
            } else {
                let (status, _) = app.request("DELETE", &delete_uri, Some(&token), None).await;
                assert_ne!(status, StatusCode::NO_CONTENT, "delete {path}");
                let (_, listed) = app.request("GET", path, None, None).await;
                assert_eq!(listed.as_array().map(Vec::len), Some(1), "list {path} after delete");
            }
        }
    }

    #[tokio::test]
    async fn order_status_moves_between_views() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (status, created) = app
            .request(
                "POST",
                "/api/orders",
                Some(&token),
                Some(json!({
                    "reference_id": "ORD-001",
                    "items": "Lockpicks",
                    "quantity": 3,
                    "customer_name": "Alice"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created[0]["status"], "pending");
        let id = created[0]["id"].as_str().unwrap().to_string();

        let (_, active) = app.request("GET", "/api/orders?view=active", None, None).await;
        assert_eq!(active.as_array().map(Vec::len), Some(1));

        let (status, updated) = app
            .request("PATCH", "/api/orders", Some(&token), Some(json!({ "id": id, "status": "completed" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated[0]["status"], "completed");
        assert_eq!(updated[0]["reference_id"], "ORD-001");

        let (_, active) = app.request("GET", "/api/orders?view=active", None, None).await;
        assert_eq!(active, json!([]));
        let (_, history) = app.request("GET", "/api/orders?view=history", None, None).await;
        assert_eq!(history[0]["id"], id.as_str());
        let (_, all) = app.request("GET", "/api/orders", None, None).await;
        assert_eq!(all.as_array().map(Vec::len), Some(1));

        let (status, _) = app.request("GET", "/api/orders?view=archived", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn inventory_history_and_current_levels() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (_, resource) = app
            .request("POST", "/api/resources", Some(&token), Some(json!({ "name": "Autoparts" })))
            .await;
        assert_eq!(resource[0]["unit"], "pcs");
        let resource_id = resource[0]["id"].as_str().unwrap().to_string();

        let (status, first) = app
            .request(
                "POST",
                "/api/inventory",
                Some(&token),
                Some(json!({ "resource_id": resource_id, "quantity": 5 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let first_id = first[0]["id"].as_str().unwrap().to_string();

        app.request(
            "POST",
            "/api/inventory",
            Some(&token),
            Some(json!({ "resource_id": resource_id, "quantity": 8 })),
        )
        .await;

        let (_, history) = app.request("GET", "/api/inventory", None, None).await;
        assert_eq!(history.as_array().map(Vec::len), Some(2));

        let (_, current) = app.request("GET", "/api/inventory/current", None, None).await;
        assert_eq!(current.as_array().map(Vec::len), Some(1));
        assert_eq!(current[0]["quantity"], 8);

        let (status, patched) = app
            .request("PATCH", "/api/inventory", Some(&token), Some(json!({ "id": first_id, "quantity": 6 })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched[0]["quantity"], 6);

        let (status, _) = app.request("DELETE", &format!("/api/inventory/{first_id}"), Some(&token), None).await;
        assert_ne!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn strike_summary_totals_points_per_member() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (_, ryder) = app.request("POST", "/api/members", Some(&token), Some(json!({ "name": "Ryder" }))).await;
        let (_, _) = app.request("POST", "/api/members", Some(&token), Some(json!({ "name": "Sweet" }))).await;
        let ryder_id = ryder[0]["id"].as_str().unwrap().to_string();

        for points in [1, 3] {
            let (status, _) = app
                .request(
                    "POST",
                    "/api/strikes",
                    Some(&token),
                    Some(json!({ "member_id": ryder_id, "points": points, "reason": "late" })),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, summary) = app.request("GET", "/api/strikes/summary", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary[0]["name"], "Ryder");
        assert_eq!(summary[0]["strike_count"], 2);
        assert_eq!(summary[0]["total_strike_points"], 4);
        assert_eq!(summary[1]["name"], "Sweet");
        assert_eq!(summary[1]["strike_count"], 0);
    }

    #[tokio::test]
    async fn completions_are_append_only_and_summarised() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (_, member) = app.request("POST", "/api/members", Some(&token), Some(json!({ "name": "Sweet" }))).await;
        let member_id = member[0]["id"].as_str().unwrap().to_string();
        let (_, task) = app
            .request("POST", "/api/tasks", Some(&token), Some(json!({ "title": "Collect autoparts" })))
            .await;
        assert_eq!(task[0]["recurrence"], "daily");
        let task_id = task[0]["id"].as_str().unwrap().to_string();

        for amount in [10, 15] {
            let (status, body) = app
                .request(
                    "POST",
                    "/api/task-completions",
                    Some(&token),
                    Some(json!({
                        "task_id": task_id,
                        "member_id": member_id,
                        "date": "2026-10-18",
                        "amount_collected": amount,
                        "completed": true
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body[0]["noted_by"], TestApp::ADMIN);
        }

        let (_, listed) = app.request("GET", "/api/task-completions", None, None).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(2));
        let (_, limited) = app.request("GET", "/api/task-completions?limit=1", None, None).await;
        assert_eq!(limited.as_array().map(Vec::len), Some(1));

        let (_, summary) = app.request("GET", "/api/task-completions/summary", None, None).await;
        assert_eq!(summary[0]["member_name"], "Sweet");
        assert_eq!(summary[0]["completion_count"], 2);
        assert_eq!(summary[0]["completed_count"], 2);
        assert_eq!(summary[0]["total_amount_collected"], 25);

        let (_, dashboard) = app.request("GET", "/api/dashboard", None, None).await;
        assert_eq!(dashboard["total_members"], 1);
        assert_eq!(dashboard["total_tasks"], 1);
        assert_eq!(dashboard["total_resources"], 0);
        assert_eq!(dashboard["recent_completions"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn crafted_items_need_a_positive_quantity() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (status, _) = app
            .request("POST", "/api/crafted-items", Some(&token), Some(json!({ "item_name": "Lockpick" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .request(
                "POST",
                "/api/crafted-items",
                Some(&token),
                Some(json!({ "item_name": "Lockpick", "quantity": 4, "crafted_by": "Ryder" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["quantity"], 4);
    }

    #[tokio::test]
    async fn malformed_json_keeps_the_error_shape() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let (status, body) = app.raw_post("/api/members", &token, "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
