// src/test_support.rs

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    config::AppState, db::MemoryUserRepository, models::auth::Role, routes::build_router,
    services::auth::AuthService,
};

pub struct TestApp {
    pub app_state: AppState,
    router: Router,
}

impl TestApp {
    pub const ADMIN: &'static str = "cj";
    pub const PASSWORD: &'static str = "grove-street";

    /// In-memory app with one seeded admin. bcrypt cost is kept at the minimum.
    pub async fn new() -> Self {
        let auth_service = AuthService::new(
            Arc::new(MemoryUserRepository::default()),
            "test-secret".to_string(),
            chrono::Duration::hours(1),
        )
        .with_hash_cost(4);

        auth_service.seed_admin(Self::ADMIN, Self::PASSWORD).await.unwrap();

        let app_state = AppState::in_memory(auth_service);
        let router = build_router(app_state.clone(), None);
        Self { app_state, router }
    }

    pub async fn admin_token(&self) -> String {
        self.app_state
            .auth_service
            .login_user(Self::ADMIN, Self::PASSWORD)
            .await
            .unwrap()
            .token
    }

    pub async fn member_token(&self) -> String {
        self.app_state
            .auth_service
            .create_user("ryder", "busted", None, Role::Member)
            .await
            .unwrap();
        self.app_state.auth_service.login_user("ryder", "busted").await.unwrap().token
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn raw_post(&self, uri: &str, token: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
