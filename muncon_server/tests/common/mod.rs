use std::{borrow::BorrowMut, future::Future};

use axum::{
    body::Body,
    http::{request::Builder, Request},
    response::Response,
};
use base64::{engine::general_purpose, Engine as _};
use http_body::{combinators::UnsyncBoxBody, Body as _};
use muncon_server::{auth::LoginResponse, state::AppState, users::CreateUserResponse};
use sea_orm::{prelude::Uuid, DatabaseConnection};
use tower::Service;

#[derive(Default)]
pub struct FixtureOptions {
    pub seed_reference_data: bool,
}

pub struct Fixture {
    pub app: axum::Router,
    pub auth: Auth,
}

pub enum Auth {
    None,
    Basic { username: String, password: String },
    Bearer { token: String },
}

pub struct APIResponse {
    response: Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>,
}

impl APIResponse {
    pub fn status(&self) -> axum::http::StatusCode {
        self.response.status()
    }

    pub async fn json<T: serde::de::DeserializeOwned>(&mut self) -> T {
        let mut buf = Vec::new();

        let body = self.response.body_mut();

        while let Some(next) = body.data().await {
            buf.extend_from_slice(&next.unwrap());
        }
        serde_json::from_slice(&buf).unwrap()
    }

    #[allow(dead_code)]
    pub async fn text(&mut self) -> String {
        let mut buf = Vec::new();

        let body = self.response.body_mut();

        while let Some(next) = body.data().await {
            buf.extend_from_slice(&next.unwrap());
        }
        String::from_utf8(buf).unwrap()
    }
}

impl From<Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>> for APIResponse {
    fn from(response: Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>) -> Self {
        Self { response }
    }
}

pub fn signup_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "password": "testtest1",
        "password_confirm": "testtest1",
        "nationality": "DE",
    })
}

impl Fixture {
    pub async fn new(options: FixtureOptions) -> Self {
        Self::new_with_setup(options, |_| async {}).await
    }

    pub async fn new_with_setup<F, Fut>(options: FixtureOptions, setup_func: F) -> Self
    where
        F: FnOnce(DatabaseConnection) -> Fut,
        Fut: Future<Output = ()>,
    {
        let state = AppState::new_test_app().await;

        if options.seed_reference_data {
            muncon_entities::mock::seed_mock_conference(&state.db)
                .await
                .unwrap();
        }
        setup_func(state.db.clone()).await;

        let app = muncon_server::app_with_state(state).await;

        Self {
            app,
            auth: Auth::None,
        }
    }

    #[allow(dead_code)]
    pub async fn default() -> Self {
        Self::new(FixtureOptions::default()).await
    }

    #[allow(dead_code)]
    pub async fn create_user_and_token(&mut self) -> (Uuid, String) {
        let mut response = self
            .post_json("/api/users", signup_body("user@example.com"))
            .await;
        assert_eq!(response.status(), 200);
        let body = response.json::<CreateUserResponse>().await;
        let user_id = body.uuid;

        let mut response = self
            .post_json(
                "/api/login",
                serde_json::json!({
                    "email": "user@example.com",
                    "password": "testtest1",
                }),
            )
            .await;
        assert_eq!(response.status(), 200);
        let token: LoginResponse = response.json().await;

        self.auth = Auth::Bearer {
            token: token.token.clone(),
        };

        (user_id, token.token)
    }

    fn get_base_request(&self) -> Builder {
        let builder = Request::builder();

        let builder = match &self.auth {
            Auth::None => builder,
            Auth::Basic { username, password } => builder.header(
                "Authorization",
                format!(
                    "Basic {}",
                    general_purpose::STANDARD.encode(format!("{}:{}", username, password))
                ),
            ),
            Auth::Bearer { token } => {
                builder.header("Authorization", format!("Bearer {}", token))
            }
        };

        builder
    }

    #[allow(dead_code)]
    pub async fn get(&mut self, path: &str) -> APIResponse {
        let request = self
            .get_base_request()
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.app.borrow_mut().call(request).await.unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn post_json_no_body(&mut self, path: &str) -> APIResponse {
        let request = self
            .get_base_request()
            .method("POST")
            .header("Content-Type", "application/json")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.app.borrow_mut().call(request).await.unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn post_json<T>(&mut self, path: &str, body: T) -> APIResponse
    where
        T: serde::Serialize,
    {
        let request = self
            .get_base_request()
            .method("POST")
            .header("Content-Type", "application/json")
            .uri(path)
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        self.app.borrow_mut().call(request).await.unwrap().into()
    }
}
