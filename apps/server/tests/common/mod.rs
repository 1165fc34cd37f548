#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use producao_core::users::{NewUser, Role, UserRepositoryTrait};
use producao_server::{api::app_router, auth::AuthManager, build_state, config::Config};
use producao_storage_sqlite::{create_pool, spawn_writer, users::UserRepository};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "chefe";
pub const ADMIN_PASSWORD: &str = "senha-forte";

pub struct TestApp {
    pub router: Router,
    pub db_path: String,
    _temp_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }
}

pub async fn spawn_app() -> TestApp {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: db_path.clone(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        secret_key: vec![42u8; 32],
        session_ttl: Duration::from_secs(3600),
        static_dir: "dist".to_string(),
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        db_path,
        _temp_dir: temp_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            text: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.call(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.call(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.call(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.call(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.call(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Creates the first admin and returns a bearer token for it.
    pub async fn admin_token(&self) -> String {
        let created = self
            .call(
                Method::POST,
                "/api/create-admin",
                None,
                Some(json!({
                    "username": ADMIN_USERNAME,
                    "email": "chefe@example.com",
                    "password": ADMIN_PASSWORD,
                })),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED, "{}", created.text);
        self.token_for(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Inserts a standard (non-admin) user straight into the database and
    /// returns a bearer token for it. There is no HTTP route for this.
    pub async fn standard_user_token(&self, username: &str, password: &str) -> String {
        let pool = create_pool(&self.db_path).unwrap();
        let writer = spawn_writer((*pool).clone());
        UserRepository::new(pool, writer)
            .create(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: AuthManager::hash_password(password).unwrap(),
                role: Role::Standard,
            })
            .await
            .unwrap();
        self.token_for(username, password).await
    }

    async fn token_for(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        response.json()["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Creates an area and a colaborador, returning their ids.
    pub async fn seed_area_and_colaborador(
        &self,
        token: &str,
        area: &str,
        colaborador: &str,
    ) -> (String, String) {
        let area = self.post("/api/areas", token, json!({ "nome": area })).await;
        assert_eq!(area.status, StatusCode::CREATED, "{}", area.text);
        let colaborador = self
            .post("/api/colaboradores", token, json!({ "nome": colaborador }))
            .await;
        assert_eq!(colaborador.status, StatusCode::CREATED, "{}", colaborador.text);
        (
            area.json()["id"].as_str().unwrap().to_string(),
            colaborador.json()["id"].as_str().unwrap().to_string(),
        )
    }

    pub async fn seed_lancamento(
        &self,
        token: &str,
        area_id: &str,
        colaborador_id: &str,
        date: &str,
        quantity: i32,
    ) -> Value {
        let response = self
            .post(
                "/api/lancamentos",
                token,
                json!({
                    "data": date,
                    "area_id": area_id,
                    "colaborador_id": colaborador_id,
                    "quantidade_realizada": quantity,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.json()
    }
}
