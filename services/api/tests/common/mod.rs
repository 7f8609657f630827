//! Shared harness for the HTTP-level tests: a real router over real
//! adapters, with datasets and stores in temp directories.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use tracing::Level;

use api_lib::config::{Config, UserRegistry};
use api_lib::web::{self, state::AppState};

pub const ADMIN_SECRET: &str = "sekrit";

pub struct TestUser {
    pub name: &'static str,
    pub password: &'static str,
    pub dataset: Option<&'static str>,
    pub justification: Option<&'static str>,
    pub expert: bool,
}

impl TestUser {
    pub fn new(name: &'static str, password: &'static str, dataset: &'static str) -> Self {
        Self {
            name,
            password,
            dataset: Some(dataset),
            justification: None,
            expert: false,
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    _data_dir: TempDir,
    _store_dir: TempDir,
}

pub fn build_app(users: &[TestUser]) -> TestApp {
    let data_dir = tempfile::tempdir().unwrap();
    let store_dir = tempfile::tempdir().unwrap();

    let mut registry = UserRegistry {
        credentials: Default::default(),
        datasets: Default::default(),
        justification_datasets: Default::default(),
        experts: Default::default(),
    };
    for user in users {
        registry
            .credentials
            .insert(user.name.to_string(), user.password.to_string());
        if let Some(json) = user.dataset {
            let filename = format!("{}.json", user.name);
            std::fs::write(data_dir.path().join(&filename), json).unwrap();
            registry.datasets.insert(user.name.to_string(), filename);
        }
        if let Some(json) = user.justification {
            let filename = format!("{}_just.json", user.name);
            std::fs::write(data_dir.path().join(&filename), json).unwrap();
            registry
                .justification_datasets
                .insert(user.name.to_string(), filename);
        }
        if user.expert {
            registry.experts.insert(user.name.to_string());
        }
    }

    let config = Arc::new(Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: Level::INFO,
        admin_secret: ADMIN_SECRET.to_string(),
        data_dir: data_dir.path().to_path_buf(),
        store_dir: store_dir.path().join("user_dbs"),
        users: registry,
    });
    let state = Arc::new(AppState::new(config));
    TestApp {
        router: web::router(state.clone()),
        state,
        _data_dir: data_dir,
        _store_dir: store_dir,
    }
}

pub async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(
    router: &Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Pulls the `session=...` pair out of a login response's Set-Cookie.
pub fn session_cookie(response: &Response<Body>) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
}

/// Logs in and returns the session cookie, asserting the redirect target.
pub async fn login(router: &Router, username: &str, password: &str, expect_to: &str) -> String {
    let response = post_form(
        router,
        "/login",
        &format!("username={}&password={}", username, password),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), expect_to);
    session_cookie(&response)
}
