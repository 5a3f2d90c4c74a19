//! Shared helpers for handler and service tests

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::auth::tokens::TokenIssuer;
use crate::common::AppState;
use crate::jobs::{Job, NewJob};
use crate::services::{AiError, AiGateway, TextGenerator};
use crate::store::{InsertOutcome, JobRepository, MemoryStore};

pub const TEST_SECRET: &str = "test_secret";

/// Text generator with a canned answer that records every prompt.
pub struct StubGenerator {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(AiError::RequestFailed)
    }
}

pub fn sample_job(id: i64) -> Job {
    Job {
        id,
        url: format!("https://www.python.org/jobs/{id}/"),
        title: format!("Python Developer {id}"),
        company: Some("Acme".to_string()),
        location: Some("Remote".to_string()),
        description: format!("<div class=\"job-description\"><p>Role {id}</p></div>"),
    }
}

/// Router over an in-memory store with a stubbed AI backend
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub ai: Arc<StubGenerator>,
    pub tokens: TokenIssuer,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_ai(StubGenerator::replying("stub reply"))
    }

    pub fn with_ai(ai: Arc<StubGenerator>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenIssuer::new(TEST_SECRET, 30);
        let state = AppState::with_store(
            store.clone(),
            AiGateway::new(ai.clone(), "English"),
            tokens.clone(),
        );
        Self {
            router: crate::build_router(Arc::new(state)),
            store,
            ai,
            tokens,
        }
    }

    pub async fn seed_job(&self, url: &str, title: &str, description: &str) -> i64 {
        let job = NewJob {
            url: url.to_string(),
            title: title.to_string(),
            company: Some("Acme".to_string()),
            location: None,
            description: description.to_string(),
        };
        match self.store.insert_if_absent(&job).await.expect("insert job") {
            InsertOutcome::Inserted(id) => id,
            InsertOutcome::Duplicate => panic!("job {url} seeded twice"),
        }
    }

    pub async fn signup(&self, email: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({ "email": email, "password": password });
        self.request("POST", "/users/", Some(body), None).await
    }

    /// Signs up and logs in through the form endpoint, returning the token
    pub async fn signup_and_login(&self, email: &str, password: &str) -> String {
        let response = self.signup(email, password).await;
        assert_eq!(response.status, StatusCode::OK, "Signup failed: {:?}", response.body);

        let response = self.login_form(email, password).await;
        assert_eq!(response.status, StatusCode::OK, "Login failed: {:?}", response.body);

        response
            .body
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string()
    }

    pub async fn login_form(&self, username: &str, password: &str) -> TestResponse {
        let body = format!(
            "username={}&password={}",
            urlencoding::encode(username),
            urlencoding::encode(password)
        );
        let req = Request::builder()
            .method("POST")
            .uri("/token")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
