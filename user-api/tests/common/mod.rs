use std::sync::atomic::AtomicI64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use chrono::Utc;
use tower::ServiceExt;
use user_api::domain::user::models::NewUser;
use user_api::domain::user::models::User;
use user_api::domain::user::models::UserId;
use user_api::domain::user::ports::UserRepository;
use user_api::domain::user::service::UserService;
use user_api::inbound::http::middleware::docs_referer_policy;
use user_api::inbound::http::router::create_router;
use user_api::user::errors::UserError;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory user repository backing the test application.
///
/// Tracks how many lookups the handlers perform, so tests can assert
/// that rejected requests never reach persistence.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
    pub lookups: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email.as_str() == user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = User {
            id: UserId::new(id).unwrap(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().unwrap();

        let page = users
            .iter()
            .skip(offset.max(0) as usize)
            .take(if limit == 0 {
                usize::MAX
            } else {
                limit as usize
            })
            .cloned()
            .collect();

        Ok(page)
    }

    async fn count(&self) -> Result<i64, UserError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn delete(&self, id: UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();

        let before = users.len();
        users.retain(|u| u.id != id);

        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

/// Test application driving the router in-process.
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryUserRepository>,
    pub token_codec: Arc<TokenCodec>,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let token_codec = Arc::new(TokenCodec::new(TEST_JWT_SECRET));
        let user_service = Arc::new(UserService::new(Arc::clone(&repository)));

        let router = create_router(
            user_service,
            Arc::clone(&token_codec),
            Arc::new(docs_referer_policy),
        );

        Self {
            router,
            repository,
            token_codec,
        }
    }

    /// Send a request through the router and decode the JSON response.
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Failed to parse response body")
        };

        (status, body)
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::post(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.request(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::get(path).body(Body::empty()).unwrap();
        self.request(request).await
    }

    pub async fn get_bearer(&self, path: &str, token: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::get(path)
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        self.request(request).await
    }

    pub async fn get_basic(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> (StatusCode, serde_json::Value) {
        let encoded = BASE64_STANDARD.encode(format!("{}:{}", email, password));
        let request = Request::get(path)
            .header("authorization", format!("Basic {}", encoded))
            .header("referer", "http://localhost:8000/swagger/index.html")
            .body(Body::empty())
            .unwrap();

        self.request(request).await
    }

    /// Register a user and log them in, returning (id, token).
    pub async fn register_and_login(&self, email: &str, password: &str) -> (i64, String) {
        let (status, body) = self
            .post_json(
                "/api/v1/auth/register",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().expect("missing user id");

        let (status, body) = self
            .post_json(
                "/api/v1/auth/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["token"]
            .as_str()
            .expect("missing token")
            .to_string();

        (id, token)
    }
}
