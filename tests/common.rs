use encore_backend::{
    api::router::create_router,
    config::Config,
    domain::models::user::Role,
    domain::ports::{EmailService, GeoResult, Geocoder, ObjectStorage},
    domain::services::auth_service::AuthService,
    error::AppError,
    infra::repositories::{
        sqlite_artist_repo::SqliteArtistRepo,
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_settings_repo::SqliteSettingsRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tera::Tera;
use tower::ServiceExt;
use uuid::Uuid;

pub struct MockEmailService {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        _html_body: &str,
        _attachment_name: Option<&str>,
        _attachment_data: Option<&[u8]>
    ) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("mail relay down".to_string()));
        }
        self.sent.lock().unwrap().push((recipient.to_string(), subject.to_string()));
        Ok(())
    }
}

pub struct MockObjectStorage {
    pub uploads: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn upload(&self, path: &str, _bytes: &[u8], _content_type: &str) -> Result<String, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("storage down".to_string()));
        }
        self.uploads.lock().unwrap().push(path.to_string());
        Ok(format!("mock://storage/{}", path))
    }
}

pub struct MockGeocoder;

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn search(&self, _query: &str) -> Result<Vec<GeoResult>, AppError> {
        Ok(vec![GeoResult { lat: 48.2082, lon: 16.3738 }])
    }
}

pub struct AuthSession {
    pub access_token: String,
    pub csrf_token: String,
    pub user_id: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub email: Arc<MockEmailService>,
    pub storage: Arc<MockObjectStorage>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template(
            "confirmation.html",
            "<html>Tickets for {{ attendee_name }}: {{ ticket_count }}</html>",
        ).unwrap();
        let templates = Arc::new(tera);

        let priv_key_pem = include_str!("keys/test_private.pem");
        let pub_key_pem = include_str!("keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            storage_service_url: "http://localhost".to_string(),
            storage_service_token: "token".to_string(),
            proof_bucket: "payment-proofs".to_string(),
            geocoder_url: "http://localhost".to_string(),
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
        };

        let email = Arc::new(MockEmailService::new());
        let storage = Arc::new(MockObjectStorage::new());

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            artist_repo: Arc::new(SqliteArtistRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            settings_repo: Arc::new(SqliteSettingsRepo::new(pool.clone())),
            auth_service,
            email_service: email.clone(),
            object_storage: storage.clone(),
            geocoder: Arc::new(MockGeocoder),
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            email,
            storage,
        }
    }

    /// One-call request helper; cookie + CSRF header attached when a
    /// session is given.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        auth: Option<&AuthSession>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(session) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", session.access_token))
                .header("X-CSRF-Token", &session.csrf_token);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn register_and_login(&self, email: &str, name: &str, password: &str) -> AuthSession {
        let payload = serde_json::json!({
            "email": email,
            "name": name,
            "password": password
        });
        let response = self.request("POST", "/api/v1/auth/register", None, Some(payload)).await;
        if !response.status().is_success() {
            panic!("Register failed in test helper: status {}", response.status());
        }
        self.login(email, password).await
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthSession {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.request("POST", "/api/v1/auth/login", None, Some(payload)).await;

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();
        let user_id = body_json["user"]["id"].as_str().expect("No user id in body").to_string();

        AuthSession {
            access_token,
            csrf_token,
            user_id,
        }
    }

    /// Tests grant roles directly through the repository; the HTTP path for
    /// this is exercised by the admin endpoint tests.
    pub async fn promote(&self, user_id: &str, role: Role) {
        self.state.user_repo.update_role(user_id, role).await.unwrap();
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
