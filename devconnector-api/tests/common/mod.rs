#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use devconnector_api::domain::profile::models::Profile;
use devconnector_api::domain::profile::ports::ProfileRepository;
use devconnector_api::domain::profile::service::ProfileService;
use devconnector_api::domain::user::models::EmailAddress;
use devconnector_api::domain::user::models::User;
use devconnector_api::domain::user::models::UserId;
use devconnector_api::domain::user::ports::UserRepository;
use devconnector_api::domain::user::service::UserService;
use devconnector_api::inbound::http::middleware::AUTH_TOKEN_HEADER;
use devconnector_api::inbound::http::router::create_router;
use devconnector_api::profile::errors::ProfileError;
use devconnector_api::repositories::PostgresProfileRepository;
use devconnector_api::repositories::PostgresUserRepository;
use devconnector_api::user::errors::UserError;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const SIGNING_KEY: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store kept in process memory, with the same email uniqueness
/// rule as the Postgres table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateUser(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserError> {
        Ok(self.users.lock().unwrap().remove(id).is_some())
    }
}

/// Profile store keyed by owner, mirroring the upsert semantics of the
/// Postgres adapter.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert(&self, profile: Profile) -> Result<Profile, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();
        let stored = match profiles.get(&profile.user_id) {
            Some(existing) => Profile {
                details: profile.details,
                ..existing.clone()
            },
            None => profile,
        };
        profiles.insert(stored.user_id, stored.clone());
        Ok(stored)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileError> {
        let mut all: Vec<Profile> = self.profiles.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn save_entries(&self, profile: Profile) -> Result<Profile, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();
        let Some(existing) = profiles.get_mut(&profile.user_id) else {
            return Err(ProfileError::NoProfile(profile.user_id.to_string()));
        };
        existing.experience = profile.experience.clone();
        existing.education = profile.education.clone();
        Ok(existing.clone())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileError> {
        Ok(self.profiles.lock().unwrap().remove(user_id).is_some())
    }
}

/// Test application that spawns a real server
pub struct TestApp<UR = InMemoryUserRepository, PR = InMemoryProfileRepository> {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<UR>,
    pub profiles: Arc<PR>,
    db: Option<TestDb>,
}

/// Per-test Postgres database, dropped when the test finishes
pub struct TestDb {
    pub pool: PgPool,
    db_name: String,
    server_url: String,
}

impl TestApp {
    /// Spawn the application on in-memory stores
    pub async fn spawn() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let profiles = Arc::new(InMemoryProfileRepository::default());
        Self::serve(users, profiles, None).await
    }
}

impl TestApp<PostgresUserRepository, PostgresProfileRepository> {
    /// Spawn the application on a fresh Postgres database.
    ///
    /// Returns `None` when `DATABASE_URL` is not set, so the Postgres suite
    /// is skipped on machines without a server.
    pub async fn spawn_postgres() -> Option<Self> {
        let db = TestDb::from_env().await?;
        let users = Arc::new(PostgresUserRepository::new(db.pool.clone()));
        let profiles = Arc::new(PostgresProfileRepository::new(db.pool.clone()));
        Some(Self::serve(users, profiles, Some(db)).await)
    }

    pub fn pool(&self) -> &PgPool {
        &self.db.as_ref().expect("postgres test app owns a database").pool
    }
}

impl<UR, PR> TestApp<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    async fn serve(users: Arc<UR>, profiles: Arc<PR>, db: Option<TestDb>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(SIGNING_KEY));

        let user_service = Arc::new(UserService::new(Arc::clone(&users)));
        let profile_service = Arc::new(ProfileService::new(
            Arc::clone(&profiles),
            Arc::clone(&users),
        ));

        let router = create_router(user_service, profile_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
            users,
            profiles,
            db,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with the auth token header
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(AUTH_TOKEN_HEADER, token)
    }

    /// Helper to make POST request with the auth token header
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).header(AUTH_TOKEN_HEADER, token)
    }

    /// Helper to make PUT request with the auth token header
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(self.url(path))
            .header(AUTH_TOKEN_HEADER, token)
    }

    /// Helper to make DELETE request with the auth token header
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(self.url(path))
            .header(AUTH_TOKEN_HEADER, token)
    }

    /// Register a user and return its token
    pub async fn register(&self, name: &str, email: &str, secret: &str) -> String {
        let response = self
            .post("/api/users")
            .json(&json!({ "name": name, "email": email, "secret": secret }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().expect("token missing").to_string()
    }

    /// Create a minimal profile for the token's owner
    pub async fn create_profile(&self, token: &str) -> Value {
        let response = self
            .post_authenticated("/api/profile", token)
            .json(&json!({ "status": "Developer", "skills": "rust, sql" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }
}

impl TestDb {
    /// Create a uniquely named database on the `DATABASE_URL` server and
    /// run the migrations against it
    pub async fn from_env() -> Option<Self> {
        let server_url = std::env::var("DATABASE_URL").ok()?;
        let db_name = format!(
            "test_devconnector_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Cleanup runs in the background on the test runtime
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
