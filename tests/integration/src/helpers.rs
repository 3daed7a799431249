//! Test helpers for integration tests
//!
//! Spawns the API on an ephemeral port and wraps the HTTP calls the tests
//! make.

use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use booking_api::{create_app, create_app_state};
use booking_common::{
    hash_password, AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
use booking_core::{Role, Snowflake, SnowflakeGenerator, User, UserRepository};
use booking_db::{PgPool, PgUserRepository};
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{AuthResponse, LoginRequest, RegisterRequest};

/// API prefix shared by every non-health route
pub const API: &str = "/api/v1";

/// IDs for accounts seeded directly into the database
fn seed_ids() -> &'static SnowflakeGenerator {
    static GENERATOR: OnceLock<SnowflakeGenerator> = OnceLock::new();
    GENERATOR.get_or_init(|| {
        SnowflakeGenerator::new(Snowflake::MAX_WORKER_ID).unwrap_or_default()
    })
}

/// Running server plus a client pointed at it
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pool: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let pool = state.pool().clone();
        let app = create_app(state)?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            pool,
            _handle: handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    fn authed(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.get(self.url(path)), token)
            .send()
            .await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::authed(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authed(self.client.delete(self.url(path)), token)
            .send()
            .await?)
    }

    /// Register a fresh user and return its session
    pub async fn register(&self) -> Result<AuthResponse> {
        let request = RegisterRequest::unique();
        let response = self.post(&format!("{API}/auth/register"), &request).await?;
        assert_json(response, StatusCode::CREATED).await
    }

    /// Seed an admin account in the database, then log in over HTTP
    pub async fn admin(&self) -> Result<AuthResponse> {
        let request = RegisterRequest::unique();

        let mut user = User::new(
            seed_ids().generate(),
            request.username.clone(),
            request.email.clone(),
            Utc::now(),
        );
        user.role = Role::Admin;

        let hash = hash_password(&request.password)?;
        PgUserRepository::new(self.pool.clone())
            .create(&user, &hash)
            .await
            .context("seeding admin")?;

        let response = self
            .post(&format!("{API}/auth/login"), &LoginRequest::from_register(&request))
            .await?;
        assert_json(response, StatusCode::OK).await
    }
}

/// Configuration for a test server: `DATABASE_URL` from the environment,
/// everything else fixed
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;

    Ok(AppConfig {
        app: AppSettings {
            name: "booking-integration".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url,
            max_connections: 10,
            min_connections: 1,
            run_migrations: true,
            migrations_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations").to_string(),
        },
        jwt: JwtConfig {
            secret: "integration-test-secret-at-least-32-bytes".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604_800,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        storage: StorageConfig {
            upload_dir: std::env::temp_dir()
                .join("booking-integration-media")
                .to_string_lossy()
                .into_owned(),
        },
        snowflake: SnowflakeConfig { worker_id: 3 },
    })
}

/// Whether the database these tests need is configured
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response's status and `error.code`
pub async fn assert_error(
    response: Response,
    expected_status: StatusCode,
    expected_code: &str,
) -> Result<()> {
    let body: crate::fixtures::ErrorResponse = assert_json(response, expected_status).await?;
    anyhow::ensure!(
        body.error.code == expected_code,
        "Expected error code {expected_code}, got {}",
        body.error.code
    );
    Ok(())
}
