//! Service context - dependency container for services
//!
//! Holds the repository ports, the image store, the clock and the auth
//! helpers. Everything is behind `Arc`, so cloning is cheap and one context
//! is shared by every request task.

use std::sync::Arc;

use booking_common::{JwtService, PasswordService};
use booking_core::{
    BookingRepository, Clock, EventRepository, ImageStore, Snowflake, SnowflakeGenerator,
    SystemClock, UserRepository,
};
use chrono::{DateTime, Utc};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    event_repo: Arc<dyn EventRepository>,
    booking_repo: Arc<dyn BookingRepository>,

    image_store: Arc<dyn ImageStore>,
    clock: Arc<dyn Clock>,

    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    pub fn booking_repo(&self) -> &dyn BookingRepository {
        self.booking_repo.as_ref()
    }

    pub fn image_store(&self) -> &dyn ImageStore {
        self.image_store.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Current time as seen by every rule that depends on "now"
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ServiceContext`]
///
/// Repositories, the image store and the JWT service are required. The
/// clock defaults to [`SystemClock`] and the ID generator to worker 0.
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    booking_repo: Option<Arc<dyn BookingRepository>>,
    image_store: Option<Arc<dyn ImageStore>>,
    clock: Option<Arc<dyn Clock>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn booking_repo(mut self, repo: Arc<dyn BookingRepository>) -> Self {
        self.booking_repo = Some(repo);
        self
    }

    pub fn image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let required = |name: &str| ServiceError::validation(format!("{name} is required"));

        Ok(ServiceContext {
            user_repo: self.user_repo.ok_or_else(|| required("user_repo"))?,
            event_repo: self.event_repo.ok_or_else(|| required("event_repo"))?,
            booking_repo: self.booking_repo.ok_or_else(|| required("booking_repo"))?,
            image_store: self.image_store.ok_or_else(|| required("image_store"))?,
            jwt_service: self.jwt_service.ok_or_else(|| required("jwt_service"))?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            password_service: PasswordService::new(),
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
        })
    }
}
