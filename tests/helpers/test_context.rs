//! Test context for integration tests
//!
//! Bundles a mock API, settings pointing at it and a service factory
//! sharing one session.

use std::path::Path;
use std::sync::{Arc, Once};
use ticketdesk::config::Settings;
use ticketdesk::models::Role;
use ticketdesk::services::{Destination, ServiceFactory};
use ticketdesk::state::{FileSessionStore, Session, SessionContext};
use super::api_mock::ApiMockServer;
use super::test_data::test_token;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("ticketdesk=debug")
            .with_test_writer()
            .try_init();
    });
}

pub struct TestContext {
    pub api: ApiMockServer,
    pub settings: Settings,
    pub services: ServiceFactory,
}

impl TestContext {
    /// Fresh mock API with an in-memory session
    pub async fn new() -> Self {
        Self::with_session(SessionContext::in_memory()).await
    }

    /// Fresh mock API with the session persisted to `path`
    pub async fn with_session_file(path: &Path) -> Self {
        let store = FileSessionStore::new(path);
        let session = SessionContext::new(Arc::new(store)).expect("Failed to load session file");
        Self::with_session(session).await
    }

    async fn with_session(session: SessionContext) -> Self {
        init_test_logging();
        let api = ApiMockServer::new().await;
        let settings = test_settings(&api.base_url);
        let services = ServiceFactory::new(&settings, session).expect("Failed to create services");
        Self { api, settings, services }
    }

    /// Log in through the mock auth endpoint
    pub async fn login_as(&self, role: &str, email: &str, user_id: i64) -> Destination {
        self.api.mock_login(&test_token(role, email, user_id)).await;
        self.services
            .auth_service
            .login(email, "Secret@123")
            .await
            .expect("Login should succeed")
    }

    /// Put a session in place without going through the API
    pub fn sign_in(&self, role: &str, email: &str, user_id: i64) {
        self.services
            .session()
            .set(Session {
                token: test_token(role, email, user_id),
                role: Role::parse(role),
                email: email.to_string(),
                user_id: Some(user_id),
            })
            .expect("Failed to set session");
    }
}

pub fn test_settings(base_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = base_url.to_string();
    settings.api.uploads_url = base_url.trim_end_matches("/api").to_string();
    settings.api.timeout_seconds = 5;
    settings
}
