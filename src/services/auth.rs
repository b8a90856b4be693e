//! Authentication service implementation
//!
//! Login, logout and role-based routing. The role read from the token only
//! picks which dashboard to show; the server authorizes every call.

use std::fmt;
use tracing::{debug, warn};
use crate::api::ApiService;
use crate::models::Role;
use crate::state::{decode_claims, Session, SessionContext, TokenClaims};
use crate::utils::errors::{Result, TicketdeskError};
use crate::utils::logging::log_auth_event;

/// Message shown when the server gives no reason for a failed login
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Where a user lands after logging in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    AdminDashboard,
    OrganizerDashboard,
    UserDashboard,
}

impl Destination {
    pub fn for_role(role: &Role) -> Self {
        if role.is_admin() {
            Destination::AdminDashboard
        } else if role.is_organizer() {
            Destination::OrganizerDashboard
        } else {
            Destination::UserDashboard
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Destination::AdminDashboard => "/admin",
            Destination::OrganizerDashboard => "/organizer",
            Destination::UserDashboard => "/dashboard",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The active session, or `LoginRequired` carrying where to come back to
pub fn require_session(session: &SessionContext, redirect: &str) -> Result<Session> {
    session.current().ok_or_else(|| {
        debug!(redirect = redirect, "Login required");
        TicketdeskError::LoginRequired {
            redirect: redirect.to_string(),
        }
    })
}

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiService,
}

impl AuthService {
    pub fn new(api: ApiService) -> Self {
        Self { api }
    }

    fn session(&self) -> &SessionContext {
        self.api.session()
    }

    /// Log in and persist the session. Returns the dashboard for the role.
    pub async fn login(&self, email: &str, password: &str) -> Result<Destination> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(TicketdeskError::Validation("Please enter your email and password".to_string()));
        }

        let token = match self.api.auth.login(email, password).await {
            Ok(token) => token,
            Err(TicketdeskError::Api(e)) if e.status().is_some() => {
                let message = e.server_detail().unwrap_or(INVALID_CREDENTIALS).to_string();
                log_auth_event(email, "login", false, Some(&message));
                return Err(TicketdeskError::Authentication(message));
            }
            Err(e) => {
                log_auth_event(email, "login", false, Some(&e.to_string()));
                return Err(e);
            }
        };

        let claims = decode_claims(&token).unwrap_or_else(|e| {
            warn!(error = %e, "Could not decode token claims, using defaults");
            TokenClaims::default()
        });

        let role = claims.role.as_deref().map(Role::parse).unwrap_or_default();
        let destination = Destination::for_role(&role);

        self.session().set(Session {
            token,
            role,
            email: claims.email.unwrap_or_else(|| email.to_string()),
            user_id: claims.user_id,
        })?;

        log_auth_event(email, "login", true, Some(destination.path()));
        Ok(destination)
    }

    pub fn logout(&self) -> Result<()> {
        if let Some(session) = self.session().current() {
            log_auth_event(&session.email, "logout", true, None);
        }
        self.session().logout()
    }

    pub fn current(&self) -> Option<Session> {
        self.session().current()
    }

    /// The active session, or `LoginRequired` carrying where to come back to
    pub fn require_session(&self, redirect: &str) -> Result<Session> {
        require_session(self.session(), redirect)
    }

    pub fn require_admin(&self, redirect: &str) -> Result<Session> {
        let session = self.require_session(redirect)?;
        if !session.role.is_admin() {
            return Err(TicketdeskError::PermissionDenied("Admin access required".to_string()));
        }
        Ok(session)
    }

    /// Admins and organizers may manage events, places and categories
    pub fn require_staff(&self, redirect: &str) -> Result<Session> {
        let session = self.require_session(redirect)?;
        if !session.role.is_admin() && !session.role.is_organizer() {
            return Err(TicketdeskError::PermissionDenied("Organizer or admin access required".to_string()));
        }
        Ok(session)
    }
}
