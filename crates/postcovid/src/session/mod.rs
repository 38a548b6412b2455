//! Mock clinician login and the local session record.
//!
//! There is no credential verification. The session is passed explicitly to
//! anything that needs to attribute work to a clinician.

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError};

use crate::assessment::ClinicianId;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Recorded on assessments generated without a signed-in clinician.
pub const ANONYMOUS_CLINICIAN_ID: &str = "current-user";

const ADMIN_EMAIL: &str = "admin@nhs.uk";
const ALLOWED_EMAIL_DOMAINS: [&str; 2] = ["@nhs.uk", "@nhs.net"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Clinician,
    Admin,
}

/// Record persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub role: UserRole,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub current_user: Option<CurrentUser>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user: &User) -> Self {
        Self {
            current_user: Some(CurrentUser::from(user)),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn clinician_id(&self) -> ClinicianId {
        match &self.current_user {
            Some(user) => ClinicianId(user.id.clone()),
            None => ClinicianId(ANONYMOUS_CLINICIAN_ID.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Please enter both email and password")]
    MissingCredentials,
    #[error("Please use an NHS email address (@nhs.uk or @nhs.net)")]
    NonNhsEmail,
}

/// Stand-in for a real identity provider.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    latency: Duration,
}

impl MockAuthenticator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, LoginError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }

        let lowered = email.to_lowercase();
        if !ALLOWED_EMAIL_DOMAINS
            .iter()
            .any(|domain| lowered.ends_with(domain))
        {
            return Err(LoginError::NonNhsEmail);
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let user = if email == ADMIN_EMAIL {
            User {
                id: "1".to_string(),
                name: "Admin User".to_string(),
                email: ADMIN_EMAIL.to_string(),
                role: UserRole::Admin,
            }
        } else {
            User {
                id: "2".to_string(),
                name: "Clinical User".to_string(),
                email: email.to_string(),
                role: UserRole::Clinician,
            }
        };

        info!(user_id = %user.id, role = ?user.role, "mock login succeeded");
        Ok(user)
    }
}
