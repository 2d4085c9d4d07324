//! Identity provider contract and the types it exchanges.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

pub const AUTH_URL_VAR: &str = "TRUTHNET_AUTH_URL";
pub const AUTH_ANON_KEY_VAR: &str = "TRUTHNET_AUTH_ANON_KEY";

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("identity provider is not configured: set {0}")]
    MissingConfig(&'static str),
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("identity provider returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("invalid identity provider response: {0}")]
    InvalidResponse(String),
    #[cfg(feature = "http")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Connection settings for the hosted auth service.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub base_url: String,
    pub anon_key: String,
}

impl IdentityConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }

    /// Read `TRUTHNET_AUTH_URL` and `TRUTHNET_AUTH_ANON_KEY`.
    pub fn from_env() -> Result<Self, IdentityError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, IdentityError> {
        let present = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(IdentityError::MissingConfig(name))
        };
        Ok(Self::new(present(AUTH_URL_VAR)?, present(AUTH_ANON_KEY_VAR)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Checks applied before any sign-in request.
    pub fn validate_sign_in(&self) -> Result<(), IdentityError> {
        if self.email.is_empty() || !self.email.contains('@') {
            return Err(IdentityError::InvalidCredentials(
                "enter a valid email address".into(),
            ));
        }
        if self.password.is_empty() {
            return Err(IdentityError::InvalidCredentials("enter your password".into()));
        }
        Ok(())
    }

    /// Sign-in checks plus the minimum password length.
    pub fn validate_sign_up(&self) -> Result<(), IdentityError> {
        self.validate_sign_in()?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::InvalidCredentials(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Result of a sign-up. Providers that require email confirmation return no session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpOutcome {
    pub user: User,
    pub session: Option<Session>,
}

impl SignUpOutcome {
    pub fn needs_confirmation(&self) -> bool {
        self.session.is_none()
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, IdentityError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

    /// The user owning `access_token`, or `None` if the token is no longer valid.
    async fn current_user(&self, access_token: &str) -> Result<Option<User>, IdentityError>;
}
