//! HTTP client for a GoTrue-compatible auth service.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::provider::{
    Credentials, IdentityConfig, IdentityError, IdentityProvider, Session, SignUpOutcome, User,
};

/// Auth client for the hosted identity service's `/auth/v1` endpoints.
pub struct HostedAuthClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    /// Prefers the absolute `expires_at`, falling back to `now + expires_in`.
    fn into_session(self, now: DateTime<Utc>) -> Result<Session, IdentityError> {
        let expires_at = match self.expires_at {
            Some(secs) => DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                IdentityError::InvalidResponse(format!("expires_at out of range: {secs}"))
            })?,
            None => {
                let secs = self.expires_in.unwrap_or(0);
                TimeDelta::try_seconds(secs)
                    .and_then(|ttl| now.checked_add_signed(ttl))
                    .ok_or_else(|| {
                        IdentityError::InvalidResponse(format!("expires_in out of range: {secs}"))
                    })?
            }
        };
        Ok(Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        })
    }
}

/// Sign-up returns a full session when email confirmation is disabled,
/// otherwise just the pending user.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(User),
}

impl SignUpResponse {
    fn into_outcome(self, now: DateTime<Utc>) -> Result<SignUpOutcome, IdentityError> {
        Ok(match self {
            Self::Session(token) => {
                let session = token.into_session(now)?;
                SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                }
            }
            Self::User(user) => SignUpOutcome {
                user,
                session: None,
            },
        })
    }
}

impl HostedAuthClient {
    /// `base_url` should be like `https://project.example.co` (trailing slash is trimmed).
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
        }
    }

    pub fn from_env() -> Result<Self, IdentityError> {
        Ok(Self::new(IdentityConfig::from_env()?))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, IdentityError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl IdentityProvider for HostedAuthClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError> {
        credentials.validate_sign_in()?;
        let url = self.url("token?grant_type=password");

        info!(email = %credentials.email, "signing in");
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&PasswordGrant {
                email: &credentials.email,
                password: &credentials.password,
            })
            .send()
            .await?;
        let token: TokenResponse = Self::check(resp).await?.json().await?;
        let session = token.into_session(Utc::now())?;
        info!(user = %session.user.id, "signed in");
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, IdentityError> {
        credentials.validate_sign_up()?;
        let url = self.url("signup");

        info!(email = %credentials.email, "signing up");
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&PasswordGrant {
                email: &credentials.email,
                password: &credentials.password,
            })
            .send()
            .await?;
        let body = Self::check(resp).await?.text().await?;
        let outcome = serde_json::from_str::<SignUpResponse>(&body)?.into_outcome(Utc::now())?;
        info!(
            user = %outcome.user.id,
            needs_confirmation = outcome.needs_confirmation(),
            "signed up"
        );
        Ok(outcome)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let url = self.url("logout");

        debug!(url = %url, "signing out");
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::check(resp).await?;
        info!("signed out");
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<User>, IdentityError> {
        let url = self.url("user");

        debug!(url = %url, "looking up current user");
        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let user: User = Self::check(resp).await?.json().await?;
        Ok(Some(user))
    }
}
