//! Identity: credential checks and the client for the hosted auth service.

pub mod provider;

#[cfg(feature = "http")]
pub mod http;

pub use provider::{
    AUTH_ANON_KEY_VAR, AUTH_URL_VAR, Credentials, IdentityConfig, IdentityError,
    IdentityProvider, MIN_PASSWORD_LEN, Session, SignUpOutcome, User,
};

#[cfg(feature = "http")]
pub use http::HostedAuthClient;
