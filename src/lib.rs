//! # Authgate (first-login authentication for Cognito user pools)
//!
//! `authgate` authenticates a user against an Amazon Cognito user pool with the
//! `USER_PASSWORD_AUTH` flow and returns the issued session tokens as JSON.
//!
//! ## First login
//!
//! Users created by an administrator start with a temporary password, and Cognito
//! answers their first authentication with a `NEW_PASSWORD_REQUIRED` challenge.
//! Authgate resolves that challenge by making the supplied password permanent
//! (`AdminSetUserPassword`) and authenticating once more. A second challenge is a
//! hard failure; there is no retry loop.
//!
//! ## Surfaces
//!
//! - **Lambda:** the default mode runs the `lambda_runtime` event loop. The event
//!   payload is `{"username": "...", "password": "..."}` and the response is the
//!   JSON string `{"accessToken": "...", "refreshToken": "..."}`.
//! - **CLI:** `authgate login` performs the same workflow once from a terminal.
//!
//! Authgate never stores credentials, hashes passwords or issues tokens; Cognito
//! stays the authority.

pub mod auth;
pub mod cli;
pub mod cognito;
pub mod lambda;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
