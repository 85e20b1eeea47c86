// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The [`AuthManager`] trait and a simple in-memory implementation of it.
//!
//! Only Anonymous and UserName identity tokens are handled: X509 tokens are
//! out of scope since this core carries no crypto stack.

use std::{collections::BTreeMap, fmt::Debug};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use opcua_types::{Error, StatusCode, UserTokenPolicy, UserTokenType};

use crate::config::{ServerEndpoint, ANONYMOUS_USER_TOKEN_ID};

/// The policy id a client must present to use the anonymous identity token,
/// matched verbatim against what a real client library sends.
pub const POLICY_ID_ANONYMOUS: &str = "open62541-anonymous-policy";
/// The policy id used for username/password tokens.
pub const POLICY_ID_USER_PASS: &str = "open62541-username-policy";

/// Debug-safe wrapper around a password: never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"****").finish()
    }
}

impl Password {
    /// Wrap a plaintext password.
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// The wrapped plaintext value. Avoid logging this.
    pub fn get(&self) -> &str {
        &self.0
    }
}

/// A unique identifier for an authenticated user. Distinct from a session:
/// one user may hold multiple concurrent sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserToken(pub String);

impl UserToken {
    /// `true` if this is the shared anonymous user token.
    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_USER_TOKEN_ID
    }
}

/// A user credential configured on the server: either anonymous-only or a
/// username/password pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerUserToken {
    /// The username.
    pub user: String,
    /// The password, in plaintext. Real deployments should load this from
    /// an external secret store rather than the config file.
    pub pass: Option<String>,
}

impl ServerUserToken {
    /// Create a new username/password user token.
    pub fn user_pass(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: Some(pass.into()),
        }
    }
}

/// Validates user identities presented to the server and decides which
/// identity-token policies an endpoint advertises.
#[async_trait]
pub trait AuthManager: Send + Sync + 'static {
    /// Validate whether anonymous access is allowed on the given endpoint.
    async fn authenticate_anonymous_token(&self, endpoint: &ServerEndpoint) -> Result<(), Error> {
        Err(Error::new(
            StatusCode::BadIdentityTokenRejected,
            "Anonymous identity token unsupported",
        ))
    }

    /// Validate a username/password pair against the given endpoint,
    /// returning the resulting user token on success.
    async fn authenticate_username_identity_token(
        &self,
        endpoint: &ServerEndpoint,
        username: &str,
        password: &Password,
    ) -> Result<UserToken, Error> {
        Err(Error::new(
            StatusCode::BadIdentityTokenRejected,
            "Username identity token unsupported",
        ))
    }

    /// The identity-token policies accepted on the given endpoint.
    fn user_token_policies(&self, endpoint: &ServerEndpoint) -> Vec<UserTokenPolicy>;

    /// Whether the endpoint accepts anonymous access.
    fn supports_anonymous(&self, endpoint: &ServerEndpoint) -> bool {
        self.user_token_policies(endpoint)
            .iter()
            .any(|t| t.token_type == UserTokenType::Anonymous)
    }

    /// Whether the endpoint accepts username/password credentials.
    fn supports_user_pass(&self, endpoint: &ServerEndpoint) -> bool {
        self.user_token_policies(endpoint)
            .iter()
            .any(|t| t.token_type == UserTokenType::UserName)
    }
}

/// A simple authenticator backed by an in-memory map of configured users.
pub struct DefaultAuthenticator {
    users: BTreeMap<String, ServerUserToken>,
}

impl DefaultAuthenticator {
    /// Create a new default authenticator from the server's configured
    /// user tokens.
    pub fn new(users: BTreeMap<String, ServerUserToken>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AuthManager for DefaultAuthenticator {
    async fn authenticate_anonymous_token(&self, endpoint: &ServerEndpoint) -> Result<(), Error> {
        if !endpoint.user_token_ids.contains(ANONYMOUS_USER_TOKEN_ID) {
            return Err(Error::new(
                StatusCode::BadIdentityTokenRejected,
                format!("Endpoint \"{}\" does not allow anonymous access", endpoint.path),
            ));
        }
        Ok(())
    }

    async fn authenticate_username_identity_token(
        &self,
        endpoint: &ServerEndpoint,
        username: &str,
        password: &Password,
    ) -> Result<UserToken, Error> {
        for user_token_id in &endpoint.user_token_ids {
            let Some(configured) = self.users.get(user_token_id) else {
                continue;
            };
            if configured.user != username {
                continue;
            }
            let valid = match configured.pass.as_deref() {
                Some(expected) => expected == password.get(),
                None => password.get().is_empty(),
            };
            if valid {
                return Ok(UserToken(user_token_id.clone()));
            }
            return Err(Error::new(
                StatusCode::BadIdentityTokenRejected,
                format!("Cannot authenticate user \"{username}\""),
            ));
        }
        Err(Error::new(
            StatusCode::BadIdentityTokenRejected,
            format!("Cannot authenticate user \"{username}\""),
        ))
    }

    fn user_token_policies(&self, endpoint: &ServerEndpoint) -> Vec<UserTokenPolicy> {
        let mut policies = Vec::with_capacity(2);
        if endpoint.user_token_ids.contains(ANONYMOUS_USER_TOKEN_ID) {
            policies.push(UserTokenPolicy {
                policy_id: POLICY_ID_ANONYMOUS.to_string(),
                token_type: UserTokenType::Anonymous,
            });
        }
        if endpoint.user_token_ids.iter().any(|id| {
            id != ANONYMOUS_USER_TOKEN_ID && self.users.contains_key(id)
        }) {
            policies.push(UserTokenPolicy {
                policy_id: POLICY_ID_USER_PASS.to_string(),
                token_type: UserTokenType::UserName,
            });
        }
        policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(ids: &[&str]) -> ServerEndpoint {
        ServerEndpoint::new_none(
            "/",
            &ids.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )
    }

    #[tokio::test]
    async fn anonymous_requires_policy_on_endpoint() {
        let auth = DefaultAuthenticator::new(BTreeMap::new());
        assert!(auth
            .authenticate_anonymous_token(&endpoint(&[ANONYMOUS_USER_TOKEN_ID]))
            .await
            .is_ok());
        assert!(auth.authenticate_anonymous_token(&endpoint(&[])).await.is_err());
    }

    #[tokio::test]
    async fn username_password_must_match() {
        let mut users = BTreeMap::new();
        users.insert("alice".to_string(), ServerUserToken::user_pass("alice", "hunter2"));
        let auth = DefaultAuthenticator::new(users);
        let ep = endpoint(&["alice"]);
        assert!(auth
            .authenticate_username_identity_token(&ep, "alice", &Password::new("hunter2"))
            .await
            .is_ok());
        assert!(auth
            .authenticate_username_identity_token(&ep, "alice", &Password::new("wrong"))
            .await
            .is_err());
    }
}
