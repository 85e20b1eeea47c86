// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use opcua_types::MessageSecurityMode;

use super::ANONYMOUS_USER_TOKEN_ID;
use crate::authenticator::ServerUserToken;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
/// A configured server endpoint.
///
/// Security policies are out of scope for this core (no crypto stack), so
/// `security_mode` is restricted to `None` in practice; the field still
/// exists because an `EndpointDescription` advertises it to clients.
pub struct ServerEndpoint {
    /// Endpoint path, appended to the server's base URL.
    pub path: String,
    /// Security mode required on this endpoint.
    #[serde(default)]
    pub security_mode: MessageSecurityMode,
    /// Security level, higher being more secure. Used to rank endpoints
    /// when a client asks for "the most secure" one.
    pub security_level: u8,
    /// User tokens accepted on this endpoint, keyed into
    /// [`ServerConfig::user_tokens`](super::ServerConfig::user_tokens).
    pub user_token_ids: BTreeSet<String>,
}

impl ServerEndpoint {
    /// Create a new unsecured endpoint accepting the given user tokens.
    pub fn new_none(path: impl Into<String>, user_token_ids: &[String]) -> Self {
        Self {
            path: path.into(),
            security_mode: MessageSecurityMode::None,
            security_level: 0,
            user_token_ids: user_token_ids.iter().cloned().collect(),
        }
    }

    /// Validate that every user token id this endpoint references actually
    /// exists, aside from the built-in anonymous id.
    pub fn validate(
        &self,
        id: &str,
        user_tokens: &BTreeMap<String, ServerUserToken>,
    ) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        for token_id in &self.user_token_ids {
            if token_id == ANONYMOUS_USER_TOKEN_ID {
                continue;
            }
            if !user_tokens.contains_key(token_id) {
                errors.push(format!(
                    "Endpoint {id} references unknown user token id {token_id}"
                ));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Full URL for this endpoint given the server's base URL.
    pub fn endpoint_url(&self, base_endpoint: &str) -> String {
        format!("{base_endpoint}{}", self.path)
    }
}
