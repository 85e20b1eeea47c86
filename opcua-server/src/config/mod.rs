// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Server configuration: the set of endpoints, user tokens, and limits
//! loaded from (or built up in code ahead of) a YAML file.

mod endpoint;
mod limits;

pub use endpoint::ServerEndpoint;
pub use limits::Limits;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use opcua_core::config::Config;
use opcua_types::ApplicationType;

pub use crate::authenticator::ServerUserToken;

/// The user token id reserved for anonymous access; every endpoint that
/// lists it in `user_token_ids` accepts unauthenticated clients.
pub const ANONYMOUS_USER_TOKEN_ID: &str = "ANONYMOUS";

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
/// TCP transport configuration.
pub struct TcpConfig {
    /// Host name or IP address to bind to.
    pub host: String,
    /// Port to bind to. 0 means "let the OS choose", used in tests.
    pub port: u16,
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: opcua_core::constants::DEFAULT_OPC_UA_SERVER_PORT,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
/// Top level server configuration.
pub struct ServerConfig {
    /// Name of the application, used in `ApplicationDescription`.
    pub application_name: String,
    /// URI that uniquely identifies this application.
    pub application_uri: String,
    /// URI identifying the product (as distinct from this particular
    /// running instance).
    pub product_uri: String,
    /// TCP transport configuration.
    pub tcp_config: TcpConfig,
    /// Configured endpoints, keyed by an arbitrary local id.
    pub endpoints: BTreeMap<String, ServerEndpoint>,
    /// Configured user tokens, keyed by the id endpoints reference in
    /// `user_token_ids`.
    pub user_tokens: BTreeMap<String, ServerUserToken>,
    /// Additional discovery URLs advertised for this server, beyond its own
    /// base endpoint.
    #[serde(default)]
    pub discovery_urls: Vec<String>,
    /// Limits on sessions and secure channels.
    #[serde(default)]
    pub limits: Limits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let mut endpoints = BTreeMap::new();
        endpoints.insert(
            "none".to_string(),
            ServerEndpoint::new_none("/", &[ANONYMOUS_USER_TOKEN_ID.to_string()]),
        );
        Self {
            application_name: "OPC UA Server".to_string(),
            application_uri: "urn:opcua-server".to_string(),
            product_uri: "urn:opcua-server-product".to_string(),
            tcp_config: TcpConfig::default(),
            endpoints,
            user_tokens: BTreeMap::new(),
            discovery_urls: Vec::new(),
            limits: Limits::default(),
        }
    }
}

impl Config for ServerConfig {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.endpoints.is_empty() {
            errors.push("Server must have at least one endpoint".to_string());
        }
        for (id, endpoint) in &self.endpoints {
            if let Err(mut e) = endpoint.validate(id, &self.user_tokens) {
                errors.append(&mut e);
            }
        }
        if self.limits.min_session_timeout_ms > self.limits.max_session_timeout_ms {
            errors.push("min_session_timeout_ms must not exceed max_session_timeout_ms".to_string());
        }
        if self.limits.min_secure_channel_lifetime_ms > self.limits.max_secure_channel_lifetime_ms {
            errors.push(
                "min_secure_channel_lifetime_ms must not exceed max_secure_channel_lifetime_ms"
                    .to_string(),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn application_name(&self) -> String {
        self.application_name.clone()
    }

    fn application_uri(&self) -> String {
        self.application_uri.clone()
    }

    fn product_uri(&self) -> String {
        self.product_uri.clone()
    }

    fn application_type(&self) -> ApplicationType {
        ApplicationType::Server
    }

    fn discovery_urls(&self) -> Vec<String> {
        self.discovery_urls.clone()
    }
}

impl ServerConfig {
    /// Base URL (`opc.tcp://host:port`) this server listens on.
    pub fn base_endpoint(&self) -> String {
        format!("opc.tcp://{}:{}", self.tcp_config.host, self.tcp_config.port)
    }

    /// Clamp a client-requested session timeout (milliseconds) to
    /// `[min_session_timeout_ms, max_session_timeout_ms]`.
    pub fn clamp_session_timeout(&self, requested_ms: f64) -> u64 {
        let requested = requested_ms.max(0.0) as u64;
        requested.clamp(
            self.limits.min_session_timeout_ms,
            self.limits.max_session_timeout_ms,
        )
    }

    /// Clamp a client-requested secure channel lifetime (milliseconds) to
    /// the configured bounds.
    pub fn clamp_channel_lifetime(&self, requested_ms: u32) -> u32 {
        requested_ms.clamp(
            self.limits.min_secure_channel_lifetime_ms,
            self.limits.max_secure_channel_lifetime_ms,
        )
    }
}
