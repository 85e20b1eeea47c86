// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The table of applications (in practice, just this server) and the
//! endpoints each one advertises. Kept separate from [`crate::config`]
//! because it holds the fully-resolved, advertisable form of an endpoint
//! (with its `ApplicationDescription` attached) rather than the compact
//! form a user writes in a config file.

use std::collections::HashSet;

use opcua_types::{
    ApplicationDescription, ApplicationType, EndpointDescription, LocalizedText,
    MessageSecurityMode, UserTokenPolicy,
};

use crate::authenticator::AuthManager;
use crate::config::ServerConfig;

/// Security policy URI advertised by every endpoint; this core carries no
/// crypto stack, so it is always "None".
const SECURITY_POLICY_NONE: &str = "http://opcfoundation.org/UA/SecurityPolicy#None";
/// Transport profile URI for the binary TCP transport, the only one this
/// core supports.
const TRANSPORT_PROFILE_UATCP: &str =
    "http://opcfoundation.org/UA-Profile/Transport/uatcp-uasc-uabinary";

/// One (url, security, transport) combination a client may connect
/// through, with the user token policies accepted on it.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Full connection URL, e.g. `opc.tcp://localhost:4840/`.
    pub url: String,
    /// Security mode required on this endpoint.
    pub security_mode: MessageSecurityMode,
    /// Security policy URI. Always `http://opcfoundation.org/UA/SecurityPolicy#None`
    /// since this core carries no crypto stack.
    pub security_policy_uri: String,
    /// Transport profile URI, always the binary TCP profile.
    pub transport_profile_uri: String,
    /// Identity token policies accepted on this endpoint.
    pub user_identity_tokens: Vec<UserTokenPolicy>,
}

impl Endpoint {
    /// Build the `EndpointDescription` advertised to clients for this
    /// endpoint, combined with the owning application's description.
    pub fn to_description(&self, server: ApplicationDescription) -> EndpointDescription {
        EndpointDescription {
            endpoint_url: self.url.clone(),
            server,
            security_mode: self.security_mode,
            security_policy_uri: self.security_policy_uri.clone(),
            user_identity_tokens: self.user_identity_tokens.clone(),
            transport_profile_uri: self.transport_profile_uri.clone(),
        }
    }
}

/// A running application (this server) together with the endpoints and
/// namespaces it owns.
#[derive(Debug, Clone)]
pub struct Application {
    /// Identity advertised to `FindServers` and embedded in every
    /// `EndpointDescription`.
    pub description: ApplicationDescription,
    /// Namespace indices this application is allowed to write nodes into.
    pub allowed_namespaces: HashSet<u16>,
    /// Endpoints this application accepts connections on.
    pub endpoints: Vec<Endpoint>,
}

impl Application {
    /// Endpoint descriptions matching `endpoint_url` by authority, or all
    /// endpoints if `endpoint_url` is empty. Used to answer `GetEndpoints`.
    pub fn matching_endpoints(&self, endpoint_url: &str) -> Vec<EndpointDescription> {
        let filter = crate::discovery::url_authority(endpoint_url);
        self.endpoints
            .iter()
            .filter(|e| filter.is_empty() || crate::discovery::url_authority(&e.url) == filter)
            .map(|e| e.to_description(self.description.clone()))
            .collect()
    }
}

/// The set of applications this server instance exposes. In practice this
/// core only ever holds a single application (itself); the table exists so
/// `FindServers`/`GetEndpoints` can be written against a stable shape.
#[derive(Debug, Clone, Default)]
pub struct ApplicationTable {
    applications: Vec<Application>,
}

impl ApplicationTable {
    /// Create a table containing a single application.
    pub fn new(application: Application) -> Self {
        Self {
            applications: vec![application],
        }
    }

    /// Build the table for this server from its configuration, asking
    /// `auth` which identity-token policies each configured endpoint
    /// accepts.
    pub fn from_config(config: &ServerConfig, auth: &dyn AuthManager) -> Self {
        let description = ApplicationDescription {
            application_uri: config.application_uri.clone(),
            product_uri: config.product_uri.clone(),
            application_name: LocalizedText::new("", &config.application_name),
            application_type: ApplicationType::Server,
            gateway_server_uri: None,
            discovery_profile_uri: None,
            discovery_urls: config.discovery_urls.clone(),
        };
        let base_endpoint = config.base_endpoint();
        let endpoints = config
            .endpoints
            .values()
            .map(|e| Endpoint {
                url: e.endpoint_url(&base_endpoint),
                security_mode: e.security_mode,
                security_policy_uri: SECURITY_POLICY_NONE.to_string(),
                transport_profile_uri: TRANSPORT_PROFILE_UATCP.to_string(),
                user_identity_tokens: auth.user_token_policies(e),
            })
            .collect();

        Self::new(Application {
            description,
            allowed_namespaces: HashSet::from([0]),
            endpoints,
        })
    }

    /// All applications in the table.
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// The primary (first) application, which is this server itself.
    pub fn primary(&self) -> &Application {
        &self.applications[0]
    }

    /// Total number of endpoints across all applications, which is the
    /// quantity `GetEndpoints` iterates to find matches.
    pub fn endpoint_count(&self) -> usize {
        self.applications.iter().map(|a| a.endpoints.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcua_types::{ApplicationType, LocalizedText, UserTokenType};

    fn app() -> Application {
        Application {
            description: ApplicationDescription {
                application_uri: "urn:test".to_string(),
                product_uri: "urn:test-product".to_string(),
                application_name: LocalizedText::new("", "Test"),
                application_type: ApplicationType::Server,
                gateway_server_uri: None,
                discovery_profile_uri: None,
                discovery_urls: vec![],
            },
            allowed_namespaces: HashSet::from([0, 1]),
            endpoints: vec![Endpoint {
                url: "opc.tcp://localhost:4840/".to_string(),
                security_mode: MessageSecurityMode::None,
                security_policy_uri: "http://opcfoundation.org/UA/SecurityPolicy#None".to_string(),
                transport_profile_uri: "http://opcfoundation.org/UA-Profile/Transport/uatcp-uasc-uabinary"
                    .to_string(),
                user_identity_tokens: vec![UserTokenPolicy {
                    policy_id: "anonymous".to_string(),
                    token_type: UserTokenType::Anonymous,
                }],
            }],
        }
    }

    #[test]
    fn matches_by_authority_ignoring_path() {
        let a = app();
        let matches = a.matching_endpoints("opc.tcp://localhost:4840/some/deep/path");
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn empty_url_matches_everything() {
        let a = app();
        assert_eq!(a.matching_endpoints("").len(), 1);
    }

    #[test]
    fn different_authority_does_not_match() {
        let a = app();
        assert!(a.matching_endpoints("opc.tcp://otherhost:4840/").is_empty());
    }

    #[test]
    fn from_config_builds_one_endpoint_per_configured_endpoint() {
        use crate::authenticator::DefaultAuthenticator;
        use crate::config::ServerConfig;
        use std::collections::BTreeMap;

        let config = ServerConfig::default();
        let auth = DefaultAuthenticator::new(BTreeMap::new());
        let applications = ApplicationTable::from_config(&config, &auth);

        assert_eq!(applications.endpoint_count(), config.endpoints.len());
        let endpoint = &applications.primary().endpoints[0];
        assert!(endpoint
            .user_identity_tokens
            .iter()
            .any(|t| t.token_type == UserTokenType::Anonymous));
    }
}
