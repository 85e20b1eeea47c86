// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The discovery registry: tracks other servers that have registered
//! themselves with this one via `RegisterServer`, and answers
//! `FindServers`/`GetEndpoints` about both this server and those it knows
//! about.
//!
//! Registration is the one piece of server logic allowed to touch the
//! filesystem directly (checking a semaphore file's existence), since a
//! registered entry is only valid while that file exists.

use std::path::Path;
use std::time::Instant;

use opcua_types::{
    ApplicationDescription, ApplicationType, EndpointDescription, FindServersRequest,
    FindServersResponse, GetEndpointsRequest, GetEndpointsResponse, LocalizedText,
    RegisterServerRequest, RegisterServerResponse, RegisteredServer, ResponseHeader, StatusCode,
};

use crate::application::ApplicationTable;

/// How long a registered server entry may go without a refresh before
/// `cleanup_timed_out` removes it, absent an explicit semaphore file.
pub const REGISTRATION_TIMEOUT_SECS: u64 = 10 * 60;

/// Truncate a URL down to its authority: the scheme plus everything up to
/// and including the third `/`. Used to match endpoint/discovery URLs
/// while ignoring path suffixes.
pub fn url_authority(url: &str) -> String {
    let mut count = 0;
    for (i, c) in url.char_indices() {
        if c == '/' {
            count += 1;
            if count == 3 {
                return url[..=i].to_string();
            }
        }
    }
    url.to_string()
}

/// A server that has registered itself with this one.
#[derive(Debug, Clone)]
struct RegisteredServerEntry {
    server: RegisteredServer,
    last_seen: Instant,
}

/// Tracks servers registered via `RegisterServer` and answers discovery
/// queries about this server and the ones it has registered.
#[derive(Debug, Default)]
pub struct DiscoveryRegistry {
    registered: Vec<RegisteredServerEntry>,
}

impl DiscoveryRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a `RegisterServer` request: add, refresh, or remove an entry
    /// depending on `server.is_online`.
    pub fn register_server(&mut self, request: &RegisterServerRequest) -> RegisterServerResponse {
        let server = &request.server;
        if !server.is_online {
            let before = self.registered.len();
            self.registered.retain(|e| e.server.server_uri != server.server_uri);
            let response_header = if self.registered.len() == before {
                ResponseHeader::new_error(StatusCode::BadNotFound)
            } else {
                ResponseHeader::new_good()
            };
            return RegisterServerResponse { response_header };
        }

        if let Some(entry) = self
            .registered
            .iter_mut()
            .find(|e| e.server.server_uri == server.server_uri)
        {
            entry.server = server.clone();
            entry.last_seen = Instant::now();
        } else {
            self.registered.push(RegisteredServerEntry {
                server: server.clone(),
                last_seen: Instant::now(),
            });
        }
        RegisterServerResponse {
            response_header: ResponseHeader::new_good(),
        }
    }

    /// Remove entries whose semaphore file has disappeared, or (absent a
    /// semaphore file) that have not refreshed within
    /// [`REGISTRATION_TIMEOUT_SECS`].
    pub fn cleanup_timed_out(&mut self) {
        let now = Instant::now();
        self.registered.retain(|e| match &e.server.semaphore_file_path {
            Some(path) if !path.is_empty() => Path::new(path).exists(),
            _ => now.duration_since(e.last_seen).as_secs() < REGISTRATION_TIMEOUT_SECS,
        });
    }

    /// Answer `FindServers`: if `server_uris` is empty, return this server
    /// plus every registered server; otherwise filter to the requested
    /// URIs.
    pub fn find_servers(
        &self,
        request: &FindServersRequest,
        applications: &ApplicationTable,
    ) -> FindServersResponse {
        let mut servers: Vec<ApplicationDescription> =
            vec![applications.primary().description.clone()];
        servers.extend(
            self.registered
                .iter()
                .map(|e| registered_to_description(&e.server, &request.locale_ids)),
        );

        if !request.server_uris.is_empty() {
            servers.retain(|s| request.server_uris.contains(&s.application_uri));
        }

        FindServersResponse {
            response_header: ResponseHeader::new_good(),
            servers,
        }
    }

    /// Answer `GetEndpoints`: endpoints on this server's applications whose
    /// URL authority matches the request, filtered by transport profile if
    /// requested. Falls back to the first application's endpoints when none
    /// match the requested URL, so a client reaching the server through an
    /// unadvertised hostname still gets endpoints back.
    pub fn get_endpoints(
        &self,
        request: &GetEndpointsRequest,
        applications: &ApplicationTable,
    ) -> GetEndpointsResponse {
        let mut endpoints: Vec<EndpointDescription> = applications
            .applications()
            .iter()
            .flat_map(|a| a.matching_endpoints(&request.endpoint_url))
            .collect();

        if endpoints.is_empty() {
            endpoints = applications.primary().matching_endpoints("");
        }

        if !request.profile_uris.is_empty() {
            endpoints.retain(|e| request.profile_uris.contains(&e.transport_profile_uri));
        }

        GetEndpointsResponse {
            response_header: ResponseHeader::new_good(),
            endpoints,
        }
    }

    /// Currently registered servers, for diagnostics and tests.
    pub fn registered_servers(&self) -> Vec<&RegisteredServer> {
        self.registered.iter().map(|e| &e.server).collect()
    }

    /// Drop every registered server, used when the server shuts down.
    pub fn clear(&mut self) {
        self.registered.clear();
    }
}

/// Pick the name to advertise for a registered server: the first
/// `serverName` whose locale matches one of `locale_ids`, or the first name
/// at all if none match (or none were requested).
fn pick_server_name(server_names: &[LocalizedText], locale_ids: &[String]) -> LocalizedText {
    locale_ids
        .iter()
        .find_map(|locale| server_names.iter().find(|n| &n.locale == locale))
        .or_else(|| server_names.first())
        .cloned()
        .unwrap_or_else(LocalizedText::null)
}

fn registered_to_description(
    server: &RegisteredServer,
    locale_ids: &[String],
) -> ApplicationDescription {
    ApplicationDescription {
        application_uri: server.server_uri.clone(),
        product_uri: server.product_uri.clone(),
        application_name: pick_server_name(&server.server_names, locale_ids),
        application_type: server.server_type,
        gateway_server_uri: server.gateway_server_uri.clone(),
        discovery_profile_uri: None,
        discovery_urls: server.discovery_urls.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Application, Endpoint};
    use opcua_types::{MessageSecurityMode, RequestHeader, UserTokenPolicy, UserTokenType};
    use std::collections::HashSet;

    fn applications() -> ApplicationTable {
        ApplicationTable::new(Application {
            description: ApplicationDescription {
                application_uri: "urn:self".to_string(),
                product_uri: "urn:self-product".to_string(),
                application_name: LocalizedText::new("", "Self"),
                application_type: ApplicationType::Server,
                gateway_server_uri: None,
                discovery_profile_uri: None,
                discovery_urls: vec![],
            },
            allowed_namespaces: HashSet::from([0]),
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
        })
    }

    fn registered_server(uri: &str, online: bool) -> RegisteredServer {
        RegisteredServer {
            server_uri: uri.to_string(),
            product_uri: "urn:other-product".to_string(),
            server_names: vec![LocalizedText::new("", "Other")],
            server_type: ApplicationType::Server,
            gateway_server_uri: None,
            discovery_urls: vec!["opc.tcp://otherhost:4840/".to_string()],
            semaphore_file_path: None,
            is_online: online,
        }
    }

    #[test]
    fn find_servers_with_empty_filter_returns_self_and_registered() {
        let mut registry = DiscoveryRegistry::new();
        registry.register_server(&RegisterServerRequest {
            request_header: RequestHeader::default(),
            server: registered_server("urn:other", true),
        });
        let response = registry.find_servers(
            &FindServersRequest::default(),
            &applications(),
        );
        assert_eq!(response.servers.len(), 2);
    }

    #[test]
    fn unregister_unknown_server_is_not_found() {
        let mut registry = DiscoveryRegistry::new();
        let response = registry.register_server(&RegisterServerRequest {
            request_header: RequestHeader::default(),
            server: registered_server("urn:ghost", false),
        });
        assert_eq!(response.response_header.service_result, StatusCode::BadNotFound);
    }

    #[test]
    fn get_endpoints_matches_by_authority() {
        let registry = DiscoveryRegistry::new();
        let response = registry.get_endpoints(
            &GetEndpointsRequest {
                request_header: RequestHeader::default(),
                endpoint_url: "opc.tcp://localhost:4840/UA/Server".to_string(),
                locale_ids: vec![],
                profile_uris: vec![],
            },
            &applications(),
        );
        assert_eq!(response.endpoints.len(), 1);
    }

    #[test]
    fn get_endpoints_falls_back_to_primary_application_on_no_match() {
        let registry = DiscoveryRegistry::new();
        let response = registry.get_endpoints(
            &GetEndpointsRequest {
                request_header: RequestHeader::default(),
                endpoint_url: "opc.tcp://unadvertised-host:4840/".to_string(),
                locale_ids: vec![],
                profile_uris: vec![],
            },
            &applications(),
        );
        assert_eq!(response.endpoints.len(), 1);
    }

    #[test]
    fn find_servers_picks_name_matching_requested_locale() {
        let mut registry = DiscoveryRegistry::new();
        let mut server = registered_server("urn:other", true);
        server.server_names = vec![
            LocalizedText::new("en", "Other"),
            LocalizedText::new("de", "Andere"),
        ];
        registry.register_server(&RegisterServerRequest {
            request_header: RequestHeader::default(),
            server,
        });

        let response = registry.find_servers(
            &FindServersRequest {
                request_header: RequestHeader::default(),
                endpoint_url: String::new(),
                locale_ids: vec!["de".to_string()],
                server_uris: vec![],
            },
            &applications(),
        );

        let other = response
            .servers
            .iter()
            .find(|s| s.application_uri == "urn:other")
            .unwrap();
        assert_eq!(other.application_name.text, "Andere");
    }

    #[test]
    fn url_authority_keeps_up_to_third_slash() {
        assert_eq!(
            url_authority("opc.tcp://localhost:4840/some/path"),
            "opc.tcp://localhost:4840/"
        );
        assert_eq!(url_authority("opc.tcp://localhost:4840"), "opc.tcp://localhost:4840");
    }
}
