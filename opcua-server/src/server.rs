// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The server itself: owns every subsystem, dispatches the services this
//! core implements against the precondition table in [`crate::dispatcher`],
//! and runs the repeated housekeeping job.
//!
//! There is no transport or codec here (`SPEC_FULL` §6 treats those as an
//! out-of-scope contract this core consumes already-framed messages
//! through); what remains in scope, and what this module runs, is exactly
//! the lifecycle in `SPEC_FULL` §5: a scheduler task sweeping
//! Session → SecureChannel → Discovery every
//! [`opcua_core::constants::REPEATED_JOB_INTERVAL_MS`], and on
//! cancellation a teardown in the order
//! Session → SecureChannel → NodeStore → Namespaces → Endpoints →
//! Registered-servers list.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use opcua_core::constants::REPEATED_JOB_INTERVAL_MS;
use opcua_core::sync::RwLock;
use opcua_types::{
    ActivateSessionRequest, ActivateSessionResponse, BuildInfo, CloseSecureChannelRequest,
    CloseSecureChannelResponse, CloseSessionRequest, CloseSessionResponse, CreateSessionRequest,
    CreateSessionResponse, FindServersRequest, FindServersResponse, GetEndpointsRequest,
    GetEndpointsResponse, LocalizedText, NodeId, OpenSecureChannelRequest,
    OpenSecureChannelResponse, RegisterServerRequest, RegisterServerResponse, StatusCode,
};

use crate::address_space::AddressSpace;
use crate::application::ApplicationTable;
use crate::authenticator::AuthManager;
use crate::config::ServerConfig;
use crate::discovery::DiscoveryRegistry;
use crate::dispatcher::{check_preconditions, RequestContext, ServiceKind};
use crate::secure_channel_manager::SecureChannelManager;
use crate::server_handle::ServerHandle;
use crate::server_status::ServerStatusWrapper;
use crate::session::manager::SessionManager;

/// Build a [`BuildInfo`] from the crate's own compile-time package
/// metadata, so `ServerStatus` reads a real value rather than a
/// placeholder.
fn build_info(config: &ServerConfig) -> BuildInfo {
    BuildInfo {
        product_uri: config.product_uri.clone(),
        manufacturer_name: env!("CARGO_PKG_AUTHORS").to_string(),
        product_name: env!("CARGO_PKG_NAME").to_string(),
        software_version: env!("CARGO_PKG_VERSION").to_string(),
        build_number: env!("CARGO_PKG_VERSION").to_string(),
        build_date: chrono::Utc::now(),
    }
}

/// The OPC UA server core. Consumed by [`Server::run`]; use the paired
/// [`ServerHandle`] to control it while it runs.
pub struct Server {
    config: Arc<ServerConfig>,
    address_space: Arc<RwLock<AddressSpace>>,
    applications: Arc<ApplicationTable>,
    secure_channels: Arc<Mutex<SecureChannelManager>>,
    sessions: Arc<Mutex<SessionManager>>,
    discovery: Arc<Mutex<DiscoveryRegistry>>,
    authenticator: Arc<dyn AuthManager>,
    status: Arc<ServerStatusWrapper>,
    token: CancellationToken,
}

impl Server {
    /// Build a new server from its configuration and authenticator. Returns
    /// the server together with a [`ServerHandle`] that can control it
    /// (query status, trigger shutdown) once [`Server::run`] has been
    /// spawned.
    pub fn new(config: ServerConfig, authenticator: Arc<dyn AuthManager>) -> (Self, ServerHandle) {
        let config = Arc::new(config);
        let status = Arc::new(ServerStatusWrapper::new(build_info(&config)));
        let address_space = Arc::new(RwLock::new(AddressSpace::bootstrap(&config, &status)));
        let applications = Arc::new(ApplicationTable::from_config(&config, authenticator.as_ref()));
        let secure_channels = Arc::new(Mutex::new(SecureChannelManager::new(
            config.limits.min_secure_channel_lifetime_ms,
            config.limits.max_secure_channel_lifetime_ms,
        )));
        let sessions = Arc::new(Mutex::new(SessionManager::new(
            config.limits.max_sessions,
            config.limits.min_session_timeout_ms,
            config.limits.max_session_timeout_ms,
        )));
        let discovery = Arc::new(Mutex::new(DiscoveryRegistry::new()));
        let token = CancellationToken::new();

        let handle = ServerHandle::new(
            config.clone(),
            address_space.clone(),
            applications.clone(),
            secure_channels.clone(),
            sessions.clone(),
            discovery.clone(),
            status.clone(),
            token.clone(),
        );

        (
            Self {
                config,
                address_space,
                applications,
                secure_channels,
                sessions,
                discovery,
                authenticator,
                status,
                token,
            },
            handle,
        )
    }

    /// Run the server until its [`ServerHandle`] is cancelled: moves the
    /// `ServerStatus` state to `Running`, then alternates waiting for the
    /// next repeated-job tick with watching for cancellation. On
    /// cancellation, tears down every subsystem and returns.
    pub async fn run(self) -> Result<(), String> {
        info!("OPC UA Server: {}", self.config.application_name);
        info!("Base url: {}", self.config.base_endpoint());
        self.status.set_running();

        let mut tick = tokio::time::interval(Duration::from_millis(REPEATED_JOB_INTERVAL_MS));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    self.run_cleanup_sweep().await;
                }
                _ = self.token.cancelled() => {
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Run one pass of the repeated housekeeping job: expire sessions, then
    /// secure channels, then stale discovery registrations, in that order.
    async fn run_cleanup_sweep(&self) {
        let expired_sessions = self.sessions.lock().await.cleanup_timed_out();
        for id in &expired_sessions {
            debug!("session {id} expired");
        }

        let expired_channels = self.secure_channels.lock().await.cleanup_timed_out();
        for id in &expired_channels {
            debug!("secure channel {id} expired");
        }

        self.discovery.lock().await.cleanup_timed_out();
    }

    async fn shutdown(&self) {
        if self.status.state() != opcua_types::ServerState::Shutdown {
            self.status
                .set_shutdown(LocalizedText::new("", "Server is shutting down"));
        }

        info!("Tearing down sessions");
        self.sessions.lock().await.clear();
        info!("Tearing down secure channels");
        self.secure_channels.lock().await.clear();
        info!("Tearing down node store and namespaces");
        self.address_space.write().clear();
        info!("Tearing down registered servers");
        self.discovery.lock().await.clear();
    }

    /// Handle `OpenSecureChannel`. `channel_id` is the id carried on the
    /// transport frame the request arrived on, `None` for a fresh channel.
    pub async fn open_secure_channel(
        &self,
        channel_id: Option<u32>,
        request: &OpenSecureChannelRequest,
    ) -> Result<(u32, OpenSecureChannelResponse), StatusCode> {
        check_preconditions(ServiceKind::OpenSecureChannel, RequestContext::default())?;
        self.secure_channels.lock().await.open(channel_id, request)
    }

    /// Handle `CloseSecureChannel`.
    pub async fn close_secure_channel(
        &self,
        channel_id: u32,
        request: &CloseSecureChannelRequest,
    ) -> CloseSecureChannelResponse {
        check_preconditions(ServiceKind::CloseSecureChannel, RequestContext::default())
            .expect("CloseSecureChannel has no preconditions");
        self.secure_channels.lock().await.close(channel_id, request)
    }

    /// Handle `CreateSession`.
    pub async fn create_session(
        &self,
        channel_id: u32,
        request: &CreateSessionRequest,
    ) -> Result<CreateSessionResponse, StatusCode> {
        let channel_open = self.secure_channels.lock().await.is_open(channel_id);
        check_preconditions(
            ServiceKind::CreateSession,
            RequestContext {
                channel_open,
                ..RequestContext::default()
            },
        )?;

        if self.applications.endpoint_count() == 0 {
            return Err(StatusCode::BadTcpEndpointUrlInvalid);
        }
        let endpoints = self.applications.primary().matching_endpoints(&request.endpoint_url);

        self.sessions
            .lock()
            .await
            .create_session(channel_id, request, &self.applications.primary().description, endpoints)
    }

    /// Handle `ActivateSession`.
    pub async fn activate_session(
        &self,
        session_id: &NodeId,
        channel_id: u32,
        request: &ActivateSessionRequest,
    ) -> Result<ActivateSessionResponse, StatusCode> {
        let channel_open = self.secure_channels.lock().await.is_open(channel_id);
        let session_exists = self.sessions.lock().await.contains(session_id);
        check_preconditions(
            ServiceKind::ActivateSession,
            RequestContext {
                channel_open,
                session_exists,
                ..RequestContext::default()
            },
        )?;

        let endpoint = self.endpoint_for_channel()?;
        self.sessions
            .lock()
            .await
            .activate_session(session_id, channel_id, &endpoint, self.authenticator.as_ref(), request)
            .await
    }

    /// Handle `CloseSession`.
    pub async fn close_session(
        &self,
        session_id: &NodeId,
        channel_id: u32,
        request: &CloseSessionRequest,
    ) -> Result<CloseSessionResponse, StatusCode> {
        let channel_open = self.secure_channels.lock().await.is_open(channel_id);
        let session_exists = self.sessions.lock().await.contains(session_id);
        check_preconditions(
            ServiceKind::CloseSession,
            RequestContext {
                channel_open,
                session_exists,
                ..RequestContext::default()
            },
        )?;

        self.sessions.lock().await.close_session(session_id, request)
    }

    /// Handle `FindServers`. Needs no open channel or session.
    pub async fn find_servers(&self, request: &FindServersRequest) -> FindServersResponse {
        check_preconditions(ServiceKind::FindServers, RequestContext::default())
            .expect("FindServers has no preconditions");
        self.discovery.lock().await.find_servers(request, &self.applications)
    }

    /// Handle `GetEndpoints`. Needs no open channel or session.
    pub async fn get_endpoints(&self, request: &GetEndpointsRequest) -> GetEndpointsResponse {
        check_preconditions(ServiceKind::GetEndpoints, RequestContext::default())
            .expect("GetEndpoints has no preconditions");
        self.discovery.lock().await.get_endpoints(request, &self.applications)
    }

    /// Handle `RegisterServer`. Allowed to block briefly on the
    /// semaphore-file check performed during cleanup sweeps, but the
    /// registration itself only touches in-memory state.
    pub async fn register_server(&self, request: &RegisterServerRequest) -> RegisterServerResponse {
        check_preconditions(ServiceKind::RegisterServer, RequestContext::default())
            .expect("RegisterServer has no preconditions");
        self.discovery.lock().await.register_server(request)
    }

    /// This core only ever runs a single configured application, with every
    /// endpoint sharing one `AuthManager`; look up the first (only)
    /// endpoint to validate an identity token against.
    fn endpoint_for_channel(&self) -> Result<crate::config::ServerEndpoint, StatusCode> {
        self.config
            .endpoints
            .values()
            .next()
            .cloned()
            .ok_or(StatusCode::BadTcpEndpointUrlInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::{DefaultAuthenticator, POLICY_ID_ANONYMOUS};
    use opcua_types::{
        ApplicationDescription, ApplicationType, ByteString, IdentityToken, MessageSecurityMode,
        RequestHeader, SecurityTokenRequestType,
    };
    use std::collections::BTreeMap;

    fn server() -> (Server, ServerHandle) {
        Server::new(
            ServerConfig::default(),
            Arc::new(DefaultAuthenticator::new(BTreeMap::new())),
        )
    }

    fn client_description() -> ApplicationDescription {
        ApplicationDescription {
            application_uri: "urn:client".to_string(),
            product_uri: "urn:client-product".to_string(),
            application_name: LocalizedText::new("", "Client"),
            application_type: ApplicationType::Client,
            gateway_server_uri: None,
            discovery_profile_uri: None,
            discovery_urls: vec![],
        }
    }

    #[tokio::test]
    async fn create_session_without_open_channel_fails() {
        let (server, _handle) = server();
        let result = server
            .create_session(
                1,
                &CreateSessionRequest {
                    request_header: RequestHeader::default(),
                    client_description: client_description(),
                    endpoint_url: String::new(),
                    session_name: "s".to_string(),
                    client_nonce: ByteString::null(),
                    requested_session_timeout: 60_000.0,
                    max_response_message_size: 0,
                },
            )
            .await;
        assert_eq!(result.unwrap_err(), StatusCode::BadSecureChannelIdInvalid);
    }

    #[tokio::test]
    async fn full_lifecycle_open_channel_create_and_activate_session() {
        let (server, _handle) = server();
        let (channel_id, _) = server
            .open_secure_channel(
                None,
                &OpenSecureChannelRequest {
                    request_header: RequestHeader::default(),
                    request_type: SecurityTokenRequestType::Issue,
                    security_mode: MessageSecurityMode::None,
                    client_nonce: ByteString::null(),
                    requested_lifetime: 60_000,
                },
            )
            .await
            .unwrap();

        let created = server
            .create_session(
                channel_id,
                &CreateSessionRequest {
                    request_header: RequestHeader::default(),
                    client_description: client_description(),
                    endpoint_url: String::new(),
                    session_name: "s".to_string(),
                    client_nonce: ByteString::null(),
                    requested_session_timeout: 60_000.0,
                    max_response_message_size: 0,
                },
            )
            .await
            .unwrap();

        let activated = server
            .activate_session(
                &created.session_id,
                channel_id,
                &ActivateSessionRequest {
                    request_header: RequestHeader::default(),
                    user_identity_token: IdentityToken::Anonymous {
                        policy_id: POLICY_ID_ANONYMOUS.to_string(),
                    },
                    locale_ids: vec![],
                },
            )
            .await;
        assert!(activated.is_ok());
    }

    #[tokio::test]
    async fn find_servers_returns_self() {
        let (server, _handle) = server();
        let response = server.find_servers(&FindServersRequest::default()).await;
        assert_eq!(response.servers.len(), 1);
    }

    #[tokio::test]
    async fn shutdown_clears_every_subsystem() {
        let (server, handle) = server();
        handle.cancel();
        server.run().await.unwrap();
        assert_eq!(handle.session_count().await, 0);
    }
}
