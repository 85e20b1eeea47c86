// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Service message bodies: headers, application/endpoint description
//! types, and the request/response structs for the services this core
//! implements (`CreateSession`, `ActivateSession`, `CloseSession`,
//! `OpenSecureChannel`, `CloseSecureChannel`, `GetEndpoints`,
//! `FindServers`, `RegisterServer`).
//!
//! These are hand-written analogues of what a real server generates from
//! the OPC UA XML schema; only the fields the service layer reads or
//! writes are present.

use crate::{ByteString, LocalizedText, NodeId, StatusCode};

/// Common header present on every request.
#[derive(Debug, Clone)]
pub struct RequestHeader {
    /// Authentication token bound to an active session, or null.
    pub authentication_token: NodeId,
    /// Client-supplied timestamp, informational only.
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Timeout hint in milliseconds; 0 means no timeout.
    pub timeout_hint: u32,
}

impl Default for RequestHeader {
    fn default() -> Self {
        Self {
            authentication_token: NodeId::null(),
            timestamp: chrono::Utc::now(),
            timeout_hint: 0,
        }
    }
}

/// Common header present on every response.
#[derive(Debug, Clone)]
pub struct ResponseHeader {
    /// Overall service result.
    pub service_result: StatusCode,
}

impl ResponseHeader {
    /// Build a response header indicating success.
    pub fn new_good() -> Self {
        Self {
            service_result: StatusCode::Good,
        }
    }

    /// Build a response header carrying a failure code.
    pub fn new_error(code: StatusCode) -> Self {
        Self {
            service_result: code,
        }
    }
}

/// The kind of OPC UA application (server, client, or both).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationType {
    Server,
    Client,
    ClientAndServer,
    DiscoveryServer,
}

/// Describes an OPC UA application: identity, product, and discovery URLs.
#[derive(Debug, Clone)]
pub struct ApplicationDescription {
    pub application_uri: String,
    pub product_uri: String,
    pub application_name: LocalizedText,
    pub application_type: ApplicationType,
    pub gateway_server_uri: Option<String>,
    pub discovery_profile_uri: Option<String>,
    pub discovery_urls: Vec<String>,
}

/// Security mode negotiated for a secure channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageSecurityMode {
    Invalid,
    #[default]
    None,
    Sign,
    SignAndEncrypt,
}

/// Identifies a class of user credential an endpoint will accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserTokenType {
    Anonymous,
    UserName,
    Certificate,
    IssuedToken,
}

/// One accepted identity-token policy advertised by an endpoint.
#[derive(Debug, Clone)]
pub struct UserTokenPolicy {
    pub policy_id: String,
    pub token_type: UserTokenType,
}

/// A single (url, security, transport) combination a client may connect
/// through.
#[derive(Debug, Clone)]
pub struct EndpointDescription {
    pub endpoint_url: String,
    pub server: ApplicationDescription,
    pub security_mode: MessageSecurityMode,
    pub security_policy_uri: String,
    pub user_identity_tokens: Vec<UserTokenPolicy>,
    pub transport_profile_uri: String,
}

/// A decoded user identity presented during `ActivateSession`.
#[derive(Debug, Clone)]
pub enum IdentityToken {
    Anonymous { policy_id: String },
    UserName {
        policy_id: String,
        user_name: String,
        password: String,
        encryption_algorithm: String,
    },
}

// --- OpenSecureChannel / CloseSecureChannel ---

/// The purpose of an `OpenSecureChannel` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityTokenRequestType {
    Issue,
    Renew,
}

#[derive(Debug, Clone)]
pub struct OpenSecureChannelRequest {
    pub request_header: RequestHeader,
    pub request_type: SecurityTokenRequestType,
    pub security_mode: MessageSecurityMode,
    pub client_nonce: ByteString,
    pub requested_lifetime: u32,
}

#[derive(Debug, Clone)]
pub struct OpenSecureChannelResponse {
    pub response_header: ResponseHeader,
    pub security_token: ChannelSecurityToken,
    pub server_nonce: ByteString,
}

/// Identity and validity window of an open secure channel.
#[derive(Debug, Clone)]
pub struct ChannelSecurityToken {
    pub channel_id: u32,
    pub token_id: u32,
    pub revised_lifetime: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CloseSecureChannelRequest {
    pub request_header: RequestHeader,
}

#[derive(Debug, Clone)]
pub struct CloseSecureChannelResponse {
    pub response_header: ResponseHeader,
}

// --- CreateSession / ActivateSession / CloseSession ---

#[derive(Debug, Clone)]
pub struct CreateSessionRequest {
    pub request_header: RequestHeader,
    pub client_description: ApplicationDescription,
    pub endpoint_url: String,
    pub session_name: String,
    pub client_nonce: ByteString,
    pub requested_session_timeout: f64,
    pub max_response_message_size: u32,
}

#[derive(Debug, Clone)]
pub struct CreateSessionResponse {
    pub response_header: ResponseHeader,
    pub session_id: NodeId,
    pub authentication_token: NodeId,
    pub revised_session_timeout: f64,
    pub server_nonce: ByteString,
    pub server_endpoints: Vec<EndpointDescription>,
}

#[derive(Debug, Clone)]
pub struct ActivateSessionRequest {
    pub request_header: RequestHeader,
    pub user_identity_token: IdentityToken,
    pub locale_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ActivateSessionResponse {
    pub response_header: ResponseHeader,
    pub server_nonce: ByteString,
}

#[derive(Debug, Clone, Default)]
pub struct CloseSessionRequest {
    pub request_header: RequestHeader,
    pub delete_subscriptions: bool,
}

#[derive(Debug, Clone)]
pub struct CloseSessionResponse {
    pub response_header: ResponseHeader,
}

// --- Discovery: FindServers / GetEndpoints / RegisterServer ---

#[derive(Debug, Clone, Default)]
pub struct FindServersRequest {
    pub request_header: RequestHeader,
    pub endpoint_url: String,
    pub locale_ids: Vec<String>,
    pub server_uris: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FindServersResponse {
    pub response_header: ResponseHeader,
    pub servers: Vec<ApplicationDescription>,
}

#[derive(Debug, Clone, Default)]
pub struct GetEndpointsRequest {
    pub request_header: RequestHeader,
    pub endpoint_url: String,
    pub locale_ids: Vec<String>,
    pub profile_uris: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GetEndpointsResponse {
    pub response_header: ResponseHeader,
    pub endpoints: Vec<EndpointDescription>,
}

/// A remote server advertising itself to this one (or withdrawing).
#[derive(Debug, Clone)]
pub struct RegisteredServer {
    pub server_uri: String,
    pub product_uri: String,
    pub server_names: Vec<LocalizedText>,
    pub server_type: ApplicationType,
    pub gateway_server_uri: Option<String>,
    pub discovery_urls: Vec<String>,
    pub semaphore_file_path: Option<String>,
    pub is_online: bool,
}

#[derive(Debug, Clone)]
pub struct RegisterServerRequest {
    pub request_header: RequestHeader,
    pub server: RegisteredServer,
}

#[derive(Debug, Clone)]
pub struct RegisterServerResponse {
    pub response_header: ResponseHeader,
}

// --- Server status / build info ---

/// Coarse running state of the server, exposed via `ServerStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Running,
    Failed,
    NoConfiguration,
    Suspended,
    Shutdown,
    Test,
    CommunicationFault,
    Unknown,
}

/// Static build metadata, read from the crate's own compile-time info.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub product_uri: String,
    pub manufacturer_name: String,
    pub product_name: String,
    pub software_version: String,
    pub build_number: String,
    pub build_date: chrono::DateTime<chrono::Utc>,
}

/// The value of the `Server_ServerStatus` variable.
#[derive(Debug, Clone)]
pub struct ServerStatusDataType {
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub current_time: chrono::DateTime<chrono::Utc>,
    pub state: ServerState,
    pub build_info: BuildInfo,
    pub seconds_till_shutdown: u32,
    pub shutdown_reason: LocalizedText,
}
