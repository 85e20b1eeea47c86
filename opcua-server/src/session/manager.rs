// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Creates, activates and expires sessions, and validates the identity
//! token presented on `ActivateSession` against the endpoint's
//! [`AuthManager`].

use chrono::Utc;
use hashbrown::HashMap as HMap;

use opcua_types::{
    ActivateSessionRequest, ActivateSessionResponse, ApplicationDescription, ByteString,
    CloseSessionRequest, CloseSessionResponse, CreateSessionRequest, CreateSessionResponse,
    EndpointDescription, Guid, IdentityToken, NodeId, ResponseHeader, StatusCode,
};

use crate::authenticator::{AuthManager, Password, POLICY_ID_ANONYMOUS, POLICY_ID_USER_PASS};
use crate::config::ServerEndpoint;
use crate::session::{Session, SessionState};

/// Creates, activates, closes and expires sessions.
pub struct SessionManager {
    sessions: HMap<NodeId, Session>,
    max_sessions: usize,
    min_timeout_ms: u64,
    max_timeout_ms: u64,
}

impl SessionManager {
    /// Create a new manager enforcing the given concurrent-session cap and
    /// timeout bounds (in milliseconds).
    pub fn new(max_sessions: usize, min_timeout_ms: u64, max_timeout_ms: u64) -> Self {
        Self {
            sessions: HMap::new(),
            max_sessions,
            min_timeout_ms,
            max_timeout_ms,
        }
    }

    fn clamp_timeout(&self, requested_ms: f64) -> u64 {
        let requested = requested_ms.max(0.0) as u64;
        requested.clamp(self.min_timeout_ms, self.max_timeout_ms)
    }

    /// Handle a `CreateSession` request, failing with `BadTooManySessions`
    /// once the configured cap is reached.
    pub fn create_session(
        &mut self,
        channel_id: u32,
        request: &CreateSessionRequest,
        server_description: &ApplicationDescription,
        endpoints: Vec<EndpointDescription>,
    ) -> Result<CreateSessionResponse, StatusCode> {
        if self.sessions.len() >= self.max_sessions {
            return Err(StatusCode::BadTooManySessions);
        }

        let session_id = NodeId::new(0, Guid::new());
        let authentication_token = NodeId::new(0, Guid::new());
        let session_timeout_ms = self.clamp_timeout(request.requested_session_timeout);

        let session = Session {
            session_id: session_id.clone(),
            authentication_token: authentication_token.clone(),
            session_name: request.session_name.clone(),
            client_description: request.client_description.clone(),
            channel_id,
            session_timeout_ms,
            state: SessionState::Created,
            user_token: None,
            last_contact: Utc::now(),
        };
        self.sessions.insert(session_id.clone(), session);

        let _ = server_description;
        Ok(CreateSessionResponse {
            response_header: ResponseHeader::new_good(),
            session_id,
            authentication_token,
            revised_session_timeout: session_timeout_ms as f64,
            server_nonce: ByteString::random(32),
            server_endpoints: endpoints,
        })
    }

    /// Handle an `ActivateSession` request: validates the identity token
    /// against `auth`, then rebinds the session to `channel_id` and moves it
    /// to [`SessionState::Active`].
    pub async fn activate_session(
        &mut self,
        session_id: &NodeId,
        channel_id: u32,
        endpoint: &ServerEndpoint,
        auth: &dyn AuthManager,
        request: &ActivateSessionRequest,
    ) -> Result<ActivateSessionResponse, StatusCode> {
        {
            let session = self
                .sessions
                .get(session_id)
                .ok_or(StatusCode::BadSessionIdInvalid)?;
            if session.is_timed_out(Utc::now()) {
                self.sessions.remove(session_id);
                return Err(StatusCode::BadSessionIdInvalid);
            }
        }

        let user_token = match &request.user_identity_token {
            IdentityToken::Anonymous { policy_id } => {
                if !policy_id.is_empty() && policy_id != POLICY_ID_ANONYMOUS {
                    return Err(StatusCode::BadIdentityTokenInvalid);
                }
                auth.authenticate_anonymous_token(endpoint)
                    .await
                    .map_err(|e| e.status_code())?;
                crate::authenticator::UserToken(crate::config::ANONYMOUS_USER_TOKEN_ID.to_string())
            }
            IdentityToken::UserName {
                policy_id,
                user_name,
                password,
                encryption_algorithm,
            } => {
                if policy_id != POLICY_ID_USER_PASS {
                    return Err(StatusCode::BadIdentityTokenInvalid);
                }
                if !encryption_algorithm.is_empty() {
                    return Err(StatusCode::BadIdentityTokenInvalid);
                }
                auth.authenticate_username_identity_token(
                    endpoint,
                    user_name,
                    &Password::new(password.clone()),
                )
                .await
                .map_err(|e| e.status_code())?
            }
        };

        let session = self
            .sessions
            .get_mut(session_id)
            .expect("session was validated above");
        session.channel_id = channel_id;
        session.state = SessionState::Active;
        session.user_token = Some(user_token);
        session.last_contact = Utc::now();

        Ok(ActivateSessionResponse {
            response_header: ResponseHeader::new_good(),
            server_nonce: ByteString::random(32),
        })
    }

    /// Handle a `CloseSession` request.
    pub fn close_session(
        &mut self,
        session_id: &NodeId,
        _request: &CloseSessionRequest,
    ) -> Result<CloseSessionResponse, StatusCode> {
        self.sessions
            .remove(session_id)
            .ok_or(StatusCode::BadSessionIdInvalid)?;
        Ok(CloseSessionResponse {
            response_header: ResponseHeader::new_good(),
        })
    }

    /// Look up a session by its authentication token, as presented on every
    /// request header after activation.
    pub fn session_by_auth_token(&self, token: &NodeId) -> Option<&Session> {
        self.sessions.values().find(|s| &s.authentication_token == token)
    }

    /// True if a session with this id is currently tracked.
    pub fn contains(&self, session_id: &NodeId) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Drop every tracked session, used when the server shuts down.
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// Remove every session that has exceeded its negotiated timeout.
    pub fn cleanup_timed_out(&mut self) -> Vec<NodeId> {
        let now = Utc::now();
        let expired: Vec<NodeId> = self
            .sessions
            .values()
            .filter(|s| s.is_timed_out(now))
            .map(|s| s.session_id.clone())
            .collect();
        for id in &expired {
            self.sessions.remove(id);
        }
        expired
    }

    /// Number of currently tracked sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True if no sessions are tracked.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::DefaultAuthenticator;
    use opcua_types::{ApplicationType, LocalizedText, RequestHeader};
    use std::collections::BTreeMap;

    fn create_request(timeout_ms: f64) -> CreateSessionRequest {
        CreateSessionRequest {
            request_header: RequestHeader::default(),
            client_description: ApplicationDescription {
                application_uri: "urn:client".to_string(),
                product_uri: "urn:client-product".to_string(),
                application_name: LocalizedText::new("", "Client"),
                application_type: ApplicationType::Client,
                gateway_server_uri: None,
                discovery_profile_uri: None,
                discovery_urls: vec![],
            },
            endpoint_url: "opc.tcp://localhost:4840/".to_string(),
            session_name: "Test Session".to_string(),
            client_nonce: ByteString::null(),
            requested_session_timeout: timeout_ms,
            max_response_message_size: 0,
        }
    }

    fn server_description() -> ApplicationDescription {
        ApplicationDescription {
            application_uri: "urn:server".to_string(),
            product_uri: "urn:server-product".to_string(),
            application_name: LocalizedText::new("", "Server"),
            application_type: ApplicationType::Server,
            gateway_server_uri: None,
            discovery_profile_uri: None,
            discovery_urls: vec![],
        }
    }

    #[tokio::test]
    async fn activate_with_anonymous_identity_succeeds() {
        let mut mgr = SessionManager::new(100, 10_000, 3_600_000);
        let created = mgr
            .create_session(1, &create_request(60_000.0), &server_description(), vec![])
            .unwrap();

        let endpoint = ServerEndpoint::new_none(
            "/",
            &[crate::config::ANONYMOUS_USER_TOKEN_ID.to_string()],
        );
        let auth = DefaultAuthenticator::new(BTreeMap::new());
        let result = mgr
            .activate_session(
                &created.session_id,
                1,
                &endpoint,
                &auth,
                &ActivateSessionRequest {
                    request_header: RequestHeader::default(),
                    user_identity_token: IdentityToken::Anonymous {
                        policy_id: POLICY_ID_ANONYMOUS.to_string(),
                    },
                    locale_ids: vec![],
                },
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn activate_with_wrong_anonymous_policy_id_is_rejected() {
        let mut mgr = SessionManager::new(100, 10_000, 3_600_000);
        let created = mgr
            .create_session(1, &create_request(60_000.0), &server_description(), vec![])
            .unwrap();

        let endpoint = ServerEndpoint::new_none(
            "/",
            &[crate::config::ANONYMOUS_USER_TOKEN_ID.to_string()],
        );
        let auth = DefaultAuthenticator::new(BTreeMap::new());
        let result = mgr
            .activate_session(
                &created.session_id,
                1,
                &endpoint,
                &auth,
                &ActivateSessionRequest {
                    request_header: RequestHeader::default(),
                    user_identity_token: IdentityToken::Anonymous {
                        policy_id: "anonymous".to_string(),
                    },
                    locale_ids: vec![],
                },
            )
            .await;
        assert_eq!(result.unwrap_err(), StatusCode::BadIdentityTokenInvalid);
    }

    #[test]
    fn create_session_honors_max_sessions() {
        let mut mgr = SessionManager::new(1, 10_000, 3_600_000);
        mgr.create_session(1, &create_request(60_000.0), &server_description(), vec![])
            .unwrap();
        let result = mgr.create_session(1, &create_request(60_000.0), &server_description(), vec![]);
        assert_eq!(result.unwrap_err(), StatusCode::BadTooManySessions);
    }

    #[test]
    fn session_timeout_is_clamped() {
        let mut mgr = SessionManager::new(100, 10_000, 60_000);
        let created = mgr
            .create_session(1, &create_request(1_000_000.0), &server_description(), vec![])
            .unwrap();
        assert_eq!(created.revised_session_timeout, 60_000.0);
    }
}
