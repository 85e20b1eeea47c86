// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Session state and the manager that creates, activates and expires
//! sessions.

pub mod manager;

use chrono::{DateTime, Utc};

use opcua_types::{ApplicationDescription, NodeId};

use crate::authenticator::UserToken;

/// Where a session currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created by `CreateSession` but not yet activated.
    Created,
    /// Activated by `ActivateSession`; may be used for further service
    /// calls.
    Active,
    /// Closed by `CloseSession`, or expired.
    Closed,
}

/// A single client session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Server-assigned session identifier, returned to the client.
    pub session_id: NodeId,
    /// Authentication token the client must present on every subsequent
    /// request to prove it owns this session.
    pub authentication_token: NodeId,
    /// Client-supplied name, informational.
    pub session_name: String,
    /// Identity of the client application that created this session.
    pub client_description: ApplicationDescription,
    /// Secure channel this session is currently bound to. Changes across
    /// `ActivateSession` calls that rebind the session to a new channel.
    pub channel_id: u32,
    /// Negotiated session timeout, in milliseconds.
    pub session_timeout_ms: u64,
    /// Current lifecycle state.
    pub state: SessionState,
    /// User identity, set once the session is activated.
    pub user_token: Option<UserToken>,
    /// Last time the client made a service call on this session, used to
    /// detect a timed-out session.
    pub last_contact: DateTime<Utc>,
}

impl Session {
    /// True if more than `session_timeout_ms` has elapsed since the last
    /// service call.
    pub fn is_timed_out(&self, now: DateTime<Utc>) -> bool {
        let elapsed = now.signed_duration_since(self.last_contact);
        elapsed.num_milliseconds() > self.session_timeout_ms as i64
    }
}
