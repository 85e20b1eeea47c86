// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Server limits. Trimmed to the bounds this core actually enforces:
//! concurrent session count, session timeout clamping, and secure channel
//! lifetime clamping. A full server additionally bounds message/array/string
//! sizes and per-service node counts for Read/Write/Browse/History, none of
//! which this core implements.

use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
/// Server limits configuration.
pub struct Limits {
    /// Maximum number of concurrently registered sessions.
    #[serde(default = "defaults::max_sessions")]
    pub max_sessions: usize,
    /// Smallest `requestedSessionTimeout` the server will honor, in
    /// milliseconds.
    #[serde(default = "defaults::min_session_timeout_ms")]
    pub min_session_timeout_ms: u64,
    /// Largest `requestedSessionTimeout` the server will honor, in
    /// milliseconds.
    #[serde(default = "defaults::max_session_timeout_ms")]
    pub max_session_timeout_ms: u64,
    /// Smallest `requestedLifetime` honored for a secure channel, in
    /// milliseconds.
    #[serde(default = "defaults::min_secure_channel_lifetime_ms")]
    pub min_secure_channel_lifetime_ms: u32,
    /// Largest `requestedLifetime` honored for a secure channel, in
    /// milliseconds.
    #[serde(default = "defaults::max_secure_channel_lifetime_ms")]
    pub max_secure_channel_lifetime_ms: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_sessions: defaults::max_sessions(),
            min_session_timeout_ms: defaults::min_session_timeout_ms(),
            max_session_timeout_ms: defaults::max_session_timeout_ms(),
            min_secure_channel_lifetime_ms: defaults::min_secure_channel_lifetime_ms(),
            max_secure_channel_lifetime_ms: defaults::max_secure_channel_lifetime_ms(),
        }
    }
}

mod defaults {
    pub fn max_sessions() -> usize {
        100
    }
    pub fn min_session_timeout_ms() -> u64 {
        10_000
    }
    pub fn max_session_timeout_ms() -> u64 {
        3_600_000
    }
    pub fn min_secure_channel_lifetime_ms() -> u32 {
        10_000
    }
    pub fn max_secure_channel_lifetime_ms() -> u32 {
        3_600_000
    }
}
