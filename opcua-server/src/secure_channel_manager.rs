// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Secure channel lifecycle: `OpenSecureChannel` (issue/renew),
//! `CloseSecureChannel`, and timeout cleanup.
//!
//! Channel security itself (signing, encryption, nonces) is out of scope
//! for this core; a channel here is just an identity and a lifetime
//! window that sessions bind to.

use std::collections::HashMap;
use std::time::Instant;

use opcua_core::handle::AtomicHandle;
use opcua_types::{
    ByteString, ChannelSecurityToken, CloseSecureChannelRequest, CloseSecureChannelResponse,
    OpenSecureChannelRequest, OpenSecureChannelResponse, ResponseHeader, SecurityTokenRequestType,
    StatusCode,
};

/// A live secure channel.
#[derive(Debug, Clone)]
pub struct SecureChannel {
    /// Channel identifier, stable across token renewal.
    pub channel_id: u32,
    /// Current security token id. Changes on every renew.
    pub token_id: u32,
    /// Lifetime granted to the current token, in milliseconds.
    pub revised_lifetime: u32,
    /// When the current token was issued.
    pub created_at: Instant,
}

impl SecureChannel {
    fn is_timed_out(&self, now: Instant) -> bool {
        now.duration_since(self.created_at).as_millis() > self.revised_lifetime as u128
    }
}

/// Tracks open secure channels and answers `OpenSecureChannel`/
/// `CloseSecureChannel`.
#[derive(Debug)]
pub struct SecureChannelManager {
    channels: HashMap<u32, SecureChannel>,
    channel_ids: AtomicHandle,
    token_ids: AtomicHandle,
    min_lifetime_ms: u32,
    max_lifetime_ms: u32,
}

impl SecureChannelManager {
    /// Create a new manager clamping requested lifetimes to
    /// `[min_lifetime_ms, max_lifetime_ms]`.
    pub fn new(min_lifetime_ms: u32, max_lifetime_ms: u32) -> Self {
        Self {
            channels: HashMap::new(),
            channel_ids: AtomicHandle::new(1),
            token_ids: AtomicHandle::new(1),
            min_lifetime_ms,
            max_lifetime_ms,
        }
    }

    fn clamp_lifetime(&self, requested: u32) -> u32 {
        requested.clamp(self.min_lifetime_ms, self.max_lifetime_ms)
    }

    /// Handle an `OpenSecureChannel` request: `Issue` creates a new channel,
    /// `Renew` replaces an existing channel's token.
    pub fn open(
        &mut self,
        channel_id: Option<u32>,
        request: &OpenSecureChannelRequest,
    ) -> Result<(u32, OpenSecureChannelResponse), StatusCode> {
        let revised_lifetime = self.clamp_lifetime(request.requested_lifetime);

        let channel_id = match request.request_type {
            SecurityTokenRequestType::Issue => self.channel_ids.next(),
            SecurityTokenRequestType::Renew => {
                channel_id.ok_or(StatusCode::BadSecureChannelIdInvalid)?
            }
        };

        if request.request_type == SecurityTokenRequestType::Renew
            && !self.channels.contains_key(&channel_id)
        {
            return Err(StatusCode::BadSecureChannelIdInvalid);
        }

        let token_id = self.token_ids.next();
        let channel = SecureChannel {
            channel_id,
            token_id,
            revised_lifetime,
            created_at: Instant::now(),
        };
        self.channels.insert(channel_id, channel.clone());

        Ok((
            channel_id,
            OpenSecureChannelResponse {
                response_header: ResponseHeader::new_good(),
                security_token: ChannelSecurityToken {
                    channel_id,
                    token_id,
                    revised_lifetime,
                },
                server_nonce: ByteString::null(),
            },
        ))
    }

    /// Handle a `CloseSecureChannel` request.
    pub fn close(
        &mut self,
        channel_id: u32,
        _request: &CloseSecureChannelRequest,
    ) -> CloseSecureChannelResponse {
        self.channels.remove(&channel_id);
        CloseSecureChannelResponse {
            response_header: ResponseHeader::new_good(),
        }
    }

    /// Whether a channel id refers to a currently open, non-expired
    /// channel.
    pub fn is_open(&self, channel_id: u32) -> bool {
        match self.channels.get(&channel_id) {
            Some(channel) => !channel.is_timed_out(Instant::now()),
            None => false,
        }
    }

    /// Remove every channel whose token lifetime has elapsed.
    pub fn cleanup_timed_out(&mut self) -> Vec<u32> {
        let now = Instant::now();
        let expired: Vec<u32> = self
            .channels
            .values()
            .filter(|c| c.is_timed_out(now))
            .map(|c| c.channel_id)
            .collect();
        for id in &expired {
            self.channels.remove(id);
        }
        expired
    }

    /// Drop every tracked channel, used when the server shuts down.
    pub fn clear(&mut self) {
        self.channels.clear();
    }

    /// Number of currently tracked channels, expired or not.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True if no channels are tracked.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcua_types::{MessageSecurityMode, RequestHeader};

    fn open_request(lifetime: u32) -> OpenSecureChannelRequest {
        OpenSecureChannelRequest {
            request_header: RequestHeader::default(),
            request_type: SecurityTokenRequestType::Issue,
            security_mode: MessageSecurityMode::None,
            client_nonce: ByteString::null(),
            requested_lifetime: lifetime,
        }
    }

    #[test]
    fn issue_then_renew_keeps_channel_id_changes_token() {
        let mut mgr = SecureChannelManager::new(10_000, 3_600_000);
        let (channel_id, resp1) = mgr.open(None, &open_request(60_000)).unwrap();
        let (renewed_id, resp2) = mgr
            .open(
                Some(channel_id),
                &OpenSecureChannelRequest {
                    request_type: SecurityTokenRequestType::Renew,
                    ..open_request(60_000)
                },
            )
            .unwrap();
        assert_eq!(channel_id, renewed_id);
        assert_ne!(resp1.security_token.token_id, resp2.security_token.token_id);
    }

    #[test]
    fn renew_unknown_channel_fails() {
        let mut mgr = SecureChannelManager::new(10_000, 3_600_000);
        let result = mgr.open(
            Some(999),
            &OpenSecureChannelRequest {
                request_type: SecurityTokenRequestType::Renew,
                ..open_request(60_000)
            },
        );
        assert_eq!(result.unwrap_err(), StatusCode::BadSecureChannelIdInvalid);
    }

    #[test]
    fn requested_lifetime_is_clamped() {
        let mut mgr = SecureChannelManager::new(10_000, 60_000);
        let (_, resp) = mgr.open(None, &open_request(1_000_000)).unwrap();
        assert_eq!(resp.security_token.revised_lifetime, 60_000);
    }

    #[test]
    fn close_removes_channel() {
        let mut mgr = SecureChannelManager::new(10_000, 3_600_000);
        let (channel_id, _) = mgr.open(None, &open_request(60_000)).unwrap();
        mgr.close(channel_id, &CloseSecureChannelRequest::default());
        assert!(!mgr.is_open(channel_id));
    }
}
