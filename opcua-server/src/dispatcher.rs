// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The precondition table services are checked against before they are
//! allowed to execute: what secure-channel and session state must hold for
//! a given service to be dispatched.

use opcua_types::StatusCode;

/// What state a secure channel must be in for a service to be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRequirement {
    /// The service does not require an open secure channel at all
    /// (discovery services may be called channel-less).
    None,
    /// An open, non-expired secure channel is required.
    Open,
}

/// What state the session referenced by the request header must be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequirement {
    /// No session is referenced or required.
    None,
    /// A session must exist, in `Created` state (not yet activated).
    Created,
    /// A session must exist, in `Active` state.
    Active,
}

/// The kind of service being dispatched, used to look up its
/// preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    OpenSecureChannel,
    CloseSecureChannel,
    CreateSession,
    ActivateSession,
    CloseSession,
    FindServers,
    GetEndpoints,
    RegisterServer,
}

/// The channel and session state a service requires before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicePrecondition {
    pub channel: ChannelRequirement,
    pub session: SessionRequirement,
}

/// Look up the precondition for a service kind.
pub fn precondition_for(kind: ServiceKind) -> ServicePrecondition {
    match kind {
        ServiceKind::OpenSecureChannel | ServiceKind::CloseSecureChannel => ServicePrecondition {
            channel: ChannelRequirement::None,
            session: SessionRequirement::None,
        },
        ServiceKind::CreateSession => ServicePrecondition {
            channel: ChannelRequirement::Open,
            session: SessionRequirement::None,
        },
        ServiceKind::ActivateSession | ServiceKind::CloseSession => ServicePrecondition {
            channel: ChannelRequirement::Open,
            session: SessionRequirement::Created,
        },
        ServiceKind::FindServers | ServiceKind::GetEndpoints | ServiceKind::RegisterServer => {
            ServicePrecondition {
                channel: ChannelRequirement::None,
                session: SessionRequirement::None,
            }
        }
    }
}

/// Current observed state of the channel/session a request arrived on,
/// checked against a service's precondition.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub channel_open: bool,
    pub session_exists: bool,
    pub session_active: bool,
}

/// Check `context` against the precondition for `kind`, returning the
/// `StatusCode` that should be returned to the client if it does not hold.
pub fn check_preconditions(kind: ServiceKind, context: RequestContext) -> Result<(), StatusCode> {
    let precondition = precondition_for(kind);

    if precondition.channel == ChannelRequirement::Open && !context.channel_open {
        return Err(StatusCode::BadSecureChannelIdInvalid);
    }

    match precondition.session {
        SessionRequirement::None => {}
        SessionRequirement::Created => {
            if !context.session_exists {
                return Err(StatusCode::BadSessionIdInvalid);
            }
        }
        SessionRequirement::Active => {
            if !context.session_exists {
                return Err(StatusCode::BadSessionIdInvalid);
            }
            if !context.session_active {
                return Err(StatusCode::BadSessionNotActivated);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_session_requires_open_channel() {
        let context = RequestContext {
            channel_open: false,
            session_exists: false,
            session_active: false,
        };
        assert_eq!(
            check_preconditions(ServiceKind::CreateSession, context).unwrap_err(),
            StatusCode::BadSecureChannelIdInvalid
        );
    }

    #[test]
    fn discovery_services_need_no_channel() {
        let context = RequestContext {
            channel_open: false,
            session_exists: false,
            session_active: false,
        };
        assert!(check_preconditions(ServiceKind::FindServers, context).is_ok());
        assert!(check_preconditions(ServiceKind::GetEndpoints, context).is_ok());
        assert!(check_preconditions(ServiceKind::RegisterServer, context).is_ok());
    }

    #[test]
    fn activate_session_requires_existing_session() {
        let context = RequestContext {
            channel_open: true,
            session_exists: false,
            session_active: false,
        };
        assert_eq!(
            check_preconditions(ServiceKind::ActivateSession, context).unwrap_err(),
            StatusCode::BadSessionIdInvalid
        );
    }
}
