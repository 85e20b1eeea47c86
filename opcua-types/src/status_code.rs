// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! OPC UA status codes relevant to the services implemented by this core.
//!
//! The full specification defines several hundred status codes. This
//! carries the ones the address-space, session, channel and discovery
//! services actually return; an unhandled case should be mapped to
//! `BadInternalError` rather than grown ad hoc at the call site.

use std::fmt;

/// A stable OPC UA result code returned from a service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum StatusCode {
    Good,
    BadNodeIdInvalid,
    BadNodeIdUnknown,
    BadNodeIdExists,
    BadNodeIdRejected,
    BadParentNodeIdInvalid,
    BadReferenceTypeIdInvalid,
    BadReferenceNotAllowed,
    BadTypeDefinitionInvalid,
    BadNodeClassInvalid,
    BadBrowseNameInvalid,
    BadNamespaceUriInvalid,
    BadNamespaceIndexInvalid,
    BadArgumentsMissing,
    BadTypeMismatch,
    BadIndexRangeInvalid,
    BadIndexRangeNoData,
    BadOutOfMemory,
    BadNotFound,
    BadNotWritable,
    BadNotReadable,
    BadUserAccessDenied,
    BadSecureChannelIdInvalid,
    BadSecureChannelClosed,
    BadSessionIdInvalid,
    BadSessionClosed,
    BadSessionNotActivated,
    BadIdentityTokenInvalid,
    BadIdentityTokenRejected,
    BadTcpEndpointUrlInvalid,
    BadTooManySessions,
    BadTooManyOperations,
    BadRequestTimeout,
    BadInternalError,
    BadUnexpectedError,
    BadConfigurationError,
    BadInvalidArgument,
    BadMethodInvalid,
    BadNothingToDo,
    BadNoMatch,
}

impl StatusCode {
    /// True for the single success code `Good`.
    pub fn is_good(&self) -> bool {
        matches!(self, StatusCode::Good)
    }

    /// True for anything other than `Good`.
    pub fn is_bad(&self) -> bool {
        !self.is_good()
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::Good
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for StatusCode {}
