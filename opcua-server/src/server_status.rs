// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Wraps the `Server_ServerStatus` variable tree: a shared
//! [`ServerStatusDataType`] plus a [`ValueSource::Callback`] for each of its
//! exposed fields. There is no subscription/sampling machinery here since
//! this core does not implement Subscriptions; each read simply produces
//! the value live.

use std::sync::Arc;

use chrono::Utc;

use opcua_core::sync::Mutex;
use opcua_nodes::ValueSource;
use opcua_types::{BuildInfo, DataValue, LocalizedText, ServerState, ServerStatusDataType};

/// Shared, livea-read view of the server's status, backing the
/// `ServerStatus` variable subtree in the address space.
pub struct ServerStatusWrapper {
    status: Arc<Mutex<ServerStatusDataType>>,
}

impl ServerStatusWrapper {
    /// Create a new wrapper starting in the `Shutdown` state; call
    /// [`Self::set_running`] once the address space bootstrap completes.
    pub fn new(build_info: BuildInfo) -> Self {
        Self {
            status: Arc::new(Mutex::new(ServerStatusDataType {
                start_time: Utc::now(),
                current_time: Utc::now(),
                state: ServerState::Shutdown,
                build_info,
                seconds_till_shutdown: 0,
                shutdown_reason: LocalizedText::null(),
            })),
        }
    }

    /// Move the server into the `Running` state, recording the current time
    /// as its start time.
    pub fn set_running(&self) {
        let mut status = self.status.lock();
        status.state = ServerState::Running;
        status.start_time = Utc::now();
    }

    /// Move the server into the `Shutdown` state, recording a reason shown
    /// in the `ShutdownReason` variable.
    pub fn set_shutdown(&self, reason: LocalizedText) {
        let mut status = self.status.lock();
        status.state = ServerState::Shutdown;
        status.shutdown_reason = reason;
    }

    /// Current coarse server state.
    pub fn state(&self) -> ServerState {
        self.status.lock().state
    }

    /// A callback reading the live `CurrentTime` value.
    pub fn current_time_source(&self) -> ValueSource {
        ValueSource::Callback(Arc::new(|| DataValue::new_now(Utc::now())))
    }

    /// A callback reading the server's start time, fixed once set.
    pub fn start_time_source(&self) -> ValueSource {
        let status = self.status.clone();
        ValueSource::Callback(Arc::new(move || DataValue::new_now(status.lock().start_time)))
    }

    /// A callback reading the server's coarse running state, as its
    /// `ServerState` enum ordinal.
    pub fn state_source(&self) -> ValueSource {
        let status = self.status.clone();
        ValueSource::Callback(Arc::new(move || {
            DataValue::new_now(status.lock().state as i32)
        }))
    }

    /// A callback reading the static build info's software version string.
    pub fn build_number_source(&self) -> ValueSource {
        let status = self.status.clone();
        ValueSource::Callback(Arc::new(move || {
            DataValue::new_now(status.lock().build_info.build_number.clone())
        }))
    }

    /// A callback reading the static product URI.
    pub fn product_uri_source(&self) -> ValueSource {
        let status = self.status.clone();
        ValueSource::Callback(Arc::new(move || {
            DataValue::new_now(status.lock().build_info.product_uri.clone())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_info() -> BuildInfo {
        BuildInfo {
            product_uri: "urn:test-product".to_string(),
            manufacturer_name: "Test".to_string(),
            product_name: "Test Server".to_string(),
            software_version: "0.1.0".to_string(),
            build_number: "0".to_string(),
            build_date: Utc::now(),
        }
    }

    #[test]
    fn starts_shutdown_then_runs() {
        let wrapper = ServerStatusWrapper::new(build_info());
        assert_eq!(wrapper.state(), ServerState::Shutdown);
        wrapper.set_running();
        assert_eq!(wrapper.state(), ServerState::Running);
    }

    #[test]
    fn current_time_source_reads_live() {
        let wrapper = ServerStatusWrapper::new(build_info());
        let ValueSource::Callback(f) = wrapper.current_time_source() else {
            panic!("expected callback");
        };
        let value = f();
        assert_eq!(value.status, opcua_types::StatusCode::Good);
    }
}
