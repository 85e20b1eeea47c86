// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! A cloneable reference to a running [`crate::server::Server`], letting
//! callers outside its `run` loop query status and request shutdown.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use opcua_core::sync::RwLock;
use opcua_types::{LocalizedText, ServerState};

use crate::address_space::AddressSpace;
use crate::application::ApplicationTable;
use crate::config::ServerConfig;
use crate::discovery::DiscoveryRegistry;
use crate::secure_channel_manager::SecureChannelManager;
use crate::server_status::ServerStatusWrapper;
use crate::session::manager::SessionManager;

/// Reference to a running server. Cheap to clone; every clone shares the
/// same underlying subsystems.
#[derive(Clone)]
pub struct ServerHandle {
    config: Arc<ServerConfig>,
    address_space: Arc<RwLock<AddressSpace>>,
    applications: Arc<ApplicationTable>,
    secure_channels: Arc<Mutex<SecureChannelManager>>,
    sessions: Arc<Mutex<SessionManager>>,
    discovery: Arc<Mutex<DiscoveryRegistry>>,
    status: Arc<ServerStatusWrapper>,
    token: CancellationToken,
}

impl ServerHandle {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        config: Arc<ServerConfig>,
        address_space: Arc<RwLock<AddressSpace>>,
        applications: Arc<ApplicationTable>,
        secure_channels: Arc<Mutex<SecureChannelManager>>,
        sessions: Arc<Mutex<SessionManager>>,
        discovery: Arc<Mutex<DiscoveryRegistry>>,
        status: Arc<ServerStatusWrapper>,
        token: CancellationToken,
    ) -> Self {
        Self {
            config,
            address_space,
            applications,
            secure_channels,
            sessions,
            discovery,
            status,
            token,
        }
    }

    /// The server's configuration, fixed for its lifetime.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The applications (in practice, just this server) and endpoints it
    /// advertises.
    pub fn applications(&self) -> &ApplicationTable {
        &self.applications
    }

    /// Current coarse server state (`Running`, `Shutdown`, ...).
    pub fn state(&self) -> ServerState {
        self.status.state()
    }

    /// Number of nodes currently stored in the address space.
    pub fn node_count(&self) -> usize {
        self.address_space.read().len()
    }

    /// Number of currently tracked sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Number of currently tracked secure channels.
    pub async fn secure_channel_count(&self) -> usize {
        self.secure_channels.lock().await.len()
    }

    /// Number of servers currently registered with this one via
    /// `RegisterServer`.
    pub async fn registered_server_count(&self) -> usize {
        self.discovery.lock().await.registered_servers().len()
    }

    /// The cancellation token used to signal shutdown.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Signal the server to stop immediately; its `run` loop tears down
    /// every subsystem and returns the next time it polls the token.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel the server after `time` has elapsed, spawning a task to wait
    /// out the delay. `reason` is recorded on the `ServerStatus` the moment
    /// the server actually tears down, not when this is called.
    pub fn shutdown_after(&self, time: Duration, reason: impl Into<LocalizedText>) {
        let reason = reason.into();
        let status = self.status.clone();
        let token = self.token.clone();
        info!("Shutting down server in {time:?}");
        tokio::task::spawn(async move {
            tokio::time::sleep(time).await;
            status.set_shutdown(reason);
            token.cancel();
        });
    }
}
