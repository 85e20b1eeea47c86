// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Common utilities for loading and saving YAML configuration files.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use opcua_types::{ApplicationDescription, ApplicationType, LocalizedText};

/// Error returned from saving or loading config objects.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration is invalid, with a list of validation errors.
    #[error("configuration is invalid: {}", .0.join(", "))]
    ConfigInvalid(Vec<String>),
    /// Reading or writing file failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Failed to serialize or deserialize config object.
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A trait that handles the loading / saving and validity of a server's
/// configuration.
pub trait Config: serde::Serialize {
    /// Save the configuration object to a file.
    fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Err(e) = self.validate() {
            return Err(ConfigError::ConfigInvalid(e));
        }
        let s = serde_yaml::to_string(&self)?;
        let mut f = File::create(path)?;
        f.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Load the configuration object from the given path.
    fn load<A>(path: &Path) -> Result<A, ConfigError>
    where
        for<'de> A: Config + serde::Deserialize<'de>,
    {
        let mut f = File::open(path)?;
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate the config struct, returning a list of validation errors if it fails.
    fn validate(&self) -> Result<(), Vec<String>>;

    /// Get the application name.
    fn application_name(&self) -> String;

    /// Get the application URI.
    fn application_uri(&self) -> String;

    /// Get the configured product URI.
    fn product_uri(&self) -> String;

    /// Get the application type.
    fn application_type(&self) -> ApplicationType;

    /// Get the registered discovery URLs for this application.
    fn discovery_urls(&self) -> Vec<String> {
        Vec::new()
    }

    /// Create an application description for the configured application.
    fn application_description(&self) -> ApplicationDescription {
        ApplicationDescription {
            application_uri: self.application_uri(),
            application_name: LocalizedText::new("", &self.application_name()),
            application_type: self.application_type(),
            product_uri: self.product_uri(),
            gateway_server_uri: None,
            discovery_profile_uri: None,
            discovery_urls: self.discovery_urls(),
        }
    }
}
