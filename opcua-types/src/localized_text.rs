// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `LocalizedText`.

use std::fmt;

/// A human-readable piece of text tagged with the locale it is written in.
#[derive(PartialEq, Eq, Clone, Debug, Hash, Default)]
pub struct LocalizedText {
    /// IETF locale tag, e.g. "en", or empty if unspecified.
    pub locale: String,
    /// The text itself.
    pub text: String,
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl LocalizedText {
    /// Construct localized text with an explicit locale.
    pub fn new(locale: &str, text: impl Into<String>) -> Self {
        Self {
            locale: locale.to_string(),
            text: text.into(),
        }
    }

    /// The null localized text (empty locale and text).
    pub fn null() -> Self {
        Self::default()
    }

    /// True if both locale and text are empty.
    pub fn is_null(&self) -> bool {
        self.locale.is_empty() && self.text.is_empty()
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        LocalizedText::new("", text)
    }
}

impl From<String> for LocalizedText {
    fn from(text: String) -> Self {
        LocalizedText::new("", text)
    }
}
