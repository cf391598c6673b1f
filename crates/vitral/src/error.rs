// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the vitral rendering pipeline.
//!
//! This module defines [`VitralError`], the main error enum, and the crate's
//! `Result` alias.
//!
//! # Error Categories
//!
//! - **Startup errors**: route discovery or descriptor parsing failed; the
//!   process must not start serving.
//! - **Request errors**: a data provider or component render failed; the
//!   pipeline answers with a rendered error component instead of propagating.
//!
//! Expected absences (no side-car descriptor, no layout, no error template)
//! are modeled as `Option`, not as errors.

use thiserror::Error;

/// The main error type for vitral operations.
#[derive(Error, Debug)]
pub enum VitralError {
    /// Route discovery failed during the startup filesystem walk.
    #[error("Route discovery failed: {0}")]
    DiscoveryFailed(String),

    /// Two routes resolved to the same (pattern, locale) pair.
    #[error("Duplicate route {pattern} for locale {locale}")]
    DuplicateRoute {
        /// The conflicting URL pattern.
        pattern: String,
        /// The locale the pattern was registered for.
        locale: String,
    },

    /// The configuration file could not be parsed.
    #[error("Config error in {file}: {source}")]
    ConfigParse {
        /// The configuration file path.
        file: String,
        /// The underlying TOML error.
        source: toml::de::Error,
    },

    /// A descriptor file could not be parsed as TOML.
    #[error("Descriptor error in {file}: {source}")]
    DescriptorParse {
        /// The descriptor file path.
        file: String,
        /// The underlying TOML error.
        source: toml::de::Error,
    },

    /// A descriptor file used a root key outside the allowed set.
    ///
    /// This is fatal at load time: an unknown root key is a typo that would
    /// otherwise fail silently later.
    #[error("Unknown root key '{key}' in descriptor {file}")]
    UnknownDescriptorKey {
        /// The offending root key.
        key: String,
        /// The descriptor file path.
        file: String,
    },

    /// A descriptor block had the wrong shape (e.g. `auth` not a table).
    #[error("Invalid descriptor block '{key}' in {file}: {message}")]
    InvalidDescriptorBlock {
        /// The block's root key.
        key: String,
        /// The descriptor file path.
        file: String,
        /// What was wrong with it.
        message: String,
    },

    /// No data provider is registered under the requested service name.
    #[error("Data provider not registered: {0}")]
    ProviderNotRegistered(String),

    /// A data provider returned an error while producing a payload.
    #[error("Data provider '{service}' failed: {message}")]
    ProviderFailed {
        /// The provider's service name.
        service: String,
        /// The provider's error message.
        message: String,
    },

    /// A template key has no compiled component in the registry.
    #[error("Template not registered: {0}")]
    TemplateNotRegistered(String),

    /// A component function failed while rendering.
    #[error("Render error in {template}: {message}")]
    RenderFailed {
        /// The template key that was rendering.
        template: String,
        /// The component's error message.
        message: String,
    },

    /// A session or user store operation failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with [`VitralError`].
pub type Result<T> = std::result::Result<T, VitralError>;
