// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # VITRAL
//!
//! File-tree routed rendering pipeline for pre-compiled server-side UI
//! components.
//!
//! VITRAL turns a directory tree of templates into a route table and renders
//! each request through an ordered chain: route matching, an auth gate,
//! locale resolution, optional data binding, component rendering, and
//! recursive layout wrapping, with error-template substitution on any
//! failure.
//!
//! ## Features
//!
//! - File-based routing (`+page.vit`, `+layout.vit`, `+error.vit`,
//!   `[param]` directories)
//! - Nearest-ancestor layout inheritance with field-by-field metadata merge
//! - Side-car TOML descriptors carrying translations, auth, and metadata
//! - Locale-prefixed paths with a dedicated unsupported-language response
//! - Pluggable session/user stores and data providers
//! - No HTTP server of its own: the host adapts [`VitralRequest`] /
//!   [`VitralResponse`] at the edge
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vitral::{Config, Pipeline, RouteTable, StaticRegistry, VitralRequest};
//!
//! let config = Config::load()?;
//! let table = RouteTable::discover("app".as_ref(), &config)?;
//! let mut registry = StaticRegistry::new();
//! registry.register("+page.vit", |ctx| Ok(format!("<h1>{}</h1>", ctx.translate("title"))));
//!
//! let pipeline = Pipeline::new(table, registry, &config);
//! let response = pipeline.handle(&VitralRequest::new("/", "GET"));
//! ```

/// Per-route authentication gate.
pub mod auth;
/// Render result caching.
pub mod cache;
/// Pipeline configuration.
pub mod config;
/// Request-scoped context types.
pub mod context;
/// Side-car descriptor parsing.
pub mod descriptor;
/// Error types and reporting.
pub mod error;
/// Bounded ancestor walks for layout/error lookup.
pub mod hierarchy;
/// Locale resolution and translation lookup.
pub mod locale;
/// The per-request rendering pipeline.
pub mod pipeline;
/// Data providers and the provider registry.
pub mod provider;
/// The compiled-component registry contract.
pub mod registry;
/// HTTP request abstraction.
pub mod request;
/// HTTP response abstraction.
pub mod response;
/// File-based route, layout, and error-template discovery.
pub mod router;
/// Pluggable session and user stores.
pub mod session;

pub use auth::{authenticate, AuthDecision, AuthKind, AuthRequirement};
pub use cache::{render_cache_key, MemoryRenderCache, NoOpRenderCache, RenderCache};
pub use config::Config;
pub use context::{RenderContext, RouterContext};
pub use descriptor::{Descriptor, TranslationSet};
pub use error::{Result, VitralError};
pub use locale::{LocaleContext, LocaleMatch, LocaleResolver};
pub use pipeline::{Pipeline, Stage};
pub use provider::{DataProvider, ProviderRegistry};
pub use registry::{ComponentFn, DataBindingDescriptor, StaticRegistry, TemplateRegistry};
pub use request::VitralRequest;
pub use response::VitralResponse;
pub use router::{ErrorTemplate, LayoutTemplate, Route, RouteMatch, RouteTable};
pub use session::{
    MemorySessionStore, MemoryUserStore, Session, SessionStore, User, UserStore,
};
