// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The compiled-component registry contract.
//!
//! Components are pre-compiled by an external code-generation step; at run
//! time the pipeline only ever sees callables keyed by template path. The
//! [`TemplateRegistry`] trait is that boundary. [`StaticRegistry`] is a
//! plain map-backed implementation for tests and for hosts that assemble
//! their components by hand.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::RenderContext;
use crate::error::{Result, VitralError};
use crate::router::Route;

/// A compiled component: renders HTML from a [`RenderContext`].
pub type ComponentFn = Arc<dyn Fn(&RenderContext<'_>) -> Result<String> + Send + Sync>;

/// Declares the external data a template needs to render.
///
/// Produced by the code-generation step for templates whose signature takes
/// a payload; consumed at request time to locate and invoke a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBindingDescriptor {
    /// Service name the provider is registered under.
    pub service: String,
    /// Declared payload type name (e.g. "OrderData").
    pub payload_type: String,
}

impl DataBindingDescriptor {
    /// Creates a binding descriptor.
    pub fn new(service: impl Into<String>, payload_type: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            payload_type: payload_type.into(),
        }
    }
}

/// Registry of compiled components, keyed by template path relative to the
/// template root (e.g. `blog/[slug]/+page.vit`).
pub trait TemplateRegistry: Send + Sync {
    /// The compiled component for a template key, if registered.
    fn template(&self, key: &str) -> Option<ComponentFn>;

    /// The data binding a template declares, if any.
    fn data_binding(&self, key: &str) -> Option<DataBindingDescriptor>;

    /// The compiled component for a discovered route.
    ///
    /// A discovered route whose component was never generated is an error,
    /// not an absence: the tree and the registry are out of sync.
    fn template_for_route(&self, route: &Route) -> Result<ComponentFn> {
        self.template(&route.template)
            .ok_or_else(|| VitralError::TemplateNotRegistered(route.template.clone()))
    }

    /// Whether a template needs a data provider to render.
    fn requires_data(&self, key: &str) -> bool {
        self.data_binding(key).is_some()
    }
}

/// Map-backed registry for tests and hand-assembled hosts.
#[derive(Default)]
pub struct StaticRegistry {
    components: HashMap<String, ComponentFn>,
    bindings: HashMap<String, DataBindingDescriptor>,
}

impl StaticRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component under a template key.
    pub fn register<F>(&mut self, key: impl Into<String>, component: F)
    where
        F: Fn(&RenderContext<'_>) -> Result<String> + Send + Sync + 'static,
    {
        self.components.insert(key.into(), Arc::new(component));
    }

    /// Declares a data binding for a template key.
    pub fn register_binding(&mut self, key: impl Into<String>, binding: DataBindingDescriptor) {
        self.bindings.insert(key.into(), binding);
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if no components are registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl TemplateRegistry for StaticRegistry {
    fn template(&self, key: &str) -> Option<ComponentFn> {
        self.components.get(key).cloned()
    }

    fn data_binding(&self, key: &str) -> Option<DataBindingDescriptor> {
        self.bindings.get(key).cloned()
    }
}
