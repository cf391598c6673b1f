// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Data providers and the typed provider registry.
//!
//! A template whose generated signature needs external data declares a
//! [`DataBindingDescriptor`](crate::registry::DataBindingDescriptor); at
//! request time the resolver locates the provider registered under the
//! declared service name and invokes it with the request's
//! [`RouterContext`].
//!
//! Dispatch is a capability interface rather than reflection: every provider
//! implements the generic [`DataProvider::get_data`] as its minimum
//! contract, and may additionally answer [`DataProvider::get_data_for`] for
//! specific payload types. The resolver prefers the typed hook and falls
//! back to the generic method.

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

use crate::context::RouterContext;
use crate::error::{Result, VitralError};
use crate::registry::DataBindingDescriptor;

/// An application-supplied component producing the payload a template needs.
pub trait DataProvider: Send + Sync {
    /// Produces the provider's payload. Every provider implements this.
    fn get_data(&self, ctx: &RouterContext) -> Result<JsonValue>;

    /// Produces a payload for a specific declared type.
    ///
    /// Returning `None` (the default) means this provider has no dedicated
    /// handling for `payload_type` and the resolver should use
    /// [`get_data`](Self::get_data) instead.
    fn get_data_for(&self, payload_type: &str, ctx: &RouterContext) -> Option<Result<JsonValue>> {
        let _ = (payload_type, ctx);
        None
    }
}

/// String-keyed registry of data providers.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn DataProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under a service name.
    pub fn register(&mut self, service: impl Into<String>, provider: Arc<dyn DataProvider>) {
        self.providers.insert(service.into(), provider);
    }

    /// The provider registered under a service name, if any.
    pub fn get(&self, service: &str) -> Option<&Arc<dyn DataProvider>> {
        self.providers.get(service)
    }

    /// Resolves a template's binding to a payload.
    ///
    /// A missing provider or a provider error aborts the binding; it is
    /// surfaced to the orchestrator as a request-level error, never skipped.
    /// A template declaring a data requirement cannot render correctly
    /// without it.
    pub fn resolve(
        &self,
        descriptor: &DataBindingDescriptor,
        ctx: &RouterContext,
    ) -> Result<JsonValue> {
        let Some(provider) = self.providers.get(&descriptor.service) else {
            return Err(VitralError::ProviderNotRegistered(descriptor.service.clone()));
        };

        let result = match provider.get_data_for(&descriptor.payload_type, ctx) {
            Some(typed) => typed,
            None => {
                tracing::debug!(
                    service = %descriptor.service,
                    payload_type = %descriptor.payload_type,
                    "no typed payload hook, using generic get_data"
                );
                provider.get_data(ctx)
            }
        };

        result.map_err(|e| VitralError::ProviderFailed {
            service: descriptor.service.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::VitralRequest;
    use serde_json::json;

    struct GenericOnly;

    impl DataProvider for GenericOnly {
        fn get_data(&self, _ctx: &RouterContext) -> Result<JsonValue> {
            Ok(json!({ "source": "generic" }))
        }
    }

    struct Typed;

    impl DataProvider for Typed {
        fn get_data(&self, _ctx: &RouterContext) -> Result<JsonValue> {
            Ok(json!({ "source": "generic" }))
        }

        fn get_data_for(
            &self,
            payload_type: &str,
            ctx: &RouterContext,
        ) -> Option<Result<JsonValue>> {
            match payload_type {
                "UserData" => Some(Ok(json!({
                    "source": "typed",
                    "id": ctx.param("id"),
                }))),
                _ => None,
            }
        }
    }

    struct Failing;

    impl DataProvider for Failing {
        fn get_data(&self, _ctx: &RouterContext) -> Result<JsonValue> {
            Err(VitralError::Store("backend unavailable".to_string()))
        }
    }

    fn ctx() -> RouterContext {
        RouterContext::new(
            VitralRequest::new("/users/7", "GET"),
            [("id".to_string(), "7".to_string())].into(),
        )
    }

    #[test]
    fn test_typed_hook_preferred() {
        let mut registry = ProviderRegistry::new();
        registry.register("UserService", Arc::new(Typed));

        let payload = registry
            .resolve(&DataBindingDescriptor::new("UserService", "UserData"), &ctx())
            .unwrap();
        assert_eq!(payload["source"], "typed");
        assert_eq!(payload["id"], "7");
    }

    #[test]
    fn test_generic_fallback_for_undeclared_type() {
        let mut registry = ProviderRegistry::new();
        registry.register("OrderService", Arc::new(GenericOnly));

        // Provider has no OrderData hook; the generic contract answers.
        let payload = registry
            .resolve(
                &DataBindingDescriptor::new("OrderService", "OrderData"),
                &ctx(),
            )
            .unwrap();
        assert_eq!(payload["source"], "generic");
    }

    #[test]
    fn test_missing_provider_aborts() {
        let registry = ProviderRegistry::new();
        let err = registry
            .resolve(&DataBindingDescriptor::new("Nope", "NopeData"), &ctx())
            .unwrap_err();
        assert!(matches!(err, VitralError::ProviderNotRegistered(s) if s == "Nope"));
    }

    #[test]
    fn test_provider_failure_aborts() {
        let mut registry = ProviderRegistry::new();
        registry.register("Broken", Arc::new(Failing));

        let err = registry
            .resolve(&DataBindingDescriptor::new("Broken", "Data"), &ctx())
            .unwrap_err();
        assert!(matches!(
            err,
            VitralError::ProviderFailed { service, .. } if service == "Broken"
        ));
    }
}
