// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Request-scoped context types.
//!
//! [`RouterContext`] bundles the matched path parameters, the query
//! parameters, and the raw request. It is owned by the request's processing
//! lifetime and never shared across requests. [`RenderContext`] is the
//! immutable view handed to component functions, threading locale, merged
//! metadata, payload, and embedded children down the wrapping chain.

use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::locale::LocaleContext;
use crate::request::VitralRequest;

/// Per-request routing view: path parameters, query parameters, and the raw
/// request.
#[derive(Debug, Clone)]
pub struct RouterContext {
    /// Parameters extracted from the matched path pattern.
    pub params: HashMap<String, String>,

    /// Query parameters from the URL.
    pub query: HashMap<String, String>,

    /// The raw request.
    pub request: VitralRequest,
}

impl RouterContext {
    /// Creates a context from a request and its matched path parameters.
    pub fn new(request: VitralRequest, params: HashMap<String, String>) -> Self {
        Self {
            query: request.query.clone(),
            params,
            request,
        }
    }

    /// A path parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.as_str())
    }

    /// A query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(|v| v.as_str())
    }
}

/// The immutable view a component renders against.
///
/// One is built per render step; layout wrapping builds a fresh one per
/// layer with the re-merged metadata and the inner HTML as `children`.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Routing view for the request.
    pub router: &'a RouterContext,

    /// Translation context for the active locale.
    pub locale: &'a LocaleContext,

    /// Merged template/layout metadata, flattened to dot-joined keys.
    pub metadata: &'a HashMap<String, String>,

    /// Payload produced by the template's data provider, when it has one.
    pub data: Option<&'a JsonValue>,

    /// Rendered inner content, present when a layout is wrapping a page.
    pub children: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    /// Translates a dot-joined key via the locale context.
    pub fn translate(&self, key: &str) -> String {
        self.locale.translate(key)
    }

    /// A metadata value by dot-joined key.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|v| v.as_str())
    }

    /// A path parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.router.param(name)
    }

    /// A query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.router.query_param(name)
    }

    /// The embedded inner content, or empty when rendering a page.
    pub fn children_or_empty(&self) -> &str {
        self.children.unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_context_accessors() {
        let request = VitralRequest::new("/blog/hello", "GET")
            .with_query([("page".into(), "2".into())].into());
        let ctx = RouterContext::new(request, [("slug".into(), "hello".into())].into());

        assert_eq!(ctx.param("slug"), Some("hello"));
        assert_eq!(ctx.param("missing"), None);
        assert_eq!(ctx.query_param("page"), Some("2"));
    }

    #[test]
    fn test_render_context_delegates() {
        let router = RouterContext::new(VitralRequest::default(), HashMap::new());
        let locale = LocaleContext::new(
            "en",
            "en",
            [("title".to_string(), "Home".to_string())].into(),
        );
        let metadata: HashMap<String, String> =
            [("og.site".to_string(), "vitral".to_string())].into();

        let ctx = RenderContext {
            router: &router,
            locale: &locale,
            metadata: &metadata,
            data: None,
            children: Some("<p>inner</p>"),
        };

        assert_eq!(ctx.translate("title"), "Home");
        assert_eq!(ctx.meta("og.site"), Some("vitral"));
        assert_eq!(ctx.children_or_empty(), "<p>inner</p>");
    }
}
