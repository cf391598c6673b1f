// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The per-request rendering pipeline.
//!
//! One [`Pipeline`] is built at startup around an immutable [`RouteTable`]
//! and shared across requests; [`Pipeline::handle`] is the single entry
//! point the hosting HTTP server invokes per request.
//!
//! Each request moves through the stages `Routed → Authenticated →
//! Localized → (DataBound) → Rendered → (LayoutWrapped) → Responded`. A
//! failure in any non-terminal stage substitutes the error component
//! resolved for the request path, composed with a minimal built-in fallback
//! renderer, so the pipeline never produces an empty response.

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::{authenticate, AuthDecision, AuthKind};
use crate::cache::{render_cache_key, MemoryRenderCache, NoOpRenderCache, RenderCache};
use crate::config::Config;
use crate::context::{RenderContext, RouterContext};
use crate::descriptor::Descriptor;
use crate::error::{Result, VitralError};
use crate::locale::{LocaleContext, LocaleMatch, LocaleResolver};
use crate::provider::ProviderRegistry;
use crate::registry::TemplateRegistry;
use crate::request::VitralRequest;
use crate::response::VitralResponse;
use crate::router::{Route, RouteTable};
use crate::session::{MemorySessionStore, MemoryUserStore, SessionStore, UserStore};

/// The states a request moves through.
///
/// `Responded` and `ErrorResponded` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A route was matched for the (locale-stripped) path.
    Routed,
    /// The auth gate granted access.
    Authenticated,
    /// The locale context was built from the merged descriptors.
    Localized,
    /// The template's data provider produced a payload.
    DataBound,
    /// The innermost component rendered.
    Rendered,
    /// The layout chain wrapped the rendered component.
    LayoutWrapped,
    /// A normal response was written.
    Responded,
    /// An error component (or the built-in fallback) was written.
    ErrorResponded,
}

/// The request rendering pipeline.
///
/// Generic over the compiled-component registry, mirroring how components
/// are produced by an external code-generation step.
pub struct Pipeline<R: TemplateRegistry> {
    table: RouteTable,
    registry: R,
    providers: ProviderRegistry,
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserStore>,
    locales: LocaleResolver,
    cache: Box<dyn RenderCache>,
}

impl<R: TemplateRegistry> Pipeline<R> {
    /// Creates a pipeline over a route table and a component registry.
    ///
    /// Stores default to the bundled in-memory implementations and the
    /// cache to the configured memory cache (or a no-op when disabled);
    /// swap them with the `with_*` builders.
    pub fn new(table: RouteTable, registry: R, config: &Config) -> Self {
        let cache: Box<dyn RenderCache> = if config.cache.enabled {
            Box::new(MemoryRenderCache::new(config.cache.capacity))
        } else {
            Box::new(NoOpRenderCache::new())
        };

        Self {
            table,
            registry,
            providers: ProviderRegistry::new(),
            sessions: Arc::new(MemorySessionStore::from_config(&config.auth)),
            users: Arc::new(MemoryUserStore::new()),
            locales: LocaleResolver::new(&config.locales),
            cache,
        }
    }

    /// Replaces the data provider registry.
    pub fn with_providers(mut self, providers: ProviderRegistry) -> Self {
        self.providers = providers;
        self
    }

    /// Replaces the session store.
    pub fn with_session_store(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Replaces the user store.
    pub fn with_user_store(mut self, users: Arc<dyn UserStore>) -> Self {
        self.users = users;
        self
    }

    /// Replaces the render cache.
    pub fn with_cache(mut self, cache: Box<dyn RenderCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The route table this pipeline serves.
    pub fn route_table(&self) -> &RouteTable {
        &self.table
    }

    /// Handles one request.
    ///
    /// Never panics and never produces an empty response: every failure path
    /// ends in a rendered error component or the built-in fallback page.
    pub fn handle(&self, request: &VitralRequest) -> VitralResponse {
        let (locale, path) = match self.locales.extract(request) {
            LocaleMatch::Unsupported(code) => {
                tracing::debug!(code = %code, "unsupported locale requested");
                return self.unsupported_language(&code);
            }
            LocaleMatch::Supported {
                locale,
                stripped_path,
            } => (locale, stripped_path),
            LocaleMatch::Absent => (
                self.locales.default_locale().to_string(),
                request.path.clone(),
            ),
        };

        let Some(matched) = self.table.match_url(&path) else {
            tracing::debug!(path = %path, "no route matched");
            return self.error_response(request, &path, &locale, 404, "page not found");
        };
        let route = matched.route;
        let params: HashMap<String, String> = matched.params.iter().cloned().collect();
        tracing::debug!(stage = ?Stage::Routed, pattern = %route.pattern, template = %route.template, "route matched");

        match authenticate(request, &route.auth, self.sessions.as_ref(), self.users.as_ref()) {
            Ok(AuthDecision::Granted(_)) => {
                tracing::debug!(stage = ?Stage::Authenticated, pattern = %route.pattern, "access granted");
            }
            Ok(AuthDecision::Redirect(target)) => {
                let status = if request.is_read_only() { 302 } else { 303 };
                return VitralResponse::redirect_with_status(status, target);
            }
            Ok(AuthDecision::Denied(status)) => {
                return self.error_response(request, &path, &locale, status, "access denied");
            }
            Err(e) => {
                tracing::warn!(error = %e, "auth gate failed");
                return self.error_response(request, &path, &locale, 500, &e.to_string());
            }
        }

        let merged = self.merged_descriptor(route);
        tracing::debug!(stage = ?Stage::Localized, locale = %locale, "locale context ready");

        let router_ctx = RouterContext::new(request.clone(), params);

        let cache_key = if self.cacheable(request, route) {
            let key = render_cache_key(
                &route.template,
                &locale,
                router_ctx
                    .params
                    .iter()
                    .chain(router_ctx.query.iter())
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
            if let Some(body) = self.cache.get(&key) {
                tracing::debug!(key = %key, "render cache hit");
                return html_page(200, body);
            }
            Some(key)
        } else {
            None
        };

        let data = match self.registry.data_binding(&route.template) {
            Some(binding) => match self.providers.resolve(&binding, &router_ctx) {
                Ok(payload) => {
                    tracing::debug!(stage = ?Stage::DataBound, service = %binding.service, "payload resolved");
                    Some(payload)
                }
                Err(e) => {
                    tracing::warn!(error = %e, template = %route.template, "data binding failed");
                    return self.error_response(request, &path, &locale, 500, &e.to_string());
                }
            },
            None => None,
        };

        let inner = match self.render_with(
            &route.template,
            &router_ctx,
            &merged,
            &locale,
            data.as_ref(),
            None,
        ) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(error = %e, template = %route.template, "render failed");
                return self.error_response(request, &path, &locale, 500, &e.to_string());
            }
        };
        tracing::debug!(stage = ?Stage::Rendered, template = %route.template, "component rendered");

        let body = match self.wrap_layouts(route, inner, &router_ctx, &locale) {
            Ok(body) => {
                tracing::debug!(stage = ?Stage::LayoutWrapped, template = %route.template, "layout chain applied");
                body
            }
            Err(e) => {
                tracing::warn!(error = %e, template = %route.template, "layout wrap failed");
                return self.error_response(request, &path, &locale, 500, &e.to_string());
            }
        };

        if let Some(key) = cache_key {
            self.cache.put(&key, body.clone());
        }

        tracing::debug!(stage = ?Stage::Responded, template = %route.template, "response ready");
        html_page(200, body)
    }

    /// The route's descriptor merged over its nearest layout's descriptor,
    /// template side winning.
    fn merged_descriptor(&self, route: &Route) -> Descriptor {
        if !route.descriptor.layout_enabled() {
            return route.descriptor.clone();
        }
        match self.table.find_layout(&route.fs_dir) {
            Some(layout) => {
                let layout_desc = self.table.layout_descriptor(&layout);
                route
                    .descriptor
                    .merged_over(&layout_desc, self.locales.default_locale())
            }
            None => route.descriptor.clone(),
        }
    }

    /// Wraps rendered content in the inherited layout chain, innermost to
    /// outermost.
    ///
    /// Each step re-merges metadata (template side winning) and rebuilds the
    /// locale context from the merged translations, so translation lookups
    /// stay consistent through every layer. The walk shares the layout
    /// lookup's depth bound.
    fn wrap_layouts(
        &self,
        route: &Route,
        inner: String,
        router_ctx: &RouterContext,
        locale: &str,
    ) -> Result<String> {
        if !route.descriptor.layout_enabled() {
            return Ok(inner);
        }

        let default_locale = self.locales.default_locale();
        let mut html = inner;
        let mut merged = route.descriptor.clone();
        let mut dir = route.fs_dir.clone();

        // A misconfigured zero bound still renders the page unwrapped.
        for _ in 0..self.table.max_layout_depth().max(1) {
            let Some(layout) = self.table.find_layout(&dir) else {
                break;
            };
            let layout_desc = self.table.layout_descriptor(&layout);
            merged = merged.merged_over(&layout_desc, default_locale);

            html = self.render_with(
                &layout.file,
                router_ctx,
                &merged,
                locale,
                None,
                Some(&html),
            )?;

            let layout_dir = layout.dir();
            if layout_dir.is_empty() {
                break;
            }
            dir = match layout_dir.rsplit_once('/') {
                Some((parent, _)) => parent.to_string(),
                None => String::new(),
            };
        }

        Ok(html)
    }

    /// Renders one component with a context assembled from the merged
    /// descriptor.
    fn render_with(
        &self,
        template: &str,
        router_ctx: &RouterContext,
        descriptor: &Descriptor,
        locale: &str,
        data: Option<&JsonValue>,
        children: Option<&str>,
    ) -> Result<String> {
        let Some(component) = self.registry.template(template) else {
            return Err(VitralError::TemplateNotRegistered(template.to_string()));
        };

        let default_locale = self.locales.default_locale();
        let translations = descriptor.translations_for(locale, default_locale);
        let locale_ctx = LocaleContext::new(locale, default_locale, translations);

        let ctx = RenderContext {
            router: router_ctx,
            locale: &locale_ctx,
            metadata: &descriptor.metadata,
            data,
            children,
        };

        component(&ctx).map_err(|e| match e {
            err @ VitralError::RenderFailed { .. } => err,
            other => VitralError::RenderFailed {
                template: template.to_string(),
                message: other.to_string(),
            },
        })
    }

    /// Substitutes an error component for a failed request.
    ///
    /// Resolves the error template for the request path; when none exists,
    /// or its component is missing or fails, the built-in minimal renderer
    /// answers so the response is never empty.
    fn error_response(
        &self,
        request: &VitralRequest,
        path: &str,
        locale: &str,
        status: u16,
        message: &str,
    ) -> VitralResponse {
        if let Some(error_template) = self.table.find_error_template(path) {
            let descriptor = self.table.error_descriptor(&error_template);
            let router_ctx = RouterContext::new(request.clone(), HashMap::new());

            match self.render_with(
                &error_template.component,
                &router_ctx,
                &descriptor,
                locale,
                None,
                None,
            ) {
                Ok(html) => {
                    tracing::debug!(stage = ?Stage::ErrorResponded, file = %error_template.file, status = error_template.status, "error template rendered");
                    return html_page(error_template.status, html);
                }
                Err(e) => {
                    tracing::warn!(error = %e, file = %error_template.file, "error template failed, using built-in fallback");
                }
            }
        }

        tracing::debug!(stage = ?Stage::ErrorResponded, status, "built-in fallback page");
        fallback_error_page(status, message)
    }

    /// Dedicated response for a locale-shaped but unsupported path segment.
    ///
    /// Deliberately distinct from a 404: silently rendering the wrong
    /// language would be worse than telling the client what is available.
    fn unsupported_language(&self, code: &str) -> VitralResponse {
        let mut items = String::new();
        for locale in self.locales.supported() {
            items.push_str(&format!("<li><a href=\"/{0}/\">{0}</a></li>", locale));
        }
        let body = format!(
            "<!DOCTYPE html>\n<html>\n<head><title>Language not supported</title></head>\n<body>\n<h1>Language \"{}\" is not supported</h1>\n<p>Available languages:</p>\n<ul>{}</ul>\n</body>\n</html>\n",
            code, items
        );
        html_page(406, body)
    }

    fn cacheable(&self, request: &VitralRequest, route: &Route) -> bool {
        request.is_read_only() && route.auth.kind == AuthKind::Public
    }
}

/// An HTML page response with the standard content type.
fn html_page(status: u16, body: String) -> VitralResponse {
    VitralResponse::html_with_headers(
        status,
        body,
        [(
            "content-type".to_string(),
            "text/html; charset=utf-8".to_string(),
        )]
        .into(),
    )
}

/// The built-in minimal error renderer, used only when no error template
/// applies.
fn fallback_error_page(status: u16, message: &str) -> VitralResponse {
    let body = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Error {0}</title></head>\n<body>\n<h1>Error {0}</h1>\n<p>{1}</p>\n</body>\n</html>\n",
        status, message
    );
    html_page(status, body)
}
