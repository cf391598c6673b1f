// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP request abstraction for the rendering pipeline.
//!
//! This module provides a platform-agnostic request type so different hosts
//! (axum, hyper, tests) can adapt their own request representation at the
//! edge and hand the pipeline a uniform view.

use std::collections::HashMap;

/// A platform-agnostic HTTP request.
///
/// Contains everything the pipeline needs: routing, locale extraction,
/// session lookup, and data binding.
///
/// # Example
///
/// ```rust
/// use vitral::VitralRequest;
///
/// let request = VitralRequest::new("/de/dashboard", "GET")
///     .with_query([("tab".into(), "stats".into())].into());
/// ```
#[derive(Debug, Clone)]
pub struct VitralRequest {
    /// The request path (e.g., "/de/dashboard")
    pub path: String,

    /// The HTTP method (e.g., "GET", "POST")
    pub method: String,

    /// HTTP headers, lower-cased names
    pub headers: HashMap<String, String>,

    /// Query parameters (parsed from the URL)
    pub query: HashMap<String, String>,

    /// Cookies
    pub cookies: HashMap<String, String>,

    /// Request body (form submissions only)
    pub body: Option<Vec<u8>>,
}

impl VitralRequest {
    /// Creates a new request with the given path and method.
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            headers: HashMap::new(),
            query: HashMap::new(),
            cookies: HashMap::new(),
            body: None,
        }
    }

    /// Adds headers to the request.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Adds query parameters to the request.
    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Adds cookies to the request.
    pub fn with_cookies(mut self, cookies: HashMap<String, String>) -> Self {
        self.cookies = cookies;
        self
    }

    /// Adds a body to the request.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| self.headers.get(&name.to_ascii_lowercase()))
            .map(|v| v.as_str())
    }

    /// Returns the Content-Type header, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Checks if this is a form submission (POST with form content type).
    pub fn is_form_submission(&self) -> bool {
        self.method.eq_ignore_ascii_case("POST")
            && self
                .content_type()
                .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
                .unwrap_or(false)
    }

    /// Parses the body as URL-encoded form data.
    ///
    /// Returns an empty map when there is no body or the content type is not
    /// a form submission.
    pub fn form_data(&self) -> HashMap<String, String> {
        if !self.is_form_submission() {
            return HashMap::new();
        }
        match &self.body {
            Some(bytes) => form_urlencoded::parse(bytes).into_owned().collect(),
            None => HashMap::new(),
        }
    }

    /// Returns true for methods without side effects (GET, HEAD).
    pub fn is_read_only(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET") || self.method.eq_ignore_ascii_case("HEAD")
    }
}

impl Default for VitralRequest {
    fn default() -> Self {
        Self::new("/", "GET")
    }
}
