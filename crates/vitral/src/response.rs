// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP response abstraction for the rendering pipeline.
//!
//! The pipeline returns one of these variants after handling a request.
//! Adapters convert this to their platform-specific response format.

use std::collections::HashMap;

/// A platform-agnostic HTTP response from the rendering pipeline.
///
/// # Example
///
/// ```rust
/// use vitral::VitralResponse;
///
/// let page = VitralResponse::html(200, "<h1>Hello</h1>");
/// let login = VitralResponse::redirect("/login");
/// ```
#[derive(Debug, Clone)]
pub enum VitralResponse {
    /// HTML response (from component rendering)
    Html {
        /// HTTP status code
        status: u16,
        /// HTTP headers
        headers: HashMap<String, String>,
        /// HTML body
        body: String,
    },

    /// Redirect response
    Redirect {
        /// HTTP status code (301, 302, 303, 307, 308)
        status: u16,
        /// Redirect location
        location: String,
    },

    /// Bare error response, used when the gate denies access without a
    /// configured redirect.
    Error {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
}

impl VitralResponse {
    /// Creates an HTML response.
    pub fn html(status: u16, body: impl Into<String>) -> Self {
        Self::Html {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Creates an HTML response with headers.
    pub fn html_with_headers(
        status: u16,
        body: impl Into<String>,
        headers: HashMap<String, String>,
    ) -> Self {
        Self::Html {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Creates a redirect response (HTTP 302 by default).
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            status: 302,
            location: location.into(),
        }
    }

    /// Creates a redirect response with a specific status code.
    pub fn redirect_with_status(status: u16, location: impl Into<String>) -> Self {
        Self::Redirect {
            status,
            location: location.into(),
        }
    }

    /// Creates a bare error response.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::Error {
            status,
            message: message.into(),
        }
    }

    /// Returns the HTTP status code of this response.
    pub fn status(&self) -> u16 {
        match self {
            Self::Html { status, .. } => *status,
            Self::Redirect { status, .. } => *status,
            Self::Error { status, .. } => *status,
        }
    }

    /// Returns the HTML body, if this is an Html response.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Html { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_response() {
        let resp = VitralResponse::html(200, "<p>ok</p>");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.body(), Some("<p>ok</p>"));
    }

    #[test]
    fn test_redirect_defaults_to_302() {
        let resp = VitralResponse::redirect("/login");
        assert_eq!(resp.status(), 302);
        assert!(matches!(resp, VitralResponse::Redirect { location, .. } if location == "/login"));
    }

    #[test]
    fn test_error_response_has_no_body() {
        let resp = VitralResponse::error(403, "forbidden");
        assert_eq!(resp.status(), 403);
        assert_eq!(resp.body(), None);
    }
}
