// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Per-route authentication gate.
//!
//! Every route carries an [`AuthRequirement`], attached at discovery time
//! from its descriptor (public when no descriptor exists). The gate evaluates
//! the requirement against pluggable session and user stores and always
//! resolves to access granted, a redirect, or an explicit 401/403. There is
//! no silent pass-through.

use serde::Deserialize;

use crate::error::Result;
use crate::request::VitralRequest;
use crate::session::{SessionStore, User, UserStore};

/// The access level a route demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthKind {
    /// No authentication required.
    #[default]
    Public,
    /// Any authenticated user.
    User,
    /// An authenticated user holding the admin role (or the roles the
    /// requirement names explicitly).
    Admin,
}

impl AuthKind {
    /// Parses the descriptor spelling of a kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Self::Public),
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Raw `[auth]` descriptor block, deserialized before validation.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthBlock {
    pub kind: String,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// A route's authentication requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequirement {
    /// Required access level.
    pub kind: AuthKind,
    /// Where to send unauthenticated/unauthorized requests. When `None`, the
    /// gate answers with a bare 401/403 instead of guessing a destination.
    pub redirect: Option<String>,
    /// Roles of which the user must hold at least one. Empty means any
    /// authenticated user (for `Admin`, empty defaults to `{"admin"}`).
    pub roles: Vec<String>,
}

impl AuthRequirement {
    /// The neutral default: public access.
    pub fn public() -> Self {
        Self {
            kind: AuthKind::Public,
            redirect: None,
            roles: Vec::new(),
        }
    }

    /// The roles this requirement actually demands.
    pub fn required_roles(&self) -> Vec<String> {
        if !self.roles.is_empty() {
            return self.roles.clone();
        }
        match self.kind {
            AuthKind::Admin => vec!["admin".to_string()],
            _ => Vec::new(),
        }
    }
}

impl Default for AuthRequirement {
    fn default() -> Self {
        Self::public()
    }
}

/// Outcome of evaluating a requirement for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// Access granted; the user is present for non-public requirements.
    Granted(Option<User>),
    /// Send the client to the requirement's redirect target.
    Redirect(String),
    /// Explicit denial: 401 (no valid session/user) or 403 (role mismatch).
    Denied(u16),
}

/// Evaluates a route's auth requirement against the stores.
///
/// Public requirements grant trivially. Otherwise the request's session is
/// resolved through the session store and the session's subject through the
/// user store; any failure along the way (no session, unknown user, role
/// mismatch) resolves to the requirement's redirect, or to an explicit
/// 401/403 when no redirect is configured.
pub fn authenticate(
    request: &VitralRequest,
    requirement: &AuthRequirement,
    sessions: &dyn SessionStore,
    users: &dyn UserStore,
) -> Result<AuthDecision> {
    if requirement.kind == AuthKind::Public {
        return Ok(AuthDecision::Granted(None));
    }

    let Some(session) = sessions.get_session(request)? else {
        tracing::debug!(path = %request.path, "auth: no valid session");
        return Ok(deny(requirement, 401));
    };

    let Some(user) = users.get_user_by_id(&session.user_id)? else {
        tracing::warn!(user_id = %session.user_id, "auth: session subject unknown");
        return Ok(deny(requirement, 401));
    };

    let required = requirement.required_roles();
    if required.is_empty() {
        return Ok(AuthDecision::Granted(Some(user)));
    }

    let has_role = required.iter().any(|r| user.roles.contains(r));
    if has_role {
        Ok(AuthDecision::Granted(Some(user)))
    } else {
        tracing::debug!(user = %user.id, ?required, "auth: role mismatch");
        Ok(deny(requirement, 403))
    }
}

fn deny(requirement: &AuthRequirement, status: u16) -> AuthDecision {
    match &requirement.redirect {
        Some(target) => AuthDecision::Redirect(target.clone()),
        None => AuthDecision::Denied(status),
    }
}
