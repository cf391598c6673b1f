// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Side-car descriptor files.
//!
//! A template may carry a TOML descriptor next to it (`+page.vit` pairs with
//! `+page.toml`) holding translations, auth settings, shared metadata, and
//! dynamic-route settings. Most templates have none; absence is a normal
//! state, not an error.
//!
//! The allowed root keys are `translations`, `auth`, `metadata`, `layout`,
//! `error`, and `dynamic`. Any other root key fails the load: a typo there
//! would otherwise be ignored silently and surface as a missing translation
//! or an unprotected route much later.
//!
//! Translation trees are flattened to dot-joined keys ("section.sub.key") at
//! load time so request-time lookups are single string matches.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::auth::{AuthBlock, AuthKind, AuthRequirement};
use crate::error::{Result, VitralError};
use crate::locale::is_locale_code;

/// Root keys a descriptor may use.
pub const ALLOWED_ROOT_KEYS: [&str; 6] =
    ["translations", "auth", "metadata", "layout", "error", "dynamic"];

/// A parsed translations block.
///
/// Multi-locale when every top-level key is a locale code (locale → nested
/// tree); single-locale otherwise (the tree itself is the translation set
/// for the implicit default locale). Trees are stored flattened.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationSet {
    /// One translation tree for the implicit default locale.
    Single(HashMap<String, String>),
    /// Locale code → flattened translation tree.
    MultiLocale(HashMap<String, HashMap<String, String>>),
}

impl TranslationSet {
    /// An empty single-locale set.
    pub fn empty() -> Self {
        Self::Single(HashMap::new())
    }

    /// Returns true if the set carries no translations at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(map) => map.is_empty(),
            Self::MultiLocale(locales) => locales.values().all(|m| m.is_empty()),
        }
    }

    /// The flattened map for one locale, if present.
    pub fn for_locale(&self, locale: &str) -> Option<&HashMap<String, String>> {
        match self {
            Self::Single(_) => None,
            Self::MultiLocale(locales) => locales.get(locale),
        }
    }

    /// Normalizes to locale → flattened map, binding a single-locale set to
    /// the given default locale.
    fn normalized(&self, default_locale: &str) -> HashMap<String, HashMap<String, String>> {
        match self {
            Self::Single(map) => {
                let mut out = HashMap::new();
                if !map.is_empty() {
                    out.insert(default_locale.to_string(), map.clone());
                }
                out
            }
            Self::MultiLocale(locales) => locales.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// The `[layout]` descriptor block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutBlock {
    /// Whether this page participates in layout wrapping (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// The `[error]` descriptor block, used on error templates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBlock {
    /// Explicit status override for the error template.
    #[serde(default)]
    pub status: Option<u16>,
}

/// The `[dynamic]` descriptor block, used on dynamic routes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DynamicBlock {
    /// Match precedence among routes tied at the same position; higher wins.
    #[serde(default)]
    pub precedence: Option<i32>,
    /// Declared path parameter names, in order.
    #[serde(default)]
    pub params: Vec<String>,
}

/// A parsed side-car descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    /// Translations, flattened per locale.
    pub translations: TranslationSet,
    /// Auth requirement, when the descriptor declares one.
    pub auth: Option<AuthRequirement>,
    /// Shared metadata (title etc.), flattened to dot-joined keys.
    pub metadata: HashMap<String, String>,
    /// Layout participation settings.
    pub layout: Option<LayoutBlock>,
    /// Error-template settings.
    pub error: Option<ErrorBlock>,
    /// Dynamic-route settings.
    pub dynamic: Option<DynamicBlock>,
}

impl Default for Descriptor {
    fn default() -> Self {
        Self {
            translations: TranslationSet::empty(),
            auth: None,
            metadata: HashMap::new(),
            layout: None,
            error: None,
            dynamic: None,
        }
    }
}

impl Descriptor {
    /// Loads a descriptor file.
    ///
    /// Returns `Ok(None)` when the file does not exist, since most templates
    /// have no descriptor. Parse failures and unknown root keys are errors.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let label = path.display().to_string();
        Self::parse(&content, &label).map(Some)
    }

    /// Parses descriptor content. `file` labels errors.
    pub fn parse(content: &str, file: &str) -> Result<Self> {
        let value: toml::Value =
            toml::from_str(content).map_err(|e| VitralError::DescriptorParse {
                file: file.to_string(),
                source: e,
            })?;

        let Some(table) = value.as_table() else {
            return Err(VitralError::InvalidDescriptorBlock {
                key: String::new(),
                file: file.to_string(),
                message: "descriptor root must be a table".to_string(),
            });
        };

        for key in table.keys() {
            if !ALLOWED_ROOT_KEYS.contains(&key.as_str()) {
                return Err(VitralError::UnknownDescriptorKey {
                    key: key.clone(),
                    file: file.to_string(),
                });
            }
        }

        let translations = match table.get("translations") {
            Some(value) => parse_translations(value, file)?,
            None => TranslationSet::empty(),
        };

        let auth = match table.get("auth") {
            Some(value) => Some(parse_auth(value, file)?),
            None => None,
        };

        let metadata = match table.get("metadata") {
            Some(toml::Value::Table(tree)) => flatten_tree(tree),
            Some(_) => {
                return Err(VitralError::InvalidDescriptorBlock {
                    key: "metadata".to_string(),
                    file: file.to_string(),
                    message: "must be a table".to_string(),
                })
            }
            None => HashMap::new(),
        };

        let layout = parse_block::<LayoutBlock>(table.get("layout"), "layout", file)?;
        let error = parse_block::<ErrorBlock>(table.get("error"), "error", file)?;
        let dynamic = parse_block::<DynamicBlock>(table.get("dynamic"), "dynamic", file)?;

        Ok(Self {
            translations,
            auth,
            metadata,
            layout,
            error,
            dynamic,
        })
    }

    /// Whether pages described by this descriptor take part in layout
    /// wrapping.
    pub fn layout_enabled(&self) -> bool {
        self.layout.as_ref().map(|l| l.enabled).unwrap_or(true)
    }

    /// Declared match precedence, 0 when unset.
    pub fn precedence(&self) -> i32 {
        self.dynamic
            .as_ref()
            .and_then(|d| d.precedence)
            .unwrap_or(0)
    }

    /// Merges this descriptor over a layout's descriptor.
    ///
    /// Field-by-field, the template side (`self`) always wins: shared
    /// translation keys and metadata keys take the template's value, while
    /// everything only the layout defines is kept. This lets a page override
    /// a shared title or string without losing the rest of the layout's
    /// descriptor.
    pub fn merged_over(&self, layout: &Descriptor, default_locale: &str) -> Descriptor {
        let mut locales = layout.translations.normalized(default_locale);
        for (locale, overlay) in self.translations.normalized(default_locale) {
            let target = locales.entry(locale).or_default();
            for (key, value) in overlay {
                target.insert(key, value);
            }
        }
        let translations = if locales.is_empty() {
            TranslationSet::empty()
        } else {
            TranslationSet::MultiLocale(locales)
        };

        let mut metadata = layout.metadata.clone();
        for (key, value) in &self.metadata {
            metadata.insert(key.clone(), value.clone());
        }

        Descriptor {
            translations,
            auth: self.auth.clone().or_else(|| layout.auth.clone()),
            metadata,
            layout: self.layout.clone().or_else(|| layout.layout.clone()),
            error: self.error.clone().or_else(|| layout.error.clone()),
            dynamic: self.dynamic.clone().or_else(|| layout.dynamic.clone()),
        }
    }

    /// The flattened translation map for one request locale.
    ///
    /// The default locale's strings serve as the base; the active locale's
    /// strings overlay them, so a partially translated locale falls back
    /// per key instead of per page.
    pub fn translations_for(
        &self,
        locale: &str,
        default_locale: &str,
    ) -> HashMap<String, String> {
        match &self.translations {
            TranslationSet::Single(map) => map.clone(),
            TranslationSet::MultiLocale(locales) => {
                let mut out = locales.get(default_locale).cloned().unwrap_or_default();
                if locale != default_locale {
                    if let Some(overlay) = locales.get(locale) {
                        for (key, value) in overlay {
                            out.insert(key.clone(), value.clone());
                        }
                    }
                }
                out
            }
        }
    }
}

fn parse_block<T: serde::de::DeserializeOwned>(
    value: Option<&toml::Value>,
    key: &str,
    file: &str,
) -> Result<Option<T>> {
    match value {
        Some(value) => value
            .clone()
            .try_into::<T>()
            .map(Some)
            .map_err(|e| VitralError::InvalidDescriptorBlock {
                key: key.to_string(),
                file: file.to_string(),
                message: e.to_string(),
            }),
        None => Ok(None),
    }
}

fn parse_auth(value: &toml::Value, file: &str) -> Result<AuthRequirement> {
    let block: AuthBlock =
        value
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| VitralError::InvalidDescriptorBlock {
                key: "auth".to_string(),
                file: file.to_string(),
                message: e.to_string(),
            })?;

    let Some(kind) = AuthKind::parse(&block.kind) else {
        return Err(VitralError::InvalidDescriptorBlock {
            key: "auth".to_string(),
            file: file.to_string(),
            message: format!("unknown kind '{}'", block.kind),
        });
    };

    Ok(AuthRequirement {
        kind,
        redirect: block.redirect,
        roles: block.roles,
    })
}

fn parse_translations(value: &toml::Value, file: &str) -> Result<TranslationSet> {
    let Some(tree) = value.as_table() else {
        return Err(VitralError::InvalidDescriptorBlock {
            key: "translations".to_string(),
            file: file.to_string(),
            message: "must be a table".to_string(),
        });
    };

    if tree.is_empty() {
        return Ok(TranslationSet::empty());
    }

    // Multi-locale iff every top-level key is a locale code. The allow-list
    // check keeps an ordinary nested key like "stats" from flipping the
    // classification.
    let multi = tree
        .keys()
        .all(|key| is_locale_code(key) && tree[key].is_table());

    if multi {
        let mut locales = HashMap::new();
        for (locale, subtree) in tree {
            if let toml::Value::Table(subtree) = subtree {
                locales.insert(locale.clone(), flatten_tree(subtree));
            }
        }
        Ok(TranslationSet::MultiLocale(locales))
    } else {
        Ok(TranslationSet::Single(flatten_tree(tree)))
    }
}

/// Flattens a nested TOML table to dot-joined keys.
///
/// String leaves keep their value; numeric and boolean leaves are rendered
/// with `to_string`. Arrays and datetimes are skipped.
pub fn flatten_tree(tree: &toml::value::Table) -> HashMap<String, String> {
    let mut out = HashMap::new();
    flatten_into(tree, String::new(), &mut out);
    out
}

fn flatten_into(tree: &toml::value::Table, prefix: String, out: &mut HashMap<String, String>) {
    for (key, value) in tree {
        let joined = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(subtree) => flatten_into(subtree, joined, out),
            toml::Value::String(s) => {
                out.insert(joined, s.clone());
            }
            toml::Value::Integer(n) => {
                out.insert(joined, n.to_string());
            }
            toml::Value::Float(f) => {
                out.insert(joined, f.to_string());
            }
            toml::Value::Boolean(b) => {
                out.insert(joined, b.to_string());
            }
            _ => {
                tracing::debug!(key = %joined, "skipping non-scalar descriptor leaf");
            }
        }
    }
}
