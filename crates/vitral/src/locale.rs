// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Per-request locale resolution and translation lookup.
//!
//! The locale is read from the first path segment (`/de/dashboard`) or, when
//! the path carries no signal, from the `Accept-Language` header. A segment
//! that has locale shape but is not in the configured supported set makes the
//! request *unsupported*: the pipeline short-circuits to a dedicated
//! language-selection response instead of silently rendering the wrong
//! language.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::config::LocaleConfig;
use crate::request::VitralRequest;

/// ISO 639-1 two-letter language codes, sorted for binary search.
///
/// Used to avoid misclassifying an ordinary nested translation key (e.g.
/// "stats" or "qq") as a locale.
const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
    "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
    "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
    "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
    "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
    "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
    "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
    "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
    "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
    "yo", "za", "zh", "zu",
];

lazy_static! {
    static ref LOCALE_SHAPE: Regex = Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").unwrap();
}

/// Returns true if `segment` has locale shape: two lowercase letters,
/// optionally with a `-XX` region suffix (e.g. "en-US").
///
/// Shape alone decides whether a *path segment* is read as a locale
/// attempt; an unknown language there must produce the unsupported-language
/// response rather than silently falling through to routing.
pub fn has_locale_shape(segment: &str) -> bool {
    LOCALE_SHAPE.is_match(segment)
}

/// Returns true if `segment` is a known locale code: locale shape and a
/// language part from the ISO 639-1 allow-list.
///
/// Descriptor classification uses this stricter check so an ordinary nested
/// translation key that happens to be two letters ("qq") cannot flip a
/// block to multi-locale.
pub fn is_locale_code(segment: &str) -> bool {
    if !has_locale_shape(segment) {
        return false;
    }
    let language = &segment[..2];
    ISO_639_1.binary_search(&language).is_ok()
}

/// Result of locale extraction for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleMatch {
    /// A supported locale was found; the path is returned with the locale
    /// segment stripped.
    Supported {
        /// The active locale code.
        locale: String,
        /// The request path without the locale segment.
        stripped_path: String,
    },

    /// The first path segment looks like a locale but is not supported.
    Unsupported(String),

    /// No locale signal at all; the caller applies the configured default.
    Absent,
}

/// Extracts and validates the active locale per request.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    supported: Vec<String>,
    default_locale: String,
}

impl LocaleResolver {
    /// Creates a resolver from the locale configuration.
    pub fn new(config: &LocaleConfig) -> Self {
        Self {
            supported: config.supported.clone(),
            default_locale: config.default_locale.clone(),
        }
    }

    /// Returns true if `code` is in the configured supported set.
    pub fn validate(&self, code: &str) -> bool {
        self.supported.iter().any(|s| s == code)
    }

    /// The configured supported locales.
    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Extracts the locale signal from a request.
    ///
    /// The first path segment wins; `Accept-Language` is consulted only when
    /// the path carries no locale-shaped segment.
    pub fn extract(&self, request: &VitralRequest) -> LocaleMatch {
        let path = request.path.as_str();
        let trimmed = path.trim_start_matches('/');
        let first = trimmed.split('/').next().unwrap_or("");

        if has_locale_shape(first) {
            if self.validate(first) {
                let rest = &trimmed[first.len()..];
                let stripped = if rest.is_empty() {
                    "/".to_string()
                } else {
                    rest.to_string()
                };
                return LocaleMatch::Supported {
                    locale: first.to_string(),
                    stripped_path: stripped,
                };
            }
            return LocaleMatch::Unsupported(first.to_string());
        }

        if let Some(header) = request.header("accept-language") {
            if let Some(locale) = self.from_accept_language(header) {
                return LocaleMatch::Supported {
                    locale,
                    stripped_path: path.to_string(),
                };
            }
        }

        LocaleMatch::Absent
    }

    /// Picks the first supported entry from an `Accept-Language` header.
    fn from_accept_language(&self, header: &str) -> Option<String> {
        for entry in header.split(',') {
            let tag = entry.split(';').next().unwrap_or("").trim();
            if tag.is_empty() {
                continue;
            }
            if self.validate(tag) {
                return Some(tag.to_string());
            }
            let primary = tag.split('-').next().unwrap_or("").to_ascii_lowercase();
            if self.validate(&primary) {
                return Some(primary);
            }
        }
        None
    }
}

/// Request-scoped translation context for the active template.
///
/// Built per request from the merged template/layout translations and
/// discarded after the response is written.
#[derive(Debug, Clone)]
pub struct LocaleContext {
    locale: String,
    fallback: String,
    translations: HashMap<String, String>,
}

impl LocaleContext {
    /// Creates a context over a flattened key → translation map.
    pub fn new(
        locale: impl Into<String>,
        fallback: impl Into<String>,
        translations: HashMap<String, String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            fallback: fallback.into(),
            translations,
        }
    }

    /// The active locale code.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The fallback locale code.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Looks up a dot-joined translation key.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.translations.get(key).map(|s| s.as_str())
    }

    /// Translates a dot-joined key.
    ///
    /// A key with no translation yields a visibly tagged placeholder rather
    /// than an empty string or a panic, so broken keys stay findable in the
    /// rendered output.
    pub fn translate(&self, key: &str) -> String {
        match self.translations.get(key) {
            Some(value) => value.clone(),
            None => {
                tracing::debug!(locale = %self.locale, key, "missing translation");
                format!("[missing: {}]", key)
            }
        }
    }
}
