// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Bounded ancestor walks for layout and error-template lookup.
//!
//! Both lookups share the same shape: produce an ordered, most-specific-first
//! candidate sequence and let the caller test each candidate for existence.
//! The functions here are pure path math with no filesystem access, so the
//! walks terminate within the depth bound regardless of what the directory
//! tree (cycles, symlinks) looks like.

/// Ancestor directories of `dir`, nearest first, ending at the tree root
/// (the empty string), capped at `max_depth` entries.
///
/// `dir` is relative to the template root with `/` separators; the empty
/// string is the root itself.
///
/// ```
/// use vitral::hierarchy::ancestor_dirs;
///
/// assert_eq!(
///     ancestor_dirs("blog/[slug]", 10),
///     vec!["blog/[slug]".to_string(), "blog".to_string(), String::new()]
/// );
/// ```
pub fn ancestor_dirs(dir: &str, max_depth: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = dir.trim_matches('/');

    loop {
        if out.len() >= max_depth {
            break;
        }
        out.push(current.to_string());
        if current.is_empty() {
            break;
        }
        current = match current.rsplit_once('/') {
            Some((parent, _)) => parent,
            None => "",
        };
    }

    out
}

/// Error-template candidate directories for a request path, most specific
/// first, capped at `max_depth` entries.
///
/// The leaf segment is dropped: it names a page (or a parameter value), not
/// a directory that could hold an error template. For `/admin/users/123` the
/// candidates are `admin/users`, `admin`, and the root.
///
/// ```
/// use vitral::hierarchy::error_candidates;
///
/// assert_eq!(
///     error_candidates("/admin/users/123", 10),
///     vec!["admin/users".to_string(), "admin".to_string(), String::new()]
/// );
/// ```
pub fn error_candidates(request_path: &str, max_depth: usize) -> Vec<String> {
    let trimmed = request_path.trim_matches('/');
    if trimmed.is_empty() {
        return vec![String::new()];
    }

    let parent = match trimmed.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => "",
    };

    ancestor_dirs(parent, max_depth)
}
