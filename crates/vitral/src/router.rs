// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! File-based route, layout, and error-template discovery.
//!
//! The template tree is walked once at startup:
//! - `+page.vit` → page routes
//! - `+layout.vit` → layouts, resolved by nearest-ancestor-directory search
//! - `+error.vit` → error templates, resolved by request-path segments
//! - `[param]` directories → dynamic parameters
//! - `[...rest]` → catch-all parameters
//!
//! The resulting [`RouteTable`] is immutable for the process lifetime, which
//! is what makes it safe to share across concurrent requests without
//! locking; the lazy layout/error lookups memoize into interior `RwLock`
//! caches.

use glob::glob;
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use crate::auth::AuthRequirement;
use crate::config::{Config, RoutingConfig};
use crate::descriptor::Descriptor;
use crate::error::{Result, VitralError};
use crate::hierarchy::{ancestor_dirs, error_candidates};

/// Known error-directory status codes.
const ERROR_STATUS_SEGMENTS: [(&str, u16); 4] =
    [("401", 401), ("403", 403), ("404", 404), ("500", 500)];

/// A discovered page route.
#[derive(Debug, Clone)]
pub struct Route {
    /// The URL pattern in matchit format (e.g., "/blog/{slug}")
    pub pattern: String,

    /// The route's directory relative to the template root ("" = root)
    pub fs_dir: String,

    /// Template key: the page file's path relative to the template root
    pub template: String,

    /// The route's own side-car descriptor (default when absent)
    pub descriptor: Descriptor,

    /// Effective auth requirement, attached at discovery time
    pub auth: AuthRequirement,

    /// True when the pattern carries parameters
    pub dynamic: bool,

    /// Declared precedence among routes tied at the same position
    pub precedence: i32,

    /// Locale this route is restricted to; `None` serves every locale
    pub locale: Option<String>,
}

/// Result of matching a URL to a route.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// The matched route
    pub route: &'a Route,

    /// URL parameters extracted from the path
    pub params: Vec<(String, String)>,
}

impl<'a> RouteMatch<'a> {
    /// Get a parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The nearest ancestor layout for a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTemplate {
    /// Layout file path relative to the template root
    pub file: String,

    /// Side-car descriptor path for the layout
    pub descriptor_path: String,

    /// 0 = same directory as the template, increasing toward the root
    pub level: usize,
}

impl LayoutTemplate {
    /// The directory the layout lives in.
    pub fn dir(&self) -> &str {
        match self.file.rsplit_once('/') {
            Some((dir, _)) => dir,
            None => "",
        }
    }
}

/// A resolved error template for a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTemplate {
    /// Error file path relative to the template root
    pub file: String,

    /// Component key the registry resolves the error component by
    pub component: String,

    /// Status the error response carries
    pub status: u16,
}

/// Segment type in a route path.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentType {
    /// Static segment (e.g., "blog")
    Static(String),

    /// Dynamic parameter (e.g., "[slug]" -> "{slug}")
    Dynamic(String),

    /// Catch-all/rest parameter (e.g., "[...rest]" -> "{*rest}")
    CatchAll(String),
}

impl SegmentType {
    /// Parse a filesystem segment into a SegmentType.
    pub fn parse(segment: &str) -> Self {
        if segment.starts_with("[...") && segment.ends_with(']') {
            let name = segment[4..segment.len() - 1].to_string();
            SegmentType::CatchAll(name)
        } else if segment.starts_with('[') && segment.ends_with(']') {
            let name = segment[1..segment.len() - 1].to_string();
            SegmentType::Dynamic(name)
        } else {
            SegmentType::Static(segment.to_string())
        }
    }

    /// Convert to a matchit pattern segment.
    /// matchit uses {param} for dynamic segments and {*param} for catch-all.
    pub fn to_pattern(&self) -> String {
        match self {
            SegmentType::Static(s) => s.clone(),
            SegmentType::Dynamic(name) => format!("{{{}}}", name),
            SegmentType::CatchAll(name) => format!("{{*{}}}", name),
        }
    }

    /// Returns true if this segment binds a parameter.
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, SegmentType::Static(_))
    }
}

/// Convert a route directory (relative, "/"-separated) to a matchit pattern.
pub fn path_to_pattern(dir: &str) -> String {
    if dir.is_empty() {
        return "/".to_string();
    }

    let segments: Vec<String> = dir
        .split('/')
        .map(|s| SegmentType::parse(s).to_pattern())
        .collect();

    format!("/{}", segments.join("/"))
}

/// The immutable route table built once at startup.
pub struct RouteTable {
    matcher: MatchitRouter<usize>,
    routes: Vec<Route>,
    routes_dir: PathBuf,
    routing: RoutingConfig,

    /// dir → layout file, collected during discovery
    layouts_by_dir: HashMap<String, String>,
    /// dir → error file, collected during discovery
    errors_by_dir: HashMap<String, String>,
    /// layout/error file → parsed descriptor
    descriptors: HashMap<String, Descriptor>,

    layout_cache: RwLock<HashMap<String, Option<LayoutTemplate>>>,
    error_cache: RwLock<HashMap<String, Option<ErrorTemplate>>>,
}

impl RouteTable {
    /// Walks the template tree and builds the route table.
    ///
    /// Startup only. Any failure here (unreadable root, descriptor parse
    /// error, duplicate pattern/locale pair) is fatal: the service cannot
    /// start with a broken template root.
    pub fn discover(routes_dir: &Path, config: &Config) -> Result<Self> {
        if !routes_dir.is_dir() {
            return Err(VitralError::DiscoveryFailed(format!(
                "template root {} is not a directory",
                routes_dir.display()
            )));
        }

        let routing = config.routing.clone();

        // First pass: layouts and error templates, with their descriptors.
        let mut layouts_by_dir = HashMap::new();
        let mut errors_by_dir = HashMap::new();
        let mut descriptors = HashMap::new();

        for file in Self::walk(routes_dir, &routing.layout_file)? {
            let desc = Self::load_sidecar(routes_dir, &file, &routing)?;
            layouts_by_dir.insert(parent_dir(&file).to_string(), file.clone());
            descriptors.insert(file, desc);
        }

        for file in Self::walk(routes_dir, &routing.error_file)? {
            let desc = Self::load_sidecar(routes_dir, &file, &routing)?;
            errors_by_dir.insert(parent_dir(&file).to_string(), file.clone());
            descriptors.insert(file, desc);
        }

        // Second pass: pages.
        let mut routes = Vec::new();
        for file in Self::walk(routes_dir, &routing.page_file)? {
            let dir = parent_dir(&file).to_string();
            let descriptor = Self::load_sidecar(routes_dir, &file, &routing)?;
            let pattern = path_to_pattern(&dir);
            let dynamic = pattern.contains('{');
            let auth = Self::effective_auth(
                &descriptor,
                &dir,
                &layouts_by_dir,
                &descriptors,
                config,
            );
            let precedence = descriptor.precedence();

            routes.push(Route {
                pattern,
                fs_dir: dir,
                template: file,
                descriptor,
                auth,
                dynamic,
                precedence,
                locale: None,
            });
        }

        // Static routes outrank dynamic ones; ties break by declared
        // precedence, then by longer (more specific) pattern.
        routes.sort_by(|a, b| {
            a.dynamic
                .cmp(&b.dynamic)
                .then(b.precedence.cmp(&a.precedence))
                .then(b.pattern.len().cmp(&a.pattern.len()))
                .then(a.pattern.cmp(&b.pattern))
        });

        let mut matcher = MatchitRouter::new();
        for (index, route) in routes.iter().enumerate() {
            if let Err(e) = matcher.insert(route.pattern.clone(), index) {
                tracing::warn!(pattern = %route.pattern, error = %e, "route conflict");
                return Err(VitralError::DuplicateRoute {
                    pattern: route.pattern.clone(),
                    locale: route.locale.clone().unwrap_or_else(|| "*".to_string()),
                });
            }
        }

        tracing::debug!(
            routes = routes.len(),
            layouts = layouts_by_dir.len(),
            errors = errors_by_dir.len(),
            root = %routes_dir.display(),
            "route discovery complete"
        );

        Ok(Self {
            matcher,
            routes,
            routes_dir: routes_dir.to_path_buf(),
            routing,
            layouts_by_dir,
            errors_by_dir,
            descriptors,
            layout_cache: RwLock::new(HashMap::new()),
            error_cache: RwLock::new(HashMap::new()),
        })
    }

    /// Match a URL path to a route.
    pub fn match_url(&self, path: &str) -> Option<RouteMatch<'_>> {
        let normalized = if path.is_empty() || path == "/" {
            "/"
        } else {
            path.trim_end_matches('/')
        };

        match self.matcher.at(normalized) {
            Ok(matched) => {
                let route = &self.routes[*matched.value];
                let params: Vec<(String, String)> = matched
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                Some(RouteMatch { route, params })
            }
            Err(_) => None,
        }
    }

    /// All discovered routes, in match-precedence order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The template root this table was built from.
    pub fn routes_dir(&self) -> &Path {
        &self.routes_dir
    }

    /// The configured bound on ancestor walks.
    pub fn max_layout_depth(&self) -> usize {
        self.routing.max_layout_depth
    }

    /// Finds the nearest ancestor layout for a template directory.
    ///
    /// Walks from the directory itself toward the root, bounded at the
    /// configured depth. Absence is a normal outcome, not an error. Results
    /// are memoized; the table is immutable so the memo never goes stale.
    pub fn find_layout(&self, fs_dir: &str) -> Option<LayoutTemplate> {
        if let Ok(cache) = self.layout_cache.read() {
            if let Some(hit) = cache.get(fs_dir) {
                return hit.clone();
            }
        }

        let found = ancestor_dirs(fs_dir, self.routing.max_layout_depth)
            .into_iter()
            .enumerate()
            .find_map(|(level, dir)| {
                self.layouts_by_dir.get(&dir).map(|file| LayoutTemplate {
                    file: file.clone(),
                    descriptor_path: descriptor_path_for(file, &self.routing),
                    level,
                })
            });

        if let Ok(mut cache) = self.layout_cache.write() {
            cache.insert(fs_dir.to_string(), found.clone());
        }
        found
    }

    /// Resolves the error template for a request path.
    ///
    /// Candidates are derived from the URL segments, most specific first;
    /// the first existing error file wins. The status comes from the
    /// template's `error` descriptor block when set, else from a directory
    /// segment literally naming a known status code, else 500.
    pub fn find_error_template(&self, request_path: &str) -> Option<ErrorTemplate> {
        if let Ok(cache) = self.error_cache.read() {
            if let Some(hit) = cache.get(request_path) {
                return hit.clone();
            }
        }

        let found = error_candidates(request_path, self.routing.max_layout_depth)
            .into_iter()
            .find_map(|dir| {
                self.errors_by_dir.get(&dir).map(|file| {
                    let status = self
                        .descriptors
                        .get(file)
                        .and_then(|d| d.error.as_ref())
                        .and_then(|e| e.status)
                        .or_else(|| status_from_segments(file))
                        .unwrap_or(500);
                    ErrorTemplate {
                        file: file.clone(),
                        component: file.clone(),
                        status,
                    }
                })
            });

        if let Ok(mut cache) = self.error_cache.write() {
            cache.insert(request_path.to_string(), found.clone());
        }
        found
    }

    /// The parsed descriptor of a discovered layout.
    pub fn layout_descriptor(&self, layout: &LayoutTemplate) -> Descriptor {
        self.descriptors
            .get(&layout.file)
            .cloned()
            .unwrap_or_default()
    }

    /// The parsed descriptor of a resolved error template.
    pub fn error_descriptor(&self, error: &ErrorTemplate) -> Descriptor {
        self.descriptors
            .get(&error.file)
            .cloned()
            .unwrap_or_default()
    }

    /// Globs the tree for one file-name convention, returning relative
    /// "/"-separated paths.
    fn walk(routes_dir: &Path, file_name: &str) -> Result<Vec<String>> {
        let pattern = format!("{}/**/{}", routes_dir.display(), file_name);
        let mut files = Vec::new();
        for path in glob(&pattern)
            .map_err(|e| VitralError::DiscoveryFailed(e.to_string()))?
            .flatten()
        {
            files.push(relative_key(&path, routes_dir));
        }
        files.sort();
        Ok(files)
    }

    /// Loads a template's side-car descriptor; absence yields the default.
    fn load_sidecar(
        routes_dir: &Path,
        template_file: &str,
        routing: &RoutingConfig,
    ) -> Result<Descriptor> {
        let sidecar = descriptor_path_for(template_file, routing);
        let path = routes_dir.join(&sidecar);
        Ok(Descriptor::load(&path)?.unwrap_or_default())
    }

    /// The auth requirement attached to a route at discovery time.
    ///
    /// The page descriptor wins; otherwise the nearest ancestor layout with
    /// an `auth` block applies; otherwise public. Requirements without a
    /// redirect of their own inherit the configured login route.
    fn effective_auth(
        descriptor: &Descriptor,
        dir: &str,
        layouts_by_dir: &HashMap<String, String>,
        descriptors: &HashMap<String, Descriptor>,
        config: &Config,
    ) -> AuthRequirement {
        let inherited = ancestor_dirs(dir, config.routing.max_layout_depth)
            .into_iter()
            .find_map(|ancestor| {
                layouts_by_dir
                    .get(&ancestor)
                    .and_then(|file| descriptors.get(file))
                    .and_then(|d| d.auth.clone())
            });

        let mut auth = descriptor
            .auth
            .clone()
            .or(inherited)
            .unwrap_or_else(AuthRequirement::public);

        if auth.kind != crate::auth::AuthKind::Public && auth.redirect.is_none() {
            auth.redirect = config.auth.login_route.clone();
        }
        auth
    }
}

/// Strips the root prefix and normalizes separators to "/".
fn relative_key(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The directory part of a relative "/"-separated file path.
fn parent_dir(file: &str) -> &str {
    match file.rsplit_once('/') {
        Some((dir, _)) => dir,
        None => "",
    }
}

/// The side-car descriptor path for a template file.
fn descriptor_path_for(template_file: &str, routing: &RoutingConfig) -> String {
    match template_file.rsplit_once('.') {
        Some((stem, _)) => format!("{}.{}", stem, routing.descriptor_ext),
        None => format!("{}.{}", template_file, routing.descriptor_ext),
    }
}

/// Infers a status code from the segments of an error-file path.
fn status_from_segments(file: &str) -> Option<u16> {
    file.split('/').find_map(|segment| {
        ERROR_STATUS_SEGMENTS
            .iter()
            .find(|(name, _)| *name == segment)
            .map(|(_, status)| *status)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn setup_tree(dir: &Path) {
        fs::write(dir.join("+layout.vit"), "").unwrap();
        fs::write(dir.join("+page.vit"), "").unwrap();
        fs::write(dir.join("+error.vit"), "").unwrap();

        fs::create_dir_all(dir.join("about")).unwrap();
        fs::write(dir.join("about/+page.vit"), "").unwrap();

        fs::create_dir_all(dir.join("blog/[slug]")).unwrap();
        fs::write(dir.join("blog/+layout.vit"), "").unwrap();
        fs::write(dir.join("blog/+page.vit"), "").unwrap();
        fs::write(dir.join("blog/[slug]/+page.vit"), "").unwrap();

        fs::create_dir_all(dir.join("admin")).unwrap();
        fs::write(dir.join("admin/+page.vit"), "").unwrap();
        fs::write(
            dir.join("admin/+page.toml"),
            "[auth]\nkind = \"admin\"\nredirect = \"/login\"",
        )
        .unwrap();
    }

    fn discover(dir: &Path) -> RouteTable {
        RouteTable::discover(dir, &Config::default()).unwrap()
    }

    #[test]
    fn test_route_discovery() {
        let dir = tempdir().unwrap();
        setup_tree(dir.path());

        let table = discover(dir.path());
        let patterns: Vec<&str> = table.routes().iter().map(|r| r.pattern.as_str()).collect();

        assert!(patterns.contains(&"/"), "missing root route");
        assert!(patterns.contains(&"/about"), "missing /about route");
        assert!(patterns.contains(&"/blog"), "missing /blog route");
        assert!(
            patterns.contains(&"/blog/{slug}"),
            "missing /blog/{{slug}} route"
        );
    }

    #[test]
    fn test_static_routes_sort_before_dynamic() {
        let dir = tempdir().unwrap();
        setup_tree(dir.path());

        let table = discover(dir.path());
        let first_dynamic = table
            .routes()
            .iter()
            .position(|r| r.dynamic)
            .unwrap_or(usize::MAX);
        let last_static = table
            .routes()
            .iter()
            .rposition(|r| !r.dynamic)
            .unwrap_or(0);
        assert!(last_static < first_dynamic);
    }

    #[test]
    fn test_url_matching() {
        let dir = tempdir().unwrap();
        setup_tree(dir.path());

        let table = discover(dir.path());

        let m = table.match_url("/").unwrap();
        assert_eq!(m.route.pattern, "/");

        let m = table.match_url("/about").unwrap();
        assert_eq!(m.route.pattern, "/about");
        assert_eq!(m.route.template, "about/+page.vit");

        let m = table.match_url("/blog/hello-world").unwrap();
        assert_eq!(m.route.pattern, "/blog/{slug}");
        assert_eq!(m.param("slug"), Some("hello-world"));

        assert!(table.match_url("/nope").is_none());
    }

    #[test]
    fn test_find_layout_levels() {
        let dir = tempdir().unwrap();
        setup_tree(dir.path());

        let table = discover(dir.path());

        // blog/[slug] has no layout of its own; blog's layout is one level up
        let layout = table.find_layout("blog/[slug]").unwrap();
        assert_eq!(layout.file, "blog/+layout.vit");
        assert_eq!(layout.level, 1);
        assert_eq!(layout.dir(), "blog");

        // blog has a layout at level 0
        let layout = table.find_layout("blog").unwrap();
        assert_eq!(layout.level, 0);

        // about falls through to the root layout
        let layout = table.find_layout("about").unwrap();
        assert_eq!(layout.file, "+layout.vit");
        assert_eq!(layout.level, 1);

        // Cached second lookup agrees
        assert_eq!(table.find_layout("about").unwrap().file, "+layout.vit");
    }

    #[test]
    fn test_find_layout_absent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("+page.vit"), "").unwrap();

        let table = discover(dir.path());
        assert!(table.find_layout("").is_none());
    }

    #[test]
    fn test_find_error_template_walks_up() {
        let dir = tempdir().unwrap();
        setup_tree(dir.path());

        let table = discover(dir.path());

        // No admin/users/+error.vit, no admin/+error.vit: root +error.vit wins
        let error = table.find_error_template("/admin/users/123").unwrap();
        assert_eq!(error.file, "+error.vit");
        assert_eq!(error.status, 500);
    }

    #[test]
    fn test_find_error_template_most_specific_wins() {
        let dir = tempdir().unwrap();
        setup_tree(dir.path());
        fs::create_dir_all(dir.path().join("admin/users")).unwrap();
        fs::write(dir.path().join("admin/users/+error.vit"), "").unwrap();
        fs::write(dir.path().join("admin/+error.vit"), "").unwrap();

        let table = discover(dir.path());
        let error = table.find_error_template("/admin/users/123").unwrap();
        assert_eq!(error.file, "admin/users/+error.vit");
    }

    #[test]
    fn test_error_status_from_directory_segment() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("404")).unwrap();
        fs::write(dir.path().join("404/+error.vit"), "").unwrap();
        fs::write(dir.path().join("+page.vit"), "").unwrap();

        let table = discover(dir.path());
        let error = table.find_error_template("/404/whatever").unwrap();
        assert_eq!(error.status, 404);
    }

    #[test]
    fn test_error_status_descriptor_override() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("+error.vit"), "").unwrap();
        fs::write(dir.path().join("+error.toml"), "[error]\nstatus = 404").unwrap();
        fs::write(dir.path().join("+page.vit"), "").unwrap();

        let table = discover(dir.path());
        let error = table.find_error_template("/missing").unwrap();
        assert_eq!(error.status, 404);
    }

    #[test]
    fn test_auth_attached_from_descriptor() {
        let dir = tempdir().unwrap();
        setup_tree(dir.path());

        let table = discover(dir.path());
        let admin = table
            .routes()
            .iter()
            .find(|r| r.pattern == "/admin")
            .unwrap();
        assert_eq!(admin.auth.kind, crate::auth::AuthKind::Admin);
        assert_eq!(admin.auth.redirect.as_deref(), Some("/login"));

        let public = table.routes().iter().find(|r| r.pattern == "/").unwrap();
        assert_eq!(public.auth.kind, crate::auth::AuthKind::Public);
    }

    #[test]
    fn test_auth_inherited_from_layout() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("members/area")).unwrap();
        fs::write(dir.path().join("members/+layout.vit"), "").unwrap();
        fs::write(dir.path().join("members/+layout.toml"), "[auth]\nkind = \"user\"").unwrap();
        fs::write(dir.path().join("members/area/+page.vit"), "").unwrap();
        fs::write(dir.path().join("+page.vit"), "").unwrap();

        let table = discover(dir.path());
        let route = table
            .routes()
            .iter()
            .find(|r| r.pattern == "/members/area")
            .unwrap();
        assert_eq!(route.auth.kind, crate::auth::AuthKind::User);
    }

    #[test]
    fn test_descriptor_parse_error_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("+page.vit"), "").unwrap();
        fs::write(dir.path().join("+page.toml"), "[nonsense]\nfoo = 1").unwrap();

        let err = RouteTable::discover(dir.path(), &Config::default()).err().unwrap();
        assert!(matches!(err, VitralError::UnknownDescriptorKey { .. }));
    }

    #[test]
    fn test_duplicate_pattern_is_fatal() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts/[id]")).unwrap();
        fs::create_dir_all(dir.path().join("posts/[slug]")).unwrap();
        fs::write(dir.path().join("posts/[id]/+page.vit"), "").unwrap();
        fs::write(dir.path().join("posts/[slug]/+page.vit"), "").unwrap();

        let err = RouteTable::discover(dir.path(), &Config::default()).err().unwrap();
        assert!(matches!(
            err,
            VitralError::DuplicateRoute { .. } | VitralError::DiscoveryFailed(_)
        ));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let err =
            RouteTable::discover(Path::new("/definitely/not/here"), &Config::default())
                .err().unwrap();
        assert!(matches!(err, VitralError::DiscoveryFailed(_)));
    }

    #[test]
    fn test_path_to_pattern() {
        assert_eq!(path_to_pattern(""), "/");
        assert_eq!(path_to_pattern("about"), "/about");
        assert_eq!(path_to_pattern("blog/[slug]"), "/blog/{slug}");
        assert_eq!(path_to_pattern("docs/[...rest]"), "/docs/{*rest}");
    }

    #[test]
    fn test_segment_parse() {
        assert_eq!(
            SegmentType::parse("blog"),
            SegmentType::Static("blog".to_string())
        );
        assert_eq!(
            SegmentType::parse("[slug]"),
            SegmentType::Dynamic("slug".to_string())
        );
        assert_eq!(
            SegmentType::parse("[...rest]"),
            SegmentType::CatchAll("rest".to_string())
        );
        assert!(SegmentType::parse("[slug]").is_dynamic());
        assert!(!SegmentType::parse("blog").is_dynamic());
    }

    #[test]
    fn test_status_from_segments() {
        assert_eq!(status_from_segments("404/+error.vit"), Some(404));
        assert_eq!(status_from_segments("admin/403/+error.vit"), Some(403));
        assert_eq!(status_from_segments("admin/+error.vit"), None);
    }
}
