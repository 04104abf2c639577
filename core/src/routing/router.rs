//! # FORZIUM ROUTER
//!
//! **PURPOSE**: Maps `(method, path)` pairs to registered handlers.
//! **GUARANTEE**: Lookups are read-only; a fully built router can be shared
//! between threads without locking.
//!
//! ## MATCH PRECEDENCE
//!
//! 1. **STATIC** - `/users/new`
//! 2. **PARAMETER** - `/users/:id`, `/users/*`
//! 3. **DEEP WILDCARD** - `/users/**`
//!
//! Precedence is independent of registration order.

use crate::config::RouterOptions;
use crate::errors::{error_codes, RouterError};
use crate::routing::node::Tree;
use crate::routing::parser::RouteTemplate;
use crate::routing::result::{FindResult, NoMatch};
use crate::routing::types::{HandlerName, HttpMethod, RouteMatch};
use log::{debug, trace, warn};

/// **METHOD-AWARE RADIX ROUTER**
///
/// One independent tree per HTTP method, created on first registration.
#[derive(Debug)]
pub struct Router<T> {
    trees: Vec<(String, Tree<T>)>,
    options: RouterOptions,
}

impl<T> Router<T> {
    /// **CONSTRUCTOR** - Non-strict, no prefix
    pub fn new() -> Self {
        Self::with_options(RouterOptions::default())
    }

    /// **CONSTRUCTOR WITH OPTIONS**
    pub fn with_options(options: RouterOptions) -> Self {
        Self {
            trees: Vec::new(),
            options,
        }
    }

    /// Options this router normalizes paths with.
    pub fn router_options(&self) -> &RouterOptions {
        &self.options
    }

    /// **ROUTE REGISTRATION**
    ///
    /// **PARAMETERS**:
    /// - `method` - Any HTTP method token, matched case-insensitively
    /// - `path` - Template made of literals, `:name`, `*` and `**`
    /// - `handler` - Opaque value returned by [`find`](Self::find)
    ///
    /// **RETURNS**: `self` for chaining, or a validation error. Nothing is
    /// inserted when the template is rejected.
    pub fn add(&mut self, method: &str, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        let method = normalize_method(method)?;
        let path = self.normalize_path(path);
        let template = RouteTemplate::parse(&path)?;

        let index = match self.tree_index(&method) {
            Some(index) => index,
            None => {
                debug!("Creating route tree for {}", method);
                self.trees.push((method.clone(), Tree::new()));
                self.trees.len() - 1
            }
        };

        if self.trees[index].1.add(template, handler).is_some() {
            warn!("Replaced existing handler for {} {}", method, path);
        }
        debug!("Registered route {} {}", method, path);
        Ok(self)
    }

    /// Registers a `GET` route.
    pub fn get(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        self.add(HttpMethod::GET.as_str(), path, handler)
    }

    /// Registers a `POST` route.
    pub fn post(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        self.add(HttpMethod::POST.as_str(), path, handler)
    }

    /// Registers a `PUT` route.
    pub fn put(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        self.add(HttpMethod::PUT.as_str(), path, handler)
    }

    /// Registers a `PATCH` route.
    pub fn patch(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        self.add(HttpMethod::PATCH.as_str(), path, handler)
    }

    /// Registers a `DELETE` route.
    pub fn delete(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        self.add(HttpMethod::DELETE.as_str(), path, handler)
    }

    /// Registers a `HEAD` route.
    pub fn head(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        self.add(HttpMethod::HEAD.as_str(), path, handler)
    }

    /// Registers an `OPTIONS` route.
    pub fn options(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        self.add(HttpMethod::OPTIONS.as_str(), path, handler)
    }

    /// Registers a `TRACE` route.
    pub fn trace(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        self.add(HttpMethod::TRACE.as_str(), path, handler)
    }

    /// Registers a `CONNECT` route.
    pub fn connect(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError> {
        self.add(HttpMethod::CONNECT.as_str(), path, handler)
    }

    /// Registers `handler` under every method in [`HttpMethod::ALL`].
    pub fn all(&mut self, path: &str, handler: T) -> Result<&mut Self, RouterError>
    where
        T: Clone,
    {
        RouteTemplate::parse(&self.normalize_path(path))?;
        for method in HttpMethod::ALL {
            self.add(method.as_str(), path, handler.clone())?;
        }
        Ok(self)
    }

    /// **ROUTE LOOKUP**
    ///
    /// **RETURNS**:
    /// - `FindResult::Matched` - handler, parameters and status `200`
    /// - `FindResult::Unmatched` - status `404`/`405`/`501` (or `200` for
    ///   `OPTIONS`) with lazily computed allowed methods
    pub fn find(&self, method: &str, path: &str) -> FindResult<'_, T> {
        let method = method.to_ascii_uppercase();
        let path = self.normalize_path(path);
        let tree = self.tree(&method);

        if let Some((handler, params)) = tree.and_then(|tree| tree.find(&path)) {
            trace!("Matched {} {}", method, path);
            return FindResult::Matched(RouteMatch {
                handler,
                params,
                status: 200,
            });
        }

        trace!("No route for {} {}", method, path);
        FindResult::Unmatched(NoMatch::new(self, method, path, tree.is_some()))
    }

    /// **PATH NORMALIZATION**
    ///
    /// Prepends the configured prefix. Outside strict mode, leading slashes
    /// collapse to one and trailing slashes are dropped, except for `/`.
    pub fn normalize_path(&self, path: &str) -> String {
        let path = format!("{}{}", self.options.prefix, path);
        if self.options.strict {
            return path;
        }
        format!("/{}", path.trim_start_matches('/').trim_end_matches('/'))
    }

    /// **ALLOWED METHODS**
    ///
    /// Without `path`, every method that has routes. With `path`, the
    /// methods (other than `exclude`) that have a handler for it, in
    /// registration order.
    pub fn allowed_methods(&self, path: Option<&str>, exclude: Option<&str>) -> Vec<String> {
        match path {
            None => self.methods(),
            Some(path) => self.allowed_for_normalized(&self.normalize_path(path), exclude),
        }
    }

    pub(crate) fn allowed_for_normalized(&self, path: &str, exclude: Option<&str>) -> Vec<String> {
        self.trees
            .iter()
            .filter(|(method, _)| !exclude.is_some_and(|e| method.eq_ignore_ascii_case(e)))
            .filter(|(_, tree)| tree.contains(path))
            .map(|(method, _)| method.clone())
            .collect()
    }

    /// Methods with at least one route, in registration order.
    pub fn methods(&self) -> Vec<String> {
        self.trees.iter().map(|(method, _)| method.clone()).collect()
    }

    /// Number of registered `(method, path)` routes.
    pub fn route_count(&self) -> usize {
        self.trees.iter().map(|(_, tree)| tree.len()).sum()
    }

    /// True when no method has routes.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Drops every route of every method.
    pub fn clear(&mut self) {
        debug!("Clearing {} route trees", self.trees.len());
        self.trees.clear();
    }

    /// Renders the tree of `method` for debugging; empty if it has no routes.
    pub fn to_tree_string(&self, method: &str) -> String
    where
        T: HandlerName,
    {
        self.tree(&method.to_ascii_uppercase())
            .map(Tree::render)
            .unwrap_or_default()
    }

    fn tree_index(&self, method: &str) -> Option<usize> {
        self.trees.iter().position(|(m, _)| m == method)
    }

    fn tree(&self, method: &str) -> Option<&Tree<T>> {
        self.tree_index(method).map(|index| &self.trees[index].1)
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper-cases a method and checks it is an RFC 9110 token.
fn normalize_method(method: &str) -> Result<String, RouterError> {
    let is_token = !method.is_empty()
        && method
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));

    if !is_token {
        return Err(RouterError::validation(
            error_codes::INVALID_HTTP_METHOD,
            format!("Invalid HTTP method: {:?}", method),
        ));
    }
    Ok(method.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(routes: &[(&str, &str, &'static str)]) -> Router<&'static str> {
        let mut router = Router::new();
        for (method, path, handler) in routes {
            router.add(method, path, *handler).unwrap();
        }
        router
    }

    #[test]
    fn test_static_route() {
        let router = router(&[("GET", "/folders/files/bolt.gif", "bolt")]);
        let found = router.find("GET", "/folders/files/bolt.gif").into_match().unwrap();

        assert_eq!(found.handler, &"bolt");
        assert!(found.params.is_empty());
        assert_eq!(found.status, 200);
    }

    #[test]
    fn test_placeholder_route() {
        let router = router(&[("GET", "/static/*", "static")]);

        let found = router.find("GET", "/static/js").into_match().unwrap();
        assert_eq!(found.handler, &"static");
        assert_eq!(found.param("$"), Some("js"));

        assert!(!router.find("GET", "/static").is_match());
        assert!(!router.find("GET", "/static/js/app.js").is_match());
    }

    #[test]
    fn test_precedence() {
        let router = router(&[
            ("GET", "/geocoder/**", "any"),
            ("GET", "/geocoder/edit/:item", "item"),
            ("GET", "/geocoder/edit/email", "email"),
            ("GET", "/geocoder/exchange/:item", "exchange_item"),
            ("GET", "/geocoder/exchange/email", "exchange_email"),
        ]);

        assert_eq!(router.find("GET", "/geocoder/edit/email").handler(), Some(&"email"));
        assert_eq!(router.find("GET", "/geocoder/exchange/email").handler(), Some(&"exchange_email"));

        let found = router.find("GET", "/geocoder/edit/trekjs").into_match().unwrap();
        assert_eq!(found.handler, &"item");
        assert_eq!(found.param("item"), Some("trekjs"));

        let found = router.find("GET", "/geocoder/edit/email/any").into_match().unwrap();
        assert_eq!(found.handler, &"any");
        assert_eq!(found.param("$$"), Some("edit/email/any"));
    }

    #[test]
    fn test_placeholder_stays_within_one_segment() {
        let router = router(&[
            ("GET", "/geocoder/*", "placeholder"),
            ("GET", "/geocoder/edit/email", "email"),
        ]);

        assert_eq!(router.find("GET", "/geocoder/edit").handler(), Some(&"placeholder"));
        assert_eq!(router.find("GET", "/geocoder/edit/email").handler(), Some(&"email"));
        assert_eq!(router.find("GET", "/geocoder/edit/email/any").status(), 404);
    }

    #[test]
    fn test_numbered_wildcard_keys() {
        let router = router(&[
            ("GET", "/files/**/raw/**", "raw"),
            ("GET", "/pair/*/to/*", "pair"),
        ]);

        let found = router.find("GET", "/files/a/b/raw/c/d").into_match().unwrap();
        assert_eq!(found.param("$$0"), Some("a/b"));
        assert_eq!(found.param("$$1"), Some("c/d"));
        assert_eq!(found.param("$$"), None);

        let found = router.find("GET", "/pair/x/to/y").into_match().unwrap();
        assert_eq!(found.param("$0"), Some("x"));
        assert_eq!(found.param("$1"), Some("y"));
        assert_eq!(found.params.len(), 2);
    }

    #[test]
    fn test_match_any_reregistration_with_renamed_params() {
        let mut router = Router::new();
        router.get("/f/**/:a", "old").unwrap();
        router.get("/f/**/:b", "new").unwrap();

        let found = router.find("GET", "/f/x/y").into_match().unwrap();
        assert_eq!(found.handler, &"new");
        assert_eq!(found.param("b"), Some("y"));
        assert_eq!(router.route_count(), 1);
    }

    #[test]
    fn test_miss_status() {
        let router = router(&[("GET", "/x", "get"), ("PUT", "/x", "put")]);

        assert_eq!(router.find("POST", "/x").status(), 501);
        assert_eq!(router.find("PUT", "/unknown/path").status(), 405);
        assert_eq!(router.find("GET", "/unknown/path").status(), 404);
        assert_eq!(router.find("get", "/unknown/path").status(), 404);
        assert_eq!(router.find("OPTIONS", "/x").status(), 200);
    }

    #[test]
    fn test_allowed_methods() {
        let router = router(&[("GET", "/x", "get"), ("PUT", "/x", "put"), ("POST", "/y", "post")]);

        assert_eq!(router.allowed_methods(Some("/x"), None), vec!["GET", "PUT"]);
        assert_eq!(router.allowed_methods(Some("/x"), Some("GET")), vec!["PUT"]);
        assert_eq!(router.allowed_methods(Some("/x/"), Some("get")), vec!["PUT"]);
        assert_eq!(router.allowed_methods(None, None), vec!["GET", "PUT", "POST"]);
    }

    #[test]
    fn test_miss_allowed_is_lazy_and_cached() {
        let router = router(&[("GET", "/x", "get"), ("PUT", "/x", "put"), ("POST", "/y", "post")]);
        let miss = router.find("POST", "/x").into_miss().unwrap();

        assert_eq!(miss.status(), 405);
        assert_eq!(miss.allowed(), ["GET", "PUT"]);
        assert!(std::ptr::eq(miss.allowed(), miss.allowed()));
        assert_eq!(miss.allow_header(), "GET, PUT");
    }

    #[test]
    fn test_miss_without_tree_lists_every_method() {
        let router = router(&[("GET", "/x", "get"), ("PUT", "/x", "put")]);
        let miss = router.find("DELETE", "/x").into_miss().unwrap();

        assert_eq!(miss.status(), 501);
        assert_eq!(miss.allowed(), ["GET", "PUT"]);
    }

    #[test]
    fn test_normalize_path() {
        let router: Router<()> = Router::new();
        assert_eq!(router.normalize_path("/"), "/");
        assert_eq!(router.normalize_path(""), "/");
        assert_eq!(router.normalize_path("users/"), "/users");
        assert_eq!(router.normalize_path("//users//"), "/users");

        let router: Router<()> = Router::with_options(RouterOptions::new().with_strict(true));
        assert_eq!(router.normalize_path("users/"), "users/");

        let router: Router<()> = Router::with_options(RouterOptions::new().with_prefix("/api"));
        assert_eq!(router.normalize_path("/"), "/api");
        assert_eq!(router.normalize_path("/users/"), "/api/users");
    }

    #[test]
    fn test_normalize_path_idempotent() {
        let paths = ["", "/", "//", "x", "/x/", "x//", "//x/y//", "/a//b/"];
        for strict in [false, true] {
            let router: Router<()> = Router::with_options(RouterOptions::new().with_strict(strict));
            for path in paths {
                let once = router.normalize_path(path);
                assert_eq!(router.normalize_path(&once), once, "strict={} path={:?}", strict, path);
            }
        }
    }

    #[test]
    fn test_strict_mode_distinguishes_trailing_slash() {
        let mut router = Router::with_options(RouterOptions::new().with_strict(true));
        router.get("/users/", "slash").unwrap().get("/users", "bare").unwrap();

        assert_eq!(router.find("GET", "/users/").handler(), Some(&"slash"));
        assert_eq!(router.find("GET", "/users").handler(), Some(&"bare"));
    }

    #[test]
    fn test_prefix_applies_to_registration_and_lookup() {
        let mut router = Router::with_options(RouterOptions::new().with_prefix("/api"));
        router.get("/users/:id", "user").unwrap();

        let found = router.find("GET", "/users/9").into_match().unwrap();
        assert_eq!(found.param("id"), Some("9"));
        assert!(!router.find("GET", "/api/users/9").is_match());
    }

    #[test]
    fn test_invalid_method_rejected() {
        let mut router: Router<()> = Router::new();
        let err = router.add("GE T", "/x", ()).unwrap_err();
        assert_eq!(err.code(), error_codes::INVALID_HTTP_METHOD);
        assert!(router.add("", "/x", ()).is_err());
        assert!(router.is_empty());
    }

    #[test]
    fn test_rejected_template_creates_no_tree() {
        let mut router: Router<()> = Router::new();
        assert!(router.post("/users/:", ()).is_err());
        assert!(router.methods().is_empty());
        assert_eq!(router.find("POST", "/users").status(), 501);
    }

    #[test]
    fn test_all_and_route_count() {
        let mut router = Router::new();
        router.all("/health", "health").unwrap();

        assert_eq!(router.route_count(), HttpMethod::ALL.len());
        for method in HttpMethod::ALL {
            assert_eq!(router.find(method.as_str(), "/health").handler(), Some(&"health"));
        }

        router.clear();
        assert!(router.is_empty());
        assert_eq!(router.route_count(), 0);
    }

    #[test]
    fn test_reregistration_replaces_handler() {
        let mut router = Router::new();
        router.get("/users/:id", "old").unwrap();
        router.get("/users/:user", "new").unwrap();

        let found = router.find("GET", "/users/3").into_match().unwrap();
        assert_eq!(found.handler, &"new");
        assert_eq!(found.param("user"), Some("3"));
        assert_eq!(found.param("id"), None);
        assert_eq!(router.route_count(), 1);
    }

    #[test]
    fn test_to_tree_string_unknown_method() {
        let router = router(&[("GET", "/x", "get")]);
        assert_eq!(router.to_tree_string("POST"), "");
        assert_eq!(router.to_tree_string("get"), "└── /x get() children=0\n");
    }
}
