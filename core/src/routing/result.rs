//! Lookup outcomes.

use crate::routing::router::Router;
use crate::routing::types::RouteMatch;
use once_cell::unsync::OnceCell;
use std::fmt;

/// Lookup outcome of [`Router::find`].
#[derive(Debug)]
pub enum FindResult<'r, T> {
    /// A route matched.
    Matched(RouteMatch<'r, T>),
    /// No route matched.
    Unmatched(NoMatch<'r, T>),
}

impl<'r, T> FindResult<'r, T> {
    /// `200` on a match, otherwise the miss status.
    pub fn status(&self) -> u16 {
        match self {
            FindResult::Matched(found) => found.status,
            FindResult::Unmatched(miss) => miss.status(),
        }
    }

    /// True for [`FindResult::Matched`].
    pub fn is_match(&self) -> bool {
        matches!(self, FindResult::Matched(_))
    }

    /// Matched handler, if any.
    pub fn handler(&self) -> Option<&'r T> {
        match self {
            FindResult::Matched(found) => Some(found.handler),
            FindResult::Unmatched(_) => None,
        }
    }

    /// Converts into the match, dropping a miss.
    pub fn into_match(self) -> Option<RouteMatch<'r, T>> {
        match self {
            FindResult::Matched(found) => Some(found),
            FindResult::Unmatched(_) => None,
        }
    }

    /// Converts into the miss, dropping a match.
    pub fn into_miss(self) -> Option<NoMatch<'r, T>> {
        match self {
            FindResult::Matched(_) => None,
            FindResult::Unmatched(miss) => Some(miss),
        }
    }
}

/// A lookup miss.
///
/// The status is fixed at construction. The methods that would have
/// matched the path are only computed on the first call to
/// [`allowed`](Self::allowed) and then cached.
pub struct NoMatch<'r, T> {
    router: &'r Router<T>,
    method: String,
    path: String,
    has_tree: bool,
    status: u16,
    allowed: OnceCell<Vec<String>>,
}

impl<'r, T> NoMatch<'r, T> {
    /// `method` is upper-case and `path` already normalized.
    pub(crate) fn new(router: &'r Router<T>, method: String, path: String, has_tree: bool) -> Self {
        let status = match method.as_str() {
            "GET" => 404,
            "OPTIONS" => 200,
            _ if has_tree => 405,
            _ => 501,
        };

        Self {
            router,
            method,
            path,
            has_tree,
            status,
            allowed: OnceCell::new(),
        }
    }

    /// `404` for `GET`, `200` for `OPTIONS`, `405` when the method has
    /// routes and `501` otherwise.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Upper-cased requested method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Normalized path that was looked up.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Methods with a handler for this path, excluding the requested one.
    /// When the requested method has no routes at all, every registered
    /// method is listed.
    pub fn allowed(&self) -> &[String] {
        self.allowed.get_or_init(|| {
            if self.has_tree {
                self.router
                    .allowed_for_normalized(&self.path, Some(self.method.as_str()))
            } else {
                self.router.methods()
            }
        })
    }

    /// `Allow` header value, e.g. `"GET, PUT"`.
    pub fn allow_header(&self) -> String {
        self.allowed().join(", ")
    }
}

impl<'r, T> fmt::Debug for NoMatch<'r, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoMatch")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("status", &self.status)
            .field("allowed", &self.allowed.get())
            .finish()
    }
}
