//! Methods, matches and handler naming.

use crate::errors::{error_codes, RouterError};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// HTTP methods with registration shortcuts on [`Router`](crate::routing::Router).
///
/// Routes may still be registered under any other method token through
/// [`Router::add`](crate::routing::Router::add).
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    GET,
    /// `POST`
    POST,
    /// `PUT`
    PUT,
    /// `PATCH`
    PATCH,
    /// `DELETE`
    DELETE,
    /// `HEAD`
    HEAD,
    /// `OPTIONS`
    OPTIONS,
    /// `TRACE`
    TRACE,
    /// `CONNECT`
    CONNECT,
}

impl HttpMethod {
    /// Every method covered by [`Router::all`](crate::routing::Router::all).
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::PATCH,
        HttpMethod::DELETE,
        HttpMethod::HEAD,
        HttpMethod::OPTIONS,
        HttpMethod::TRACE,
        HttpMethod::CONNECT,
    ];

    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::TRACE => "TRACE",
            HttpMethod::CONNECT => "CONNECT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RouterError;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(method))
            .ok_or_else(|| {
                RouterError::validation(
                    error_codes::INVALID_HTTP_METHOD,
                    format!("Invalid HTTP method: {}", method),
                )
            })
    }
}

/// Successful lookup: the registered handler and the captured parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'r, T> {
    /// Handler registered for the route.
    pub handler: &'r T,
    /// Captured values keyed by parameter name.
    pub params: HashMap<String, String>,
    /// Always `200`.
    pub status: u16,
}

impl<'r, T> RouteMatch<'r, T> {
    /// Captured value for `name`, if the route declared it.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Display name of a handler in [`Router::to_tree_string`](crate::routing::Router::to_tree_string).
///
/// `None` (or an empty name) renders as `ƒ`.
pub trait HandlerName {
    /// Name to print next to the node holding this handler.
    fn handler_name(&self) -> Option<&str>;
}

impl HandlerName for &str {
    fn handler_name(&self) -> Option<&str> {
        Some(*self).filter(|name| !name.is_empty())
    }
}

impl HandlerName for String {
    fn handler_name(&self) -> Option<&str> {
        Some(self.as_str()).filter(|name| !name.is_empty())
    }
}

impl HandlerName for () {
    fn handler_name(&self) -> Option<&str> {
        None
    }
}

impl<H: HandlerName + ?Sized> HandlerName for Box<H> {
    fn handler_name(&self) -> Option<&str> {
        (**self).handler_name()
    }
}

impl<H: HandlerName + ?Sized> HandlerName for Arc<H> {
    fn handler_name(&self) -> Option<&str> {
        (**self).handler_name()
    }
}
