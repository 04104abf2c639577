//! Flat re-exports of the public surface.

pub use crate::config::RouterOptions;
pub use crate::errors::{error_codes, RouterError};
pub use crate::routing::{FindResult, HandlerName, HttpMethod, NoMatch, RouteMatch, Router};
