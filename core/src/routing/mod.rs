//! Route trees, template parsing and lookup results.

pub(crate) mod node;
pub mod parameters;
pub mod parser;
pub mod result;
pub mod router;
pub mod types;

pub use parameters::Parameters;
pub use parser::{compile_pattern, tokenize, Token};
pub use result::{FindResult, NoMatch};
pub use router::Router;
pub use types::{HandlerName, HttpMethod, RouteMatch};
