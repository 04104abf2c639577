//! # FORZIUM ROUTER
//!
//! **RADIX-TREE HTTP PATH ROUTER**
//!
//! **ARCHITECTURE**: One compressed prefix tree per HTTP method
//! **GUARANTEE**: Static > parameter > deep-wildcard precedence, independent of registration order
//! **COMPATIBILITY**: `404`/`405`/`501` miss statuses with lazily computed `Allow` lists
//!
//! ## USAGE
//!
//! ```rust
//! use forzium_router::api::*;
//!
//! let mut router = Router::new();
//! router.get("/users/:id", "show_user")?.put("/users/:id", "update_user")?;
//!
//! let found = router.find("GET", "/users/42").into_match().unwrap();
//! assert_eq!(found.handler, &"show_user");
//! assert_eq!(found.param("id"), Some("42"));
//!
//! let miss = router.find("DELETE", "/users/42").into_miss().unwrap();
//! assert_eq!(miss.status(), 501);
//! assert_eq!(miss.allow_header(), "GET, PUT");
//! # Ok::<(), RouterError>(())
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod routing;
