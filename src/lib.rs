//! A lightweight, high performance HTTP request router.
//!
//! Routes are stored in a compressing dynamic trie (radix tree), one per
//! request method. The router is optimized for a small memory footprint and
//! scales well even with very long paths and a large number of routes.
//!
//! ```rust
//! use routetree::{Dispatch, Router};
//! use http::{Method, StatusCode};
//!
//! let mut router = Router::default();
//! router.get("/", "index");
//! router.get("/hello/:user", "hello");
//!
//! match router.dispatch(&Method::GET, "/hello/ferris") {
//!     Dispatch::Matched(matched) => {
//!         assert_eq!(*matched.value.handler(), "hello");
//!         assert_eq!(matched.params.get("user"), Some("ferris"));
//!     }
//!     _ => unreachable!(),
//! }
//!
//! // a route exists without the trailing slash
//! match router.dispatch(&Method::GET, "/hello/ferris/") {
//!     Dispatch::Redirect { location, status } => {
//!         assert_eq!(location, "/hello/ferris");
//!         assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! The router matches incoming requests by the request method and the path.
//! If a handler is registered for this path and method, [`Router::dispatch`]
//! hands it back together with the parameters. Otherwise it decides between a
//! redirect, an automatic `OPTIONS` reply, `405 Method Not Allowed`, and
//! `404 Not Found`, according to the policy fields on the [`Router`].
//!
//! # Parameters
//!
//! The registered path, against which the router matches incoming requests, can
//! contain two types of parameters:
//!
//! ```ignore
//!  Syntax    Type
//!  :name     named parameter
//!  *name     catch-all parameter
//! ```
//!
//! Named parameters are dynamic path segments. They match anything until the
//! next `/` or the path end:
//!
//! ```ignore
//!  Path: /blog/:category/:post
//!
//!  Requests:
//!   /blog/rust/request-routers            match: category="rust", post="request-routers"
//!   /blog/rust/request-routers/           no match, but the router would redirect
//!   /blog/rust/                           no match
//!   /blog/rust/request-routers/comments   no match
//! ```
//!
//! Catch-all parameters match anything until the path end, including the
//! directory index (the `/` before the catch-all). Since they match anything
//! until the end, catch-all parameters must always be the final path element.
//!
//! ```ignore
//!  Path: /files/*filepath
//!
//!  Requests:
//!   /files/                             match: filepath="/"
//!   /files/LICENSE                      match: filepath="/LICENSE"
//!   /files/templates/article.html       match: filepath="/templates/article.html"
//!   /files                              no match, but the router would redirect
//! ```
//!
//! The values of parameters are collected into [`Params`], in the order they
//! appear in the path. Values can be read by name, or parsed on demand:
//!
//! ```rust
//! # use routetree::Router;
//! # use http::Method;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::default();
//! router.get("/users/:id", ());
//!
//! let matched = router.lookup(&Method::GET, "/users/42")?;
//! assert_eq!(matched.params.get("id"), Some("42"));
//! assert_eq!(matched.params.get_u64("id")?, 42);
//! # Ok(())
//! # }
//! ```
//!
//! A named parameter can only be registered where no static route shares the
//! segment, and each segment holds at most one parameter. Violations are
//! reported when the route is registered, see [`InsertError`].
#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod params;
mod path;
mod router;
mod tree;

#[macro_use]
extern crate log;

pub use error::{InsertError, MatchError, ParamError, UrlError};
pub use params::{Params, ParamsIter};
pub use path::clean_path;
pub use router::{Dispatch, Route, Router};
pub use tree::{Match, Node};
