//! muxy-core: Exact-match HTTP multiplexer
//!
//! A [`Mux`] maps request paths to handlers by exact string equality and
//! answers everything else with `404 Page not found`. Handlers can be
//! wrapped by one [`Middleware`] such as the request [`Logger`] before they
//! are registered.
//!
//! ## Features
//! - `native` (default) - tokio/hyper server and the file handler
//!
//! ## Example
//! ```
//! use muxy_core::{logger, Method, Mux, Request, Response};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mux = Mux::new();
//! mux.register("/health", logger(|_req: Request| async { Response::text("healthy") }))
//!     .unwrap();
//!
//! let res = mux.dispatch(Request::new(Method::Get, "/health")).await;
//! assert_eq!(res.body_string().as_deref(), Some("healthy"));
//!
//! let res = mux.dispatch(Request::new(Method::Get, "/nope")).await;
//! assert_eq!(res.status.as_u16(), 404);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod handler;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod router;

#[cfg(feature = "native")]
pub mod server;

// Re-exports
pub use error::{Error, Result};
pub use handler::{Handler, HandlerFuture, SharedHandler};
pub use request::{Method, Request, RequestBuilder};
pub use response::{Response, ResponseBuilder, StatusCode, NOT_FOUND_BODY};
pub use router::Mux;

// Middleware re-exports
pub use middleware::logger::logger;
pub use middleware::{Logger, LoggerConfig, Middleware, Wrapped};

// Handlers re-exports
pub use handlers::{Health, HealthCheck, HealthStatus, Text};

#[cfg(feature = "native")]
pub use handlers::{ServeFile, ServeFileConfig};

#[cfg(feature = "native")]
pub use server::{create_optimized_socket, from_hyper_request, to_hyper_response};

#[cfg(feature = "native")]
pub use server::{ConnContext, ConnInfo, Server, ServerConfig};
