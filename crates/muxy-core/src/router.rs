//! Thread-safe exact-match request multiplexer
//!
//! Wraps a [`muxy_router::Router`] of shared handlers in a reader/writer
//! lock. Registration takes the write lock; dispatch takes the read lock
//! just long enough to clone the matching handler out, then runs it with
//! the lock released.

use crate::handler::{Handler, SharedHandler};
use crate::{Error, Request, Response, Result};
use muxy_router::Router;
use parking_lot::RwLock;
use std::sync::Arc;

/// Request multiplexer
///
/// Maps request paths to handlers by exact string equality. Unregistered
/// paths get [`Response::not_found`]. Independent instances share nothing.
pub struct Mux {
    routes: RwLock<Router<SharedHandler>>,
}

impl Mux {
    /// Create an empty multiplexer
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(Router::new()),
        }
    }

    /// Register `handler` for `path`, replacing any previous registration
    pub fn register<H: Handler>(&self, path: &str, handler: H) -> Result<()> {
        self.register_shared(path, Arc::new(handler))
    }

    /// Register a handler that may also be bound to other paths
    pub fn register_shared(&self, path: &str, handler: SharedHandler) -> Result<()> {
        if path.is_empty() {
            return Err(Error::InvalidPath(path.to_string()));
        }

        let replaced = self.routes.write().insert(path, handler).is_some();
        tracing::debug!(path, replaced, "route registered");
        Ok(())
    }

    /// Find the handler registered for exactly `path`
    pub fn lookup(&self, path: &str) -> Option<SharedHandler> {
        self.routes.read().find(path).cloned()
    }

    /// Route a request to its handler
    ///
    /// Only the path component takes part in the match. The handler's
    /// response is returned untouched.
    pub async fn dispatch(&self, req: Request) -> Response {
        match self.lookup(&req.path) {
            Some(handler) => handler.call(req).await,
            None => {
                tracing::debug!(path = %req.path, "no route");
                Response::not_found()
            }
        }
    }

    /// Check if a path is registered
    pub fn contains(&self, path: &str) -> bool {
        self.routes.read().contains(path)
    }

    /// Number of registered paths
    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<String> {
        self.routes.read().paths()
    }
}

impl Default for Mux {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn get(target: &str) -> Request {
        Request::new(Method::Get, target)
    }

    #[tokio::test]
    async fn test_health_scenario() {
        let mux = Mux::new();
        mux.register("/health", |_req: Request| async { Response::text("healthy") })
            .unwrap();

        let res = mux.dispatch(get("/health")).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body_string().as_deref(), Some("healthy"));

        let res = mux.dispatch(get("/nope")).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.body_string().as_deref(), Some("Page not found"));
    }

    #[tokio::test]
    async fn test_miss_does_not_invoke_handlers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mux = Mux::new();
        let counter = Arc::clone(&calls);
        mux.register("/hello", move |_req: Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Response::text("bye") }
        })
        .unwrap();

        for target in ["/", "/hello/", "/Hello", "/hell", "/hello/x"] {
            assert_eq!(mux.dispatch(get(target)).await, Response::not_found());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reregister_replaces() {
        let mux = Mux::new();
        mux.register("/bye", |_req: Request| async { Response::text("bye") })
            .unwrap();
        mux.register("/bye", |_req: Request| async { Response::text(":(") })
            .unwrap();

        let res = mux.dispatch(get("/bye")).await;
        assert_eq!(res.body_string().as_deref(), Some(":("));
        assert_eq!(mux.len(), 1);
    }

    #[tokio::test]
    async fn test_query_string_ignored() {
        let mux = Mux::new();
        mux.register("/hello", |req: Request| async move {
            Response::text(req.query.unwrap_or_default())
        })
        .unwrap();

        let res = mux.dispatch(get("/hello?x=1")).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body_string().as_deref(), Some("x=1"));
    }

    #[tokio::test]
    async fn test_shared_handler_on_two_paths() {
        let mux = Mux::new();
        let handler: SharedHandler = Arc::new(|req: Request| async move { Response::text(req.path) });
        mux.register_shared("/a", Arc::clone(&handler)).unwrap();
        mux.register_shared("/b", handler).unwrap();

        assert_eq!(mux.dispatch(get("/a")).await.body_string().as_deref(), Some("/a"));
        assert_eq!(mux.dispatch(get("/b")).await.body_string().as_deref(), Some("/b"));
        assert_eq!(mux.paths(), vec!["/a", "/b"]);
    }

    #[test]
    fn test_empty_path_rejected() {
        let mux = Mux::new();
        let err = mux
            .register("", |_req: Request| async { Response::ok() })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
        assert!(mux.is_empty());
    }

    #[tokio::test]
    async fn test_handler_response_unmodified() {
        let expected = crate::ResponseBuilder::new(StatusCode(418))
            .header("x-custom", "value")
            .body("teapot")
            .build();
        let mux = Mux::new();
        let res = expected.clone();
        mux.register("/tea", move |_req: Request| {
            let res = res.clone();
            async move { res }
        })
        .unwrap();

        assert_eq!(mux.dispatch(get("/tea")).await, expected);
    }
}
