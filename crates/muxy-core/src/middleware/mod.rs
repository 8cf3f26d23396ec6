//! Middleware implementations
//!
//! A middleware wraps exactly one handler. Compose it with [`Middleware::wrap`]
//! before registering the result on a [`Mux`](crate::Mux).

pub mod logger;

pub use logger::{Logger, LoggerConfig};

use crate::handler::{Handler, HandlerFuture};
use crate::{Request, Response};
use std::sync::Arc;

/// Middleware trait - process request/response around a handler
pub trait Middleware: Send + Sync + 'static {
    /// Process request before handler, return a response to short-circuit
    fn before(&self, req: &mut Request) -> Option<Response>;

    /// Process response after handler
    fn after(&self, _res: &mut Response) {}

    /// Wrap `inner` so every call passes through this middleware
    fn wrap<H: Handler>(self, inner: H) -> Wrapped<Self, H>
    where
        Self: Sized,
    {
        Wrapped::new(self, inner)
    }
}

/// A handler wrapped by one middleware
pub struct Wrapped<M, H> {
    middleware: Arc<M>,
    inner: H,
}

impl<M: Middleware, H: Handler> Wrapped<M, H> {
    pub fn new(middleware: M, inner: H) -> Self {
        Self {
            middleware: Arc::new(middleware),
            inner,
        }
    }
}

impl<M: Middleware, H: Handler> Handler for Wrapped<M, H> {
    fn call(&self, mut req: Request) -> HandlerFuture {
        if let Some(res) = self.middleware.before(&mut req) {
            return Box::pin(async move { res });
        }

        let middleware = Arc::clone(&self.middleware);
        let pending = self.inner.call(req);
        Box::pin(async move {
            let mut res = pending.await;
            middleware.after(&mut res);
            res
        })
    }
}
