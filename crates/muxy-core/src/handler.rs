//! Request handler capability

use crate::{Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`Handler::call`]
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Anything that turns a request into a response
///
/// Implemented for every `Fn(Request) -> impl Future<Output = Response>`
/// closure, so async closures can be registered directly. A handler may be
/// invoked concurrently from many connections and is responsible for its own
/// internal synchronization.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, req: Request) -> HandlerFuture {
        Box::pin(self(req))
    }
}

/// Handler shared between routes and connections
pub type SharedHandler = Arc<dyn Handler>;
