//! Health check handler
//!
//! Answers `200 healthy` while every registered check passes and the
//! readiness flag is set, `503` otherwise.

use crate::handler::{Handler, HandlerFuture};
use crate::{Request, Response, ResponseBuilder, StatusCode};
use std::sync::atomic::{AtomicBool, Ordering};

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    NotReady,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
            HealthStatus::NotReady => "not ready",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy | HealthStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Individual named health check
pub struct HealthCheck {
    pub name: String,
    check: Box<dyn Fn() -> bool + Send + Sync>,
}

impl HealthCheck {
    pub fn new(name: impl Into<String>, check: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }

    pub fn run(&self) -> bool {
        (self.check)()
    }
}

/// Health handler
pub struct Health {
    checks: Vec<HealthCheck>,
    ready: AtomicBool,
}

impl Health {
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            ready: AtomicBool::new(true),
        }
    }

    /// Add a simple check
    pub fn add_check(
        mut self,
        name: impl Into<String>,
        check: impl Fn() -> bool + Send + Sync + 'static,
    ) -> Self {
        self.checks.push(HealthCheck::new(name, check));
        self
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Get ready state
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Run all checks and fold them into one status
    pub fn status(&self) -> HealthStatus {
        if !self.is_ready() {
            return HealthStatus::NotReady;
        }

        for check in &self.checks {
            if !check.run() {
                tracing::warn!(check = %check.name, "health check failed");
                return HealthStatus::Unhealthy;
            }
        }

        HealthStatus::Healthy
    }

    pub fn response(&self) -> Response {
        let status = self.status();
        ResponseBuilder::new(status.status_code())
            .header("content-type", "text/plain; charset=utf-8")
            .body(status.as_str())
            .build()
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for Health {
    fn call(&self, _req: Request) -> HandlerFuture {
        let res = self.response();
        Box::pin(async move { res })
    }
}
