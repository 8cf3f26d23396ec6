//! Request logging middleware
//!
//! Emits one log event per request before the wrapped handler runs. Never
//! touches the request or the response.

use super::{Middleware, Wrapped};
use crate::handler::Handler;
use crate::{Request, Response};
use tracing::Level;

/// Logger configuration
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    /// Log message
    pub message: String,
    /// Level the event is emitted at
    pub level: Level,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            message: "I got a request".to_string(),
            level: Level::INFO,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

/// Logging middleware
#[derive(Default)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }
}

/// Wrap `inner` with a default [`Logger`]
pub fn logger<H: Handler>(inner: H) -> Wrapped<Logger, H> {
    Logger::default().wrap(inner)
}

macro_rules! emit {
    ($level:expr, $req:expr, $message:expr) => {
        tracing::event!(
            $level,
            method = %$req.method,
            path = %$req.path,
            remote_addr = ?$req.remote_addr,
            "{}",
            $message
        )
    };
}

impl Middleware for Logger {
    fn before(&self, req: &mut Request) -> Option<Response> {
        let message = &self.config.message;
        let level = self.config.level;

        if level == Level::ERROR {
            emit!(Level::ERROR, req, message);
        } else if level == Level::WARN {
            emit!(Level::WARN, req, message);
        } else if level == Level::INFO {
            emit!(Level::INFO, req, message);
        } else if level == Level::DEBUG {
            emit!(Level::DEBUG, req, message);
        } else {
            emit!(Level::TRACE, req, message);
        }

        None
    }
}
