//! Built-in request handlers
//!
//! Ready-to-use handlers for the routes a small server usually needs.

pub mod health;
pub mod range;
pub mod text;

#[cfg(feature = "native")]
pub mod file;

pub use health::{Health, HealthCheck, HealthStatus};
pub use text::Text;

#[cfg(feature = "native")]
pub use file::{ServeFile, ServeFileConfig};
