//! muxy-router: Zero-dependency exact-match path table
//!
//! The routing table behind `muxy_core::Mux`. It stores one value per path
//! and answers lookups by exact string equality.
//!
//! ## Matching rules
//! - Paths are compared byte-for-byte (case-sensitive)
//! - No normalization: `/users` and `/users/` are different routes
//! - No parameters, no wildcards, no prefixes
//! - The query string never takes part in a match, use [`split_target`]
//!   to separate it from a raw request target first
//!
//! ## Example
//! ```
//! use muxy_router::Router;
//!
//! let mut router = Router::new();
//! router.insert("/health", 0);
//! router.insert("/hello", 1);
//!
//! assert_eq!(router.find("/hello"), Some(&1));
//! assert_eq!(router.find("/hello/"), None);
//! ```

use std::collections::HashMap;

/// Exact-match path table
///
/// Not synchronized on its own; callers that share it across threads wrap
/// it in a lock.
#[derive(Debug, Clone)]
pub struct Router<T> {
    /// Path -> value
    routes: HashMap<String, T>,
}

impl<T> Router<T> {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Insert a route, replacing any value already stored for `path`
    ///
    /// Returns the replaced value, if any.
    ///
    /// # Example
    /// ```
    /// use muxy_router::Router;
    ///
    /// let mut router = Router::new();
    /// assert_eq!(router.insert("/bye", "bye"), None);
    /// assert_eq!(router.insert("/bye", ":("), Some("bye"));
    /// assert_eq!(router.find("/bye"), Some(&":("));
    /// ```
    pub fn insert(&mut self, path: impl Into<String>, value: T) -> Option<T> {
        self.routes.insert(path.into(), value)
    }

    /// Find the value registered for exactly `path`
    pub fn find(&self, path: &str) -> Option<&T> {
        self.routes.get(path)
    }

    /// Remove a route
    pub fn remove(&mut self, path: &str) -> Option<T> {
        self.routes.remove(path)
    }

    /// Check if a path is registered
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.routes.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a raw request target into its path and query components
///
/// The query is returned without its leading `?`. A target with a bare `?`
/// yields an empty query.
///
/// # Example
/// ```
/// use muxy_router::split_target;
///
/// assert_eq!(split_target("/hello?x=1"), ("/hello", Some("x=1")));
/// assert_eq!(split_target("/hello"), ("/hello", None));
/// ```
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_routes() {
        let mut router = Router::new();
        router.insert("/", 0);
        router.insert("/users", 1);
        router.insert("/users/list", 2);

        assert_eq!(router.find("/"), Some(&0));
        assert_eq!(router.find("/users"), Some(&1));
        assert_eq!(router.find("/users/list"), Some(&2));
        assert_eq!(router.find("/unknown"), None);
    }

    #[test]
    fn test_no_prefix_match() {
        let mut router = Router::new();
        router.insert("/static", 1);

        assert_eq!(router.find("/static/app.js"), None);
        assert_eq!(router.find("/stat"), None);
    }

    #[test]
    fn test_case_sensitive() {
        let mut router = Router::new();
        router.insert("/Health", 1);

        assert_eq!(router.find("/Health"), Some(&1));
        assert_eq!(router.find("/health"), None);
    }

    #[test]
    fn test_trailing_slash_is_distinct() {
        let mut router = Router::new();
        router.insert("/users/", 1);

        assert_eq!(router.find("/users/"), Some(&1));
        assert_eq!(router.find("/users"), None);
    }

    #[test]
    fn test_last_insert_wins() {
        let mut router = Router::new();
        assert_eq!(router.insert("/bye", 1), None);
        assert_eq!(router.insert("/bye", 2), Some(1));

        assert_eq!(router.find("/bye"), Some(&2));
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut router = Router::new();
        router.insert("/hello", 1);

        assert!(router.contains("/hello"));
        assert_eq!(router.remove("/hello"), Some(1));
        assert!(!router.contains("/hello"));
        assert!(router.is_empty());
    }

    #[test]
    fn test_paths_sorted() {
        let mut router = Router::new();
        router.insert("/hello", 1);
        router.insert("/bye", 2);
        router.insert("/health", 3);

        assert_eq!(router.paths(), vec!["/bye", "/health", "/hello"]);
    }

    #[test]
    fn test_split_target() {
        assert_eq!(split_target("/"), ("/", None));
        assert_eq!(split_target("/hello?x=1&y=2"), ("/hello", Some("x=1&y=2")));
        assert_eq!(split_target("/hello?"), ("/hello", Some("")));
        assert_eq!(split_target("/a?b?c"), ("/a", Some("b?c")));
    }
}
