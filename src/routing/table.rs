//! Route table module
//!
//! Maps (method, path) pairs to handlers on top of a [`PathIndex`] and
//! tells "no such path" apart from "path exists, method does not".

use std::collections::HashMap;

use hyper::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::linear::LinearIndex;
use super::trie::{PathIndex, PathTrie};

/// A registered (method, pattern) to handler association.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub method: Method,
    pub pattern: String,
    pub handler: H,
}

impl<H> Route<H> {
    pub fn new(method: Method, pattern: impl Into<String>, handler: H) -> Self {
        Self {
            method,
            pattern: pattern.into(),
            handler,
        }
    }
}

/// Handlers registered under one exact path, keyed by method.
#[derive(Debug, Clone)]
pub struct MethodMap<H> {
    handlers: HashMap<Method, H>,
}

impl<H> MethodMap<H> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Returns the handler previously registered for `method`.
    pub fn insert(&mut self, method: Method, handler: H) -> Option<H> {
        self.handlers.insert(method, handler)
    }

    pub fn get(&self, method: &Method) -> Option<&H> {
        self.handlers.get(method)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered methods, sorted by name.
    pub fn allowed(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.handlers.keys().cloned().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }
}

impl<H> Default for MethodMap<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a request could not be resolved to a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed { allowed: Vec<Method> },
}

/// Storage backing a [`RouteTable`].
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Segment trie, lookup cost grows with path length
    #[default]
    Trie,
    /// Ordered list, lookup cost grows with route count
    Linear,
}

type BoxedIndex<H> = Box<dyn PathIndex<MethodMap<H>> + Send + Sync>;

pub struct RouteTable<H> {
    index: BoxedIndex<H>,
    len: usize,
}

impl<H: Send + Sync + 'static> RouteTable<H> {
    pub fn new() -> Self {
        Self::with_kind(IndexKind::default())
    }

    pub fn with_kind(kind: IndexKind) -> Self {
        match kind {
            IndexKind::Trie => Self::from_index(Box::new(PathTrie::new())),
            IndexKind::Linear => Self::from_index(Box::new(LinearIndex::new())),
        }
    }
}

impl<H: Send + Sync + 'static> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTable<H> {
    pub fn from_index(index: BoxedIndex<H>) -> Self {
        Self { index, len: 0 }
    }

    /// Register `handler` for `method` on `pattern`.
    ///
    /// Registering the same pair again replaces the handler.
    pub fn register(&mut self, method: Method, pattern: &str, handler: H) {
        let mut methods = self.index.take(pattern).unwrap_or_default();
        if methods.insert(method, handler).is_none() {
            self.len += 1;
        }
        self.index.put(pattern, methods);
    }

    /// Find the handler for `method` on exactly `path`.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<&H, RouteError> {
        let methods = match self.index.get(path) {
            Some(methods) if !methods.is_empty() => methods,
            _ => return Err(RouteError::NotFound),
        };

        methods
            .get(method)
            .ok_or_else(|| RouteError::MethodNotAllowed {
                allowed: methods.allowed(),
            })
    }

    /// Number of distinct (method, pattern) pairs.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<H> Extend<Route<H>> for RouteTable<H> {
    fn extend<T: IntoIterator<Item = Route<H>>>(&mut self, routes: T) {
        for route in routes {
            self.register(route.method, &route.pattern, route.handler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Index that answers every lookup with one fixed value.
    struct FixedIndex(Option<MethodMap<&'static str>>);

    impl PathIndex<MethodMap<&'static str>> for FixedIndex {
        fn get(&self, _path: &str) -> Option<&MethodMap<&'static str>> {
            self.0.as_ref()
        }

        fn put(&mut self, _path: &str, value: MethodMap<&'static str>) {
            self.0 = Some(value);
        }

        fn take(&mut self, _path: &str) -> Option<MethodMap<&'static str>> {
            self.0.take()
        }
    }

    fn fixed(methods: &[(Method, &'static str)]) -> RouteTable<&'static str> {
        let mut map = MethodMap::new();
        for (method, handler) in methods {
            map.insert(method.clone(), *handler);
        }
        RouteTable::from_index(Box::new(FixedIndex(Some(map))))
    }

    #[test]
    fn test_resolve_match() {
        let table = fixed(&[(Method::GET, "get")]);
        assert_eq!(table.resolve(&Method::GET, "/"), Ok(&"get"));
    }

    #[test]
    fn test_resolve_absent_is_not_found() {
        let table: RouteTable<&str> = RouteTable::from_index(Box::new(FixedIndex(None)));
        assert_eq!(table.resolve(&Method::GET, "/"), Err(RouteError::NotFound));
    }

    #[test]
    fn test_resolve_empty_method_map_is_not_found() {
        let table = fixed(&[]);
        assert_eq!(table.resolve(&Method::GET, "/"), Err(RouteError::NotFound));
    }

    #[test]
    fn test_resolve_wrong_method() {
        let table = fixed(&[(Method::GET, "get")]);
        assert_eq!(
            table.resolve(&Method::POST, "/"),
            Err(RouteError::MethodNotAllowed {
                allowed: vec![Method::GET]
            })
        );
    }

    #[test]
    fn test_not_found_vs_method_not_allowed() {
        for kind in [IndexKind::Trie, IndexKind::Linear] {
            let mut table = RouteTable::with_kind(kind);
            table.register(Method::GET, "/health", "health");

            assert_eq!(table.resolve(&Method::GET, "/health"), Ok(&"health"));
            assert!(matches!(
                table.resolve(&Method::POST, "/health"),
                Err(RouteError::MethodNotAllowed { .. })
            ));
            assert_eq!(
                table.resolve(&Method::GET, "/missing"),
                Err(RouteError::NotFound)
            );
        }
    }

    #[test]
    fn test_structural_prefix_is_not_found() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/api/v1/users", "users");

        assert_eq!(table.resolve(&Method::GET, "/api"), Err(RouteError::NotFound));
        assert_eq!(
            table.resolve(&Method::POST, "/api/v1"),
            Err(RouteError::NotFound)
        );
    }

    #[test]
    fn test_same_pattern_different_methods() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/items", "list");
        table.register(Method::POST, "/items", "create");

        assert_eq!(table.resolve(&Method::GET, "/items"), Ok(&"list"));
        assert_eq!(table.resolve(&Method::POST, "/items"), Ok(&"create"));
        assert_eq!(
            table.resolve(&Method::DELETE, "/items"),
            Err(RouteError::MethodNotAllowed {
                allowed: vec![Method::GET, Method::POST]
            })
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_register_overwrites() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/a", "first");
        table.register(Method::GET, "/a", "second");

        assert_eq!(table.resolve(&Method::GET, "/a"), Ok(&"second"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_method_is_case_sensitive() {
        let mut table = RouteTable::new();
        let lower = Method::from_bytes(b"get").unwrap();
        table.register(Method::GET, "/a", "upper");

        assert!(matches!(
            table.resolve(&lower, "/a"),
            Err(RouteError::MethodNotAllowed { .. })
        ));
    }

    #[test]
    fn test_no_trailing_slash_normalization() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/a", "a");

        assert_eq!(table.resolve(&Method::GET, "/a/"), Err(RouteError::NotFound));
    }

    #[test]
    fn test_extend_from_routes() {
        let mut table = RouteTable::new();
        table.extend(vec![
            Route::new(Method::GET, "/a", 1),
            Route::new(Method::PUT, "/b", 2),
        ]);

        assert_eq!(table.resolve(&Method::GET, "/a"), Ok(&1));
        assert_eq!(table.resolve(&Method::PUT, "/b"), Ok(&2));
        assert!(!table.is_empty());
    }
}
