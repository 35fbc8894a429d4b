//! Radix-tree router: method + path matching with parameter and wildcard
//! extraction, plus a lookup cache invalidated on every mutation.
//!
//! One tree per HTTP method. Insertion splits on divergent literal prefixes;
//! parameters live on a dedicated edge (separate from literal children) so that
//! sibling routes sharing a prefix — `/courses/:id` and `/courses/:courseId/stats`
//! — coexist, each terminal remembering its own declared parameter name.

use std::sync::RwLock;

use rustc_hash::FxHashMap;

use crate::error::WeaveError;
use crate::http_helpers::HttpMethod;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

fn parse_path(path: &str) -> Vec<Segment> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('/')
        .map(|part| {
            if part == "*" {
                Segment::Wildcard
            } else if let Some(name) = part.strip_prefix(':') {
                Segment::Param(name.to_string())
            } else {
                Segment::Literal(part.to_string())
            }
        })
        .collect()
}

/// Normalizes a lookup path: empty becomes `/`, a trailing `/` other than root is
/// stripped.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    if path.len() > 1 && path.ends_with('/') {
        return path.trim_end_matches('/').to_string();
    }
    path.to_string()
}

struct ParamEdge<T> {
    subtree: Node<T>,
}

struct WildcardEdge<T> {
    store: T,
}

struct Node<T> {
    literal: Vec<u8>,
    children: FxHashMap<u8, Box<Node<T>>>,
    param_edge: Option<Box<ParamEdge<T>>>,
    wildcard: Option<Box<WildcardEdge<T>>>,
    /// The store for this terminal plus, when it was reached via a parameter
    /// edge, the name that edge's caller declared for it.
    terminal: Option<Terminal<T>>,
}

struct Terminal<T> {
    store: T,
    param_name: Option<String>,
}

impl<T> Node<T> {
    fn empty() -> Self {
        Self {
            literal: Vec::new(),
            children: FxHashMap::default(),
            param_edge: None,
            wildcard: None,
            terminal: None,
        }
    }

    fn new_leaf(literal: Vec<u8>) -> Self {
        Self {
            literal,
            ..Self::empty()
        }
    }
}

/// `find` result: the matched store plus extracted path parameters.
pub struct Matched<'a, T> {
    pub store: &'a T,
    pub params: FxHashMap<String, String>,
}

/// A radix tree router, one subtree per HTTP method, with a `method:path`
/// lookup-result cache.
pub struct RadixRouter<T> {
    roots: FxHashMap<HttpMethod, Node<T>>,
    cache: RwLock<FxHashMap<String, bool>>,
}

impl<T> Default for RadixRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RadixRouter<T> {
    pub fn new() -> Self {
        Self {
            roots: FxHashMap::default(),
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    fn invalidate_cache(&self) {
        self.cache.write().unwrap().clear();
    }

    /// Registers `store` under `(method, path)`. Fails with `DuplicateRoute` if a
    /// terminal already exists there (use [`Self::update_store`] to replace it in
    /// place).
    pub fn add(&mut self, method: HttpMethod, path: &str, store: T) -> Result<(), WeaveError> {
        let segments = parse_path(&normalize_path(path));
        let root = self.roots.entry(method).or_insert_with(Node::empty);
        Self::insert(root, &segments, store, method, path)?;
        self.invalidate_cache();
        Ok(())
    }

    fn insert(
        node: &mut Node<T>,
        segments: &[Segment],
        store: T,
        method: HttpMethod,
        full_path: &str,
    ) -> Result<(), WeaveError> {
        match segments.first() {
            None => {
                if node.terminal.is_some() {
                    return Err(WeaveError::DuplicateRoute {
                        method: method.to_string(),
                        path: full_path.to_string(),
                    });
                }
                node.terminal = Some(Terminal {
                    store,
                    param_name: None,
                });
                Ok(())
            }
            Some(Segment::Wildcard) => {
                if node.wildcard.is_some() {
                    return Err(WeaveError::DuplicateRoute {
                        method: method.to_string(),
                        path: full_path.to_string(),
                    });
                }
                node.wildcard = Some(Box::new(WildcardEdge { store }));
                Ok(())
            }
            Some(Segment::Param(name)) => {
                let edge = node.param_edge.get_or_insert_with(|| {
                    Box::new(ParamEdge {
                        subtree: Node::empty(),
                    })
                });
                if segments.len() == 1 {
                    if edge.subtree.terminal.is_some() {
                        return Err(WeaveError::DuplicateRoute {
                            method: method.to_string(),
                            path: full_path.to_string(),
                        });
                    }
                    edge.subtree.terminal = Some(Terminal {
                        store,
                        param_name: Some(name.clone()),
                    });
                    Ok(())
                } else {
                    Self::insert(&mut edge.subtree, &segments[1..], store, method, full_path)
                }
            }
            Some(Segment::Literal(part)) => {
                Self::insert_literal(node, part.as_bytes(), segments, store, method, full_path)
            }
        }
    }

    fn insert_literal(
        node: &mut Node<T>,
        part: &[u8],
        segments: &[Segment],
        store: T,
        method: HttpMethod,
        full_path: &str,
    ) -> Result<(), WeaveError> {
        let first_byte = part[0];
        if let Some(child) = node.children.get_mut(&first_byte) {
            let common = common_prefix_len(&child.literal, part);
            if common < child.literal.len() {
                // Split the existing child: the shared prefix becomes a new
                // intermediate node, the old child's remainder hangs off it.
                let remainder = child.literal[common..].to_vec();
                let mut old_child = std::mem::replace(child.as_mut(), Node::empty());
                old_child.literal = remainder;
                let remainder_first = old_child.literal[0];

                let mut split = Node::new_leaf(part[..common].to_vec());
                split.children.insert(remainder_first, Box::new(old_child));
                *child.as_mut() = split;
            }

            if common == part.len() {
                return Self::insert(child, &segments[1..], store, method, full_path);
            } else {
                let rest = part[common..].to_vec();
                let next_byte = rest[0];
                if let Some(grandchild) = child.children.get_mut(&next_byte) {
                    return Self::insert_literal(
                        grandchild,
                        &rest,
                        segments,
                        store,
                        method,
                        full_path,
                    );
                }
                let mut leaf = Node::new_leaf(rest);
                Self::insert(&mut leaf, &segments[1..], store, method, full_path)?;
                child.children.insert(next_byte, Box::new(leaf));
                return Ok(());
            }
        }

        let mut leaf = Node::new_leaf(part.to_vec());
        Self::insert(&mut leaf, &segments[1..], store, method, full_path)?;
        node.children.insert(first_byte, Box::new(leaf));
        Ok(())
    }

    /// Matches `(method, path)` against the tree. A `method:path` cache records
    /// only whether the last lookup hit, so a repeated miss short-circuits the
    /// walk; a hit still re-walks to borrow the store with `self`'s lifetime
    /// (the tree is immutable between mutations, so this is cheap and exact).
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<Matched<'_, T>> {
        let normalized = normalize_path(path);
        let cache_key = format!("{method}:{normalized}");

        if let Some(&was_hit) = self.cache.read().unwrap().get(&cache_key) {
            if !was_hit {
                return None;
            }
        }

        let root = self.roots.get(&method)?;
        let mut params = FxHashMap::default();
        let store = Self::walk(root, normalized.trim_start_matches('/'), &mut params);

        self.cache
            .write()
            .unwrap()
            .insert(cache_key, store.is_some());

        store.map(|store| Matched { store, params })
    }

    fn walk<'a>(
        node: &'a Node<T>,
        remaining: &str,
        params: &mut FxHashMap<String, String>,
    ) -> Option<&'a T> {
        if remaining.is_empty() {
            return node.terminal.as_ref().map(|t| &t.store);
        }

        let bytes = remaining.as_bytes();
        if let Some(child) = node.children.get(&bytes[0]) {
            let lit = &child.literal;
            if bytes.len() >= lit.len() && &bytes[..lit.len()] == lit.as_slice() {
                if let Some(found) = Self::walk(child, &remaining[lit.len()..], params) {
                    return Some(found);
                }
            }
        }

        if let Some(edge) = &node.param_edge {
            let (segment, rest) = split_first_segment(remaining);
            if !segment.is_empty() {
                if let Some(found) = Self::walk(&edge.subtree, rest, params) {
                    if rest.is_empty() {
                        if let Some(Terminal {
                            param_name: Some(name),
                            ..
                        }) = &edge.subtree.terminal
                        {
                            params.insert(name.clone(), segment.to_string());
                        }
                    }
                    return Some(found);
                }
            }
        }

        if let Some(wildcard) = &node.wildcard {
            params.insert("*".to_string(), remaining.to_string());
            return Some(&wildcard.store);
        }

        None
    }

    /// In-place replacement of the store at `(method, path)`, used by the route
    /// compiler to swap a raw route descriptor for a compiled one without
    /// rebuilding the tree. Returns `false` if no terminal exists there.
    pub fn update_store(
        &mut self,
        method: HttpMethod,
        path: &str,
        new_store: T,
    ) -> Result<bool, WeaveError> {
        let normalized = normalize_path(path);
        let segments = parse_path(&normalized);
        let Some(root) = self.roots.get_mut(&method) else {
            return Ok(false);
        };
        let replaced = Self::replace(root, &segments, new_store);
        self.invalidate_cache();
        Ok(replaced)
    }

    fn replace(node: &mut Node<T>, segments: &[Segment], new_store: T) -> bool {
        match segments.first() {
            None => match &mut node.terminal {
                Some(terminal) => {
                    terminal.store = new_store;
                    true
                }
                None => false,
            },
            Some(Segment::Wildcard) => match &mut node.wildcard {
                Some(edge) => {
                    edge.store = new_store;
                    true
                }
                None => false,
            },
            Some(Segment::Param(_)) => {
                let Some(edge) = node.param_edge.as_mut() else {
                    return false;
                };
                if segments.len() == 1 {
                    Self::replace(&mut edge.subtree, &[], new_store)
                } else {
                    Self::replace(&mut edge.subtree, &segments[1..], new_store)
                }
            }
            Some(Segment::Literal(part)) => {
                let Some(child) = node.children.get_mut(&part.as_bytes()[0]) else {
                    return false;
                };
                let common = common_prefix_len(&child.literal, part.as_bytes());
                if common != child.literal.len() {
                    return false;
                }
                if common == part.len() {
                    Self::replace(child, &segments[1..], new_store)
                } else {
                    let rest = &part.as_bytes()[common..];
                    let Some(grandchild) = child.children.get_mut(&rest[0]) else {
                        return false;
                    };
                    Self::replace(grandchild, &segments[1..], new_store)
                }
            }
        }
    }
}

fn split_first_segment(path: &str) -> (&str, &str) {
    match path.find('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => (path, ""),
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_literal_route_matches() {
        let mut router: RadixRouter<&'static str> = RadixRouter::new();
        router.add(HttpMethod::GET, "/", "root").unwrap();
        let m = router.find(HttpMethod::GET, "/").unwrap();
        assert_eq!(*m.store, "root");
    }

    #[test]
    fn sibling_param_routes_keep_distinct_names() {
        let mut router: RadixRouter<&'static str> = RadixRouter::new();
        router.add(HttpMethod::GET, "/courses/:id", "by-id").unwrap();
        router
            .add(HttpMethod::GET, "/courses/:courseId/stats", "stats")
            .unwrap();

        let by_id = router.find(HttpMethod::GET, "/courses/42").unwrap();
        assert_eq!(*by_id.store, "by-id");
        assert_eq!(by_id.params.get("id"), Some(&"42".to_string()));
        assert!(by_id.params.get("courseId").is_none());

        let stats = router.find(HttpMethod::GET, "/courses/77/stats").unwrap();
        assert_eq!(*stats.store, "stats");
        assert_eq!(stats.params.get("courseId"), Some(&"77".to_string()));
        assert!(stats.params.get("id").is_none());
    }

    #[test]
    fn diverging_literal_prefix_splits_node() {
        let mut router: RadixRouter<&'static str> = RadixRouter::new();
        router.add(HttpMethod::GET, "/team", "team").unwrap();
        router.add(HttpMethod::GET, "/teapot", "teapot").unwrap();

        assert_eq!(*router.find(HttpMethod::GET, "/team").unwrap().store, "team");
        assert_eq!(
            *router.find(HttpMethod::GET, "/teapot").unwrap().store,
            "teapot"
        );
    }

    #[test]
    fn wildcard_captures_remainder_including_empty() {
        let mut router: RadixRouter<&'static str> = RadixRouter::new();
        router.add(HttpMethod::GET, "/static/*", "assets").unwrap();

        let m = router.find(HttpMethod::GET, "/static/js/app.js").unwrap();
        assert_eq!(m.params.get("*"), Some(&"js/app.js".to_string()));

        let m2 = router.find(HttpMethod::GET, "/static/").unwrap();
        assert_eq!(m2.params.get("*"), Some(&String::new()));
    }

    #[test]
    fn duplicate_route_registration_fails() {
        let mut router: RadixRouter<&'static str> = RadixRouter::new();
        router.add(HttpMethod::GET, "/a", "one").unwrap();
        let err = router.add(HttpMethod::GET, "/a", "two").unwrap_err();
        assert!(matches!(err, WeaveError::DuplicateRoute { .. }));
    }

    #[test]
    fn update_store_replaces_in_place_and_invalidates_cache() {
        let mut router: RadixRouter<&'static str> = RadixRouter::new();
        router.add(HttpMethod::GET, "/a", "old").unwrap();
        assert_eq!(*router.find(HttpMethod::GET, "/a").unwrap().store, "old");

        let replaced = router.update_store(HttpMethod::GET, "/a", "new").unwrap();
        assert!(replaced);
        assert_eq!(*router.find(HttpMethod::GET, "/a").unwrap().store, "new");
    }

    #[test]
    fn update_store_on_missing_route_returns_false() {
        let mut router: RadixRouter<&'static str> = RadixRouter::new();
        let replaced = router.update_store(HttpMethod::GET, "/missing", "x").unwrap();
        assert!(!replaced);
    }

    #[test]
    fn empty_path_normalizes_to_root() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/users/"), "/users");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn no_match_returns_none_not_error() {
        let router: RadixRouter<&'static str> = RadixRouter::new();
        assert!(router.find(HttpMethod::GET, "/missing").is_none());
    }

    #[test]
    fn repeated_lookup_uses_cache_and_stays_consistent() {
        let mut router: RadixRouter<&'static str> = RadixRouter::new();
        router.add(HttpMethod::GET, "/courses/:id", "by-id").unwrap();
        for _ in 0..3 {
            let m = router.find(HttpMethod::GET, "/courses/99").unwrap();
            assert_eq!(m.params.get("id"), Some(&"99".to_string()));
        }
    }

    #[test]
    fn cached_miss_is_consistent_on_repeat_lookup() {
        let mut router: RadixRouter<&'static str> = RadixRouter::new();
        router.add(HttpMethod::GET, "/a", "a").unwrap();
        assert!(router.find(HttpMethod::GET, "/b").is_none());
        assert!(router.find(HttpMethod::GET, "/b").is_none());
    }
}
