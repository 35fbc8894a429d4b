//! Computes a provider's *effective* scope, bubbling `Request` up through
//! singletons that transitively depend on it.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::WeaveError;
use crate::provider_scope::ProviderScope;

/// Resolves effective scopes over a provider dependency graph.
///
/// A provider declared `Singleton` that transitively depends on any `Request`
/// provider has effective scope `Request` for every resolution — it may not retain
/// a request-bound reference across requests. `Transient` dependencies never
/// bubble: an `Instance`-scoped collaborator is a fresh, disposable value, not a
/// shared reference the parent could leak.
pub struct ScopeResolver {
    declared_scopes: FxHashMap<String, ProviderScope>,
    dependencies: FxHashMap<String, Vec<String>>,
    cache: FxHashMap<String, ProviderScope>,
}

impl ScopeResolver {
    pub fn new(
        declared_scopes: FxHashMap<String, ProviderScope>,
        dependencies: FxHashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            declared_scopes,
            dependencies,
            cache: FxHashMap::default(),
        }
    }

    /// The effective scope for `token`, memoized across calls.
    pub fn effective_scope(&mut self, token: &str) -> Result<ProviderScope, WeaveError> {
        let mut resolving = FxHashSet::default();
        self.resolve(token, &mut resolving)
    }

    fn resolve(
        &mut self,
        token: &str,
        resolving: &mut FxHashSet<String>,
    ) -> Result<ProviderScope, WeaveError> {
        if let Some(scope) = self.cache.get(token) {
            return Ok(*scope);
        }

        let declared = *self
            .declared_scopes
            .get(token)
            .ok_or_else(|| WeaveError::ProviderNotFound(token.to_string()))?;

        if !resolving.insert(token.to_string()) {
            return Err(WeaveError::CircularDependency(
                token.to_string(),
                token.to_string(),
            ));
        }

        // Transient is never cacheable and never bubbles, so its own effective
        // scope is always itself regardless of its dependencies.
        let effective = if declared == ProviderScope::Transient {
            declared
        } else {
            let deps = self.dependencies.get(token).cloned().unwrap_or_default();
            let mut bubbled = declared;
            for dep in deps {
                let dep_scope = self.resolve(&dep, resolving).map_err(|e| match e {
                    WeaveError::CircularDependency(_, end) => {
                        WeaveError::CircularDependency(token.to_string(), end)
                    }
                    other => other,
                })?;
                if dep_scope == ProviderScope::Request && declared == ProviderScope::Singleton {
                    bubbled = ProviderScope::Request;
                }
            }
            bubbled
        };

        resolving.remove(token);
        self.cache.insert(token.to_string(), effective);
        Ok(effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(scopes: &[(&str, ProviderScope)], deps: &[(&str, &[&str])]) -> ScopeResolver {
        let declared_scopes = scopes
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        let dependencies = deps
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect();
        ScopeResolver::new(declared_scopes, dependencies)
    }

    #[test]
    fn singleton_depending_on_request_bubbles_to_request() {
        let mut r = resolver(
            &[
                ("A", ProviderScope::Singleton),
                ("B", ProviderScope::Request),
            ],
            &[("A", &["B"])],
        );
        assert_eq!(r.effective_scope("A").unwrap(), ProviderScope::Request);
    }

    #[test]
    fn transient_dependency_does_not_bubble() {
        let mut r = resolver(
            &[
                ("A", ProviderScope::Singleton),
                ("B", ProviderScope::Transient),
            ],
            &[("A", &["B"])],
        );
        assert_eq!(r.effective_scope("A").unwrap(), ProviderScope::Singleton);
    }

    #[test]
    fn transient_provider_is_never_cached_across_calls() {
        let mut r = resolver(&[("A", ProviderScope::Transient)], &[]);
        assert_eq!(r.effective_scope("A").unwrap(), ProviderScope::Transient);
        assert_eq!(r.effective_scope("A").unwrap(), ProviderScope::Transient);
    }

    #[test]
    fn bubbling_is_transitive_through_singletons() {
        let mut r = resolver(
            &[
                ("A", ProviderScope::Singleton),
                ("B", ProviderScope::Singleton),
                ("C", ProviderScope::Request),
            ],
            &[("A", &["B"]), ("B", &["C"])],
        );
        assert_eq!(r.effective_scope("A").unwrap(), ProviderScope::Request);
        assert_eq!(r.effective_scope("B").unwrap(), ProviderScope::Request);
    }

    #[test]
    fn direct_self_cycle_is_reported() {
        let mut r = resolver(
            &[("A", ProviderScope::Singleton)],
            &[("A", &["A"])],
        );
        assert!(matches!(
            r.effective_scope("A"),
            Err(WeaveError::CircularDependency(_, _))
        ));
    }

    #[test]
    fn unknown_token_is_provider_not_found() {
        let mut r = resolver(&[], &[]);
        assert!(matches!(
            r.effective_scope("Ghost"),
            Err(WeaveError::ProviderNotFound(_))
        ));
    }
}
