//! Factory registry for strategies.
//!
//! Strategies are registered as factories keyed by identifier, so new
//! implementations can be added without touching the resolver.
//!
//! ## Usage
//!
//! ```ignore
//! let mut registry = StrategyRegistry::with_defaults();
//! registry.register(Arc::new(DictionaryLemmatizerFactory::new("it", entries)));
//!
//! let strategy = registry.create("lemmatizer-it")?;
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use super::StrategyLocator;
use crate::config::DEFAULT_STRATEGY;
use crate::lemmatizers::LowercaseLemmatizer;
use crate::strategy::{Strategy, StrategyError};

/// Factory for creating strategy instances.
///
/// Each factory is responsible for:
/// 1. Providing the identifier it is registered under
/// 2. Creating (or handing out) a strategy instance
pub trait StrategyFactory: Send + Sync {
    /// Identifier of the strategies this factory creates.
    ///
    /// Examples: "lemmatizer-it", "lemmatizer-default"
    fn identifier(&self) -> &str;

    /// Create a strategy instance.
    fn create(&self) -> Result<Arc<dyn Strategy>, StrategyError>;

    /// Human-readable description of this strategy.
    fn description(&self) -> &str {
        "Strategy"
    }
}

/// Factory that hands out one pre-built, shared instance.
pub struct SharedStrategyFactory {
    identifier: String,
    strategy: Arc<dyn Strategy>,
}

impl SharedStrategyFactory {
    /// Register `strategy` under `identifier`.
    pub fn new(identifier: impl Into<String>, strategy: Arc<dyn Strategy>) -> Self {
        Self {
            identifier: identifier.into(),
            strategy,
        }
    }
}

impl StrategyFactory for SharedStrategyFactory {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn create(&self) -> Result<Arc<dyn Strategy>, StrategyError> {
        Ok(Arc::clone(&self.strategy))
    }

    fn description(&self) -> &str {
        "Shared strategy instance"
    }
}

struct LowercaseLemmatizerFactory;

impl StrategyFactory for LowercaseLemmatizerFactory {
    fn identifier(&self) -> &str {
        DEFAULT_STRATEGY
    }

    fn create(&self) -> Result<Arc<dyn Strategy>, StrategyError> {
        Ok(Arc::new(LowercaseLemmatizer::new(DEFAULT_STRATEGY)))
    }

    fn description(&self) -> &str {
        "Language-independent lowercase lemmatizer"
    }
}

/// Registry of available strategy factories.
#[derive(Default)]
pub struct StrategyRegistry {
    factories: BTreeMap<String, Arc<dyn StrategyFactory>>,
}

impl StrategyRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in default strategy registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(LowercaseLemmatizerFactory));
        registry
    }

    /// Register a strategy factory.
    ///
    /// If a factory with the same identifier already exists, it will be replaced.
    pub fn register(&mut self, factory: Arc<dyn StrategyFactory>) {
        self.factories
            .insert(factory.identifier().to_string(), factory);
    }

    /// Register an already-built strategy under `identifier`.
    pub fn register_strategy(&mut self, identifier: impl Into<String>, strategy: Arc<dyn Strategy>) {
        self.register(Arc::new(SharedStrategyFactory::new(identifier, strategy)));
    }

    /// Create a strategy by identifier.
    pub fn create(&self, identifier: &str) -> Result<Arc<dyn Strategy>, StrategyError> {
        self.factories
            .get(identifier)
            .ok_or_else(|| StrategyError::UnknownStrategy(identifier.to_string()))?
            .create()
    }

    /// List registered identifiers, in order.
    pub fn available_identifiers(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Check if an identifier is registered.
    pub fn has_strategy(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Description of the factory registered under `identifier`.
    pub fn description(&self, identifier: &str) -> Option<&str> {
        self.factories.get(identifier).map(|f| f.description())
    }
}

impl StrategyLocator for StrategyRegistry {
    fn lookup(&self, identifier: &str) -> Option<Arc<dyn Strategy>> {
        match self.create(identifier) {
            Ok(strategy) => Some(strategy),
            Err(StrategyError::UnknownStrategy(_)) => {
                tracing::debug!(identifier, "No strategy registered");
                None
            }
            Err(e) => {
                tracing::warn!(identifier, error = %e, "Strategy factory failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.available_identifiers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingFactory;

    impl StrategyFactory for FailingFactory {
        fn identifier(&self) -> &str {
            "lemmatizer-broken"
        }

        fn create(&self) -> Result<Arc<dyn Strategy>, StrategyError> {
            Err(StrategyError::Creation {
                identifier: "lemmatizer-broken".to_string(),
                reason: "model file missing".to_string(),
            })
        }
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = StrategyRegistry::with_defaults();

        assert!(registry.has_strategy(DEFAULT_STRATEGY));
        assert_eq!(registry.available_identifiers(), vec![DEFAULT_STRATEGY]);
        assert_eq!(
            registry.description(DEFAULT_STRATEGY),
            Some("Language-independent lowercase lemmatizer")
        );

        let strategy = registry.create(DEFAULT_STRATEGY).unwrap();
        assert_eq!(strategy.name(), DEFAULT_STRATEGY);
    }

    #[test]
    fn test_registry_unknown_strategy() {
        let registry = StrategyRegistry::new();

        match registry.create("lemmatizer-xx") {
            Err(StrategyError::UnknownStrategy(id)) => assert_eq!(id, "lemmatizer-xx"),
            other => panic!("Expected UnknownStrategy, got {:?}", other.map(|s| s.name().to_string())),
        }
        assert!(registry.lookup("lemmatizer-xx").is_none());
    }

    #[test]
    fn test_shared_factory_returns_same_instance() {
        let mut registry = StrategyRegistry::new();
        let strategy: Arc<dyn Strategy> = Arc::new(LowercaseLemmatizer::new("lemmatizer-en"));
        registry.register_strategy("lemmatizer-en", Arc::clone(&strategy));

        let first = registry.lookup("lemmatizer-en").unwrap();
        let second = registry.lookup("lemmatizer-en").unwrap();
        assert!(Arc::ptr_eq(&first, &strategy));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_creation_failure_is_not_found() {
        let mut registry = StrategyRegistry::new();
        registry.register(Arc::new(FailingFactory));

        assert!(registry.has_strategy("lemmatizer-broken"));
        assert!(registry.create("lemmatizer-broken").is_err());
        assert!(registry.lookup("lemmatizer-broken").is_none());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = StrategyRegistry::with_defaults();
        registry.register_strategy(
            DEFAULT_STRATEGY,
            Arc::new(LowercaseLemmatizer::new("replacement")),
        );

        assert_eq!(registry.available_identifiers().len(), 1);
        assert_eq!(registry.create(DEFAULT_STRATEGY).unwrap().name(), "replacement");
    }
}
