//! Multi-language resolver.
//!
//! For every message, the resolver picks a strategy for the message's
//! language, in this order:
//!
//! 1. The resolution cache, if the language was seen before (including
//!    languages already known to have no strategy)
//! 2. The override for the language, or `<prefix>-<language>`
//! 3. The wildcard default
//!
//! The outcome is cached per language for the resolver's lifetime. A
//! strategy registered after a language was resolved is not picked up for
//! that language.

use std::sync::Arc;

use crate::cache::{Resolution, ResolutionCache};
use crate::config::{ConfigError, ResolverConfig};
use crate::locator::StrategyLocator;
use crate::message::{Message, Token};
use crate::strategy::{SingleItemProcess, Strategy, StrategyError};

/// Name under which a resolver registers itself as a strategy.
pub const MULTI_STRATEGY: &str = "lemmatizer-multi";

/// Resolves, caches and invokes per-language strategies.
///
/// Safe to share between threads. Two threads resolving the same unseen
/// language at once may both query the locator; the last write wins.
pub struct Resolver {
    config: ResolverConfig,
    locator: Arc<dyn StrategyLocator>,
    cache: ResolutionCache,
}

impl Resolver {
    /// Create a resolver over `locator`.
    ///
    /// `config` is used as given; configs built with the `with_*` helpers
    /// are not validated here. Use [`Resolver::try_new`] to check them.
    pub fn new(config: ResolverConfig, locator: Arc<dyn StrategyLocator>) -> Self {
        Self {
            config,
            locator,
            cache: ResolutionCache::new(),
        }
    }

    /// Create a resolver after validating `config`.
    pub fn try_new(
        config: ResolverConfig,
        locator: Arc<dyn StrategyLocator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, locator))
    }

    /// Create a resolver with the default configuration.
    pub fn with_locator(locator: impl StrategyLocator + 'static) -> Self {
        Self::new(ResolverConfig::default(), Arc::new(locator))
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Strategy for `language`, or `None` if neither a specific nor the
    /// default strategy exists.
    pub fn resolve(&self, language: &str) -> Resolution {
        if let Some(resolution) = self.cache.get(language) {
            tracing::debug!(language, found = resolution.is_some(), "Resolution cache hit");
            return resolution;
        }

        let resolution = self.locate(language);
        match &resolution {
            Some(strategy) => {
                tracing::info!(language, strategy = strategy.name(), "Language bound to strategy")
            }
            None => tracing::warn!(language, "No strategy available for language"),
        }
        self.cache.insert(language, resolution.clone());
        resolution
    }

    /// Run the fallback chain against the locator, without caching.
    fn locate(&self, language: &str) -> Resolution {
        let candidate = self.config.candidate_identifier(language);
        if let Some(strategy) = self.locator.lookup(&candidate) {
            return Some(strategy);
        }
        tracing::debug!(language, identifier = %candidate, "Specific strategy not found");

        let fallback = self.config.default_identifier();
        if fallback == candidate {
            return None;
        }
        let strategy = self.locator.lookup(fallback);
        if strategy.is_none() {
            tracing::debug!(language, identifier = fallback, "Default strategy not found");
        }
        strategy
    }

    /// Lemmatized tokens for a message, or `None` when no usable strategy
    /// exists for its language or the strategy produced no tokens.
    pub fn lemmatize_tokens(&self, message: Message) -> Option<Vec<Token>> {
        let strategy = self.resolve(message.language_key())?;
        let Some(single) = strategy.as_single_item() else {
            tracing::warn!(
                language = message.language_key(),
                strategy = strategy.name(),
                "Strategy does not support single-item processing"
            );
            return None;
        };

        match single.process_single(message) {
            Ok(processed) => processed.tokens,
            Err(e) => {
                tracing::warn!(strategy = strategy.name(), error = %e, "Strategy failed");
                None
            }
        }
    }

    /// Annotate a message; messages that cannot be lemmatized pass through
    /// unchanged, existing tokens included.
    pub fn process(&self, mut message: Message) -> Message {
        if let Some(tokens) = self.lemmatize_tokens(message.clone()) {
            message.tokens = Some(tokens);
        }
        message
    }

    /// Annotate every message of a batch.
    pub fn process_all<'a, I>(&'a self, messages: I) -> impl Iterator<Item = Message> + 'a
    where
        I: IntoIterator<Item = Message>,
        I::IntoIter: 'a,
    {
        messages.into_iter().map(move |message| self.process(message))
    }
}

impl Strategy for Resolver {
    fn name(&self) -> &str {
        MULTI_STRATEGY
    }

    fn as_single_item(&self) -> Option<&dyn SingleItemProcess> {
        Some(self)
    }
}

impl SingleItemProcess for Resolver {
    fn process_single(&self, message: Message) -> Result<Message, StrategyError> {
        Ok(self.process(message))
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, DEFAULT_STRATEGY};
    use crate::lemmatizers::{DictionaryLemmatizer, LowercaseLemmatizer};
    use crate::locator::StrategyRegistry;
    use std::collections::BTreeMap;

    struct StreamOnly;

    impl Strategy for StreamOnly {
        fn name(&self) -> &str {
            "lemmatizer-stream"
        }
    }

    struct Failing;

    impl Strategy for Failing {
        fn name(&self) -> &str {
            "lemmatizer-failing"
        }

        fn as_single_item(&self) -> Option<&dyn SingleItemProcess> {
            Some(self)
        }
    }

    impl SingleItemProcess for Failing {
        fn process_single(&self, _message: Message) -> Result<Message, StrategyError> {
            Err(StrategyError::Processing {
                identifier: "lemmatizer-failing".to_string(),
                reason: "model not loaded".to_string(),
            })
        }
    }

    /// Returns messages without any tokens.
    struct Untokenized;

    impl Strategy for Untokenized {
        fn name(&self) -> &str {
            "lemmatizer-untokenized"
        }

        fn as_single_item(&self) -> Option<&dyn SingleItemProcess> {
            Some(self)
        }
    }

    impl SingleItemProcess for Untokenized {
        fn process_single(&self, _message: Message) -> Result<Message, StrategyError> {
            Ok(Message::default())
        }
    }

    fn registry() -> StrategyRegistry {
        let mut registry = StrategyRegistry::with_defaults();
        let entries = BTreeMap::from([("gatti".to_string(), "gatto".to_string())]);
        registry.register_strategy(
            "lemmatizer-it",
            Arc::new(DictionaryLemmatizer::new("lemmatizer-it", entries)),
        );
        registry
    }

    #[test]
    fn test_specific_strategy_preferred() {
        let resolver = Resolver::with_locator(registry());

        assert_eq!(resolver.resolve("it").unwrap().name(), "lemmatizer-it");
        assert_eq!(resolver.resolve("fr").unwrap().name(), DEFAULT_STRATEGY);
    }

    #[test]
    fn test_override_mapping() {
        let config = ResolverConfig::default().with_override("de", "lemmatizer-it");
        let resolver = Resolver::new(config, Arc::new(registry()));

        assert_eq!(resolver.resolve("de").unwrap().name(), "lemmatizer-it");
    }

    #[test]
    fn test_absence_is_cached() {
        let resolver = Resolver::with_locator(StrategyRegistry::new());

        assert!(resolver.resolve("it").is_none());
        assert!(matches!(resolver.cache().get("it"), Some(None)));
    }

    #[test]
    fn test_process_annotates_tokens() {
        let resolver = Resolver::with_locator(registry());
        let message = resolver.process(Message::new("Gatti", "it"));

        assert_eq!(message.tokens(), &[Token::with_lemma("Gatti", "gatto")]);
    }

    #[test]
    fn test_unresolved_message_passes_through() {
        let resolver = Resolver::with_locator(StrategyRegistry::new());
        let message = Message::new("Gatti", "it").with_id("m1");

        assert_eq!(resolver.process(message.clone()), message);
    }

    #[test]
    fn test_strategy_without_capability() {
        let mut registry = StrategyRegistry::new();
        registry.register_strategy("lemmatizer-en", Arc::new(StreamOnly));
        let resolver = Resolver::with_locator(registry);

        assert!(resolver.resolve("en").is_some());
        assert!(resolver.lemmatize_tokens(Message::new("Cats", "en")).is_none());
    }

    #[test]
    fn test_strategy_failure_is_absence() {
        let mut registry = StrategyRegistry::new();
        registry.register_strategy("lemmatizer-en", Arc::new(Failing));
        let resolver = Resolver::with_locator(registry);

        let message = Message::new("Cats", "en");
        assert!(resolver.lemmatize_tokens(message.clone()).is_none());
        assert_eq!(resolver.process(message.clone()), message);
    }

    #[test]
    fn test_missing_payload_keeps_existing_tokens() {
        let mut registry = StrategyRegistry::new();
        registry.register_strategy("lemmatizer-en", Arc::new(Untokenized));
        let resolver = Resolver::with_locator(registry);

        let message = Message::new("Cats", "en").with_tokens(vec![Token::new("Cats")]);
        assert!(resolver.lemmatize_tokens(message.clone()).is_none());
        assert_eq!(resolver.process(message.clone()).tokens(), &[Token::new("Cats")]);
    }

    #[test]
    fn test_try_new_validates_config() {
        let config = ResolverConfig::default().with_prefix("");
        let result = Resolver::try_new(config, Arc::new(registry()));
        assert!(matches!(result, Err(ConfigError::MissingField(_))));

        let config = ResolverConfig::default().with_override("de", "lemmatizer-it");
        let resolver = Resolver::try_new(config, Arc::new(registry())).unwrap();
        assert_eq!(resolver.resolve("de").unwrap().name(), "lemmatizer-it");
    }

    #[test]
    fn test_missing_language_uses_undetermined_key() {
        let resolver = Resolver::with_locator(registry());
        let message = Message {
            text: "Hello".to_string(),
            ..Default::default()
        };

        let processed = resolver.process(message);
        assert_eq!(processed.tokens(), &[Token::with_lemma("Hello", "hello")]);
        assert!(resolver.cache().contains("und"));
    }

    #[test]
    fn test_resolver_as_strategy() {
        let mut outer = StrategyRegistry::new();
        outer.register_strategy(MULTI_STRATEGY, Arc::new(Resolver::with_locator(registry())));

        let multi = outer.create(MULTI_STRATEGY).unwrap();
        assert_eq!(multi.name(), MULTI_STRATEGY);

        let processed = multi
            .as_single_item()
            .unwrap()
            .process_single(Message::new("Gatti", "it"))
            .unwrap();
        assert_eq!(processed.tokens()[0].lemma.as_deref(), Some("gatto"));
    }

    #[test]
    fn test_process_all() {
        let resolver = Resolver::with_locator(registry());
        let messages = vec![Message::new("Gatti", "it"), Message::new("Dogs", "en")];

        let lemmas: Vec<Option<String>> = resolver
            .process_all(messages)
            .map(|m| m.tokens()[0].lemma.clone())
            .collect();
        assert_eq!(lemmas, vec![Some("gatto".to_string()), Some("dogs".to_string())]);
        assert_eq!(resolver.cache().len(), 2);
    }

    #[test]
    fn test_closure_locator() {
        let default: Arc<dyn Strategy> = Arc::new(LowercaseLemmatizer::new(DEFAULT_STRATEGY));
        let resolver = Resolver::with_locator(move |identifier: &str| {
            (identifier == DEFAULT_STRATEGY).then(|| Arc::clone(&default))
        });

        let resolved = resolver.resolve("es").unwrap();
        assert_eq!(resolved.name(), DEFAULT_STRATEGY);
        assert!(Arc::ptr_eq(&resolved, &resolver.resolve("es").unwrap()));
    }
}
