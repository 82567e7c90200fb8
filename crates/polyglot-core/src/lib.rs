//! # polyglot-core
//!
//! Per-language strategy resolution with memoized fallback.
//!
//! Given a message tagged with a language, the [`Resolver`] picks the best
//! available strategy for that language, caches the choice, and invokes it.
//!
//! ## Lookup Order
//!
//! 1. **Cache**: a language is resolved at most once per resolver
//! 2. **Specific**: the configured override, else `<prefix>-<language>`
//! 3. **Default**: the wildcard (`"*"`) strategy
//!
//! A language with no strategy at all is cached as absent, and its messages
//! pass through unannotated.
//!
//! ## Example
//!
//! ```rust,ignore
//! use polyglot_core::{Message, Resolver, ResolverConfig, StrategyRegistry};
//!
//! let registry = StrategyRegistry::with_defaults();
//! let resolver = Resolver::new(ResolverConfig::default(), Arc::new(registry));
//!
//! let message = resolver.process(Message::new("Cats are running", "en"));
//! for token in message.tokens() {
//!     println!("{} -> {:?}", token.text, token.lemma);
//! }
//! ```

pub mod cache;
pub mod config;
pub mod lemmatizers;
pub mod locator;
pub mod message;
pub mod resolver;
pub mod strategy;

// Re-export main types at crate root
pub use cache::{Resolution, ResolutionCache};
pub use config::{ConfigError, ResolverConfig, DEFAULT_PREFIX, DEFAULT_STRATEGY, WILDCARD};
pub use lemmatizers::{DictionaryLemmatizer, DictionaryLemmatizerFactory, LowercaseLemmatizer};
pub use locator::{SharedStrategyFactory, StrategyFactory, StrategyLocator, StrategyRegistry};
pub use message::{tokenize, Message, Token, UNDETERMINED_LANGUAGE};
pub use resolver::{Resolver, MULTI_STRATEGY};
pub use strategy::{SingleItemProcess, Strategy, StrategyError};
