//! Strategy lookup by identifier.
//!
//! The resolver only depends on [`StrategyLocator`]. How strategies are
//! found is up to the implementation: [`StrategyRegistry`] keeps a table of
//! factories, and any `Fn(&str) -> Option<Arc<dyn Strategy>>` closure works
//! as a locator too.

use std::sync::Arc;

use crate::strategy::Strategy;

mod registry;

pub use registry::{SharedStrategyFactory, StrategyFactory, StrategyRegistry};

/// Finds a strategy by its identifier.
///
/// An unknown identifier is an ordinary outcome and yields `None`.
pub trait StrategyLocator: Send + Sync {
    fn lookup(&self, identifier: &str) -> Option<Arc<dyn Strategy>>;
}

impl<F> StrategyLocator for F
where
    F: Fn(&str) -> Option<Arc<dyn Strategy>> + Send + Sync,
{
    fn lookup(&self, identifier: &str) -> Option<Arc<dyn Strategy>> {
        self(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmatizers::LowercaseLemmatizer;

    #[test]
    fn test_closure_locator() {
        let shared: Arc<dyn Strategy> = Arc::new(LowercaseLemmatizer::new("lemmatizer-en"));
        let locator = move |identifier: &str| {
            (identifier == "lemmatizer-en").then(|| Arc::clone(&shared))
        };

        assert_eq!(locator.lookup("lemmatizer-en").unwrap().name(), "lemmatizer-en");
        assert!(locator.lookup("lemmatizer-fr").is_none());
    }
}
