//! Strategy trait and the single-item processing capability.

use thiserror::Error;

use crate::message::Message;

/// Errors raised by strategies and their factories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Unknown strategy: '{0}'")]
    UnknownStrategy(String),

    #[error("Failed to create strategy '{identifier}': {reason}")]
    Creation { identifier: String, reason: String },

    #[error("Strategy '{identifier}' failed to process message: {reason}")]
    Processing { identifier: String, reason: String },
}

/// A pluggable implementation performing the transformation for one or
/// every language.
///
/// Strategies are long-lived and shared; the resolver keeps one instance per
/// language for its whole lifetime and never closes it.
pub trait Strategy: Send + Sync {
    /// Identifier this strategy is registered under.
    fn name(&self) -> &str;

    /// Single-item processing capability, if supported.
    ///
    /// Strategies that only work on whole batches or streams return `None`
    /// and are never invoked by the resolver.
    fn as_single_item(&self) -> Option<&dyn SingleItemProcess> {
        None
    }
}

/// Capability of processing one message at a time.
pub trait SingleItemProcess: Send + Sync {
    /// Transform a message, returning the annotated copy.
    fn process_single(&self, message: Message) -> Result<Message, StrategyError>;
}

impl<'a> std::fmt::Debug for dyn Strategy + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name())
            .field("single_item", &self.as_single_item().is_some())
            .finish()
    }
}
