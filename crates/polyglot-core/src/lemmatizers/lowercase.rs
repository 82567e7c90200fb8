//! Lowercase Lemmatizer
//!
//! Language-independent fallback: the lemma of a token is its lowercased
//! surface form.

use crate::message::Message;
use crate::strategy::{SingleItemProcess, Strategy, StrategyError};

use super::annotate;

/// Lemmatizer usable for every language.
#[derive(Debug, Clone)]
pub struct LowercaseLemmatizer {
    name: String,
}

impl LowercaseLemmatizer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Strategy for LowercaseLemmatizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_single_item(&self) -> Option<&dyn SingleItemProcess> {
        Some(self)
    }
}

impl SingleItemProcess for LowercaseLemmatizer {
    fn process_single(&self, message: Message) -> Result<Message, StrategyError> {
        Ok(annotate(message, str::to_lowercase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Token;

    #[test]
    fn test_lowercases_tokens() {
        let lemmatizer = LowercaseLemmatizer::new("lemmatizer-default");
        let message = Message::new("Hello WORLD", "en");

        let result = lemmatizer.process_single(message).unwrap();
        assert_eq!(
            result.tokens(),
            &[Token::with_lemma("Hello", "hello"), Token::with_lemma("WORLD", "world")]
        );
    }

    #[test]
    fn test_keeps_language() {
        let lemmatizer = LowercaseLemmatizer::new("lemmatizer-default");
        let result = lemmatizer
            .process_single(Message::new("Über", "de"))
            .unwrap();

        assert_eq!(result.language.as_deref(), Some("de"));
        assert_eq!(result.tokens()[0].lemma.as_deref(), Some("über"));
    }
}
