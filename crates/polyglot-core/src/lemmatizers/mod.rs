//! Built-in lemmatization strategies.
//!
//! Real deployments register their own strategies; these two cover the
//! universal default and simple table-driven languages.

mod dictionary;
mod lowercase;

pub use dictionary::{DictionaryLemmatizer, DictionaryLemmatizerFactory};
pub use lowercase::LowercaseLemmatizer;

use crate::message::Message;

/// Tokenize the message if needed and assign a lemma to every token.
fn annotate(message: Message, lemma_for: impl Fn(&str) -> String) -> Message {
    let mut message = message.tokenized();
    if let Some(tokens) = message.tokens.as_mut() {
        for token in tokens.iter_mut() {
            token.lemma = Some(lemma_for(&token.text));
        }
    }
    message
}
