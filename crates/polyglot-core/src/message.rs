//! Work items flowing through the resolver.
//!
//! A [`Message`] carries free text, an optional language tag and, once
//! tokenized, a list of [`Token`]s that lemmatizers annotate in place.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// ISO 639 code for an undetermined language.
///
/// Messages without a language tag resolve under this key.
pub const UNDETERMINED_LANGUAGE: &str = "und";

lazy_static! {
    /// Word pattern: letters/digits with optional inner apostrophes or hyphens.
    static ref WORD_PATTERN: Regex = Regex::new(r"\w+(?:['’-]\w+)*").unwrap();
}

/// A single token of a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Surface form as it appears in the text
    pub text: String,

    /// Lemma assigned by a lemmatizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
}

impl Token {
    /// Create an unannotated token.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lemma: None,
        }
    }

    /// Create a token that already carries a lemma.
    pub fn with_lemma(text: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lemma: Some(lemma.into()),
        }
    }
}

/// A unit of work tagged with a language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Message {
    /// Optional caller-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Raw text
    #[serde(default)]
    pub text: String,

    /// Language code (e.g. "it", "en")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Tokens, if the message has been tokenized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
}

impl Message {
    /// Create a message from text and a language code.
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: Some(language.into()),
            ..Default::default()
        }
    }

    /// Set the message identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the tokens explicitly.
    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// The key used to select a strategy for this message.
    pub fn language_key(&self) -> &str {
        self.language.as_deref().unwrap_or(UNDETERMINED_LANGUAGE)
    }

    /// Split `text` into tokens unless tokens are already present.
    pub fn tokenized(mut self) -> Self {
        if self.tokens.is_none() {
            self.tokens = Some(tokenize(&self.text));
        }
        self
    }

    /// Tokens of the message, or an empty slice.
    pub fn tokens(&self) -> &[Token] {
        self.tokens.as_deref().unwrap_or(&[])
    }
}

/// Split text into word tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| Token::new(m.as_str()))
        .collect()
}
