//! Dictionary Lemmatizer
//!
//! Table-driven lemmatizer for a single language. Forms are matched
//! case-insensitively; unknown forms fall back to their lowercased text.
//!
//! Dictionary files are flat YAML maps from form to lemma:
//!
//! ```yaml
//! gatti: gatto
//! corre: correre
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::ConfigError;
use crate::locator::StrategyFactory;
use crate::message::Message;
use crate::strategy::{SingleItemProcess, Strategy, StrategyError};

use super::annotate;

/// Lemmatizer backed by a form → lemma table.
#[derive(Debug, Clone)]
pub struct DictionaryLemmatizer {
    name: String,
    entries: Arc<BTreeMap<String, String>>,
}

impl DictionaryLemmatizer {
    /// Create a lemmatizer; keys are normalized to lowercase.
    pub fn new(name: impl Into<String>, entries: BTreeMap<String, String>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(form, lemma)| (form.to_lowercase(), lemma))
            .collect();
        Self {
            name: name.into(),
            entries: Arc::new(entries),
        }
    }

    /// Load a dictionary from a YAML string.
    pub fn from_yaml(name: impl Into<String>, yaml: &str) -> Result<Self, ConfigError> {
        let entries: BTreeMap<String, String> = serde_yaml::from_str(yaml)?;
        Ok(Self::new(name, entries))
    }

    /// Load a dictionary from a YAML file.
    pub fn from_yaml_file(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(name, &contents)
    }

    /// Number of known forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lemma for a surface form.
    pub fn lemma(&self, form: &str) -> String {
        let form = form.to_lowercase();
        match self.entries.get(&form) {
            Some(lemma) => lemma.clone(),
            None => form,
        }
    }
}

impl Strategy for DictionaryLemmatizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_single_item(&self) -> Option<&dyn SingleItemProcess> {
        Some(self)
    }
}

impl SingleItemProcess for DictionaryLemmatizer {
    fn process_single(&self, message: Message) -> Result<Message, StrategyError> {
        Ok(annotate(message, |form| self.lemma(form)))
    }
}

/// Factory creating [`DictionaryLemmatizer`]s that share one table.
pub struct DictionaryLemmatizerFactory {
    identifier: String,
    lemmatizer: DictionaryLemmatizer,
}

impl DictionaryLemmatizerFactory {
    pub fn new(identifier: impl Into<String>, lemmatizer: DictionaryLemmatizer) -> Self {
        Self {
            identifier: identifier.into(),
            lemmatizer,
        }
    }
}

impl StrategyFactory for DictionaryLemmatizerFactory {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn create(&self) -> Result<Arc<dyn Strategy>, StrategyError> {
        if self.lemmatizer.is_empty() {
            return Err(StrategyError::Creation {
                identifier: self.identifier.clone(),
                reason: "dictionary has no entries".to_string(),
            });
        }
        Ok(Arc::new(self.lemmatizer.clone()))
    }

    fn description(&self) -> &str {
        "Dictionary lemmatizer"
    }
}
