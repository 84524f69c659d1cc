//! The shipped [`LinguisticService`]: normalizer, tokenizer, lexicon tagger and
//! lemmatizer over one shared [`TaggingModel`].

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::lemmatizer::Lemmatizer;
use super::normalizer::PersianNormalizer;
use super::tagger::{LexiconTagger, TaggingModel};
use super::tokenizer::WordTokenizer;
use super::{LinguisticError, LinguisticService};
use crate::errors::KeywordError;
use crate::types::Token;

#[derive(Debug, Clone)]
pub struct LexiconService {
    normalizer: PersianNormalizer,
    tokenizer: WordTokenizer,
    tagger: LexiconTagger,
    lemmatizer: Lemmatizer,
}

impl LexiconService {
    /// Load the tagging model at `path` and build the service.
    ///
    /// Any failure is fatal: the caller gets
    /// [`KeywordError::ResourceUnavailable`] and no service.
    pub fn load(path: &Path, max_tokens: Option<usize>) -> Result<Self, KeywordError> {
        let model = TaggingModel::load(path).map_err(|err| KeywordError::ResourceUnavailable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        info!(
            path = %path.display(),
            entries = model.len(),
            "loaded tagging model"
        );
        Ok(Self::from_model(model).with_max_tokens(max_tokens))
    }

    pub fn from_model(model: TaggingModel) -> Self {
        let model = Arc::new(model);
        Self {
            normalizer: PersianNormalizer::new(),
            tokenizer: WordTokenizer::new(),
            tagger: LexiconTagger::new(Arc::clone(&model)),
            lemmatizer: Lemmatizer::new(model),
        }
    }

    /// Set the per-document token limit enforced by the tagger
    pub fn with_max_tokens(mut self, max_tokens: Option<usize>) -> Self {
        self.tagger = self.tagger.with_max_tokens(max_tokens);
        self
    }
}

impl LinguisticService for LexiconService {
    fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, LinguisticError> {
        self.tokenizer.tokenize(text)
    }

    fn tag(&self, tokens: Vec<String>) -> Result<Vec<Token>, LinguisticError> {
        self.tagger.tag(tokens)
    }

    fn lemmatize(&self, word: &str) -> String {
        self.lemmatizer.lemmatize(word)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const MODEL: &str = r#"{
        "version": 1,
        "default_tag": "NOUN",
        "tags": { "است": "VERB" }
    }"#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MODEL.as_bytes()).unwrap();

        let service = LexiconService::load(file.path(), None).unwrap();
        let tokens = service.tag(vec!["است".into()]).unwrap();
        assert_eq!(tokens[0].category_label(), "VERB");
    }

    #[test]
    fn test_missing_model_is_resource_unavailable() {
        let err = LexiconService::load(Path::new("/nonexistent/pos_tagger.json"), None)
            .unwrap_err();
        assert!(matches!(err, KeywordError::ResourceUnavailable { .. }));
    }

    #[test]
    fn test_corrupt_model_is_resource_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = LexiconService::load(file.path(), None).unwrap_err();
        assert!(matches!(err, KeywordError::ResourceUnavailable { .. }));
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LexiconService>();
    }
}
