//! CSV tables read and written by the command line tool.
//!
//! - Articles table: `File Path,Abstract,Keywords`, written by the crawler and
//!   read by `extract`.
//! - Keywords table: `URL,Keywords`, the extraction output.
//!
//! List columns are joined with a bare `,`. A lemma that itself contains a
//! comma does not survive [`read_keywords`] as one entry.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{KeywordError, Result};
use crate::types::{Document, KeywordResult};

pub const ARTICLES_HEADER: [&str; 3] = ["File Path", "Abstract", "Keywords"];
pub const KEYWORDS_HEADER: [&str; 2] = ["URL", "Keywords"];

/// Separator inside list columns
pub const LIST_SEPARATOR: &str = ",";

/// One crawled article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub path: String,
    pub abstract_text: String,
    /// Author keywords in page order
    pub keywords: Vec<String>,
}

impl Article {
    /// Pipeline input for this article: the abstract followed by the joined
    /// keywords
    pub fn to_document(&self) -> Document {
        Document::new(
            self.path.clone(),
            raw_text(&self.abstract_text, &self.keywords.join(LIST_SEPARATOR)),
        )
    }
}

fn raw_text(abstract_text: &str, keywords: &str) -> String {
    if keywords.is_empty() {
        abstract_text.to_string()
    } else {
        format!("{abstract_text} {keywords}")
    }
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> KeywordError + '_ {
    move |source| KeywordError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn split_list(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split(LIST_SEPARATOR).map(String::from).collect()
}

/// Read the articles table into pipeline documents, in row order.
///
/// The header row is required and skipped. A row without a keywords column
/// is read with empty keywords; a row without an abstract is an error.
pub fn read_articles(path: &Path) -> Result<Vec<Document>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error(path))?;

    let mut documents = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error(path))?;
        let (Some(id), Some(abstract_text)) = (record.get(0), record.get(1)) else {
            return Err(KeywordError::Csv {
                path: path.to_path_buf(),
                source: csv::Error::from(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("row {} has no abstract column", idx + 1),
                )),
            });
        };
        let keywords = record.get(2).unwrap_or_default();
        documents.push(Document::new(id, raw_text(abstract_text, keywords)));
    }
    Ok(documents)
}

/// Write the articles table, replacing any existing file
pub fn write_articles(path: &Path, articles: &[Article]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error(path))?;
    writer
        .write_record(ARTICLES_HEADER)
        .map_err(csv_error(path))?;
    for article in articles {
        let keywords = article.keywords.join(LIST_SEPARATOR);
        writer
            .write_record([
                article.path.as_str(),
                article.abstract_text.as_str(),
                keywords.as_str(),
            ])
            .map_err(csv_error(path))?;
    }
    writer.flush().map_err(|source| KeywordError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the keywords table, one row per result in the given order
pub fn write_keywords(path: &Path, results: &[KeywordResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error(path))?;
    writer
        .write_record(KEYWORDS_HEADER)
        .map_err(csv_error(path))?;
    for result in results {
        let lemmas = result.lemmas.join(LIST_SEPARATOR);
        writer
            .write_record([result.document_id.as_str(), lemmas.as_str()])
            .map_err(csv_error(path))?;
    }
    writer.flush().map_err(|source| KeywordError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a keywords table back
pub fn read_keywords(path: &Path) -> Result<Vec<KeywordResult>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error(path))?;

    reader
        .records()
        .map(|record| {
            let record = record.map_err(csv_error(path))?;
            let id = record.get(0).unwrap_or_default();
            let lemmas = split_list(record.get(1).unwrap_or_default());
            Ok(KeywordResult::new(id, lemmas))
        })
        .collect()
}
