//! Local article crawler
//!
//! Walks saved article pages (`*.html`) in file-name order and pulls out the
//! abstract and the author keywords.

use std::fs;
use std::path::{Path, PathBuf};

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::io::Article;

const ABSTRACT_SELECTOR: &str = "div.padding_abstract.justify.rtl";
const KEYWORD_ITEM_SELECTOR: &str = "li.padding-3";
const KEYWORD_LINK_SELECTOR: &str = "a.tag_a";

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid selector `{selector}`: {reason}")]
    Selector {
        selector: &'static str,
        reason: String,
    },
}

/// Abstract and keywords of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// `None` when the page has no abstract block or the block is blank
    pub abstract_text: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub articles: Vec<Article>,
    /// Files opened
    pub scanned: usize,
    /// Files without an abstract or unreadable
    pub skipped: usize,
}

struct PageSelectors {
    abstract_block: Selector,
    keyword_item: Selector,
    keyword_link: Selector,
}

impl PageSelectors {
    fn new() -> Result<Self, CrawlError> {
        Ok(Self {
            abstract_block: parse_selector(ABSTRACT_SELECTOR)?,
            keyword_item: parse_selector(KEYWORD_ITEM_SELECTOR)?,
            keyword_link: parse_selector(KEYWORD_LINK_SELECTOR)?,
        })
    }

    fn parse(&self, html: &str) -> ParsedPage {
        let document = Html::parse_document(html);

        let abstract_text = document
            .select(&self.abstract_block)
            .next()
            .map(|node| text_content(&node))
            .filter(|text| !text.is_empty());

        let keywords = document
            .select(&self.keyword_item)
            .flat_map(|item| item.select(&self.keyword_link))
            .map(|link| text_content(&link))
            .collect();

        ParsedPage {
            abstract_text,
            keywords,
        }
    }
}

fn parse_selector(selector: &'static str) -> Result<Selector, CrawlError> {
    Selector::parse(selector).map_err(|err| CrawlError::Selector {
        selector,
        reason: err.to_string(),
    })
}

fn text_content(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string()
}

/// Extract the abstract and keywords from one page
pub fn parse_article(html: &str) -> Result<ParsedPage, CrawlError> {
    Ok(PageSelectors::new()?.parse(html))
}

/// Crawl `dir` for article pages.
///
/// Stops once `limit` articles with an abstract have been collected.
/// Unreadable files are logged and counted as skipped.
pub fn crawl_directory(dir: &Path, limit: Option<usize>) -> Result<CrawlReport, CrawlError> {
    let selectors = PageSelectors::new()?;
    let list_error = |source| CrawlError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut pages = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            pages.push(path);
        }
    }
    pages.sort();

    let mut report = CrawlReport::default();
    for path in pages {
        if limit.is_some_and(|limit| report.articles.len() >= limit) {
            break;
        }
        report.scanned += 1;

        let html = match fs::read_to_string(&path) {
            Ok(html) => html,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable page");
                report.skipped += 1;
                continue;
            }
        };

        let page = selectors.parse(&html);
        let Some(abstract_text) = page.abstract_text else {
            debug!(path = %path.display(), "page has no abstract");
            report.skipped += 1;
            continue;
        };
        report.articles.push(Article {
            path: path.display().to_string(),
            abstract_text,
            keywords: page.keywords,
        });
    }

    info!(
        dir = %dir.display(),
        scanned = report.scanned,
        collected = report.articles.len(),
        skipped = report.skipped,
        "crawl finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="padding_abstract justify rtl">
            هدف این پژوهش بررسی شبکه است
          </div>
          <ul>
            <li class="padding-3"><a class="tag_a" href="/k/1"> شبکه عصبی </a></li>
            <li class="padding-3"><a class="tag_a" href="/k/2">یادگیری</a></li>
            <li class="other"><a class="tag_a" href="/k/3">نادیده</a></li>
          </ul>
        </body></html>
    "#;

    #[test]
    fn test_parse_article() {
        let page = parse_article(PAGE).unwrap();
        assert_eq!(
            page.abstract_text.as_deref(),
            Some("هدف این پژوهش بررسی شبکه است")
        );
        assert_eq!(page.keywords, vec!["شبکه عصبی", "یادگیری"]);
    }

    #[test]
    fn test_abstract_needs_all_classes() {
        let page = parse_article(r#"<div class="padding_abstract rtl">متن</div>"#).unwrap();
        assert_eq!(page.abstract_text, None);
    }

    #[test]
    fn test_blank_abstract_is_missing() {
        let page =
            parse_article(r#"<div class="padding_abstract justify rtl">   </div>"#).unwrap();
        assert_eq!(page.abstract_text, None);
    }

    #[test]
    fn test_crawl_directory_in_name_order_with_limit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("article_3.html"), PAGE).unwrap();
        std::fs::write(dir.path().join("article_1.html"), PAGE).unwrap();
        std::fs::write(dir.path().join("article_2.html"), "<p>no abstract</p>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), PAGE).unwrap();

        let report = crawl_directory(dir.path(), None).unwrap();
        assert_eq!(report.scanned, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.articles.len(), 2);
        assert!(report.articles[0].path.ends_with("article_1.html"));
        assert!(report.articles[1].path.ends_with("article_3.html"));

        let limited = crawl_directory(dir.path(), Some(1)).unwrap();
        assert_eq!(limited.articles.len(), 1);
        assert_eq!(limited.scanned, 1);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let err = crawl_directory(Path::new("/nonexistent/articles"), None).unwrap_err();
        assert!(matches!(err, CrawlError::Io { .. }));
    }
}
