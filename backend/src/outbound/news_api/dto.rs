//! DTOs for decoding News API `everything` responses.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::NewsArticle;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EverythingDto {
    pub(super) status: String,
    #[serde(default)]
    pub(super) code: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) articles: Vec<ArticleDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SourceDto {
    #[serde(default)]
    pub(super) name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ArticleDto {
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: Option<String>,
    pub(super) url: String,
    #[serde(default)]
    pub(super) url_to_image: Option<String>,
    #[serde(default)]
    pub(super) published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(super) source: Option<SourceDto>,
}

impl EverythingDto {
    /// Articles of an `ok` payload; the service's own error text otherwise.
    pub(super) fn into_domain_articles(self) -> Result<Vec<NewsArticle>, String> {
        if self.status != "ok" {
            return Err(format!(
                "news api reported {}: {}",
                self.code.as_deref().unwrap_or("unknown"),
                self.message.as_deref().unwrap_or("no message")
            ));
        }
        Ok(self
            .articles
            .into_iter()
            .map(ArticleDto::into_domain_article)
            .collect())
    }
}

impl ArticleDto {
    fn into_domain_article(self) -> NewsArticle {
        NewsArticle {
            title: self.title,
            description: self.description,
            url: self.url,
            image_url: self.url_to_image,
            source_name: self.source.and_then(|source| source.name),
            published_at: self.published_at,
        }
    }
}
