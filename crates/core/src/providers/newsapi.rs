use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::NewsProvider;
use crate::errors::CoreError;
use crate::models::news::NewsArticle;

const BASE_URL: &str = "https://newsapi.org/v2/everything";
const PROVIDER: &str = "NewsAPI";

/// newsapi.org trending-news feed.
///
/// - **Free tier**: 100 requests/day, development use.
/// - **Requires**: API key (settings name "newsapi").
/// - **Endpoint**: `/v2/everything?q=stock&sortBy=popularity`
pub struct NewsApiProvider {
    client: Client,
    api_key: Option<String>,
}

impl NewsApiProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(5));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }
}

// ── NewsAPI response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct EverythingResponse {
    articles: Vec<ArticlePayload>,
}

#[derive(Deserialize)]
struct ArticlePayload {
    title: String,
    description: Option<String>,
    url: String,
    source: SourcePayload,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Deserialize)]
struct SourcePayload {
    name: String,
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn trending(&self, limit: usize) -> Result<Vec<NewsArticle>, CoreError> {
        let Some(api_key) = &self.api_key else {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: "no NewsAPI key configured".to_string(),
            });
        };

        let resp: EverythingResponse = self
            .client
            .get(BASE_URL)
            .query(&[
                ("q", "stock"),
                ("sortBy", "popularity"),
                ("apiKey", api_key),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse news feed: {e}"),
            })?;

        Ok(resp
            .articles
            .into_iter()
            .take(limit)
            .map(|a| NewsArticle {
                title: a.title,
                description: a.description,
                url: a.url,
                source: a.source.name,
                published_at: a.published_at,
            })
            .collect())
    }
}
