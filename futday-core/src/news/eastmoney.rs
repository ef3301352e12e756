//! Eastmoney article-search news source.
//!
//! Uses the JSONP search API behind the Eastmoney news portal. Titles come
//! back with `<em>` highlight tags around query matches; those are
//! stripped before the item enters aggregation.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::{NewsError, NewsItem, NewsSource};

const SEARCH_URL: &str = "https://search-api-web.eastmoney.com/search/jsonp";
const PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "cmsArticleWebOld", default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    url: String,
    #[serde(rename = "mediaName", default)]
    media_name: Option<String>,
}

/// Eastmoney search client.
pub struct EastmoneySearch {
    client: reqwest::blocking::Client,
    /// Fallback publication date for articles whose date field fails to
    /// parse.
    query_date: NaiveDate,
}

impl EastmoneySearch {
    pub fn new(query_date: NaiveDate) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client, query_date }
    }

    fn search_param(query: &str) -> String {
        serde_json::json!({
            "uid": "",
            "keyword": query,
            "type": ["cmsArticleWebOld"],
            "client": "web",
            "param": {
                "cmsArticleWebOld": {
                    "searchScope": "default",
                    "sort": "default",
                    "pageIndex": 1,
                    "pageSize": PAGE_SIZE,
                }
            }
        })
        .to_string()
    }

    fn strip_highlight(text: &str) -> String {
        text.replace("<em>", "").replace("</em>", "")
    }

    /// Strip the JSONP wrapper if present; the API returns plain JSON when
    /// no callback name is supplied.
    fn unwrap_jsonp(body: &str) -> &str {
        let trimmed = body.trim();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return trimmed;
        }
        match (trimmed.find('('), trimmed.rfind(')')) {
            (Some(open), Some(close)) if close > open => &trimmed[open + 1..close],
            _ => trimmed,
        }
    }

    fn to_items(&self, resp: SearchResponse) -> Vec<NewsItem> {
        let articles = match resp.result {
            Some(r) => r.articles,
            None => return Vec::new(),
        };
        articles
            .into_iter()
            .filter(|a| !a.title.is_empty())
            .map(|a| {
                let published = NaiveDateTime::parse_from_str(&a.date, "%Y-%m-%d %H:%M:%S")
                    .map(|dt| dt.date())
                    .unwrap_or(self.query_date);
                NewsItem {
                    title: Self::strip_highlight(&a.title),
                    summary: Self::strip_highlight(&a.content),
                    url: a.url,
                    source: a.media_name.unwrap_or_else(|| "eastmoney".to_string()),
                    published,
                    relevance: 0.0,
                }
            })
            .collect()
    }
}

impl NewsSource for EastmoneySearch {
    fn name(&self) -> &str {
        "eastmoney"
    }

    fn search(&self, query: &str) -> Result<Vec<NewsItem>, NewsError> {
        let param = Self::search_param(query);
        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&[("cb", ""), ("param", param.as_str())])
            .send()
            .map_err(|e| NewsError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(NewsError::RateLimited {
                retry_after_secs: 60,
            });
        }
        if !status.is_success() {
            return Err(NewsError::Other(format!("HTTP {status} from eastmoney")));
        }

        let body = resp
            .text()
            .map_err(|e| NewsError::ResponseFormatChanged(e.to_string()))?;
        let parsed: SearchResponse = serde_json::from_str(Self::unwrap_jsonp(&body))
            .map_err(|e| NewsError::ResponseFormatChanged(e.to_string()))?;
        Ok(self.to_items(parsed))
    }
}
