//! Serper (Google Search API) news source.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{NewsError, NewsItem, NewsSource};

const SERPER_URL: &str = "https://google.serper.dev/search";
const RESULTS_PER_QUERY: u32 = 20;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
    #[serde(rename = "displayedLink", default)]
    displayed_link: Option<String>,
}

/// Serper search client. Each `search` call is one billable API request.
pub struct SerperSearch {
    client: reqwest::blocking::Client,
    api_key: String,
    /// Date stamped onto returned items (Serper snippets carry no reliable
    /// publication date).
    query_date: NaiveDate,
}

impl SerperSearch {
    pub fn new(api_key: impl Into<String>, query_date: NaiveDate) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            query_date,
        }
    }

    fn to_items(&self, resp: SearchResponse) -> Vec<NewsItem> {
        resp.organic
            .into_iter()
            .filter(|r| !r.title.is_empty())
            .map(|r| NewsItem {
                title: r.title,
                summary: r.snippet,
                url: r.link,
                source: r
                    .displayed_link
                    .unwrap_or_else(|| "web search".to_string()),
                published: self.query_date,
                relevance: 0.0,
            })
            .collect()
    }
}

impl NewsSource for SerperSearch {
    fn name(&self) -> &str {
        "serper"
    }

    fn search(&self, query: &str) -> Result<Vec<NewsItem>, NewsError> {
        let request = SearchRequest {
            q: query,
            num: RESULTS_PER_QUERY,
        };

        let resp = self
            .client
            .post(SERPER_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&request)
            .send()
            .map_err(|e| NewsError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(NewsError::AuthenticationRequired(format!(
                "serper rejected the API key (HTTP {status})"
            )));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(NewsError::RateLimited {
                retry_after_secs: 60,
            });
        }
        if !status.is_success() {
            return Err(NewsError::Other(format!("HTTP {status} from serper")));
        }

        let parsed: SearchResponse = resp
            .json()
            .map_err(|e| NewsError::ResponseFormatChanged(e.to_string()))?;
        Ok(self.to_items(parsed))
    }
}
