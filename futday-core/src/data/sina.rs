//! Sina Finance futures minute-feed provider.
//!
//! Fetches 1-minute K-lines from Sina's InnerFuturesNewService JSONP
//! endpoint. The payload is a JSONP-wrapped array of objects with
//! single-letter keys and string-encoded prices. Sina has no official API
//! and the format can change without notice.

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::provider::{FeedError, MinuteFeed};
use crate::domain::MinuteBar;

/// One minute bar as Sina encodes it.
#[derive(Debug, Deserialize)]
struct SinaMinuteRow {
    /// "2024-01-08 09:01:00"
    d: String,
    o: String,
    h: String,
    l: String,
    c: String,
}

/// Sina futures minute-feed provider.
pub struct SinaFuturesFeed {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl Default for SinaFuturesFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SinaFuturesFeed {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    /// Build the minute-line URL for a symbol.
    fn minute_line_url(symbol: &str) -> String {
        format!(
            "https://stock2.finance.sina.com.cn/futures/api/jsonp.php/\
             var%20_t=/InnerFuturesNewService.getFewMinLine?symbol={symbol}&type=1"
        )
    }

    /// Strip the JSONP wrapper (`var _t=( ... );`) down to the JSON body.
    fn strip_jsonp(body: &str) -> Result<&str, FeedError> {
        let open = body
            .find('(')
            .ok_or_else(|| FeedError::ResponseFormatChanged("no JSONP open paren".into()))?;
        let close = body
            .rfind(')')
            .ok_or_else(|| FeedError::ResponseFormatChanged("no JSONP close paren".into()))?;
        if close <= open {
            return Err(FeedError::ResponseFormatChanged(
                "malformed JSONP wrapper".into(),
            ));
        }
        Ok(&body[open + 1..close])
    }

    /// Parse the JSONP payload into MinuteBars.
    fn parse_response(symbol: &str, body: &str) -> Result<Vec<MinuteBar>, FeedError> {
        let json = Self::strip_jsonp(body)?;
        if json.trim() == "null" {
            return Err(FeedError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let rows: Vec<SinaMinuteRow> = serde_json::from_str(json).map_err(|e| {
            FeedError::ResponseFormatChanged(format!("failed to parse rows for {symbol}: {e}"))
        })?;

        let mut bars = Vec::with_capacity(rows.len());
        for row in rows {
            let ts = NaiveDateTime::parse_from_str(&row.d, "%Y-%m-%d %H:%M:%S").map_err(|e| {
                FeedError::ResponseFormatChanged(format!("bad timestamp '{}': {e}", row.d))
            })?;
            // Price fields come as strings; a non-numeric field is a format
            // change, not a malformed bar.
            let parse = |s: &str, field: &str| -> Result<f64, FeedError> {
                s.parse::<f64>().map_err(|_| {
                    FeedError::ResponseFormatChanged(format!("non-numeric {field}: '{s}'"))
                })
            };
            bars.push(MinuteBar {
                ts,
                open: parse(&row.o, "open")?,
                high: parse(&row.h, "high")?,
                low: parse(&row.l, "low")?,
                close: parse(&row.c, "close")?,
            });
        }

        Ok(bars)
    }

    /// Execute the HTTP request with bounded retry and backoff.
    fn fetch_with_retry(&self, symbol: &str) -> Result<Vec<MinuteBar>, FeedError> {
        let url = Self::minute_line_url(symbol);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(FeedError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        last_error = Some(FeedError::Other(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    let body = resp.text().map_err(|e| {
                        FeedError::ResponseFormatChanged(format!(
                            "failed to read body for {symbol}: {e}"
                        ))
                    })?;

                    return Self::parse_response(symbol, &body);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(FeedError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(FeedError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FeedError::Other("max retries exceeded".into())))
    }
}

impl MinuteFeed for SinaFuturesFeed {
    fn name(&self) -> &str {
        "sina_futures"
    }

    fn fetch_minute_bars(&self, symbol: &str) -> Result<Vec<MinuteBar>, FeedError> {
        self.fetch_with_retry(symbol)
    }
}
