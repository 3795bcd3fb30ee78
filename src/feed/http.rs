use crate::feed::parse::parse_snapshot;
use crate::feed::Feed;
use crate::models::Snapshot;
use crate::{Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct HttpFeedConfig {
    pub url: String,
    pub timeout_secs: u64,
}

pub struct HttpFeed {
    client: Client,
    config: HttpFeedConfig,
}

impl HttpFeed {
    pub fn new(config: HttpFeedConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(Error::new("feed url must be set"));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| Error::new(format!("http client build failed: {err}")))?;
        Ok(Self { client, config })
    }

    fn request_url(&self, cache_bust: Option<i64>) -> String {
        match cache_bust {
            Some(stamp) => {
                let separator = if self.config.url.contains('?') { '&' } else { '?' };
                format!("{}{}t={}", self.config.url, separator, stamp)
            }
            None => self.config.url.clone(),
        }
    }
}

impl Feed for HttpFeed {
    fn fetch_snapshot(&self, cache_bust: Option<i64>) -> Result<Snapshot> {
        let url = self.request_url(cache_bust);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| Error::new(format!("http request failed: {err}")))?;
        if !response.status().is_success() {
            return Err(Error::new(format!("HTTP {}", response.status().as_u16())));
        }
        let body = response
            .text()
            .map_err(|err| Error::new(format!("http body read failed: {err}")))?;
        parse_snapshot(&body)
    }
}
