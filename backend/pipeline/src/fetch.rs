//! Attachment byte fetching over plain HTTP.

use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches attachment bytes from the chat platform's CDN.
#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Plain reqwest-backed fetcher; client default timeouts apply.
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttachmentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            bail!("attachment fetch returned {}", resp.status());
        }
        Ok(resp.bytes().await?.to_vec())
    }
}
