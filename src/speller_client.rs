use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;

use crate::config::ServiceConfig;
use crate::suggestion::{CheckResponse, Suggestion};

#[derive(Debug, Serialize)]
struct CheckRequest<'a> {
    text: &'a str,
}

/// HTTP client for the remote spelling service.
pub struct SpellerClient {
    client: Client,
    base_url: String,
}

impl SpellerClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the selected text for checking and returns the suggestion
    /// list. One attempt; failures are for the caller to log.
    pub async fn check(&self, text: &str) -> Result<Vec<Suggestion>> {
        let response = self
            .client
            .post(&self.base_url)
            .json(&CheckRequest { text })
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Spell check failed with status {}: {}", status, error_text);
        }

        let decoded: CheckResponse = response
            .json()
            .await
            .context("Failed to decode spelling service response")?;

        Ok(decoded.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = SpellerClient::new(&ServiceConfig {
            base_url: "https://speller.town/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.base_url(), "https://speller.town");
    }

    #[test]
    fn request_body_matches_the_service_contract() {
        let body = serde_json::to_string(&CheckRequest { text: "teh cat" }).unwrap();
        assert_eq!(body, r#"{"text":"teh cat"}"#);
    }
}
