use crate::app::ports::NameMatcherPort;
use crate::error::{ChecklistError, Result};
use crate::types::NameMatch;
use async_trait::async_trait;
use std::time::Duration;
use tracing::instrument;

/// GBIF backbone species match
pub struct GbifNameMatcher {
    client: reqwest::Client,
    base_url: String,
}

impl GbifNameMatcher {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn match_url(&self) -> String {
        format!("{}/species/match", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl NameMatcherPort for GbifNameMatcher {
    #[instrument(skip(self))]
    async fn match_name(&self, name: &str) -> Result<NameMatch> {
        let resp = self
            .client
            .get(self.match_url())
            .query(&[("name", name), ("verbose", "false")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChecklistError::Api {
                message: format!("species match for '{}' returned status {}", name, status.as_u16()),
            });
        }

        let body = resp.text().await?;
        let name_match: NameMatch = serde_json::from_str(&body)?;
        Ok(name_match)
    }
}
