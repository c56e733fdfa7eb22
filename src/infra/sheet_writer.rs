use crate::app::ports::SheetWriterPort;
use crate::error::{ChecklistError, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;
use std::time::Duration;
use tracing::{info, instrument};

const SHEETS_API: &str = "https://sheets.googleapis.com";

/// Overwrites one tab of a Google Sheet through the Sheets values API
pub struct GoogleSheetWriter {
    client: reqwest::Client,
    sheet_id: String,
    range: String,
    token: String,
}

impl GoogleSheetWriter {
    pub fn new(
        sheet_id: impl Into<String>,
        range: impl Into<String>,
        token: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            sheet_id: sheet_id.into(),
            range: range.into(),
            token: token.into(),
        })
    }

    /// `.../v4/spreadsheets/{id}/values/{range}{suffix}` with the range
    /// percent-encoded as a single path segment.
    pub fn values_url(&self, suffix: &str) -> Result<Url> {
        let mut url = Url::parse(SHEETS_API)
            .map_err(|e| ChecklistError::Config(format!("invalid Sheets API url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ChecklistError::Config("Sheets API url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.sheet_id.as_str(), "values"])
            .push(&format!("{}{}", self.range, suffix));
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder, action: &str) -> Result<()> {
        let resp = request.bearer_auth(&self.token).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChecklistError::Api {
                message: format!("sheet {} returned status {}: {}", action, status.as_u16(), body),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SheetWriterPort for GoogleSheetWriter {
    #[instrument(skip(self, headers, rows), fields(sheet_id = %self.sheet_id, range = %self.range))]
    async fn write(&self, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
        // Clear first so a shorter checklist leaves no stale rows behind
        let clear_url = self.values_url(":clear")?;
        self.send(self.client.post(clear_url).json(&json!({})), "clear")
            .await?;

        let mut values: Vec<&[String]> = Vec::with_capacity(rows.len() + 1);
        values.push(headers);
        values.extend(rows.iter().map(Vec::as_slice));

        let mut update_url = self.values_url("")?;
        update_url
            .query_pairs_mut()
            .append_pair("valueInputOption", "RAW");
        let body = json!({
            "range": self.range,
            "majorDimension": "ROWS",
            "values": values,
        });
        self.send(self.client.put(update_url).json(&body), "update")
            .await?;

        info!("Wrote {} rows back to sheet {}", rows.len(), self.sheet_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_url_encodes_range() {
        let writer = GoogleSheetWriter::new("abc123", "enriched data", "token", 5).unwrap();

        assert_eq!(
            writer.values_url("").unwrap().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/enriched%20data"
        );
        assert_eq!(
            writer.values_url(":clear").unwrap().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/enriched%20data:clear"
        );
    }
}
