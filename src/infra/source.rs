use crate::app::ports::SourcePort;
use crate::error::{ChecklistError, Result};
use crate::types::{Checklist, RawRecord};
use async_trait::async_trait;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument};

/// Reads a checklist CSV with a header row. Every cell stays a string.
pub fn parse_checklist<R: Read>(reader: R) -> Result<Checklist> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        records.push(RawRecord::from_pairs(
            headers.iter().cloned().zip(row.iter().map(str::to_string)),
        ));
    }
    Checklist::new(headers, records)
}

/// Checklist exported to a local CSV file
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SourcePort for CsvFileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Checklist> {
        let bytes = tokio::fs::read(&self.path).await?;
        let checklist = parse_checklist(bytes.as_slice())?;
        info!("Loaded {} records from {}", checklist.len(), self.path.display());
        Ok(checklist)
    }
}

/// Google Sheet read through its CSV export
pub struct GoogleSheetSource {
    client: reqwest::Client,
    sheet_id: String,
    gid: Option<String>,
}

impl GoogleSheetSource {
    pub fn new(sheet_id: impl Into<String>, gid: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            sheet_id: sheet_id.into(),
            gid,
        })
    }

    pub fn export_url(&self) -> String {
        let mut url = format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv",
            self.sheet_id
        );
        if let Some(gid) = &self.gid {
            url.push_str("&gid=");
            url.push_str(gid);
        }
        url
    }
}

#[async_trait]
impl SourcePort for GoogleSheetSource {
    #[instrument(skip(self), fields(sheet_id = %self.sheet_id))]
    async fn load(&self) -> Result<Checklist> {
        let url = self.export_url();
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ChecklistError::Api {
                message: format!("sheet export returned status {}", status.as_u16()),
            });
        }
        let bytes = resp.bytes().await?;
        let checklist = parse_checklist(bytes.as_ref())?;
        info!("Loaded {} records from sheet {}", checklist.len(), self.sheet_id);
        Ok(checklist)
    }
}
