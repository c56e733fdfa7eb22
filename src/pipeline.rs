use crate::app::enrich_use_case::{snapshot_table, EnrichUseCase};
use crate::app::ports::{NameMatcherPort, SheetWriterPort, SourcePort};
use crate::config::Config;
use crate::error::{ChecklistError, Result};
use crate::infra::csv_output::{write_raw, write_tables, WrittenFile};
use crate::infra::gbif_matcher::GbifNameMatcher;
use crate::infra::sheet_writer::GoogleSheetWriter;
use crate::infra::source::{CsvFileSource, GoogleSheetSource};
use crate::tables::{unique_taxa, DwcTables};
use crate::types::{Checklist, EnrichedRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub input_records: usize,
    pub taxa: usize,
    pub distributions: usize,
    pub species_profiles: usize,
    pub descriptions: usize,
    pub unmatched_names: usize,
    pub wrote_back_to_sheet: bool,
    pub snapshot: WrittenFile,
    pub outputs: Vec<WrittenFile>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Result of a match-only run
#[derive(Debug, Serialize)]
pub struct MatchResult {
    pub input_records: usize,
    pub taxa: usize,
    pub unmatched_names: usize,
    pub wrote_back_to_sheet: bool,
    pub snapshot: WrittenFile,
}

pub struct Pipeline {
    config: Config,
    source: Box<dyn SourcePort>,
    enrich: EnrichUseCase,
    sheet_writer: Option<Box<dyn SheetWriterPort>>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        source: Box<dyn SourcePort>,
        matcher: Box<dyn NameMatcherPort>,
        sheet_writer: Option<Box<dyn SheetWriterPort>>,
    ) -> Self {
        let enrich = EnrichUseCase::new(matcher, config.dataset.shortname.clone());
        Self {
            config,
            source,
            enrich,
            sheet_writer,
        }
    }

    /// Wires the HTTP and file adapters described by `config`.
    pub fn from_config(config: Config, skip_write_back: bool) -> Result<Self> {
        let timeout = config.gbif.timeout_seconds;
        let source: Box<dyn SourcePort> = match (&config.source.input_path, &config.source.sheet_id) {
            (Some(path), _) => Box::new(CsvFileSource::new(path.clone())),
            (None, Some(sheet_id)) => Box::new(GoogleSheetSource::new(
                sheet_id.clone(),
                config.source.sheet_gid.clone(),
                timeout,
            )?),
            (None, None) => {
                return Err(ChecklistError::Config(
                    "no input configured: set source.input_path or source.sheet_id".to_string(),
                ))
            }
        };

        let matcher = Box::new(GbifNameMatcher::new(config.gbif.base_url.clone(), timeout)?);

        let sheet_writer: Option<Box<dyn SheetWriterPort>> = match (
            skip_write_back,
            &config.source.sheet_id,
            &config.source.sheets_token,
        ) {
            (false, Some(sheet_id), Some(token)) => Some(Box::new(GoogleSheetWriter::new(
                sheet_id.clone(),
                config.source.write_back_range.clone(),
                token.clone(),
                timeout,
            )?)),
            _ => None,
        };

        Ok(Self::new(config, source, matcher, sheet_writer))
    }

    async fn load_and_enrich(&self) -> Result<(Checklist, Vec<EnrichedRecord>)> {
        info!("📥 Loading checklist...");
        let checklist = self.source.load().await?;

        info!("🔎 Matching {} records against the backbone...", checklist.len());
        let enriched = self.enrich.enrich(&checklist).await?;
        Ok((checklist, enriched))
    }

    /// Sheet write-back first, then the local snapshot, so no file is
    /// written when a remote call fails.
    async fn write_enriched(
        &self,
        checklist: &Checklist,
        enriched: &[EnrichedRecord],
    ) -> Result<(WrittenFile, bool)> {
        let (headers, rows) = snapshot_table(checklist, enriched);

        let wrote_back = match &self.sheet_writer {
            Some(writer) => {
                writer.write(&headers, &rows).await?;
                true
            }
            None => {
                info!("Sheet write-back not configured; skipping");
                false
            }
        };

        let snapshot = write_raw(&self.config.source.snapshot_path, &headers, &rows)?;
        Ok((snapshot, wrote_back))
    }

    /// Ingest, enrich, write the snapshot and the four Darwin Core tables.
    #[instrument(skip(self), fields(dataset = %self.config.dataset.shortname))]
    pub async fn run(&self) -> Result<PipelineResult> {
        let started_at = Utc::now();
        let (checklist, enriched) = self.load_and_enrich().await?;
        let unmatched_names = count_unmatched(&enriched);
        if unmatched_names > 0 {
            warn!("{} records have no backbone canonical name", unmatched_names);
        }

        let (snapshot, wrote_back_to_sheet) = self.write_enriched(&checklist, &enriched).await?;

        info!("🔧 Building Darwin Core tables...");
        let tables = DwcTables::build(&enriched, &self.config.dataset);
        let outputs = write_tables(&self.config.output.dir, &tables)?;

        let result = PipelineResult {
            input_records: checklist.len(),
            taxa: tables.taxa.len(),
            distributions: tables.distributions.len(),
            species_profiles: tables.species_profiles.len(),
            descriptions: tables.descriptions.len(),
            unmatched_names,
            wrote_back_to_sheet,
            snapshot,
            outputs,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            "✅ Pipeline finished: {} records, {} taxa, {} distributions, {} descriptions",
            result.input_records, result.taxa, result.distributions, result.descriptions
        );
        Ok(result)
    }

    /// Ingest and enrich only; writes the snapshot (and sheet) but no tables.
    #[instrument(skip(self), fields(dataset = %self.config.dataset.shortname))]
    pub async fn match_only(&self) -> Result<MatchResult> {
        let (checklist, enriched) = self.load_and_enrich().await?;
        let (snapshot, wrote_back_to_sheet) = self.write_enriched(&checklist, &enriched).await?;

        Ok(MatchResult {
            input_records: checklist.len(),
            taxa: unique_taxa(&enriched).len(),
            unmatched_names: count_unmatched(&enriched),
            wrote_back_to_sheet,
            snapshot,
        })
    }
}

fn count_unmatched(enriched: &[EnrichedRecord]) -> usize {
    enriched
        .iter()
        .filter(|e| {
            e.name_match
                .canonical_name
                .as_deref()
                .map_or(true, |c| c.trim().is_empty())
        })
        .count()
}
