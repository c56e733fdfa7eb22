use super::DwcRow;
use crate::config::DatasetConfig;
use crate::constants;
use crate::types::EnrichedRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// Approximation markers carried by first observation dates
static APPROXIMATION_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?<>]").unwrap());

/// Row of the distribution extension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRow {
    #[serde(rename = "taxonID")]
    pub taxon_id: String,
    #[serde(rename = "locationID")]
    pub location_id: String,
    pub locality: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    #[serde(rename = "occurrenceStatus")]
    pub occurrence_status: String,
    #[serde(rename = "establishmentMeans")]
    pub establishment_means: String,
    #[serde(rename = "eventDate")]
    pub event_date: String,
    #[serde(rename = "occurrenceRemarks")]
    pub occurrence_remarks: String,
    pub source: String,
}

impl DwcRow for DistributionRow {
    const COLUMNS: &'static [&'static str] = &[
        "taxonID",
        "locationID",
        "locality",
        "countryCode",
        "occurrenceStatus",
        "establishmentMeans",
        "eventDate",
        "occurrenceRemarks",
        "source",
    ];

    fn taxon_id(&self) -> &str {
        &self.taxon_id
    }
}

/// ISO 8601 date or interval from first/last observation.
///
/// Markers are stripped from `first` only; neither value is validated.
pub fn event_date(first: Option<&str>, last: Option<&str>) -> String {
    let first = first
        .map(|f| APPROXIMATION_MARKERS.replace_all(f, "").into_owned())
        .filter(|f| !f.trim().is_empty());

    match (first.as_deref(), last) {
        (None, None) => String::new(),
        (None, Some(last)) => last.to_string(),
        (Some(first), None) => first.to_string(),
        (Some(first), Some(last)) if first == last => first.to_string(),
        (Some(first), Some(last)) => format!("{}/{}", first, last),
    }
}

/// One row per input record; no deduplication.
pub fn build_distribution_table(
    records: &[EnrichedRecord],
    dataset: &DatasetConfig,
) -> Vec<DistributionRow> {
    records
        .iter()
        .map(|r| {
            let raw = &r.record;
            DistributionRow {
                taxon_id: r.taxon_id.clone(),
                location_id: dataset.location_id.clone(),
                locality: raw.get_or_empty(constants::LOCATION).to_string(),
                country_code: raw.get_or_empty(constants::COUNTRY_CODE).to_string(),
                occurrence_status: raw.get_or_empty(constants::OCCURRENCE_STATUS).to_string(),
                establishment_means: raw.get_or_empty(constants::ORIGIN).to_string(),
                event_date: event_date(
                    raw.get(constants::FIRST_OBSERVATION),
                    raw.get(constants::LAST_OBSERVATION),
                ),
                occurrence_remarks: raw.get_or_empty(constants::REMARKS).to_string(),
                source: raw.get_or_empty(constants::SOURCE).to_string(),
            }
        })
        .collect()
}
