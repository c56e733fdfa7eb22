use super::{unique_taxa, DwcRow};
use crate::config::DatasetConfig;
use crate::constants;
use crate::types::EnrichedRecord;
use serde::Serialize;

/// Row of the taxon core
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonRow {
    #[serde(rename = "taxonID")]
    pub taxon_id: String,
    pub language: String,
    pub license: String,
    #[serde(rename = "rightsHolder")]
    pub rights_holder: String,
    #[serde(rename = "datasetID")]
    pub dataset_id: String,
    #[serde(rename = "institutionCode")]
    pub institution_code: String,
    #[serde(rename = "datasetName")]
    pub dataset_name: String,
    #[serde(rename = "scientificName")]
    pub scientific_name: String,
    pub kingdom: String,
    pub phylum: String,
    pub class: String,
    pub order: String,
    pub family: String,
    pub genus: String,
    #[serde(rename = "taxonRank")]
    pub taxon_rank: String,
    #[serde(rename = "nomenclaturalCode")]
    pub nomenclatural_code: String,
}

impl DwcRow for TaxonRow {
    const COLUMNS: &'static [&'static str] = &[
        "taxonID",
        "language",
        "license",
        "rightsHolder",
        "datasetID",
        "institutionCode",
        "datasetName",
        "scientificName",
        "kingdom",
        "phylum",
        "class",
        "order",
        "family",
        "genus",
        "taxonRank",
        "nomenclaturalCode",
    ];

    fn taxon_id(&self) -> &str {
        &self.taxon_id
    }
}

/// One row per taxon: dataset constants plus the taxonomy of the first
/// record seen for that taxon.
pub fn build_taxon_table(records: &[EnrichedRecord], dataset: &DatasetConfig) -> Vec<TaxonRow> {
    unique_taxa(records)
        .into_iter()
        .map(|r| {
            let raw = &r.record;
            TaxonRow {
                taxon_id: r.taxon_id.clone(),
                language: dataset.language.clone(),
                license: dataset.license.clone(),
                rights_holder: dataset.rights_holder.clone(),
                dataset_id: dataset.id.clone(),
                institution_code: dataset.institution_code.clone(),
                dataset_name: dataset.name.clone(),
                scientific_name: raw.get_or_empty(constants::SCIENTIFIC_NAME).to_string(),
                kingdom: raw.get_or_empty(constants::KINGDOM).to_string(),
                phylum: raw.get_or_empty(constants::PHYLUM).to_string(),
                class: raw.get_or_empty(constants::CLASS).to_string(),
                order: raw.get_or_empty(constants::ORDER).to_string(),
                family: raw.get_or_empty(constants::FAMILY).to_string(),
                genus: raw.get_or_empty(constants::GENUS).to_string(),
                taxon_rank: raw.get_or_empty(constants::TAXON_RANK).to_string(),
                nomenclatural_code: raw.get_or_empty(constants::NOMENCLATURAL_CODE).to_string(),
            }
        })
        .collect()
}
