use super::{unique_taxa, DwcRow};
use crate::constants;
use crate::types::EnrichedRecord;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

// Habitat flags are fixed for the whole checklist; `realm` does not drive them.
// TODO: derive the flags from `realm` once the data owners confirm the mapping.
pub const IS_MARINE: bool = true;
pub const IS_FRESHWATER: bool = true;
pub const IS_TERRESTRIAL: bool = false;

/// Row of the species profile extension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesProfileRow {
    #[serde(rename = "taxonID")]
    pub taxon_id: String,
    #[serde(rename = "isMarine")]
    pub is_marine: bool,
    #[serde(rename = "isFreshwater")]
    pub is_freshwater: bool,
    #[serde(rename = "isTerrestrial")]
    pub is_terrestrial: bool,
}

impl DwcRow for SpeciesProfileRow {
    const COLUMNS: &'static [&'static str] = &["taxonID", "isMarine", "isFreshwater", "isTerrestrial"];

    fn taxon_id(&self) -> &str {
        &self.taxon_id
    }
}

pub fn build_species_profile_table(records: &[EnrichedRecord]) -> Vec<SpeciesProfileRow> {
    let realms: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.record.get(constants::REALM))
        .collect();
    info!(
        "Realm values in checklist: {:?} (habitat flags are fixed at marine={}, freshwater={}, terrestrial={})",
        realms, IS_MARINE, IS_FRESHWATER, IS_TERRESTRIAL
    );

    unique_taxa(records)
        .into_iter()
        .map(|r| SpeciesProfileRow {
            taxon_id: r.taxon_id.clone(),
            is_marine: IS_MARINE,
            is_freshwater: IS_FRESHWATER,
            is_terrestrial: IS_TERRESTRIAL,
        })
        .collect()
}
