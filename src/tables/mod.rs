//! Darwin Core table builders.
//!
//! Every builder is a pure function from the enriched records to a fresh
//! table. Sorting by taxon identifier happens once, in [`DwcTables::build`].

pub mod description;
pub mod distribution;
pub mod species_profile;
pub mod taxon;

use crate::config::DatasetConfig;
use crate::types::EnrichedRecord;
use std::collections::HashSet;

pub use description::{build_description_table, DescriptionRow, Descriptor, DESCRIPTORS};
pub use distribution::{build_distribution_table, event_date, DistributionRow};
pub use species_profile::{build_species_profile_table, SpeciesProfileRow};
pub use taxon::{build_taxon_table, TaxonRow};

/// A row of one of the published tables
pub trait DwcRow {
    /// Header of the output file, matching the serialized field names
    const COLUMNS: &'static [&'static str];

    fn taxon_id(&self) -> &str;
}

/// First record per taxon identifier, in order of first appearance.
pub fn unique_taxa(records: &[EnrichedRecord]) -> Vec<&EnrichedRecord> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.taxon_id.as_str()))
        .collect()
}

/// Stable sort on taxon identifier; ties keep their current order.
pub fn sorted_by_taxon_id<T: DwcRow>(mut rows: Vec<T>) -> Vec<T> {
    rows.sort_by(|a, b| a.taxon_id().cmp(b.taxon_id()));
    rows
}

/// The four published tables, each sorted by taxon identifier
#[derive(Debug, Clone, PartialEq)]
pub struct DwcTables {
    pub taxa: Vec<TaxonRow>,
    pub distributions: Vec<DistributionRow>,
    pub species_profiles: Vec<SpeciesProfileRow>,
    pub descriptions: Vec<DescriptionRow>,
}

impl DwcTables {
    pub fn build(records: &[EnrichedRecord], dataset: &DatasetConfig) -> Self {
        Self {
            taxa: sorted_by_taxon_id(build_taxon_table(records, dataset)),
            distributions: sorted_by_taxon_id(build_distribution_table(records, dataset)),
            species_profiles: sorted_by_taxon_id(build_species_profile_table(records)),
            descriptions: sorted_by_taxon_id(build_description_table(records, dataset)),
        }
    }
}
