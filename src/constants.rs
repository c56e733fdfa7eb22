/// Column names of the source checklist.
/// The sheet uses snake_case headers; every cell is read as a string.
pub const SCIENTIFIC_NAME: &str = "scientific_name";
pub const KINGDOM: &str = "kingdom";
pub const PHYLUM: &str = "phylum";
pub const CLASS: &str = "class";
pub const ORDER: &str = "order";
pub const FAMILY: &str = "family";
pub const GENUS: &str = "genus";
pub const TAXON_RANK: &str = "taxon_rank";
pub const NOMENCLATURAL_CODE: &str = "nomenclatural_code";
pub const LOCATION: &str = "location";
pub const COUNTRY_CODE: &str = "country_code";
pub const OCCURRENCE_STATUS: &str = "occurrence_status";
pub const ORIGIN: &str = "origin";
pub const FIRST_OBSERVATION: &str = "first_observation";
pub const LAST_OBSERVATION: &str = "last_observation";
pub const REMARKS: &str = "remarks";
pub const SOURCE: &str = "source";
pub const REALM: &str = "realm";
pub const NATIVE_RANGE: &str = "native_range";
pub const INTRODUCTION_PATHWAY: &str = "introduction_pathway";
pub const DEGREE_OF_ESTABLISHMENT: &str = "degree_of_establishment";

/// Columns the pipeline cannot run without
pub const REQUIRED_COLUMNS: [&str; 2] = [SCIENTIFIC_NAME, KINGDOM];

// Columns appended to the enriched snapshot
pub const GBIF_CANONICAL_NAME: &str = "gbif_canonical_name";
pub const GBIF_MATCH_TYPE: &str = "gbif_match_type";
pub const GBIF_CONFIDENCE: &str = "gbif_confidence";
pub const GBIF_RANK: &str = "gbif_rank";

pub const ENRICHMENT_COLUMNS: [&str; 4] = [
    GBIF_CANONICAL_NAME,
    GBIF_MATCH_TYPE,
    GBIF_CONFIDENCE,
    GBIF_RANK,
];

/// Separator used inside multi-valued cells
pub const MULTI_VALUE_DELIMITER: &str = " | ";

// Description types
pub const NATIVE_RANGE_TYPE: &str = "native range";
pub const PATHWAY_TYPE: &str = "pathway of introduction";
pub const DEGREE_OF_ESTABLISHMENT_TYPE: &str = "degree of establishment";

// Output file names
pub const TAXON_FILE: &str = "taxon.csv";
pub const DISTRIBUTION_FILE: &str = "distribution.csv";
pub const SPECIES_PROFILE_FILE: &str = "speciesprofile.csv";
pub const DESCRIPTION_FILE: &str = "description.csv";
