use super::{unique_taxa, DwcRow};
use crate::config::DatasetConfig;
use crate::constants;
use crate::types::EnrichedRecord;
use serde::Serialize;
use tracing::warn;

/// How one wide checklist column unfolds into description rows
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    pub column: &'static str,
    /// Values kept per cell; further values are dropped
    pub max_values: usize,
    /// `None` keeps the cell as a single value
    pub delimiter: Option<&'static str>,
    /// `(from, to)` synonym folding applied to each value
    pub recode: &'static [(&'static str, &'static str)],
    pub type_label: &'static str,
}

/// Descriptor columns, in output order
pub const DESCRIPTORS: [Descriptor; 3] = [
    Descriptor {
        column: constants::NATIVE_RANGE,
        max_values: 3,
        delimiter: Some(constants::MULTI_VALUE_DELIMITER),
        recode: &[("probably the Americas", "America")],
        type_label: constants::NATIVE_RANGE_TYPE,
    },
    Descriptor {
        column: constants::DEGREE_OF_ESTABLISHMENT,
        max_values: 1,
        delimiter: None,
        recode: &[],
        type_label: constants::DEGREE_OF_ESTABLISHMENT_TYPE,
    },
    Descriptor {
        column: constants::INTRODUCTION_PATHWAY,
        max_values: 2,
        delimiter: Some(constants::MULTI_VALUE_DELIMITER),
        recode: &[],
        type_label: constants::PATHWAY_TYPE,
    },
];

impl Descriptor {
    /// Non-empty values of `cell`, capped at `max_values` and recoded.
    /// Returns the values and the number of dropped ones.
    pub fn values<'a>(&self, cell: &'a str) -> (Vec<&'a str>, usize) {
        let slots: Vec<&'a str> = match self.delimiter {
            Some(delimiter) => cell.split(delimiter).collect(),
            None => vec![cell],
        };
        let dropped = slots.len().saturating_sub(self.max_values);

        let values = slots
            .into_iter()
            .take(self.max_values)
            .filter(|v| !v.trim().is_empty())
            .map(|v| self.fold_synonym(v))
            .collect();
        (values, dropped)
    }

    fn fold_synonym<'a>(&self, value: &'a str) -> &'a str {
        self.recode
            .iter()
            .find(|(from, _)| *from == value)
            .map(|(_, to)| *to)
            .unwrap_or(value)
    }
}

/// Row of the description extension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionRow {
    #[serde(rename = "taxonID")]
    pub taxon_id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub description_type: String,
    pub language: String,
}

impl DwcRow for DescriptionRow {
    const COLUMNS: &'static [&'static str] = &["taxonID", "description", "type", "language"];

    fn taxon_id(&self) -> &str {
        &self.taxon_id
    }
}

/// Unpivots the descriptor columns of each taxon into (type, value) rows.
pub fn build_description_table(
    records: &[EnrichedRecord],
    dataset: &DatasetConfig,
) -> Vec<DescriptionRow> {
    let taxa = unique_taxa(records);
    DESCRIPTORS
        .iter()
        .flat_map(|descriptor| describe(&taxa, descriptor, &dataset.language))
        .collect()
}

fn describe(taxa: &[&EnrichedRecord], descriptor: &Descriptor, language: &str) -> Vec<DescriptionRow> {
    let mut rows = Vec::new();
    for taxon in taxa {
        let Some(cell) = taxon.record.get(descriptor.column) else {
            continue;
        };
        let (values, dropped) = descriptor.values(cell);
        if dropped > 0 {
            warn!(
                "Dropped {} extra '{}' value(s) for {} (max {}): {}",
                dropped, descriptor.column, taxon.taxon_id, descriptor.max_values, cell
            );
        }
        rows.extend(values.into_iter().map(|value| DescriptionRow {
            taxon_id: taxon.taxon_id.clone(),
            description: value.to_string(),
            description_type: descriptor.type_label.to_string(),
            language: language.to_string(),
        }));
    }
    rows
}
