use crate::constants;
use crate::error::{ChecklistError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the source checklist, exactly as read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    /// Builds a record from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `column`, or `None` when the cell is missing or blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Value of `column`, with absent cells mapped to "".
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}

/// The loaded checklist: header order plus rows.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl Checklist {
    pub fn new(headers: Vec<String>, records: Vec<RawRecord>) -> Result<Self> {
        for required in constants::REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                return Err(ChecklistError::MissingColumn(required.to_string()));
            }
        }
        Ok(Self { headers, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Nearest backbone taxon for a scientific name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameMatch {
    pub canonical_name: Option<String>,
    pub match_type: Option<String>,
    pub confidence: Option<u32>,
    pub rank: Option<String>,
}

/// A checklist row with its backbone match and derived taxon identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: RawRecord,
    pub name_match: NameMatch,
    /// Name the identifier was computed from
    pub canonical_name: String,
    pub taxon_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells_are_absent() {
        let record = RawRecord::from_pairs([
            ("kingdom", "Plantae"),
            ("phylum", ""),
            ("class", "   "),
        ]);

        assert_eq!(record.get("kingdom"), Some("Plantae"));
        assert_eq!(record.get("phylum"), None);
        assert_eq!(record.get("class"), None);
        assert_eq!(record.get("order"), None);
        assert_eq!(record.get_or_empty("order"), "");
    }

    #[test]
    fn test_checklist_requires_name_and_kingdom() {
        let err = Checklist::new(vec!["scientific_name".to_string()], vec![]).unwrap_err();
        assert!(matches!(err, ChecklistError::MissingColumn(ref c) if c == "kingdom"));

        let ok = Checklist::new(
            vec!["scientific_name".to_string(), "kingdom".to_string()],
            vec![],
        )
        .unwrap();
        assert!(ok.is_empty());
    }

    #[test]
    fn test_name_match_reads_backbone_json() {
        let body = r#"{
            "usageKey": 2435099,
            "scientificName": "Puma concolor (Linnaeus, 1771)",
            "canonicalName": "Puma concolor",
            "rank": "SPECIES",
            "status": "ACCEPTED",
            "confidence": 99,
            "matchType": "EXACT",
            "kingdom": "Animalia"
        }"#;
        let m: NameMatch = serde_json::from_str(body).unwrap();

        assert_eq!(m.canonical_name.as_deref(), Some("Puma concolor"));
        assert_eq!(m.match_type.as_deref(), Some("EXACT"));
        assert_eq!(m.confidence, Some(99));
        assert_eq!(m.rank.as_deref(), Some("SPECIES"));
    }
}
