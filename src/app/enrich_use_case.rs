use crate::app::ports::NameMatcherPort;
use crate::constants;
use crate::error::Result;
use crate::identifier::compute_taxon_id;
use crate::types::{Checklist, EnrichedRecord, NameMatch};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Matches every checklist name against the backbone and assigns taxon ids
pub struct EnrichUseCase {
    matcher: Box<dyn NameMatcherPort>,
    shortname: String,
}

impl EnrichUseCase {
    pub fn new(matcher: Box<dyn NameMatcherPort>, shortname: impl Into<String>) -> Self {
        Self {
            matcher,
            shortname: shortname.into(),
        }
    }

    /// Looks up each distinct scientific name once, then derives one
    /// enriched record per input row, in input order.
    #[instrument(skip_all, fields(records = checklist.len()))]
    pub async fn enrich(&self, checklist: &Checklist) -> Result<Vec<EnrichedRecord>> {
        let mut matches: HashMap<String, NameMatch> = HashMap::new();
        for record in &checklist.records {
            let Some(name) = record.get(constants::SCIENTIFIC_NAME) else {
                continue;
            };
            if matches.contains_key(name) {
                continue;
            }
            let name_match = self.matcher.match_name(name).await?;
            debug!(
                "Matched '{}' -> {:?} ({:?}, confidence {:?})",
                name, name_match.canonical_name, name_match.match_type, name_match.confidence
            );
            matches.insert(name.to_string(), name_match);
        }
        info!("Matched {} distinct scientific names", matches.len());

        let enriched = checklist
            .records
            .iter()
            .map(|record| {
                let name = record.get_or_empty(constants::SCIENTIFIC_NAME);
                let name_match = matches.get(name).cloned().unwrap_or_default();
                let canonical_name = match name_match.canonical_name.as_deref() {
                    Some(canonical) if !canonical.trim().is_empty() => canonical.to_string(),
                    _ => {
                        warn!("No canonical name for '{}'; using the name as given", name);
                        name.to_string()
                    }
                };
                let taxon_id = compute_taxon_id(
                    &self.shortname,
                    &canonical_name,
                    record.get_or_empty(constants::KINGDOM),
                );
                EnrichedRecord {
                    record: record.clone(),
                    name_match,
                    canonical_name,
                    taxon_id,
                }
            })
            .collect();
        Ok(enriched)
    }
}

/// The checklist as read plus the match columns, for the raw snapshot and
/// the sheet write-back.
pub fn snapshot_table(
    checklist: &Checklist,
    enriched: &[EnrichedRecord],
) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers = checklist.headers.clone();
    headers.extend(constants::ENRICHMENT_COLUMNS.iter().map(|c| c.to_string()));

    let rows = enriched
        .iter()
        .map(|e| {
            let mut row: Vec<String> = checklist
                .headers
                .iter()
                .map(|h| e.record.get_or_empty(h).to_string())
                .collect();
            let m = &e.name_match;
            row.push(m.canonical_name.clone().unwrap_or_default());
            row.push(m.match_type.clone().unwrap_or_default());
            row.push(m.confidence.map(|c| c.to_string()).unwrap_or_default());
            row.push(m.rank.clone().unwrap_or_default());
            row
        })
        .collect();
    (headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawRecord;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Answers from a fixed table and remembers every lookup
    struct StubMatcher {
        known: HashMap<&'static str, &'static str>,
        calls: Arc<tokio::sync::Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl NameMatcherPort for StubMatcher {
        async fn match_name(&self, name: &str) -> Result<NameMatch> {
            self.calls.lock().await.push(name.to_string());
            Ok(match self.known.get(name) {
                Some(canonical) => NameMatch {
                    canonical_name: Some(canonical.to_string()),
                    match_type: Some("EXACT".to_string()),
                    confidence: Some(98),
                    rank: Some("SPECIES".to_string()),
                },
                None => NameMatch {
                    match_type: Some("NONE".to_string()),
                    ..Default::default()
                },
            })
        }
    }

    fn checklist(rows: &[(&str, &str)]) -> Checklist {
        Checklist::new(
            vec!["scientific_name".to_string(), "kingdom".to_string()],
            rows.iter()
                .map(|(name, kingdom)| {
                    RawRecord::from_pairs([("scientific_name", *name), ("kingdom", *kingdom)])
                })
                .collect(),
        )
        .unwrap()
    }

    fn use_case() -> (EnrichUseCase, Arc<tokio::sync::Mutex<Vec<String>>>) {
        let calls = Arc::new(tokio::sync::Mutex::new(Vec::new()));
        let matcher = StubMatcher {
            known: HashMap::from([
                ("Acer negundo L.", "Acer negundo"),
                ("Acer negundo", "Acer negundo"),
            ]),
            calls: calls.clone(),
        };
        (EnrichUseCase::new(Box::new(matcher), "ds"), calls)
    }

    #[tokio::test]
    async fn test_each_distinct_name_matched_once() {
        let (use_case, calls) = use_case();
        let input = checklist(&[
            ("Acer negundo L.", "Plantae"),
            ("Acer negundo L.", "Plantae"),
            ("Acer negundo", "Plantae"),
        ]);

        let enriched = use_case.enrich(&input).await.unwrap();
        assert_eq!(enriched.len(), 3);
        assert_eq!(*calls.lock().await, vec!["Acer negundo L.", "Acer negundo"]);
    }

    #[tokio::test]
    async fn test_identifier_uses_canonical_name() {
        let (use_case, _) = use_case();
        let input = checklist(&[("Acer negundo L.", "Plantae"), ("Acer negundo", "Plantae")]);

        let enriched = use_case.enrich(&input).await.unwrap();
        assert_eq!(enriched[0].taxon_id, enriched[1].taxon_id);
        assert_eq!(enriched[0].taxon_id, compute_taxon_id("ds", "Acer negundo", "Plantae"));
        assert_eq!(enriched[0].canonical_name, "Acer negundo");
        // the record itself is untouched
        assert_eq!(enriched[0].record.get("scientific_name"), Some("Acer negundo L."));
    }

    #[tokio::test]
    async fn test_unmatched_name_falls_back_to_given_name() {
        let (use_case, _) = use_case();
        let input = checklist(&[("Nonexistus fictus", "Animalia"), ("Otherus fictus", "Animalia")]);

        let enriched = use_case.enrich(&input).await.unwrap();
        assert_eq!(enriched[0].canonical_name, "Nonexistus fictus");
        assert_ne!(enriched[0].taxon_id, enriched[1].taxon_id);
        assert_eq!(enriched[0].name_match.match_type.as_deref(), Some("NONE"));
    }

    #[tokio::test]
    async fn test_matcher_failure_aborts() {
        struct FailingMatcher;

        #[async_trait]
        impl NameMatcherPort for FailingMatcher {
            async fn match_name(&self, _name: &str) -> Result<NameMatch> {
                Err(crate::error::ChecklistError::Api {
                    message: "backbone unavailable".to_string(),
                })
            }
        }

        let use_case = EnrichUseCase::new(Box::new(FailingMatcher), "ds");
        let input = checklist(&[("Acer negundo", "Plantae")]);
        assert!(use_case.enrich(&input).await.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_appends_match_columns() {
        let (use_case, _) = use_case();
        let input = checklist(&[("Acer negundo L.", "Plantae"), ("Nonexistus fictus", "")]);
        let enriched = use_case.enrich(&input).await.unwrap();

        let (headers, rows) = snapshot_table(&input, &enriched);
        assert_eq!(
            headers,
            vec![
                "scientific_name",
                "kingdom",
                "gbif_canonical_name",
                "gbif_match_type",
                "gbif_confidence",
                "gbif_rank"
            ]
        );
        assert_eq!(
            rows[0],
            vec!["Acer negundo L.", "Plantae", "Acer negundo", "EXACT", "98", "SPECIES"]
        );
        assert_eq!(rows[1], vec!["Nonexistus fictus", "", "", "NONE", "", ""]);
    }
}
