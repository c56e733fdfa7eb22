use crate::constants;
use crate::error::Result;
use crate::tables::{DwcRow, DwcTables};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A file produced by the run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub rows: usize,
    pub sha256: String,
}

fn writer(path: &Path) -> Result<csv::Writer<fs::File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;
    Ok(wtr)
}

/// Writes `rows` under the row type's header; empty values stay "".
pub fn write_table<T: DwcRow + Serialize>(path: &Path, rows: &[T]) -> Result<WrittenFile> {
    let mut wtr = writer(path)?;
    wtr.write_record(T::COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    drop(wtr);

    let written = WrittenFile {
        path: path.to_path_buf(),
        rows: rows.len(),
        sha256: sha256_file(path)?,
    };
    info!("Wrote {} rows to {}", written.rows, path.display());
    Ok(written)
}

/// Writes an untyped table, e.g. the enriched snapshot.
pub fn write_raw(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<WrittenFile> {
    let mut wtr = writer(path)?;
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    drop(wtr);

    let written = WrittenFile {
        path: path.to_path_buf(),
        rows: rows.len(),
        sha256: sha256_file(path)?,
    };
    info!("Wrote {} rows to {}", written.rows, path.display());
    Ok(written)
}

/// Writes the four tables into `dir` in a fixed order.
pub fn write_tables(dir: &Path, tables: &DwcTables) -> Result<Vec<WrittenFile>> {
    fs::create_dir_all(dir)?;
    Ok(vec![
        write_table(&dir.join(constants::TAXON_FILE), &tables.taxa)?,
        write_table(&dir.join(constants::DISTRIBUTION_FILE), &tables.distributions)?,
        write_table(&dir.join(constants::SPECIES_PROFILE_FILE), &tables.species_profiles)?,
        write_table(&dir.join(constants::DESCRIPTION_FILE), &tables.descriptions)?,
    ])
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::test_support::{dataset, enriched};
    use crate::tables::{DescriptionRow, SpeciesProfileRow};

    #[test]
    fn test_header_and_booleans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speciesprofile.csv");
        let rows = vec![SpeciesProfileRow {
            taxon_id: "ds:taxon:abc".to_string(),
            is_marine: true,
            is_freshwater: true,
            is_terrestrial: false,
        }];

        let written = write_table(&path, &rows).unwrap();
        assert_eq!(written.rows, 1);
        assert_eq!(written.sha256.len(), 64);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "taxonID,isMarine,isFreshwater,isTerrestrial\nds:taxon:abc,true,true,false\n"
        );
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("description.csv");

        write_table::<DescriptionRow>(&path, &[]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "taxonID,description,type,language\n"
        );
    }

    #[test]
    fn test_values_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("description.csv");
        let rows = vec![DescriptionRow {
            taxon_id: "ds:taxon:abc".to_string(),
            description: "Africa, Asia".to_string(),
            description_type: "native range".to_string(),
            language: "en".to_string(),
        }];

        write_table(&path, &rows).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("ds:taxon:abc,\"Africa, Asia\",native range,en\n"));
    }

    #[test]
    fn test_columns_match_serialized_names() {
        let records = vec![enriched(&[
            ("scientific_name", "Acer negundo"),
            ("kingdom", "Plantae"),
            ("native_range", "North America"),
        ])];
        let tables = DwcTables::build(&records, &dataset());

        let dir = tempfile::tempdir().unwrap();
        let files = write_tables(dir.path(), &tables).unwrap();
        assert_eq!(files.len(), 4);

        for file in &files {
            let mut rdr = csv::Reader::from_path(&file.path).unwrap();
            let header_len = rdr.headers().unwrap().len();
            for record in rdr.records() {
                assert_eq!(record.unwrap().len(), header_len);
            }
        }
        let taxon = fs::read_to_string(dir.path().join("taxon.csv")).unwrap();
        assert!(taxon.starts_with("taxonID,language,license,rightsHolder,datasetID,"));
    }

    #[test]
    fn test_raw_snapshot_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw").join("dump.csv");
        let headers = vec!["scientific_name".to_string(), "gbif_rank".to_string()];
        let rows = vec![vec!["Acer negundo".to_string(), "SPECIES".to_string()]];

        write_raw(&path, &headers, &rows).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "scientific_name,gbif_rank\nAcer negundo,SPECIES\n"
        );
    }
}
