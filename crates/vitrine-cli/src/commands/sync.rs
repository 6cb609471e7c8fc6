use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use vitrine_core::model::ArtworkRecord;
use vitrine_sync::{ApiClient, SparqlLookup, SyncConfig, SyncEngine};

/// Run the full sync for every record in the file.
pub async fn run_sync(file: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let records = read_records(&file)?;
    println!("Loaded {} record(s) from {}", records.len(), file.display());

    let config = SyncConfig::load()?;
    let lookup = SparqlLookup::new(&config)?;
    let client = ApiClient::connect(&config)
        .await
        .context("Failed to connect to the edit API")?;
    let engine = SyncEngine::new(lookup, client, config);

    let (records, reports) = engine.batch_sync(records).await;

    let mut failed = 0usize;
    for report in &reports {
        println!("{report}");
        if !report.is_success() {
            failed += 1;
        }
    }

    println!();
    println!(
        "Done: {} synced, {} failed",
        reports.len() - failed,
        failed
    );

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write records to {}", path.display()))?;
        println!("Wrote updated records to {}", path.display());
    }

    Ok(())
}

/// Read a JSON file holding either one record or an array of records.
pub fn read_records(path: &Path) -> Result<Vec<ArtworkRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if let Ok(records) = serde_json::from_str::<Vec<ArtworkRecord>>(&text) {
        return Ok(records);
    }

    let record: ArtworkRecord = serde_json::from_str(&text)
        .with_context(|| format!("{} is neither a record nor an array of records", path.display()))?;
    Ok(vec![record])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_records_accepts_single_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        std::fs::write(&path, r#"{"accession_number": "1916.1"}"#).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].accession_number.as_deref(), Some("1916.1"));
    }

    #[test]
    fn test_read_records_accepts_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("many.json");
        std::fs::write(
            &path,
            r#"[{"accession_number": "1916.1"}, {"accession_number": "1920.5"}]"#,
        )
        .unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_read_records_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(read_records(&path).is_err());
    }
}
