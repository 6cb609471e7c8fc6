use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use vitrine_sync::build_statements;

use crate::commands::sync::read_records;

/// Build and print the statements for each record without any network
/// call. Useful for checking field mappings before a real sync.
pub fn run_preview(file: PathBuf) -> Result<()> {
    let records = read_records(&file)?;
    let retrieved = Utc::now().date_naive();

    for record in &records {
        match build_statements(record, retrieved) {
            Ok(built) => {
                println!("== {} ==", built.accession);
                println!("label:       {}", built.label);
                println!("description: {}", built.description);
                for note in &built.notes {
                    println!("note:        {note}");
                }
                println!("{}", serde_json::to_string_pretty(&built.statements.to_json())?);
                if let Some(commons) = &built.commons {
                    println!("commons claim (written separately):");
                    println!("{}", serde_json::to_string_pretty(&commons.to_json())?);
                }
            }
            Err(e) => {
                println!("== rejected record ==");
                println!("{e}");
            }
        }
        println!();
    }

    Ok(())
}
