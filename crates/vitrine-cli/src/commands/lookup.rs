use anyhow::Result;

use vitrine_sync::{Lookup, LookupOutcome, SparqlLookup, SyncConfig};

/// Query the SPARQL endpoint for an accession number and print the
/// outcome. Read-only; needs no credentials.
pub async fn run_lookup(accession: &str) -> Result<()> {
    let config = SyncConfig::load()?;
    let lookup = SparqlLookup::new(&config)?;

    match lookup.find_by_accession(accession).await? {
        LookupOutcome::NoMatch => {
            println!("{accession}: no item found");
        }
        LookupOutcome::OneMatch(qid) => {
            println!("{accession}: https://www.wikidata.org/wiki/{qid}");
        }
        LookupOutcome::Ambiguous(count) => {
            println!("{accession}: {count} items share this accession number!");
            println!("The remote data needs curation before this record can be synced.");
        }
    }

    Ok(())
}
