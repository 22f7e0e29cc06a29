use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::types::EnrichmentResult;

const ENRICHMENT_KEY_PREFIX: &str = "enrichment:";

/// Get the platform-appropriate enrichment cache directory
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("precision-scout/enrichments"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/precision-scout/enrichments",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

fn cache_key(company_id: &str) -> String {
    format!("{}{}", ENRICHMENT_KEY_PREFIX, company_id)
}

/// Read the last enrichment result stored for a company.
///
/// Missing or unreadable entries are treated as absent.
pub fn read_enrichment(cache_path: &Path, company_id: &str) -> Option<EnrichmentResult> {
    let bytes = cacache::read_sync(cache_path, cache_key(company_id)).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(result) => Some(result),
        Err(e) => {
            warn!(company_id, error = %e, "ignoring corrupt enrichment cache entry");
            None
        }
    }
}

/// Store an enrichment result for a company, replacing any previous one.
pub fn write_enrichment(cache_path: &Path, company_id: &str, result: &EnrichmentResult) -> Result<()> {
    let json = serde_json::to_vec(result).context("Failed to serialize enrichment result")?;
    cacache::write_sync(cache_path, cache_key(company_id), &json)
        .with_context(|| format!("Failed to cache enrichment for {}", company_id))?;
    debug!(company_id, bytes = json.len(), "cached enrichment result");
    Ok(())
}

/// Drop the stored enrichment for a company. Removing a missing entry is not
/// an error.
pub fn remove_enrichment(cache_path: &Path, company_id: &str) -> Result<()> {
    cacache::remove_sync(cache_path, cache_key(company_id))
        .with_context(|| format!("Failed to remove cached enrichment for {}", company_id))?;
    Ok(())
}
