pub mod query;
pub mod sample;
pub mod types;

pub use query::{
    custom_company_id, industries, CompanyQuery, QueryPage, SortKey, ALL_INDUSTRIES,
    DEFAULT_PAGE_SIZE,
};
pub use sample::sample_companies;
pub use types::{Company, FundingRound};

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Load the base company universe: the JSON array at `path`, or the built-in
/// sample universe when no path is configured.
pub fn load_universe(path: Option<&Path>) -> Result<Vec<Company>> {
    let Some(path) = path else {
        return Ok(sample_companies());
    };

    let file = File::open(path)
        .with_context(|| format!("Failed to open companies file at {}", path.display()))?;
    let companies: Vec<Company> = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse companies file: invalid JSON in {}", path.display()))?;

    debug!(count = companies.len(), path = %path.display(), "loaded company universe");
    Ok(companies)
}

/// Base universe followed by user-added companies.
pub fn merge_custom(mut base: Vec<Company>, custom: &[Company]) -> Vec<Company> {
    base.extend(custom.iter().cloned());
    base
}

pub fn find_company<'a>(companies: &'a [Company], id: &str) -> Option<&'a Company> {
    companies.iter().find(|c| c.id == id)
}
