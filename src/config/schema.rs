use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::companies::DEFAULT_PAGE_SIZE;
use crate::thesis::{validate_thesis, FundThesis};

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Top-level config file.
///
/// Every key is optional; an empty file is the built-in default thesis over
/// the sample company universe.
///
/// Example YAML:
/// ```yaml
/// companies_file: /home/me/dealflow/companies.json
/// page_size: 20
/// thesis:
///   id: core-fund-thesis
///   name: AI-Enabled Vertical SaaS & Infra
///   focus_tags: [vertical_saas, developer_tools]
///   preferred_stages: ["Pre-Seed", "Seed"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thesis: Option<FundThesis>,

    /// JSON array of companies replacing the built-in sample universe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companies_file: Option<PathBuf>,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thesis: None,
            companies_file: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// The configured thesis, or the built-in default
    pub fn effective_thesis(&self) -> FundThesis {
        self.thesis.clone().unwrap_or_default()
    }

    /// Validate config at startup.
    /// Returns all validation errors at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.page_size == 0 {
            errors.push("page_size: must be at least 1".to_string());
        }

        if let Some(ref thesis) = self.thesis {
            if let Err(thesis_errors) = validate_thesis(thesis) {
                errors.extend(thesis_errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
