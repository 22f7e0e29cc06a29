use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::companies::{custom_company_id, Company, CompanyQuery, ALL_INDUSTRIES};
use crate::enrichment::normalize_website_url;
use crate::error::WorkspaceError;
use crate::thesis::{FundingStage, StageFilter, ThesisTag};

pub const WORKSPACE_VERSION: u32 = 1;

const CUSTOM_COMPANY_DESCRIPTION: &str = "Custom website added manually for on-the-fly enrichment.";

/// Persistent user state: lists, saved searches, custom companies and notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceState {
    pub version: u32,
    #[serde(default)]
    pub lists: Vec<CompanyList>,
    #[serde(default)]
    pub saved_searches: Vec<SavedSearch>,
    #[serde(default)]
    pub custom_companies: Vec<Company>,
    /// Company id -> free-form note
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyList {
    pub id: String,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub company_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default)]
    pub stage: StageFilter,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ThesisTag>,
    pub created_at: String,
}

impl SavedSearch {
    /// Rebuild the company query this search was saved from.
    pub fn to_query(&self, page: usize) -> CompanyQuery {
        CompanyQuery {
            q: self.query.clone(),
            stage: self.stage,
            industry: self.industry.clone(),
            tags: self.tags.clone(),
            page,
            ..CompanyQuery::default()
        }
    }
}

/// Random lower-case base-36 string of `len` characters.
pub fn random_suffix(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceState {
    /// Create a new empty workspace with the current version
    pub fn new() -> Self {
        Self {
            version: WORKSPACE_VERSION,
            lists: Vec::new(),
            saved_searches: Vec::new(),
            custom_companies: Vec::new(),
            notes: BTreeMap::new(),
        }
    }

    /// Create an empty list. The name is trimmed and must not be blank.
    pub fn create_list(&mut self, name: &str) -> Result<&CompanyList, WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::BlankName("list"));
        }
        let created_at = now_timestamp();
        self.lists.push(CompanyList {
            id: format!("list-{}-{}", created_at, random_suffix(6)),
            name: name.to_string(),
            created_at,
            company_ids: Vec::new(),
        });
        Ok(&self.lists[self.lists.len() - 1])
    }

    pub fn remove_list(&mut self, id: &str) -> Result<CompanyList, WorkspaceError> {
        let pos = self
            .lists
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| WorkspaceError::ListNotFound(id.to_string()))?;
        Ok(self.lists.remove(pos))
    }

    pub fn list(&self, id: &str) -> Option<&CompanyList> {
        self.lists.iter().find(|l| l.id == id)
    }

    /// Add the company to the list if absent, remove it if present.
    /// Returns true when the company is a member afterwards.
    pub fn toggle_membership(&mut self, list_id: &str, company_id: &str) -> Result<bool, WorkspaceError> {
        let list = self
            .lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| WorkspaceError::ListNotFound(list_id.to_string()))?;

        if let Some(pos) = list.company_ids.iter().position(|id| id == company_id) {
            list.company_ids.remove(pos);
            Ok(false)
        } else {
            list.company_ids.push(company_id.to_string());
            Ok(true)
        }
    }

    pub fn lists_containing(&self, company_id: &str) -> Vec<&CompanyList> {
        self.lists
            .iter()
            .filter(|l| l.company_ids.iter().any(|id| id == company_id))
            .collect()
    }

    /// Save the filters of `query` under `name`. The page and sort order are
    /// not part of a saved search.
    pub fn save_search(&mut self, name: &str, query: &CompanyQuery) -> Result<&SavedSearch, WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::BlankName("saved search"));
        }
        let created_at = now_timestamp();
        let industry = query
            .industry
            .clone()
            .filter(|i| !i.is_empty() && i != ALL_INDUSTRIES);
        self.saved_searches.push(SavedSearch {
            id: format!("search-{}-{}", created_at, random_suffix(6)),
            name: name.to_string(),
            query: query.q.clone(),
            industry,
            stage: query.stage,
            tags: query.tags.clone(),
            created_at,
        });
        Ok(&self.saved_searches[self.saved_searches.len() - 1])
    }

    pub fn remove_search(&mut self, id: &str) -> Result<SavedSearch, WorkspaceError> {
        let pos = self
            .saved_searches
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| WorkspaceError::SearchNotFound(id.to_string()))?;
        Ok(self.saved_searches.remove(pos))
    }

    pub fn saved_search(&self, id: &str) -> Option<&SavedSearch> {
        self.saved_searches.iter().find(|s| s.id == id)
    }

    /// Register a user-added company for enrichment. Name and website are
    /// trimmed and both required.
    pub fn add_custom_company(
        &mut self,
        name: &str,
        website: &str,
        description: Option<&str>,
    ) -> Result<&Company, WorkspaceError> {
        let (name, website) = (name.trim(), website.trim());
        if name.is_empty() || website.is_empty() {
            return Err(WorkspaceError::MissingCompanyFields);
        }
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(CUSTOM_COMPANY_DESCRIPTION);

        self.custom_companies.push(Company {
            id: custom_company_id(name, website, &random_suffix(4)),
            name: name.to_string(),
            website: normalize_website_url(website),
            industry: "Custom".to_string(),
            stage: FundingStage::Bootstrapped,
            thesis_tags: Vec::new(),
            location: "Unknown".to_string(),
            description: description.to_string(),
            last_funding_round: None,
            employee_count_range: None,
        });
        Ok(&self.custom_companies[self.custom_companies.len() - 1])
    }

    /// Set the note for a company. Blank text removes it.
    pub fn set_note(&mut self, company_id: &str, text: &str) {
        if text.trim().is_empty() {
            self.notes.remove(company_id);
        } else {
            self.notes.insert(company_id.to_string(), text.to_string());
        }
    }

    pub fn note(&self, company_id: &str) -> Option<&str> {
        self.notes.get(company_id).map(String::as_str)
    }
}
