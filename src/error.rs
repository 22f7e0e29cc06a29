use thiserror::Error;

/// Errors from parsing filter and query arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown thesis tag '{0}' (expected one of: {1})")]
    UnknownTag(String, String),

    #[error("unknown funding stage '{0}' (expected Any, Pre-Seed, Seed, Series A, Series B+ or Bootstrapped)")]
    UnknownStage(String),

    #[error("unknown sort key '{0}' (expected name, stage or location)")]
    UnknownSortKey(String),
}

/// Errors from mutating or loading the persisted workspace.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("list not found: {0}")]
    ListNotFound(String),

    #[error("saved search not found: {0}")]
    SearchNotFound(String),

    #[error("company not found: {0}")]
    CompanyNotFound(String),

    #[error("{0} name must not be empty")]
    BlankName(&'static str),

    #[error("company name and website are required")]
    MissingCompanyFields,

    #[error("unsupported workspace version: {0}")]
    UnsupportedVersion(u32),
}
