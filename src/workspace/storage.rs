use super::types::{WorkspaceState, WORKSPACE_VERSION};
use crate::error::WorkspaceError;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `workspace.json` next to the config file.
pub fn get_workspace_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("workspace.json"))
}

/// Read the workspace at `path`.
///
/// First use has no file yet and starts from an empty workspace. A file
/// written by a different workspace version is rejected with
/// [`WorkspaceError::UnsupportedVersion`].
pub fn load_workspace(path: &Path) -> Result<WorkspaceState> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no workspace file yet, starting empty");
            return Ok(WorkspaceState::new());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to open workspace file at {}", path.display()))
        }
    };

    let state: WorkspaceState = serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Invalid workspace JSON in {}", path.display()))?;

    let version = state.version;
    match version {
        WORKSPACE_VERSION => Ok(state),
        other => Err(WorkspaceError::UnsupportedVersion(other).into()),
    }
}

/// Persist the workspace as pretty JSON, replacing the previous file in one
/// rename so readers see either the old or the new state.
pub fn save_workspace(path: &Path, state: &WorkspaceState) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create workspace directory {}", dir.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to stage workspace write at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize workspace")?;
    file.commit()
        .with_context(|| format!("Failed to replace workspace at {}", path.display()))?;

    debug!(
        path = %path.display(),
        lists = state.lists.len(),
        searches = state.saved_searches.len(),
        custom_companies = state.custom_companies.len(),
        "saved workspace"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::CompanyQuery;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_workspace(&dir.path().join("workspace.json")).unwrap();
        assert_eq!(state, WorkspaceState::new());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("workspace.json");

        let mut state = WorkspaceState::new();
        let list_id = state.create_list("Top of funnel").unwrap().id.clone();
        state.toggle_membership(&list_id, "clinicflow").unwrap();
        state
            .save_search("Climate", &CompanyQuery { q: "carbon".to_string(), ..Default::default() })
            .unwrap();
        state.add_custom_company("Acme", "acme.io", Some("Widgets")).unwrap();
        state.set_note("clinicflow", "Follow up in Q3");

        save_workspace(&path, &state).unwrap();
        let loaded = load_workspace(&path).unwrap();

        assert_eq!(loaded, state);
        assert_eq!(loaded.lists_containing("clinicflow").len(), 1);
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspace.json");
        fs::write(&path, r#"{"version": 2}"#).unwrap();

        let err = load_workspace(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<WorkspaceError>(),
            Some(&WorkspaceError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspace.json");
        fs::write(&path, "{").unwrap();
        let err = load_workspace(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid workspace JSON"));
    }
}
