pub mod storage;
pub mod types;

pub use storage::{get_workspace_path, load_workspace, save_workspace};
pub use types::{random_suffix, CompanyList, SavedSearch, WorkspaceState, WORKSPACE_VERSION};
