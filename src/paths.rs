//! Path utilities for determining data storage locations.
//!
//! Diagnostic data lives in `~/.verify-hooks/` with one subdirectory per
//! project, named from the project directory plus a hash of its path.
//! Nothing is ever written inside the project itself.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// The base directory name for verify-hooks data.
const DATA_DIR_NAME: &str = ".verify-hooks";

/// Get the base data directory, `~/.verify-hooks/`.
///
/// Returns `None` if the home directory cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the project-specific data directory,
/// `~/.verify-hooks/projects/<name>-<hash>/`.
#[must_use]
pub fn project_data_dir(project_dir: &Path) -> Option<PathBuf> {
    data_dir().map(|base| project_data_dir_under(&base, project_dir))
}

/// The project data directory beneath an explicit base directory.
pub fn project_data_dir_under(base: &Path, project_dir: &Path) -> PathBuf {
    base.join("projects").join(create_project_dir_name(project_dir))
}

/// Create a directory name for a project.
///
/// Format: `<project-name>-<hash>` e.g., `my-project-00a1b2c3d4e5f607`
fn create_project_dir_name(project_dir: &Path) -> String {
    let path_to_hash = project_dir.canonicalize().unwrap_or_else(|_| project_dir.to_path_buf());

    let prefix = path_to_hash.file_name().and_then(|n| n.to_str()).unwrap_or("project");
    let prefix: String =
        prefix.chars().map(|c| if c.is_alphanumeric() { c } else { '-' }).collect();
    let prefix = prefix.trim_matches('-');

    let mut hasher = DefaultHasher::new();
    path_to_hash.hash(&mut hasher);

    format!("{prefix}-{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_returns_home_based_path() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(data_dir().unwrap(), home.join(".verify-hooks"));
        }
    }

    #[test]
    fn test_project_data_dir_under_layout() {
        let dir = project_data_dir_under(Path::new("/data"), Path::new("/some/project/web app"));
        assert!(dir.starts_with("/data/projects"));
        let name = dir.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("web-app-"));
    }

    #[test]
    fn test_create_project_dir_name_is_consistent() {
        let project = PathBuf::from("/consistent/path");
        assert_eq!(create_project_dir_name(&project), create_project_dir_name(&project));
    }

    #[test]
    fn test_create_project_dir_name_no_collision_similar_paths() {
        let project1 = PathBuf::from("/home/user/project");
        let project2 = PathBuf::from("/home/user-project");
        assert_ne!(create_project_dir_name(&project1), create_project_dir_name(&project2));
    }

    #[test]
    fn test_root_falls_back_to_project() {
        let name = create_project_dir_name(Path::new("/"));
        assert!(name.starts_with("project-"));
    }
}
