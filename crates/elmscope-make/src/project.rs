use std::path::{Path, PathBuf};

pub const PROJECT_FILE_NAME: &str = "elm-package.json";

/// Find the Elm project root by walking up from a source file to the nearest
/// directory holding `elm-package.json`.
pub fn find_project_root(file_path: &Path) -> Option<PathBuf> {
    let mut dir = file_path.parent();
    while let Some(current_dir) = dir {
        if current_dir.join(PROJECT_FILE_NAME).is_file() {
            return Some(current_dir.to_path_buf());
        }
        dir = current_dir.parent();
    }
    None
}
