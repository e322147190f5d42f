//! Discovery of the `.numform/` directory.
//!
//! `.numform/` holds `config.yaml` and the `recipes/` folder. It is found by
//! walking up from the working directory, unless `NUMFORM_DIR` points
//! somewhere explicitly.

use std::path::{Path, PathBuf};

/// The name of the numform metadata directory.
pub const NUMFORM_DIR_NAME: &str = ".numform";

/// The name of the environment variable that can override the directory.
pub const NUMFORM_DIR_ENV: &str = "NUMFORM_DIR";

/// Walk up the directory tree from `start` looking for a `.numform/` directory.
///
/// The `NUMFORM_DIR` environment variable is checked first.
///
/// ```no_run
/// use numform_config::numform_dir::find_numform_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_numform_dir(Path::new(".")) {
///     println!("Found numform dir at {}", dir.display());
/// }
/// ```
pub fn find_numform_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(NUMFORM_DIR_ENV) {
        let env_path = PathBuf::from(env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }
    find_upwards(start)
}

fn find_upwards(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(NUMFORM_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}
