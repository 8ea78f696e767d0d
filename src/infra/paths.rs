// src/infra/paths.rs — Install-relative and user-level path resolution
//
// LUCENCE_HOME overrides every user-level path. The asset root is derived
// from the directory holding the running executable, next to which the
// `lucence/` script directory lives.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Name of the directory holding uploaded plugin scripts.
pub const STORE_DIR_NAME: &str = "lucence";

/// Returns the LUCENCE_HOME override, if set.
fn lucence_home() -> Option<PathBuf> {
    std::env::var_os("LUCENCE_HOME").map(PathBuf::from)
}

/// Configuration directory: $LUCENCE_HOME/ or the platform config dir.
pub fn config_dir() -> PathBuf {
    if let Some(home) = lucence_home() {
        return home;
    }
    match ProjectDirs::from("", "", "lucence") {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => install_dir(),
    }
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Directory containing the running executable. Falls back to the
/// current directory when the executable location cannot be determined.
pub fn install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<install-dir>/lucence`
pub fn default_store_root() -> PathBuf {
    install_dir().join(STORE_DIR_NAME)
}
