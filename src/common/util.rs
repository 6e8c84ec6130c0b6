use std::{
    env,
    path::{Path, PathBuf},
};

// ===============================================================================================
// Environment
// ===============================================================================================
#[doc(hidden)]
pub(crate) fn read_env(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) => value,
        Err(_) => default.to_string(),
    }
}

/// The charset used for flat-file bodies whose content type does not declare one.
/// Can be overridden with the `FLATMOCK_DEFAULT_CHARSET` environment variable.
pub fn default_charset() -> String {
    read_env("FLATMOCK_DEFAULT_CHARSET", "UTF-8")
}

// ===============================================================================================
// Files
// ===============================================================================================
pub fn get_test_resource_file_path(relative_resource_path: &str) -> Result<PathBuf, String> {
    match env::var("CARGO_MANIFEST_DIR") {
        Ok(manifest_path) => Ok(Path::new(&manifest_path).join(relative_resource_path)),
        Err(e) => Err(e.to_string()),
    }
}
