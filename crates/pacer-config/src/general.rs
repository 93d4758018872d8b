//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Database file path. Empty means `<data dir>/pacer/pacer.db`.
    #[serde(default)]
    pub db_path: String,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            db_path: String::new(),
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    /// Resolve the database path, falling back to the platform data directory.
    ///
    /// Returns `None` only when no path is configured and the platform has no
    /// data directory.
    pub fn resolved_db_path(&self) -> Option<PathBuf> {
        if !self.db_path.is_empty() {
            return Some(PathBuf::from(&self.db_path));
        }
        dirs::data_local_dir().map(|p| p.join("pacer").join("pacer.db"))
    }
}
