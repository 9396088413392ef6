//! Persisted user preferences (`app_state.json`).

use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_no_repeat")]
    pub no_repeat: bool,
}

fn default_no_repeat() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            no_repeat: default_no_repeat(),
        }
    }
}

impl Preferences {
    /// Missing or malformed file → defaults (`no_repeat = true`).
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }
}
