use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod state; // use submodule at src/config/state.rs

pub use state::Preferences;

pub const CONFIG_FILE_NAME: &str = "rollcall.conf";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Two-column roster cache; relative paths live under the app directory
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
    /// Preferences file (`no_repeat`)
    #[serde(default = "default_state_file")]
    pub state_file: String,
    /// SQLite activity journal
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_roll_interval")]
    pub roll_interval_ms: u64,
    #[serde(default)]
    pub auto_sign_secs: u64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,

    #[serde(skip)]
    home: PathBuf,
}

fn default_cache_file() -> String {
    "roster_cache.xlsx".to_string()
}
fn default_state_file() -> String {
    "app_state.json".to_string()
}
fn default_database() -> String {
    "rollcall.sqlite".to_string()
}
fn default_roll_interval() -> u64 {
    crate::core::timer::DEFAULT_INTERVAL_MS
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_file: default_cache_file(),
            state_file: default_state_file(),
            database: default_database(),
            roll_interval_ms: default_roll_interval(),
            auto_sign_secs: 0,
            separator_char: default_separator_char(),
            home: Self::default_dir(),
        }
    }
}

impl Config {
    /// Return the standard application directory (`~/.rollcall`)
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rollcall")
    }

    /// Directory holding config, cache, preferences and journal
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Return the full path of the config file inside `dir`
    pub fn config_file_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        Self::config_file_in(&self.home)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.resolve(&self.cache_file)
    }

    pub fn state_path(&self) -> PathBuf {
        self.resolve(&self.state_file)
    }

    pub fn database_path(&self) -> PathBuf {
        self.resolve(&self.database)
    }

    fn resolve(&self, file: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(file);
        if p.is_absolute() { p } else { self.home.join(p) }
    }

    /// Load configuration from `<dir>/rollcall.conf`, or defaults if not found.
    /// `dir` defaults to `~/.rollcall`.
    pub fn load(dir: Option<&Path>) -> AppResult<Self> {
        let home = dir.map(Path::to_path_buf).unwrap_or_else(Self::default_dir);
        let path = Self::config_file_in(&home);

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Config::default()
            } else {
                serde_yaml::from_str(&content)?
            }
        } else {
            Config::default()
        };

        cfg.home = home;
        Ok(cfg)
    }

    /// Create the app directory and write a default config file if missing.
    /// Returns the loaded configuration.
    pub fn init_all(dir: Option<&Path>) -> AppResult<Self> {
        let home = dir.map(Path::to_path_buf).unwrap_or_else(Self::default_dir);
        fs::create_dir_all(&home)?;

        let path = Self::config_file_in(&home);
        if !path.exists() {
            let yaml = serde_yaml::to_string(&Config::default())?;
            let mut file = fs::File::create(&path)?;
            file.write_all(yaml.as_bytes())?;
        }

        Self::load(Some(&home))
    }

    /// Config fields missing from the file on disk (filled by defaults).
    pub fn missing_fields(&self) -> AppResult<Vec<String>> {
        let path = self.config_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let on_disk: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let full = serde_yaml::to_value(self)?;

        let mut missing = Vec::new();
        if let (Some(full), Some(disk)) = (full.as_mapping(), on_disk.as_mapping()) {
            for key in full.keys() {
                if !disk.contains_key(key)
                    && let Some(k) = key.as_str()
                {
                    missing.push(k.to_string());
                }
            }
        } else if let Some(full) = full.as_mapping() {
            missing.extend(full.keys().filter_map(|k| k.as_str().map(str::to_string)));
        }

        Ok(missing)
    }
}
