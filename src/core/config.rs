use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        println!("{}", content);
        Ok(())
    }

    /// Open `path` with the requested editor, falling back to
    /// `$EDITOR`/`$VISUAL` and then to the platform default.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<String> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let first = editor.clone().unwrap_or_else(|| default_editor.clone());

        for candidate in [first.as_str(), default_editor.as_str()] {
            if let Ok(status) = Command::new(candidate).arg(path).status()
                && status.success()
            {
                return Ok(candidate.to_string());
            }
        }

        Err(AppError::Config(format!(
            "failed to edit {} with '{}'",
            path.display(),
            first
        )))
    }
}
