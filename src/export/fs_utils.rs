// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, Write};
use std::path::Path;

/// Verifica se un file può essere creato o sovrascritto.
///
/// - Se il file NON esiste → Ok
/// - Se esiste ed è abilitato `force` → Ok
/// - Se esiste e `force == false` → chiede conferma all'utente.
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    if is_yes(&answer) {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".to_string(),
        ))
    }
}

/// `y` / `yes`, case-insensitive.
pub fn is_yes(answer: &str) -> bool {
    let ans = answer.trim().to_ascii_lowercase();
    ans == "y" || ans == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}
