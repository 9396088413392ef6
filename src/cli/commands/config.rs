use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = cfg.config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            if path.exists() {
                println!("📄 Current configuration ({}):\n", path.display());
                ConfigLogic::print(&path)?;
            } else {
                warning(format!(
                    "No configuration file at {}; built-in defaults are in use:",
                    path.display()
                ));
                println!("{}", serde_yaml::to_string(cfg)?);
            }
        }

        // ---- CHECK CONFIG ----
        if *check {
            let missing = cfg.missing_fields()?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!(
                    "Missing fields (defaults in use): {}",
                    missing.join(", ")
                ));
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            match ConfigLogic::edit(&path, editor) {
                Ok(used) => success(format!(
                    "Configuration file edited successfully using '{}'",
                    used
                )),
                Err(e) => error(e),
            }
        }

        if !*print_config && !*check && !*edit_config {
            info(format!("Configuration file: {}", path.display()));
        }
    }

    Ok(())
}
