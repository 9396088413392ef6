use crate::cli::parser::Commands;
use crate::cli::render::stats_line;
use crate::config::Config;
use crate::core::Session;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let mut session = Session::from_config(cfg);
        let n = session.import(Path::new(file))?;

        success(format!("Imported {} students from {}", n, file));
        info(format!("Roster cached at {}", cfg.cache_path().display()));
        println!("{}", stats_line(&session.stats()));
    }
    Ok(())
}
