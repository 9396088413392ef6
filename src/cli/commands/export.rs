use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Session;
use crate::errors::AppResult;
use crate::export::{ExportLogic, default_file_name, ensure_writable};
use chrono::Local;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let mut session = Session::from_config(cfg);

        let path = match file {
            Some(f) => PathBuf::from(f),
            None => PathBuf::from(default_file_name(*format, Local::now().naive_local())),
        };

        ensure_writable(&path, *force)?;
        let written = ExportLogic::export(session.roster(), *format, Some(&path))?;
        session.record_export(&written);
    }
    Ok(())
}
