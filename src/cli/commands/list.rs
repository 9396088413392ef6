use crate::cli::parser::Commands;
use crate::cli::render::{roster_table, separator_char, stats_line};
use crate::config::Config;
use crate::core::Session;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { search } = cmd {
        let session = Session::from_config(cfg);
        let roster = session.roster();

        if roster.is_empty() {
            warning("No roster cached. Import one with `rollcall import <FILE>`.");
            return Ok(());
        }

        let rows = roster.search(search.as_deref().unwrap_or(""));
        if rows.is_empty() {
            info(format!(
                "No student matches '{}'",
                search.as_deref().unwrap_or("")
            ));
            return Ok(());
        }

        print!(
            "{}",
            roster_table(
                roster,
                &rows,
                session.selection(),
                separator_char(&cfg.separator_char)
            )
        );
        println!();
        println!("{}", stats_line(&session.stats()));
    }
    Ok(())
}
