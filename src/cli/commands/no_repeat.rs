use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Session;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::NoRepeat { state } = cmd {
        let mut session = Session::from_config(cfg);
        session.set_no_repeat(state.is_on())?;

        success(format!(
            "No-repeat drawing {}",
            if state.is_on() { "enabled" } else { "disabled" }
        ));
    }
    Ok(())
}
