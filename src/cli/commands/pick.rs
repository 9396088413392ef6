use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Session;
use crate::core::draw_pool::DrawPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

/// One-shot draw of `count` distinct students from the cached roster.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pick { count } = cmd {
        let session = Session::from_config(cfg);
        let roster = session.roster();

        if roster.is_empty() {
            return Err(AppError::EmptyRoster);
        }

        let mut rng = rand::thread_rng();
        let mut pool = DrawPool::new();
        pool.rebuild(roster, true, &mut rng);

        let n = (*count).min(roster.len());
        if n < *count {
            info(format!("Only {} students in the roster", roster.len()));
        }

        for k in 1..=n {
            let Some(idx) = pool.next(roster, true, &mut rng) else {
                break;
            };
            pool.remove(idx);
            if let Some(rec) = roster.get(idx) {
                println!("🎲 {:>2}. {}", k, rec.display_text());
            }
        }
    }
    Ok(())
}
