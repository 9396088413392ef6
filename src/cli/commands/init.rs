use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::log;
use crate::errors::AppResult;
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the application directory (if missing)
///  - the configuration file
///  - the activity log database and its migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let home = cli.home.as_deref().map(Path::new);
    let cfg = Config::init_all(home)?;

    println!("⚙️  Initializing rollcall…");
    println!("📄 Config file : {}", cfg.config_file().display());
    println!("📋 Roster cache: {}", cfg.cache_path().display());
    println!("🗄️  Activity log: {}", cfg.database_path().display());

    let pool = open_db(&cfg.database_path())?;

    // log interno (non bloccante)
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "",
        &format!("Initialized at {}", cfg.home().display()),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 rollcall initialization completed!");
    Ok(())
}
