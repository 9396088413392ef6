pub mod columns;
pub mod config;
pub mod draw_pool;
pub mod import;
pub mod log;
pub mod session;
pub mod timer;

pub use session::{RollState, Session, SessionEvent, SignOutcome, TickOutcome, ToggleOutcome};
