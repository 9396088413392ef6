pub mod config;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod no_repeat;
pub mod pick;
pub mod session;
