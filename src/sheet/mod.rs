pub mod cache;
pub mod reader;

pub use cache::{load_cache, save_cache};
pub use reader::{Table, read_table};
