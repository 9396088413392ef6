pub mod roster;
pub mod stats;
pub mod student;

pub use roster::Roster;
pub use stats::Stats;
pub use student::StudentRecord;
