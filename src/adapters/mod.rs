pub mod roster;
pub mod storage;

pub use roster::{AnyRoster, FileRoster, HttpRoster, SeedRoster};
pub use storage::LocalStorage;
