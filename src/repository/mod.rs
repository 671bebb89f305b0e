//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod traits;
mod db;
mod board_repo;
mod list_repo;
mod card_repo;
mod cascade;

#[cfg(test)]
mod tests;

pub use traits::{ChildRepository, Repository};
pub use db::{init_db, DbState, SharedConnection};
pub use board_repo::BoardRepository;
pub use list_repo::ListRepository;
pub use card_repo::CardRepository;
pub use cascade::CascadeReport;
