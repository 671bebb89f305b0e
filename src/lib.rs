//! Kanban Board Backend
//!
//! Boards contain lists, lists contain cards, all persisted in SQLite.
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions, implementations and cascade deletes
//! - commands: The access API consumed by front ends

pub mod config;
pub mod domain;
pub mod repository;
pub mod commands;

use config::StoreConfig;
use domain::DomainResult;
use repository::{init_db, BoardRepository, CardRepository, DbState, ListRepository};

/// Application state shared across commands
///
/// Owns the database connection: open it once at startup with
/// [`AppState::open`] and release it with [`AppState::close`].
pub struct AppState {
    pub db_state: DbState,
    pub store: StoreConfig,
}

impl AppState {
    pub async fn open(store: StoreConfig) -> DomainResult<Self> {
        let db_state = init_db(&store.path).await?;
        Ok(Self { db_state, store })
    }

    /// Private in-memory store
    pub async fn in_memory() -> DomainResult<Self> {
        Self::open(StoreConfig {
            path: ":memory:".into(),
            ..StoreConfig::default()
        })
        .await
    }

    pub async fn close(&self) -> DomainResult<()> {
        self.db_state.close().await
    }

    pub fn boards(&self) -> BoardRepository {
        BoardRepository::new(self.db_state.conn.clone())
    }

    pub fn lists(&self) -> ListRepository {
        ListRepository::new(self.db_state.conn.clone()).with_parent_check(self.store.check_parent_exists)
    }

    pub fn cards(&self) -> CardRepository {
        CardRepository::new(self.db_state.conn.clone()).with_parent_check(self.store.check_parent_exists)
    }
}
