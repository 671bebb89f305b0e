//! Database Connection and Setup
//!
//! Manages the SQLite connection lifecycle and schema.
//! The connection is opened explicitly, shared by every repository through
//! [`SharedConnection`], and closed explicitly at shutdown.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Connection handle shared by all repositories; `None` once closed
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    path: PathBuf,
}

impl DbState {
    /// State with no open connection
    pub fn new(path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            path,
        }
    }

    pub async fn is_open(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Close the connection; later operations fail with a connection error
    pub async fn close(&self) -> DomainResult<()> {
        let conn = self.conn.lock().await.take();
        match conn {
            Some(conn) => {
                conn.close().map_err(|(_, e)| DomainError::Connection(e.to_string()))?;
                log::info!("Closed database {}", self.path.display());
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Open the database at `db_path` and make sure the schema exists
///
/// `:memory:` opens a private in-memory database.
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path).map_err(|e| {
        DomainError::Connection(format!("failed to open {}: {}", db_path.display(), e))
    })?;

    run_migrations(&conn)?;

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);
    log::info!("Opened database {}", db_path.display());

    Ok(state)
}

/// Borrow the live connection out of a locked handle
pub(crate) fn live(guard: &Option<Connection>) -> DomainResult<&Connection> {
    guard
        .as_ref()
        .ok_or_else(|| DomainError::Connection("database is closed".to_string()))
}

pub(crate) fn live_mut(guard: &mut Option<Connection>) -> DomainResult<&mut Connection> {
    guard
        .as_mut()
        .ok_or_else(|| DomainError::Connection("database is closed".to_string()))
}

/// Create the three collections if they do not exist
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS boards (
            id BLOB PRIMARY KEY NOT NULL,
            name TEXT NOT NULL CHECK (length(name) > 0),
            updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS lists (
            id BLOB PRIMARY KEY NOT NULL,
            board_id BLOB NOT NULL,
            name TEXT NOT NULL CHECK (length(name) > 0),
            updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
            id BLOB PRIMARY KEY NOT NULL,
            list_id BLOB NOT NULL,
            name TEXT NOT NULL CHECK (length(name) > 0),
            description TEXT NOT NULL CHECK (length(description) > 0),
            updated_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_lists_board ON lists(board_id);
        CREATE INDEX IF NOT EXISTS idx_cards_list ON cards(list_id);",
    )?;

    Ok(())
}
