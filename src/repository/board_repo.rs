//! Board Repository
//!
//! SQLite-backed implementation for Board CRUD. Deleting a board goes
//! through the cascade orchestrator so no list or card is left orphaned.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{Board, BoardPatch, DomainError, DomainResult, Entity, NewBoard, RecordId};
use super::cascade::{self, CascadeReport};
use super::db::{live, live_mut, SharedConnection};
use super::traits::Repository;

/// SQLite implementation of Board repository
pub struct BoardRepository {
    conn: SharedConnection,
}

impl BoardRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// List all boards in insertion order
    pub async fn list(&self) -> DomainResult<Vec<Board>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let mut stmt = conn.prepare("SELECT id, name FROM boards ORDER BY rowid")?;
        let boards = stmt
            .query_map([], row_to_board)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(boards)
    }

    /// Delete the board, its lists and their cards, reporting what went
    pub async fn delete_cascade(&self, id: RecordId) -> DomainResult<CascadeReport> {
        let mut guard = self.conn.lock().await;
        let conn = live_mut(&mut guard)?;
        cascade::delete_board(conn, id)
    }
}

#[async_trait]
impl Repository<Board> for BoardRepository {
    async fn create(&self, draft: &NewBoard) -> DomainResult<Board> {
        draft.validate()?;

        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let board = Board {
            id: RecordId::generate(),
            name: draft.name.clone(),
        };
        conn.execute(
            "INSERT INTO boards (id, name, updated_at) VALUES (?, ?, ?)",
            params![board.id, board.name, chrono::Utc::now().timestamp_millis()],
        )?;

        log::info!("Created board {} ({})", board.id, board.name);
        Ok(board)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Board>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        select_board(conn, id)
    }

    async fn update(&self, id: RecordId, patch: &BoardPatch) -> DomainResult<Board> {
        patch.validate()?;

        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let changed = conn.execute(
            "UPDATE boards SET name = ?, updated_at = ? WHERE id = ?",
            params![patch.name, chrono::Utc::now().timestamp_millis(), id],
        )?;
        if changed == 0 {
            return Err(DomainError::not_found(Board::KIND, id));
        }
        log::info!("Updated board {} ({})", id, patch.name);

        select_board(conn, id)?.ok_or_else(|| DomainError::not_found(Board::KIND, id))
    }

    async fn delete(&self, id: RecordId) -> DomainResult<()> {
        self.delete_cascade(id).await.map(|_| ())
    }
}

fn select_board(conn: &Connection, id: RecordId) -> DomainResult<Option<Board>> {
    let board = conn
        .query_row(
            "SELECT id, name FROM boards WHERE id = ?",
            params![id],
            row_to_board,
        )
        .optional()?;
    Ok(board)
}

/// Remove the board row itself; returns the number of rows removed
pub(super) fn delete_board_row(conn: &Connection, id: RecordId) -> DomainResult<usize> {
    Ok(conn.execute("DELETE FROM boards WHERE id = ?", params![id])?)
}

pub(super) fn board_exists(conn: &Connection, id: RecordId) -> DomainResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM boards WHERE id = ?", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// Convert a database row to Board
fn row_to_board(row: &rusqlite::Row) -> rusqlite::Result<Board> {
    Ok(Board {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
