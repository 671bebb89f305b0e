//! List Repository
//!
//! SQLite-backed implementation for List CRUD, filtered by owning board.
//! The board reference is written once on create and never updated.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Entity, List, ListPatch, NewList, RecordId};
use super::board_repo::board_exists;
use super::cascade::{self, CascadeReport};
use super::db::{live, live_mut, SharedConnection};
use super::traits::{ChildRepository, Repository};

/// SQLite implementation of List repository
pub struct ListRepository {
    conn: SharedConnection,
    check_parent_exists: bool,
}

impl ListRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            conn,
            check_parent_exists: false,
        }
    }

    /// Reject creates whose board does not exist
    pub fn with_parent_check(mut self, enabled: bool) -> Self {
        self.check_parent_exists = enabled;
        self
    }

    /// Delete the list and its cards, reporting what went
    pub async fn delete_cascade(&self, id: RecordId) -> DomainResult<CascadeReport> {
        let mut guard = self.conn.lock().await;
        let conn = live_mut(&mut guard)?;
        cascade::delete_list(conn, id)
    }
}

#[async_trait]
impl Repository<List> for ListRepository {
    async fn create(&self, draft: &NewList) -> DomainResult<List> {
        draft.validate()?;

        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        if self.check_parent_exists && !board_exists(conn, draft.board_id)? {
            return Err(DomainError::not_found("board", draft.board_id));
        }

        let list = List {
            id: RecordId::generate(),
            board_id: draft.board_id,
            name: draft.name.clone(),
        };
        conn.execute(
            "INSERT INTO lists (id, board_id, name, updated_at) VALUES (?, ?, ?, ?)",
            params![list.id, list.board_id, list.name, chrono::Utc::now().timestamp_millis()],
        )?;

        log::info!("Created list {} ({}) on board {}", list.id, list.name, list.board_id);
        Ok(list)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<List>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        select_list(conn, id)
    }

    async fn update(&self, id: RecordId, patch: &ListPatch) -> DomainResult<List> {
        patch.validate()?;

        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let changed = conn.execute(
            "UPDATE lists SET name = ?, updated_at = ? WHERE id = ?",
            params![patch.name, chrono::Utc::now().timestamp_millis(), id],
        )?;
        if changed == 0 {
            return Err(DomainError::not_found(List::KIND, id));
        }

        let list = select_list(conn, id)?.ok_or_else(|| DomainError::not_found(List::KIND, id))?;
        log::info!("Updated list {} ({})", list.id, list.name);
        Ok(list)
    }

    async fn delete(&self, id: RecordId) -> DomainResult<()> {
        self.delete_cascade(id).await.map(|_| ())
    }
}

#[async_trait]
impl ChildRepository<List> for ListRepository {
    async fn list_by_parent(&self, board_id: RecordId) -> DomainResult<Vec<List>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let mut stmt = conn.prepare(
            "SELECT id, board_id, name FROM lists WHERE board_id = ? ORDER BY rowid",
        )?;
        let lists = stmt
            .query_map(params![board_id], row_to_list)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }
}

fn select_list(conn: &Connection, id: RecordId) -> DomainResult<Option<List>> {
    let list = conn
        .query_row(
            "SELECT id, board_id, name FROM lists WHERE id = ?",
            params![id],
            row_to_list,
        )
        .optional()?;
    Ok(list)
}

/// Identifiers of every list on a board
pub(super) fn list_ids_for_board(conn: &Connection, board_id: RecordId) -> DomainResult<Vec<RecordId>> {
    let mut stmt = conn.prepare("SELECT id FROM lists WHERE board_id = ?")?;
    let ids = stmt
        .query_map(params![board_id], |row| row.get(0))?
        .collect::<Result<Vec<RecordId>, _>>()?;
    Ok(ids)
}

/// Bulk-delete the lists of a board; cards must already be gone
pub(super) fn delete_lists_for_board(conn: &Connection, board_id: RecordId) -> DomainResult<usize> {
    Ok(conn.execute("DELETE FROM lists WHERE board_id = ?", params![board_id])?)
}

pub(super) fn delete_list_row(conn: &Connection, id: RecordId) -> DomainResult<usize> {
    Ok(conn.execute("DELETE FROM lists WHERE id = ?", params![id])?)
}

pub(super) fn list_exists(conn: &Connection, id: RecordId) -> DomainResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM lists WHERE id = ?", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// Convert a database row to List
fn row_to_list(row: &rusqlite::Row) -> rusqlite::Result<List> {
    Ok(List {
        id: row.get(0)?,
        board_id: row.get(1)?,
        name: row.get(2)?,
    })
}
