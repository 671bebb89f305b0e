//! Card Repository
//!
//! SQLite-backed implementation for Card CRUD, filtered by owning list.
//! Cards have no descendants, so delete is a single-row delete.

use async_trait::async_trait;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::domain::{Card, CardPatch, DomainError, DomainResult, Entity, NewCard, RecordId};
use super::db::{live, SharedConnection};
use super::list_repo::list_exists;
use super::traits::{ChildRepository, Repository};

/// Upper bound on identifiers bound into one `IN (...)` clause
const MAX_BOUND_IDS: usize = 500;

/// SQLite implementation of Card repository
pub struct CardRepository {
    conn: SharedConnection,
    check_parent_exists: bool,
}

impl CardRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            conn,
            check_parent_exists: false,
        }
    }

    /// Reject creates whose list does not exist
    pub fn with_parent_check(mut self, enabled: bool) -> Self {
        self.check_parent_exists = enabled;
        self
    }

    /// Bulk-delete every card of a list. Deleting from an empty list is not an error.
    pub async fn delete_by_list(&self, list_id: RecordId) -> DomainResult<usize> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        delete_cards_for_list(conn, list_id)
    }
}

#[async_trait]
impl Repository<Card> for CardRepository {
    async fn create(&self, draft: &NewCard) -> DomainResult<Card> {
        draft.validate()?;

        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        if self.check_parent_exists && !list_exists(conn, draft.list_id)? {
            return Err(DomainError::not_found("list", draft.list_id));
        }

        let card = Card {
            id: RecordId::generate(),
            list_id: draft.list_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
        };
        conn.execute(
            "INSERT INTO cards (id, list_id, name, description, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![
                card.id,
                card.list_id,
                card.name,
                card.description,
                chrono::Utc::now().timestamp_millis()
            ],
        )?;

        log::info!("Created card {} ({}) in list {}", card.id, card.name, card.list_id);
        Ok(card)
    }

    async fn find_by_id(&self, id: RecordId) -> DomainResult<Option<Card>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;
        select_card(conn, id)
    }

    async fn update(&self, id: RecordId, patch: &CardPatch) -> DomainResult<Card> {
        patch.validate()?;

        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let changed = conn.execute(
            "UPDATE cards SET name = ?, description = ?, updated_at = ? WHERE id = ?",
            params![patch.name, patch.description, chrono::Utc::now().timestamp_millis(), id],
        )?;
        if changed == 0 {
            return Err(DomainError::not_found(Card::KIND, id));
        }

        let card = select_card(conn, id)?.ok_or_else(|| DomainError::not_found(Card::KIND, id))?;
        log::info!("Updated card {} ({})", card.id, card.name);
        Ok(card)
    }

    async fn delete(&self, id: RecordId) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let deleted = conn.execute("DELETE FROM cards WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(DomainError::not_found(Card::KIND, id));
        }

        log::info!("Deleted card {}", id);
        Ok(())
    }
}

#[async_trait]
impl ChildRepository<Card> for CardRepository {
    async fn list_by_parent(&self, list_id: RecordId) -> DomainResult<Vec<Card>> {
        let guard = self.conn.lock().await;
        let conn = live(&guard)?;

        let mut stmt = conn.prepare(
            "SELECT id, list_id, name, description FROM cards WHERE list_id = ? ORDER BY rowid",
        )?;
        let cards = stmt
            .query_map(params![list_id], row_to_card)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }
}

fn select_card(conn: &Connection, id: RecordId) -> DomainResult<Option<Card>> {
    let card = conn
        .query_row(
            "SELECT id, list_id, name, description FROM cards WHERE id = ?",
            params![id],
            row_to_card,
        )
        .optional()?;
    Ok(card)
}

pub(super) fn delete_cards_for_list(conn: &Connection, list_id: RecordId) -> DomainResult<usize> {
    Ok(conn.execute("DELETE FROM cards WHERE list_id = ?", params![list_id])?)
}

/// Bulk-delete every card whose list is in `list_ids`
pub(super) fn delete_cards_for_lists(conn: &Connection, list_ids: &[RecordId]) -> DomainResult<usize> {
    let mut deleted = 0;
    for chunk in list_ids.chunks(MAX_BOUND_IDS) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!("DELETE FROM cards WHERE list_id IN ({})", placeholders);
        deleted += conn.execute(&sql, params_from_iter(chunk.iter()))?;
    }
    Ok(deleted)
}

/// Convert a database row to Card
fn row_to_card(row: &rusqlite::Row) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        list_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
    })
}
