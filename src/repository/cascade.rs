//! Cascade Delete
//!
//! Removes every descendant of a board or list before the record itself, so
//! no list ever references a deleted board and no card a deleted list.
//!
//! Steps run in a fixed order inside one transaction:
//! - board: find its lists, delete their cards, delete the lists, delete the board
//! - list: delete its cards, delete the list
//!
//! The root is checked last. When it does not exist the transaction is rolled
//! back and `NotFound` is returned, leaving the store unchanged.

use rusqlite::Connection;
use serde::Serialize;

use crate::domain::{DomainError, DomainResult, RecordId};
use super::board_repo::delete_board_row;
use super::card_repo::{delete_cards_for_list, delete_cards_for_lists};
use super::list_repo::{delete_list_row, delete_lists_for_board, list_ids_for_board};

/// Descendant counts removed by one cascade; the root itself is not counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub lists_deleted: usize,
    pub cards_deleted: usize,
}

pub(crate) fn delete_board(conn: &mut Connection, board_id: RecordId) -> DomainResult<CascadeReport> {
    let tx = conn.transaction()?;

    let list_ids = list_ids_for_board(&tx, board_id)?;
    let cards_deleted = if list_ids.is_empty() {
        log::info!("No lists found for board {}, so no cards to delete", board_id);
        0
    } else {
        let deleted = delete_cards_for_lists(&tx, &list_ids)?;
        log::info!("Deleted {} cards associated with the lists of board {}", deleted, board_id);
        deleted
    };

    let lists_deleted = delete_lists_for_board(&tx, board_id)?;
    if lists_deleted == 0 {
        log::info!("No lists found for board {}, or they were already deleted", board_id);
    } else {
        log::info!("Deleted {} lists for board {}", lists_deleted, board_id);
    }

    if delete_board_row(&tx, board_id)? == 0 {
        log::warn!("Board {} not found, cascade rolled back", board_id);
        return Err(DomainError::not_found("board", board_id));
    }
    tx.commit()?;

    log::info!(
        "Deleted board {} with {} lists and {} cards",
        board_id,
        lists_deleted,
        cards_deleted
    );
    Ok(CascadeReport {
        lists_deleted,
        cards_deleted,
    })
}

pub(crate) fn delete_list(conn: &mut Connection, list_id: RecordId) -> DomainResult<CascadeReport> {
    let tx = conn.transaction()?;

    let cards_deleted = delete_cards_for_list(&tx, list_id)?;
    if cards_deleted == 0 {
        log::info!("No cards found for list {}", list_id);
    } else {
        log::info!("Deleted {} cards associated with list {}", cards_deleted, list_id);
    }

    if delete_list_row(&tx, list_id)? == 0 {
        log::warn!("List {} not found, cascade rolled back", list_id);
        return Err(DomainError::not_found("list", list_id));
    }
    tx.commit()?;

    log::info!("Deleted list {} with {} cards", list_id, cards_deleted);
    Ok(CascadeReport {
        lists_deleted: 0,
        cards_deleted,
    })
}
