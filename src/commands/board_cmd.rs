//! Commands for Board operations
//!
//! Board CRUD plus the board snapshot (the board, its lists and their cards).

use serde::Serialize;

use super::{logged, parse_id};
use crate::domain::{
    Board, BoardPatch, BoardRecord, CardRecord, DomainError, DomainResult, Entity, ListRecord, NewBoard, RecordId,
};
use crate::repository::{ChildRepository, Repository};
use crate::AppState;

/// A board with every list and card on it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub board: BoardRecord,
    pub lists: Vec<ListSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot {
    #[serde(flatten)]
    pub list: ListRecord,
    pub cards: Vec<CardRecord>,
}

/// List all boards
pub async fn list_boards(state: &AppState) -> Result<Vec<BoardRecord>, DomainError> {
    let boards = logged("list_boards", state.boards().list().await)?;
    Ok(boards.into_iter().map(BoardRecord::from).collect())
}

/// Get board by ID
pub async fn get_board(state: &AppState, id: &str) -> Result<BoardRecord, DomainError> {
    let id = parse_id("get_board", id)?;
    let board = logged("get_board", find_board(state, id).await)?;
    Ok(board.into())
}

/// Create a new board
pub async fn create_board(state: &AppState, name: &str) -> Result<BoardRecord, DomainError> {
    let board = logged("create_board", state.boards().create(&NewBoard::new(name)).await)?;
    Ok(board.into())
}

/// Rename a board
pub async fn update_board(state: &AppState, id: &str, name: &str) -> Result<(), DomainError> {
    let id = parse_id("update_board", id)?;
    let patch = BoardPatch {
        name: name.to_string(),
    };
    logged("update_board", state.boards().update(id, &patch).await).map(|_| ())
}

/// Delete a board together with its lists and their cards
pub async fn delete_board(state: &AppState, id: &str) -> Result<(), DomainError> {
    let id = parse_id("delete_board", id)?;
    logged("delete_board", state.boards().delete(id).await)
}

/// Load a board, its lists and each list's cards in one call
pub async fn load_board(state: &AppState, id: &str) -> Result<BoardSnapshot, DomainError> {
    let board_id = parse_id("load_board", id)?;
    let board = logged("load_board", find_board(state, board_id).await)?;

    let lists = logged("load_board", state.lists().list_by_parent(board_id).await)?;
    let cards_repo = state.cards();

    let mut snapshots = Vec::with_capacity(lists.len());
    for list in lists {
        let cards = logged("load_board", cards_repo.list_by_parent(list.id).await)?;
        snapshots.push(ListSnapshot {
            list: list.into(),
            cards: cards.into_iter().map(CardRecord::from).collect(),
        });
    }

    Ok(BoardSnapshot {
        board: board.into(),
        lists: snapshots,
    })
}

async fn find_board(state: &AppState, id: RecordId) -> DomainResult<Board> {
    state
        .boards()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Board::KIND, id))
}
