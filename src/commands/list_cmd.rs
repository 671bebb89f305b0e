//! Commands for List operations

use super::{logged, parse_id};
use crate::domain::{DomainError, ListPatch, ListRecord, NewList};
use crate::repository::{ChildRepository, Repository};
use crate::AppState;

/// List the lists of a board
pub async fn list_lists(state: &AppState, board_id: &str) -> Result<Vec<ListRecord>, DomainError> {
    let board_id = parse_id("list_lists", board_id)?;
    let lists = logged("list_lists", state.lists().list_by_parent(board_id).await)?;
    Ok(lists.into_iter().map(ListRecord::from).collect())
}

/// Create a new list on a board
pub async fn create_list(state: &AppState, board_id: &str, name: &str) -> Result<ListRecord, DomainError> {
    let board_id = parse_id("create_list", board_id)?;
    let list = logged(
        "create_list",
        state.lists().create(&NewList::new(board_id, name)).await,
    )?;
    Ok(list.into())
}

/// Rename a list
pub async fn update_list(state: &AppState, id: &str, name: &str) -> Result<ListRecord, DomainError> {
    let id = parse_id("update_list", id)?;
    let patch = ListPatch {
        name: name.to_string(),
    };
    let list = logged("update_list", state.lists().update(id, &patch).await)?;
    Ok(list.into())
}

/// Delete a list together with its cards
pub async fn delete_list(state: &AppState, id: &str) -> Result<(), DomainError> {
    let id = parse_id("delete_list", id)?;
    logged("delete_list", state.lists().delete(id).await)
}
