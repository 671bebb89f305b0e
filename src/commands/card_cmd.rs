//! Commands for Card operations

use super::{logged, parse_id};
use crate::domain::{CardPatch, CardRecord, DomainError, NewCard};
use crate::repository::{ChildRepository, Repository};
use crate::AppState;

/// List the cards of a list
pub async fn list_cards(state: &AppState, list_id: &str) -> Result<Vec<CardRecord>, DomainError> {
    let list_id = parse_id("list_cards", list_id)?;
    let cards = logged("list_cards", state.cards().list_by_parent(list_id).await)?;
    Ok(cards.into_iter().map(CardRecord::from).collect())
}

/// Create a new card in a list
pub async fn create_card(
    state: &AppState,
    list_id: &str,
    name: &str,
    description: &str,
) -> Result<CardRecord, DomainError> {
    let list_id = parse_id("create_card", list_id)?;
    let card = logged(
        "create_card",
        state
            .cards()
            .create(&NewCard::new(list_id, name, description))
            .await,
    )?;
    Ok(card.into())
}

/// Replace a card's name and description
pub async fn update_card(
    state: &AppState,
    id: &str,
    name: &str,
    description: &str,
) -> Result<CardRecord, DomainError> {
    let id = parse_id("update_card", id)?;
    let patch = CardPatch {
        name: name.to_string(),
        description: description.to_string(),
    };
    let card = logged("update_card", state.cards().update(id, &patch).await)?;
    Ok(card.into())
}

/// Delete a card
pub async fn delete_card(state: &AppState, id: &str) -> Result<(), DomainError> {
    let id = parse_id("delete_card", id)?;
    logged("delete_card", state.cards().delete(id).await)
}
