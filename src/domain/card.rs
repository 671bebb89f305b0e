//! Card Entity
//!
//! A named, described task item owned by exactly one list.

use serde::{Deserialize, Serialize};
use super::entity::{require_text, DomainResult, Entity};
use super::id::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: RecordId,
    /// Owning list; immutable after creation
    pub list_id: RecordId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub list_id: RecordId,
    pub name: String,
    pub description: String,
}

impl NewCard {
    pub fn new(list_id: RecordId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            list_id,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPatch {
    pub name: String,
    pub description: String,
}

impl CardPatch {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)
    }
}

/// Public projection of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub list_id: String,
    pub name: String,
    pub description: String,
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        Self {
            id: card.id.to_string(),
            list_id: card.list_id.to_string(),
            name: card.name,
            description: card.description,
        }
    }
}

impl Entity for Card {
    type Id = RecordId;
    type Draft = NewCard;
    type Patch = CardPatch;

    const KIND: &'static str = "card";

    fn id(&self) -> Self::Id {
        self.id
    }
}
