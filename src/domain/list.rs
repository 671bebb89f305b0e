//! List Entity
//!
//! A named column owned by exactly one board.

use serde::{Deserialize, Serialize};
use super::entity::{require_text, DomainResult, Entity};
use super::id::RecordId;

/// A column on a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub id: RecordId,
    /// Owning board; immutable after creation
    pub board_id: RecordId,
    pub name: String,
}

/// Field values for a list about to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    pub board_id: RecordId,
    pub name: String,
}

impl NewList {
    pub fn new(board_id: RecordId, name: impl Into<String>) -> Self {
        Self {
            board_id,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)
    }
}

/// Mutable fields of a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPatch {
    pub name: String,
}

impl ListPatch {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)
    }
}

/// Public projection of a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecord {
    pub id: String,
    pub board_id: String,
    pub name: String,
}

impl From<List> for ListRecord {
    fn from(list: List) -> Self {
        Self {
            id: list.id.to_string(),
            board_id: list.board_id.to_string(),
            name: list.name,
        }
    }
}

impl Entity for List {
    type Id = RecordId;
    type Draft = NewList;
    type Patch = ListPatch;

    const KIND: &'static str = "list";

    fn id(&self) -> Self::Id {
        self.id
    }
}
