//! Board Entity
//!
//! The root of the hierarchy: one board owns zero or more lists.

use serde::{Deserialize, Serialize};
use super::entity::{require_text, DomainResult, Entity};
use super::id::RecordId;

/// A project board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub id: RecordId,
    pub name: String,
}

/// Field values for a board about to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBoard {
    pub name: String,
}

impl NewBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)
    }
}

/// Mutable fields of a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPatch {
    pub name: String,
}

impl BoardPatch {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)
    }
}

/// Public projection of a board, identifiers rendered as strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub id: String,
    pub name: String,
}

impl From<Board> for BoardRecord {
    fn from(board: Board) -> Self {
        Self {
            id: board.id.to_string(),
            name: board.name,
        }
    }
}

impl Entity for Board {
    type Id = RecordId;
    type Draft = NewBoard;
    type Patch = BoardPatch;

    const KIND: &'static str = "board";

    fn id(&self) -> Self::Id {
        self.id
    }
}
