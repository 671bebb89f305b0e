//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! Boards own lists, lists own cards; ownership is by reference.

mod entity;
mod id;
mod board;
mod list;
mod card;

pub use entity::{Entity, DomainError, DomainResult};
pub use id::RecordId;
pub use board::{Board, BoardPatch, BoardRecord, NewBoard};
pub use list::{List, ListPatch, ListRecord, NewList};
pub use card::{Card, CardPatch, CardRecord, NewCard};
