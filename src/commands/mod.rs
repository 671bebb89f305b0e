//! Commands Layer
//!
//! The access API: one async function per operation, taking the shared
//! [`AppState`](crate::AppState) and identifiers in their string form, and
//! returning string projections. Failures are logged here, then returned
//! unchanged.

mod board_cmd;
mod list_cmd;
mod card_cmd;

pub use board_cmd::*;
pub use list_cmd::*;
pub use card_cmd::*;

use crate::domain::{DomainResult, RecordId};

/// Log a failed operation and pass the result through
fn logged<T>(op: &str, result: DomainResult<T>) -> DomainResult<T> {
    result.inspect_err(|e| log::error!("{} failed: {}", op, e))
}

fn parse_id(op: &str, id: &str) -> DomainResult<RecordId> {
    logged(op, id.parse())
}
