//! Domain types and wire envelope for the headless-CMS todo API.
//!
//! # Design
//! The CMS wraps everything in a top-level `data` key and nests record
//! fields under `attributes`; `TodoItem` is the flattened shape the rest
//! of the crate works with. The envelope types stay crate-private so the
//! store and its hosts never see the nesting. `mock-cms` defines its own
//! mirror of the envelope; the integration tests catch schema drift
//! between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo item as the store and the UI see it.
///
/// `id` is assigned by the server. Under the instant discipline the store
/// hands out a provisional id until the create round-trip confirms, then
/// swaps in the server's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: u64,
    pub task: String,
    pub complete: bool,
}

/// Payload for creating a new todo. Serialized inside the `data` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    pub task: String,
    #[serde(default)]
    pub complete: bool,
}

/// Partial-update payload. Only fields present in the JSON are applied;
/// omitted fields keep their server-side value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

/// Top-level `data` wrapper: `{ "data": ... }` around a record, a list of
/// records, or an outgoing payload. Unknown siblings (`meta`, …) are
/// ignored on decode.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Document<T> {
    pub data: T,
}

/// One record as the CMS returns it: id beside nested attributes.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Record {
    pub id: u64,
    pub attributes: Attributes,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Attributes {
    pub task: String,
    pub complete: bool,
}

impl From<Record> for TodoItem {
    fn from(record: Record) -> Self {
        TodoItem {
            id: record.id,
            task: record.attributes.task,
            complete: record.attributes.complete,
        }
    }
}
