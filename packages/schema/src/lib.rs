//! # Blockcraft Schema
//!
//! Portable wire format shared by the editor and every renderer.
//!
//! ```text
//! Project { schemaVersion, id, name, pages[] }
//!   └─ Page { id, title, path, blocks[] }
//!        └─ Block { id, type, props{} }
//! ```
//!
//! Readers must tolerate keys they don't know. Unknown keys are kept in an
//! `extra` map on each record and written back out unchanged, so a document
//! touched by an older build loses nothing.

mod check;
mod error;
mod id;
mod project;
mod value;

pub use check::{Issue, Severity};
pub use error::SchemaError;
pub use id::{ProjectId, DURABLE_ID_LEN};
pub use project::{Block, BlockType, Page, Project, Props, SCHEMA_VERSION};
pub use value::{coerce_number, coerce_string};

/// Generate a fresh globally-unique id for pages and blocks.
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
