//! # Blockcraft Editor
//!
//! Document engine behind the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ gesture: pointer down / move / up, command  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ placement / sequencing: geometry + order    │
//! │  - clamp + center snap                      │
//! │  - live reorder over drop gaps              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: validate, project → project      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ history: snapshot log for undo/redo         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Project is source of truth**: rendered output is a derived view
//! 2. **Pure mutations**: a mutation never edits in place
//! 3. **Independent snapshots**: nothing handed out by history aliases it
//! 4. **Gestures own their blocks**: no other path moves a dragged block
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockcraft_editor::{EditSession, EditorConfig};
//!
//! let mut session = EditSession::new(EditorConfig::default());
//! let id = session.add_block("text", Props::new())?;
//!
//! session.begin_drag(&id, pointer)?;
//! session.drag(&id, pointer, delta, canvas, block_size);
//! session.end_drag(&id, pointer)?;
//!
//! session.undo();
//! ```

mod config;
mod errors;
mod history;
mod mutations;
mod paths;
mod placement;
mod registry;
mod sequencing;
mod session;
mod template;

pub use config::EditorConfig;
pub use errors::EditorError;
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use mutations::{Mutation, MutationError};
pub use paths::{slugify, unique_path};
pub use placement::{
    block_origin, layout_position, place, AxisSnap, DragOutcome, PlacementEngine, PlacementFrame, Point, Size,
};
pub use registry::{BlockDefinition, BlockRegistry};
pub use sequencing::{DropTarget, ReorderDrag};
pub use session::EditSession;
pub use template::{ensure_page, new_project, template_project};

// Re-export schema types for convenience
pub use blockcraft_schema::{Block, BlockType, Page, Project, ProjectId, Props};
