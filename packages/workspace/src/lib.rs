//! # Blockcraft Workspace
//!
//! Hosts an editing session against a persistence store: explicit session
//! context, the store collaborator, debounced autosave with identity
//! promotion, and the [`Workspace`] controller that ties them together.

mod autosave;
mod config;
mod error;
mod persistence;
mod session;
mod workspace;

pub use autosave::{AutosaveController, AutosaveEvent, AutosaveStatus};
pub use config::{WorkspaceConfig, CONFIG_FILE};
pub use error::WorkspaceError;
pub use persistence::{MemoryStore, PersistenceError, ProjectStore, Role, StoreCall};
pub use session::{Credential, SessionHandle};
pub use workspace::Workspace;
