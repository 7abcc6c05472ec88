use thiserror::Error;

use crate::PersistenceError;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Editor(#[from] blockcraft_editor::EditorError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("No session established")]
    NoSession,
}
