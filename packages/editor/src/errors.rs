//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Schema error: {0}")]
    Schema(#[from] blockcraft_schema::SchemaError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("No page is selected")]
    NoPageSelected,
}

impl EditorError {
    /// The underlying mutation error, if this is one
    pub fn as_mutation(&self) -> Option<&crate::mutations::MutationError> {
        match self {
            EditorError::Mutation(e) => Some(e),
            _ => None,
        }
    }
}
