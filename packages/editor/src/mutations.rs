//! # Document Mutations
//!
//! Semantic operations on a [`Project`].
//!
//! ## Design Principles
//!
//! 1. **Immutable in, immutable out**: `apply` takes the current project by
//!    reference and returns a new value; the caller decides whether to commit
//! 2. **Validated**: every mutation validates before touching anything, so a
//!    rejected mutation leaves no partial change
//! 3. **Deterministic**: ids are chosen by the caller, never inside `apply`
//!
//! ## Mutation Semantics
//!
//! ### DeletePage
//! - Refused silently on the last page: the project is returned unchanged
//!
//! ### RenamePage
//! - Blank titles become `Untitled`
//! - Path is re-slugged and suffixed against sibling pages unless `keep_path`
//!
//! ### ReorderBlocks
//! - `order` must name every block of the page exactly once

use std::collections::HashSet;

use blockcraft_schema::{Block, Page, Project, Props};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::{slugify, unique_path};

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert a block, appended unless `index` is given
    #[serde(rename_all = "camelCase")]
    AddBlock {
        page_id: String,
        block: Block,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    /// Replace a block wholesale (matched by id)
    #[serde(rename_all = "camelCase")]
    UpdateBlock { page_id: String, block: Block },

    /// Shallow-merge props into a block
    #[serde(rename_all = "camelCase")]
    MergeProps {
        page_id: String,
        block_id: String,
        props: Props,
    },

    #[serde(rename_all = "camelCase")]
    DeleteBlock { page_id: String, block_id: String },

    /// Set the page's block order
    #[serde(rename_all = "camelCase")]
    ReorderBlocks { page_id: String, order: Vec<String> },

    #[serde(rename_all = "camelCase")]
    AddPage {
        page_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    RenamePage {
        page_id: String,
        title: String,
        #[serde(default)]
        keep_path: bool,
    },

    #[serde(rename_all = "camelCase")]
    DeletePage { page_id: String },

    RenameProject { name: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Block is being dragged: {0}")]
    BlockBusy(String),
}

impl Mutation {
    /// Apply to a project, returning the new project
    pub fn apply(&self, project: &Project) -> Result<Project, MutationError> {
        self.validate(project)?;

        let mut next = project.clone();
        match self {
            Mutation::AddBlock { page_id, block, index } => {
                let page = page_mut(&mut next, page_id)?;
                let at = index.unwrap_or(page.blocks.len()).min(page.blocks.len());
                page.blocks.insert(at, block.clone());
            }

            Mutation::UpdateBlock { page_id, block } => {
                let slot = block_mut(&mut next, page_id, &block.id)?;
                *slot = block.clone();
            }

            Mutation::MergeProps { page_id, block_id, props } => {
                let slot = block_mut(&mut next, page_id, block_id)?;
                for (key, value) in props {
                    slot.props.insert(key.clone(), value.clone());
                }
            }

            Mutation::DeleteBlock { page_id, block_id } => {
                let page = page_mut(&mut next, page_id)?;
                page.blocks.retain(|b| &b.id != block_id);
            }

            Mutation::ReorderBlocks { page_id, order } => {
                let page = page_mut(&mut next, page_id)?;
                let mut remaining = std::mem::take(&mut page.blocks);
                for id in order {
                    if let Some(pos) = remaining.iter().position(|b| &b.id == id) {
                        page.blocks.push(remaining.swap_remove(pos));
                    }
                }
            }

            Mutation::AddPage { page_id, title } => {
                let title = title
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Page {}", next.pages.len() + 1));
                let path = unique_path(&slugify(&title), &next.pages, None);
                next.pages.push(Page::new(page_id.clone(), title, path));
            }

            Mutation::RenamePage { page_id, title, keep_path } => {
                let title = match title.trim() {
                    "" => "Untitled".to_string(),
                    t => t.to_string(),
                };
                let path = (!keep_path).then(|| unique_path(&slugify(&title), &next.pages, Some(page_id)));

                let page = page_mut(&mut next, page_id)?;
                page.title = title;
                if let Some(path) = path {
                    page.path = path;
                }
            }

            Mutation::DeletePage { page_id } => {
                if next.pages.len() <= 1 {
                    tracing::debug!("refusing to delete last page {}", page_id);
                    return Ok(next);
                }
                next.pages.retain(|p| &p.id != page_id);
            }

            Mutation::RenameProject { name } => {
                next.name = name.trim().to_string();
            }
        }

        Ok(next)
    }

    /// Validate without applying
    pub fn validate(&self, project: &Project) -> Result<(), MutationError> {
        match self {
            Mutation::AddBlock { page_id, block, .. } => {
                page(project, page_id)?;
                check_id("block", &block.id)?;
                if project.pages.iter().any(|p| p.block(&block.id).is_some()) {
                    return Err(MutationError::Validation(format!("duplicate block id {}", block.id)));
                }
                Ok(())
            }

            Mutation::UpdateBlock { page_id, block } => {
                find_block(project, page_id, &block.id)?;
                Ok(())
            }

            Mutation::MergeProps { page_id, block_id, .. }
            | Mutation::DeleteBlock { page_id, block_id } => {
                find_block(project, page_id, block_id)?;
                Ok(())
            }

            Mutation::ReorderBlocks { page_id, order } => {
                let page = page(project, page_id)?;
                let unique: HashSet<&String> = order.iter().collect();
                let current: HashSet<&String> = page.blocks.iter().map(|b| &b.id).collect();
                if unique.len() != order.len() || unique != current {
                    return Err(MutationError::Validation(
                        "order must list every block of the page exactly once".to_string(),
                    ));
                }
                Ok(())
            }

            Mutation::AddPage { page_id, .. } => {
                check_id("page", page_id)?;
                if project.page(page_id).is_some() {
                    return Err(MutationError::Validation(format!("duplicate page id {}", page_id)));
                }
                Ok(())
            }

            Mutation::RenamePage { page_id, .. } | Mutation::DeletePage { page_id } => {
                page(project, page_id)?;
                Ok(())
            }

            Mutation::RenameProject { name } => {
                if name.trim().is_empty() {
                    return Err(MutationError::Validation("project name is required".to_string()));
                }
                Ok(())
            }
        }
    }

    /// Block this mutation writes to, if any
    pub fn target_block(&self) -> Option<&str> {
        match self {
            Mutation::UpdateBlock { block, .. } => Some(&block.id),
            Mutation::MergeProps { block_id, .. } | Mutation::DeleteBlock { block_id, .. } => Some(block_id),
            _ => None,
        }
    }

    /// Page whose block list this mutation grows, shrinks or removes
    pub fn reshaped_page(&self) -> Option<&str> {
        match self {
            Mutation::AddBlock { page_id, .. }
            | Mutation::DeleteBlock { page_id, .. }
            | Mutation::DeletePage { page_id } => Some(page_id),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddBlock { .. } => "AddBlock",
            Mutation::UpdateBlock { .. } => "UpdateBlock",
            Mutation::MergeProps { .. } => "MergeProps",
            Mutation::DeleteBlock { .. } => "DeleteBlock",
            Mutation::ReorderBlocks { .. } => "ReorderBlocks",
            Mutation::AddPage { .. } => "AddPage",
            Mutation::RenamePage { .. } => "RenamePage",
            Mutation::DeletePage { .. } => "DeletePage",
            Mutation::RenameProject { .. } => "RenameProject",
        }
    }
}

fn check_id(what: &str, id: &str) -> Result<(), MutationError> {
    if id.trim().is_empty() {
        return Err(MutationError::Validation(format!("{} id is required", what)));
    }
    Ok(())
}

fn page<'a>(project: &'a Project, page_id: &str) -> Result<&'a Page, MutationError> {
    project
        .page(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))
}

fn page_mut<'a>(project: &'a mut Project, page_id: &str) -> Result<&'a mut Page, MutationError> {
    project
        .page_mut(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))
}

fn find_block<'a>(project: &'a Project, page_id: &str, block_id: &str) -> Result<&'a Block, MutationError> {
    page(project, page_id)?
        .block(block_id)
        .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))
}

fn block_mut<'a>(project: &'a mut Project, page_id: &str, block_id: &str) -> Result<&'a mut Block, MutationError> {
    page_mut(project, page_id)?
        .blocks
        .iter_mut()
        .find(|b| b.id == block_id)
        .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))
}
