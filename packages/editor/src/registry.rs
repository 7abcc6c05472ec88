//! # Block Registry
//!
//! Declared default props per block type and the factory that stamps out new
//! block instances. Unregistered types are refused with
//! [`MutationError::UnknownBlockType`]; nothing is added to the document.

use blockcraft_schema::{fresh_id, Block, BlockType, Props};
use serde_json::json;

use crate::MutationError;

/// Registry entry for one block type
#[derive(Debug, Clone)]
pub struct BlockDefinition {
    pub block_type: BlockType,
    pub display_name: &'static str,
    pub default_props: Props,
}

#[derive(Debug, Clone)]
pub struct BlockRegistry {
    definitions: Vec<BlockDefinition>,
}

impl BlockRegistry {
    /// Registry with every built-in block type
    pub fn new() -> Self {
        let definitions = BlockType::ALL
            .iter()
            .map(|&block_type| BlockDefinition {
                block_type,
                display_name: display_name(block_type),
                default_props: default_props(block_type),
            })
            .collect();
        Self { definitions }
    }

    pub fn get(&self, tag: &str) -> Option<&BlockDefinition> {
        let block_type = BlockType::from_tag(tag)?;
        self.definitions.iter().find(|d| d.block_type == block_type)
    }

    pub fn definitions(&self) -> &[BlockDefinition] {
        &self.definitions
    }

    /// Shallow-merge `overrides` over the type's defaults and assign a fresh id
    pub fn create_block(&self, tag: &str, overrides: Props) -> Result<Block, MutationError> {
        let definition = self
            .get(tag)
            .ok_or_else(|| MutationError::UnknownBlockType(tag.to_string()))?;

        let mut props = definition.default_props.clone();
        for (key, value) in overrides {
            props.insert(key, value);
        }

        Ok(Block::new(fresh_id(), definition.block_type.tag(), props))
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Hero => "Hero",
        BlockType::Text => "Text",
        BlockType::NavButton => "Navigation Button",
    }
}

fn default_props(block_type: BlockType) -> Props {
    let value = match block_type {
        BlockType::Hero => json!({ "headline": "Headline", "subhead": "" }),
        BlockType::Text => json!({ "value": "Text", "fontSize": 16 }),
        BlockType::NavButton => json!({ "label": "Go" }),
    };
    match value {
        serde_json::Value::Object(map) => map,
        _ => Props::new(),
    }
}
