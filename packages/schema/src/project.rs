use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{coerce_number, ProjectId, SchemaError};

/// Current wire schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Open property bag of a block.
pub type Props = Map<String, Value>;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Top-level document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Missing on documents that were never saved
    #[serde(default = "ProjectId::provisional")]
    pub id: ProjectId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub pages: Vec<Page>,

    /// Keys this build doesn't know about, kept for the round trip
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ordered list of blocks plus routing metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// URL-safe slug, unique within the project
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub blocks: Vec<Block>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Single typed content unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,

    /// Wire tag; may name a type this build doesn't know
    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default)]
    pub props: Props,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Closed set of block types known to this build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Hero,
    Text,
    NavButton,
}

impl BlockType {
    pub const ALL: [BlockType; 3] = [BlockType::Hero, BlockType::Text, BlockType::NavButton];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "hero" => Some(BlockType::Hero),
            "text" => Some(BlockType::Text),
            "navButton" => Some(BlockType::NavButton),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            BlockType::Hero => "hero",
            BlockType::Text => "text",
            BlockType::NavButton => "navButton",
        }
    }
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            id,
            name: name.into(),
            pages,
            extra: Map::new(),
        }
    }

    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    pub fn page_index(&self, page_id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == page_id)
    }
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            path: path.into(),
            blocks: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn block_index(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    pub fn block_ids(&self) -> Vec<String> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>, props: Props) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            props,
            extra: Map::new(),
        }
    }

    /// Known type, or `None` for tags from a newer build
    pub fn kind(&self) -> Option<BlockType> {
        BlockType::from_tag(&self.block_type)
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn number_prop(&self, key: &str) -> Option<f64> {
        self.props.get(key).and_then(coerce_number)
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}
