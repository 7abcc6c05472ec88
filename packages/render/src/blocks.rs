//! Typed view of a block's props.
//!
//! Decoding never fails. Every key a renderer reads has a literal default,
//! numeric keys go through [`coerce_number`], and a tag this build doesn't
//! know decodes to [`TypedBlock::Unknown`] with its props kept as-is.

use blockcraft_schema::{coerce_number, coerce_string, Block, BlockType, Props};

pub const DEFAULT_HEADLINE: &str = "Headline";
pub const DEFAULT_HEADLINE_SIZE: f64 = 28.0;
pub const DEFAULT_TEXT: &str = "Text";
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_BUTTON_LABEL: &str = "Go";

/// Secondary line under a hero headline
pub const SUBHEAD_SIZE: f64 = 18.0;
/// Text inside a navigation button
pub const BUTTON_LABEL_SIZE: f64 = 14.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HeroProps {
    pub headline: String,
    pub subhead: String,
    pub headline_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    pub value: String,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavButtonProps {
    pub label: String,
    /// Trimmed target page; `None` when absent or blank
    pub to_page_id: Option<String>,
}

impl NavButtonProps {
    pub fn is_enabled(&self) -> bool {
        self.to_page_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedBlock {
    Hero(HeroProps),
    Text(TextProps),
    NavButton(NavButtonProps),
    Unknown { tag: String, props: Props },
}

impl TypedBlock {
    pub fn decode(block: &Block) -> Self {
        let props = &block.props;
        match block.kind() {
            Some(BlockType::Hero) => TypedBlock::Hero(HeroProps {
                headline: string_or(props, "headline", DEFAULT_HEADLINE),
                subhead: string_or(props, "subhead", ""),
                headline_size: number_or(props, "headlineSize", DEFAULT_HEADLINE_SIZE),
            }),
            Some(BlockType::Text) => TypedBlock::Text(TextProps {
                value: string_or(props, "value", DEFAULT_TEXT),
                font_size: number_or(props, "fontSize", DEFAULT_FONT_SIZE),
            }),
            Some(BlockType::NavButton) => {
                let label = props
                    .get("label")
                    .and_then(coerce_string)
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| DEFAULT_BUTTON_LABEL.to_string());
                let to_page_id = props
                    .get("toPageId")
                    .and_then(coerce_string)
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty());
                TypedBlock::NavButton(NavButtonProps { label, to_page_id })
            }
            None => TypedBlock::Unknown {
                tag: block.block_type.clone(),
                props: props.clone(),
            },
        }
    }

    pub fn kind(&self) -> Option<BlockType> {
        match self {
            TypedBlock::Hero(_) => Some(BlockType::Hero),
            TypedBlock::Text(_) => Some(BlockType::Text),
            TypedBlock::NavButton(_) => Some(BlockType::NavButton),
            TypedBlock::Unknown { .. } => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypedBlock::Unknown { .. })
    }
}

fn string_or(props: &Props, key: &str, default: &str) -> String {
    props
        .get(key)
        .and_then(coerce_string)
        .unwrap_or_else(|| default.to_string())
}

fn number_or(props: &Props, key: &str, default: f64) -> f64 {
    props.get(key).and_then(coerce_number).unwrap_or(default)
}
