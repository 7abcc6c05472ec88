//! # Rendering Contract
//!
//! Each platform implements [`Renderer`] by supplying one method per known
//! block type. Dispatch, unknown-type handling and interaction live in the
//! provided methods so every platform gets them identically:
//!
//! - an unknown `type` renders nothing, without error
//! - in [`RenderMode::Edit`] every rendered block is selectable and inert
//! - in [`RenderMode::Preview`] an enabled nav button navigates

use std::fmt;
use std::str::FromStr;

use blockcraft_schema::{Block, Page};
use serde::{Deserialize, Serialize};

use crate::blocks::{HeroProps, NavButtonProps, TextProps, TypedBlock};
use crate::node::RenderNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Android,
    Ios,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Web, Platform::Android, Platform::Ios];

    pub fn name(self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }

    /// The renderer for this platform
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            Platform::Web => Box::new(crate::WebRenderer),
            Platform::Android => Box::new(crate::AndroidRenderer),
            Platform::Ios => Box::new(crate::IosRenderer),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown platform '{}'", s))
    }
}

/// Authoring canvas vs interactive preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Edit,
    Preview,
}

/// Outbound request from an activated block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "id", rename_all = "camelCase")]
pub enum Intent {
    /// Select the block in the editor (carries the block id)
    Select(String),
    /// Show another page (carries the target page id)
    Navigate(String),
}

pub trait Renderer {
    fn platform(&self) -> Platform;

    fn hero(&self, block_id: &str, props: &HeroProps) -> RenderNode;

    fn text(&self, block_id: &str, props: &TextProps) -> RenderNode;

    fn nav_button(&self, block_id: &str, props: &NavButtonProps, mode: RenderMode) -> RenderNode;

    /// Wrap a page's rendered blocks
    fn page(&self, page: &Page, children: Vec<RenderNode>) -> RenderNode;

    /// Shown in place of a page when the project has none
    fn notice(&self, message: &str) -> RenderNode;

    /// Render one block, or nothing for a type this platform doesn't know
    fn render_block(&self, block: &Block, mode: RenderMode) -> Option<RenderNode> {
        match TypedBlock::decode(block) {
            TypedBlock::Hero(props) => Some(self.hero(&block.id, &props)),
            TypedBlock::Text(props) => Some(self.text(&block.id, &props)),
            TypedBlock::NavButton(props) => Some(self.nav_button(&block.id, &props, mode)),
            TypedBlock::Unknown { tag, .. } => {
                tracing::debug!("{}: skipping block {} of unknown type '{}'", self.platform(), block.id, tag);
                None
            }
        }
    }

    fn render_page(&self, page: &Page, mode: RenderMode) -> RenderNode {
        let children = page
            .blocks
            .iter()
            .filter_map(|block| self.render_block(block, mode))
            .collect();
        self.page(page, children)
    }

    /// What pressing a rendered block asks for
    fn activate(&self, block: &Block, mode: RenderMode) -> Option<Intent> {
        let typed = TypedBlock::decode(block);
        match (mode, typed) {
            (_, TypedBlock::Unknown { .. }) => None,
            (RenderMode::Edit, _) => Some(Intent::Select(block.id.clone())),
            (RenderMode::Preview, TypedBlock::NavButton(props)) => props.to_page_id.map(Intent::Navigate),
            (RenderMode::Preview, _) => None,
        }
    }
}

impl<T: Renderer + ?Sized> Renderer for Box<T> {
    fn platform(&self) -> Platform {
        (**self).platform()
    }

    fn hero(&self, block_id: &str, props: &HeroProps) -> RenderNode {
        (**self).hero(block_id, props)
    }

    fn text(&self, block_id: &str, props: &TextProps) -> RenderNode {
        (**self).text(block_id, props)
    }

    fn nav_button(&self, block_id: &str, props: &NavButtonProps, mode: RenderMode) -> RenderNode {
        (**self).nav_button(block_id, props, mode)
    }

    fn page(&self, page: &Page, children: Vec<RenderNode>) -> RenderNode {
        (**self).page(page, children)
    }

    fn notice(&self, message: &str) -> RenderNode {
        (**self).notice(message)
    }
}

/// Control fields shared by every platform's nav button
pub(crate) fn nav_control(kind: &str, props: &NavButtonProps, mode: RenderMode) -> RenderNode {
    RenderNode::Control {
        kind: kind.to_string(),
        label: props.label.clone(),
        size: crate::blocks::BUTTON_LABEL_SIZE,
        enabled: props.is_enabled(),
        target: props.to_page_id.clone(),
        navigable: mode == RenderMode::Preview && props.is_enabled(),
    }
}
