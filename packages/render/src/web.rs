//! DOM-shaped rendering for the web editor and its preview pane.

use blockcraft_schema::Page;

use crate::blocks::{HeroProps, NavButtonProps, TextProps, SUBHEAD_SIZE};
use crate::contract::{nav_control, Platform, RenderMode, Renderer};
use crate::node::RenderNode;

#[derive(Debug, Clone, Copy, Default)]
pub struct WebRenderer;

impl Renderer for WebRenderer {
    fn platform(&self) -> Platform {
        Platform::Web
    }

    fn hero(&self, block_id: &str, props: &HeroProps) -> RenderNode {
        let mut node = RenderNode::element("section")
            .with_attr("data-block-id", block_id)
            .with_attr("style", "padding: 16px")
            .with_child(RenderNode::text(&props.headline, props.headline_size).bold());
        if !props.subhead.is_empty() {
            node = node.with_child(RenderNode::text(&props.subhead, SUBHEAD_SIZE));
        }
        node
    }

    fn text(&self, block_id: &str, props: &TextProps) -> RenderNode {
        RenderNode::element("div")
            .with_attr("data-block-id", block_id)
            .with_attr("style", "padding: 12px")
            .with_child(RenderNode::text(&props.value, props.font_size))
    }

    fn nav_button(&self, block_id: &str, props: &NavButtonProps, mode: RenderMode) -> RenderNode {
        RenderNode::element("div")
            .with_attr("data-block-id", block_id)
            .with_attr("style", "padding: 12px")
            .with_child(nav_control("button", props, mode))
    }

    fn page(&self, page: &Page, children: Vec<RenderNode>) -> RenderNode {
        RenderNode::element("main")
            .with_attr("data-page-id", &page.id)
            .with_attr("data-path", &page.path)
            .with_children(children)
    }

    fn notice(&self, message: &str) -> RenderNode {
        RenderNode::element("p")
            .with_attr("class", "notice")
            .with_child(RenderNode::text(message, crate::blocks::DEFAULT_FONT_SIZE))
    }
}
