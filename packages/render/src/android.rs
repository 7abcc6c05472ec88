//! Compose-shaped rendering for the Android previewer.

use blockcraft_schema::Page;

use crate::blocks::{HeroProps, NavButtonProps, TextProps, DEFAULT_FONT_SIZE, SUBHEAD_SIZE};
use crate::contract::{nav_control, Platform, RenderMode, Renderer};
use crate::node::RenderNode;

#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidRenderer;

impl Renderer for AndroidRenderer {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn hero(&self, block_id: &str, props: &HeroProps) -> RenderNode {
        let mut column = RenderNode::element("Column")
            .with_attr("testTag", block_id)
            .with_attr("modifier", "fillMaxWidth().padding(16.dp)")
            .with_child(RenderNode::text(&props.headline, props.headline_size).bold());
        if !props.subhead.is_empty() {
            column = column.with_child(RenderNode::text(&props.subhead, SUBHEAD_SIZE));
        }
        column
    }

    fn text(&self, block_id: &str, props: &TextProps) -> RenderNode {
        RenderNode::element("Box")
            .with_attr("testTag", block_id)
            .with_attr("modifier", "fillMaxWidth().padding(horizontal = 16.dp)")
            .with_child(RenderNode::text(&props.value, props.font_size))
    }

    fn nav_button(&self, block_id: &str, props: &NavButtonProps, mode: RenderMode) -> RenderNode {
        RenderNode::element("Box")
            .with_attr("testTag", block_id)
            .with_attr("modifier", "padding(horizontal = 16.dp, vertical = 8.dp)")
            .with_child(nav_control("Button", props, mode))
    }

    fn page(&self, page: &Page, children: Vec<RenderNode>) -> RenderNode {
        RenderNode::element("LazyColumn")
            .with_attr("testTag", &page.id)
            .with_attr("title", &page.title)
            .with_children(children)
    }

    fn notice(&self, message: &str) -> RenderNode {
        RenderNode::element("Box")
            .with_attr("contentAlignment", "Center")
            .with_child(RenderNode::text(message, DEFAULT_FONT_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcraft_schema::{Block, Props};
    use serde_json::json;

    #[test]
    fn test_text_uses_coerced_size() {
        let block = Block::new("t", "text", Props::new())
            .with_prop("value", json!("Body"))
            .with_prop("fontSize", json!("20"));
        let node = AndroidRenderer.render_block(&block, RenderMode::Preview).unwrap();
        assert_eq!(node.children(), &[RenderNode::text("Body", 20.0)]);
    }

    #[test]
    fn test_empty_subhead_is_omitted() {
        let block = Block::new("h", "hero", Props::new()).with_prop("headline", json!("Hi"));
        let node = AndroidRenderer.render_block(&block, RenderMode::Preview).unwrap();
        assert_eq!(node.children().len(), 1);
    }
}
