//! SwiftUI-shaped rendering for the iOS previewer.

use blockcraft_schema::Page;

use crate::blocks::{HeroProps, NavButtonProps, TextProps, DEFAULT_FONT_SIZE, SUBHEAD_SIZE};
use crate::contract::{nav_control, Platform, RenderMode, Renderer};
use crate::node::RenderNode;

#[derive(Debug, Clone, Copy, Default)]
pub struct IosRenderer;

impl Renderer for IosRenderer {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn hero(&self, block_id: &str, props: &HeroProps) -> RenderNode {
        let mut stack = RenderNode::element("VStack")
            .with_attr("id", block_id)
            .with_attr("spacing", "8")
            .with_attr("alignment", "center")
            .with_child(RenderNode::text(&props.headline, props.headline_size).bold());
        if !props.subhead.is_empty() {
            stack = stack.with_child(RenderNode::text(&props.subhead, SUBHEAD_SIZE));
        }
        stack
    }

    fn text(&self, block_id: &str, props: &TextProps) -> RenderNode {
        RenderNode::element("HStack")
            .with_attr("id", block_id)
            .with_attr("alignment", "leading")
            .with_child(RenderNode::text(&props.value, props.font_size))
    }

    fn nav_button(&self, block_id: &str, props: &NavButtonProps, mode: RenderMode) -> RenderNode {
        RenderNode::element("HStack")
            .with_attr("id", block_id)
            .with_attr("alignment", "leading")
            .with_child(nav_control("Button", props, mode))
    }

    fn page(&self, page: &Page, children: Vec<RenderNode>) -> RenderNode {
        let stack = RenderNode::element("VStack")
            .with_attr("alignment", "leading")
            .with_attr("spacing", "16")
            .with_children(children);
        RenderNode::element("ScrollView")
            .with_attr("id", &page.id)
            .with_attr("navigationTitle", &page.title)
            .with_child(stack)
    }

    fn notice(&self, message: &str) -> RenderNode {
        RenderNode::element("VStack").with_child(RenderNode::text(message, DEFAULT_FONT_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe;
    use blockcraft_schema::{Block, Props};

    #[test]
    fn test_page_nests_blocks_in_scroll_view() {
        let mut page = Page::new("p1", "Home", "/home");
        page.blocks.push(Block::new("a", "hero", Props::new()));
        page.blocks.push(Block::new("b", "navButton", Props::new()));

        let node = IosRenderer.render_page(&page, RenderMode::Edit);
        assert_eq!(node.attr("navigationTitle"), Some("Home"));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].children().len(), 2);
        assert_eq!(describe(&node).len(), 2);
    }
}
