//! Read-only interactive preview of a whole project.

use blockcraft_schema::{Page, Project};

use crate::contract::{Intent, RenderMode, Renderer};
use crate::node::RenderNode;

pub const EMPTY_PROJECT_NOTICE: &str = "No pages in project";

/// Walks a project the way the native previewers do: one page at a time,
/// following nav buttons.
pub struct Previewer<R: Renderer> {
    renderer: R,
    project: Project,
    current: Option<String>,
}

impl<R: Renderer> Previewer<R> {
    /// Starts on the first page
    pub fn new(renderer: R, project: Project) -> Self {
        let current = project.pages.first().map(|p| p.id.clone());
        Self {
            renderer,
            project,
            current,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.current.as_deref().and_then(|id| self.project.page(id))
    }

    /// Jump to a page directly (the page picker). `false` for unknown ids.
    pub fn go_to(&mut self, page_id: &str) -> bool {
        if self.project.page(page_id).is_none() {
            return false;
        }
        self.current = Some(page_id.to_string());
        true
    }

    pub fn render(&self) -> RenderNode {
        match self.current_page() {
            Some(page) => self.renderer.render_page(page, RenderMode::Preview),
            None => self.renderer.notice(EMPTY_PROJECT_NOTICE),
        }
    }

    /// Press a block on the current page. Returns the page navigated to, if any.
    pub fn activate(&mut self, block_id: &str) -> Option<&Page> {
        let block = self.current_page()?.block(block_id)?;
        let Some(Intent::Navigate(target)) = self.renderer.activate(block, RenderMode::Preview) else {
            return None;
        };

        if !self.go_to(&target) {
            tracing::warn!("nav button {} points at missing page {}", block_id, target);
            return None;
        }
        self.current_page()
    }
}
