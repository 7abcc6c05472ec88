//! # Edit Session
//!
//! Top-level editing controller for one open project.
//!
//! Every gesture ends up here: the session turns it into a [`Mutation`],
//! applies it to the current project, and commits the result to history.
//! It also holds UI-side state that is not part of the document (selected
//! page/block, in-flight drags, the live order of a reorder drag).
//!
//! All calls are synchronous. A drag owns the block it moves until the
//! pointer is released; mutations aimed at that block are refused meanwhile.
//! A reorder drag owns its whole page's block list the same way.

use std::collections::HashMap;

use blockcraft_schema::{Block, Page, Project, ProjectId, Props};
use serde_json::json;

use crate::placement::{block_origin, AxisSnap, DragOutcome, PlacementEngine, PlacementFrame, Point, Size};
use crate::sequencing::{DropTarget, ReorderDrag};
use crate::template::{ensure_page, template_project};
use crate::{BlockRegistry, EditorConfig, EditorError, History, Mutation, MutationError};

#[derive(Debug)]
struct ActiveReorder {
    page_id: String,
    drag: ReorderDrag,
}

/// Editing state for one open project
#[derive(Debug)]
pub struct EditSession {
    config: EditorConfig,
    registry: BlockRegistry,
    project: Project,
    history: History,
    selected_page_id: String,
    selected_block_id: Option<String>,
    placement: PlacementEngine,
    /// Page each free drag started on, by block id
    drag_pages: HashMap<String, String>,
    reorder: Option<ActiveReorder>,
    revision: u64,
}

impl EditSession {
    /// Session over the built-in template
    pub fn new(config: EditorConfig) -> Self {
        Self::with_project(template_project(), config)
    }

    pub fn with_project(project: Project, config: EditorConfig) -> Self {
        let project = ensure_page(project);
        let selected_page_id = first_page_id(&project);
        Self {
            registry: BlockRegistry::new(),
            history: History::new(project.clone(), config.history_limit),
            placement: PlacementEngine::new(config.snap_tolerance, config.click_threshold),
            project,
            selected_page_id,
            selected_block_id: None,
            drag_pages: HashMap::new(),
            reorder: None,
            revision: 0,
            config,
        }
    }

    /// Replace the open project; history restarts from it
    pub fn open(&mut self, project: Project) {
        let project = ensure_page(project);
        tracing::info!("opening project {} ({} pages)", project.id, project.pages.len());

        self.history.reset(project.clone());
        self.selected_page_id = first_page_id(&project);
        self.selected_block_id = None;
        self.placement.clear();
        self.drag_pages.clear();
        self.reorder = None;
        self.project = project;
    }

    pub fn open_json(&mut self, source: &str) -> Result<(), EditorError> {
        let project = Project::from_json(source)?;
        self.open(project);
        Ok(())
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Bumped on every commit, undo and redo
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selected_page_id(&self) -> &str {
        &self.selected_page_id
    }

    pub fn selected_block_id(&self) -> Option<&str> {
        self.selected_block_id.as_deref()
    }

    pub fn page(&self) -> Option<&Page> {
        self.project.page(&self.selected_page_id)
    }

    /// Apply and commit a mutation.
    ///
    /// Returns `false` when the mutation was valid but changed nothing (for
    /// example deleting the last page); nothing is committed then.
    pub fn apply(&mut self, mutation: Mutation) -> Result<bool, EditorError> {
        if let Some(block_id) = mutation.target_block() {
            if self.placement.is_dragging(block_id) {
                return Err(MutationError::BlockBusy(block_id.to_string()).into());
            }
        }
        if let Some(page_id) = mutation.reshaped_page() {
            if let Some(busy) = self.gesture_on_page(page_id, &mutation) {
                return Err(MutationError::BlockBusy(busy.to_string()).into());
            }
        }

        let next = mutation.apply(&self.project).map_err(|e| {
            tracing::debug!("{} rejected: {}", mutation.name(), e);
            e
        })?;

        if next == self.project {
            return Ok(false);
        }

        tracing::debug!("{} committed", mutation.name());
        self.history.commit(&next);
        self.project = next;
        self.revision += 1;
        self.repair_selection();
        Ok(true)
    }

    /// Create a block from the registry and append it to the selected page
    pub fn add_block(&mut self, block_type: &str, overrides: Props) -> Result<String, EditorError> {
        let page_id = self.require_page()?;
        let block = self.registry.create_block(block_type, overrides)?;
        let block_id = block.id.clone();
        self.apply(Mutation::AddBlock { page_id, block, index: None })?;
        Ok(block_id)
    }

    pub fn update_block(&mut self, block: Block) -> Result<bool, EditorError> {
        let page_id = self.require_page()?;
        self.apply(Mutation::UpdateBlock { page_id, block })
    }

    pub fn merge_props(&mut self, block_id: &str, props: Props) -> Result<bool, EditorError> {
        let page_id = self.require_page()?;
        self.apply(Mutation::MergeProps {
            page_id,
            block_id: block_id.to_string(),
            props,
        })
    }

    pub fn delete_block(&mut self, block_id: &str) -> Result<bool, EditorError> {
        let page_id = self.require_page()?;
        self.apply(Mutation::DeleteBlock {
            page_id,
            block_id: block_id.to_string(),
        })
    }

    /// Add a page and select it
    pub fn add_page(&mut self, title: Option<&str>) -> Result<String, EditorError> {
        let page_id = blockcraft_schema::fresh_id();
        self.apply(Mutation::AddPage {
            page_id: page_id.clone(),
            title: title.map(str::to_string),
        })?;
        self.selected_page_id = page_id.clone();
        self.selected_block_id = None;
        Ok(page_id)
    }

    pub fn rename_page(&mut self, page_id: &str, title: &str, keep_path: bool) -> Result<bool, EditorError> {
        self.apply(Mutation::RenamePage {
            page_id: page_id.to_string(),
            title: title.to_string(),
            keep_path,
        })
    }

    /// Delete a page; if it was selected, its neighbour becomes selected
    pub fn delete_page(&mut self, page_id: &str) -> Result<bool, EditorError> {
        let index = self.project.page_index(page_id);
        let was_selected = self.selected_page_id == page_id;
        let changed = self.apply(Mutation::DeletePage {
            page_id: page_id.to_string(),
        })?;

        if changed && was_selected {
            let pick = index.unwrap_or(0).min(self.project.pages.len().saturating_sub(1));
            self.selected_page_id = self.project.pages[pick].id.clone();
            self.selected_block_id = None;
        }
        Ok(changed)
    }

    pub fn rename_project(&mut self, name: &str) -> Result<bool, EditorError> {
        self.apply(Mutation::RenameProject { name: name.to_string() })
    }

    pub fn select_page(&mut self, page_id: &str) -> Result<(), EditorError> {
        if self.project.page(page_id).is_none() {
            return Err(MutationError::PageNotFound(page_id.to_string()).into());
        }
        if self.selected_page_id != page_id {
            self.selected_page_id = page_id.to_string();
            self.selected_block_id = None;
        }
        Ok(())
    }

    pub fn select_block(&mut self, block_id: Option<&str>) -> Result<(), EditorError> {
        if let Some(id) = block_id {
            let page = self.page().ok_or(EditorError::NoPageSelected)?;
            if page.block(id).is_none() {
                return Err(MutationError::BlockNotFound(id.to_string()).into());
            }
        }
        self.selected_block_id = block_id.map(str::to_string);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back one commit. Ignored while a drag is in progress.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() || self.gesture_in_progress() {
            return false;
        }
        self.project = self.history.undo();
        self.after_time_travel();
        true
    }

    /// Step forward one commit. Ignored while a drag is in progress.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() || self.gesture_in_progress() {
            return false;
        }
        self.project = self.history.redo();
        self.after_time_travel();
        true
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Replace a provisional id with the durable one issued on first save.
    ///
    /// Ignored (returns `false`) if the live project no longer carries
    /// `provisional`. History is rewritten too, so undo can't bring the
    /// provisional id back.
    pub fn adopt_identity(&mut self, provisional: &ProjectId, durable: ProjectId) -> bool {
        if &self.project.id != provisional {
            tracing::debug!("ignoring identity {} for {}: project is now {}", durable, provisional, self.project.id);
            return false;
        }

        tracing::info!("project {} is now {}", provisional, durable);
        self.project.id = durable.clone();
        self.history.rewrite(|p| {
            if &p.id == provisional {
                p.id = durable.clone();
            }
        });
        true
    }

    // Placement

    /// Start a free-position drag of a block on the selected page
    pub fn begin_drag(&mut self, block_id: &str, pointer_id: u64) -> Result<bool, EditorError> {
        let page = self.page().ok_or(EditorError::NoPageSelected)?;
        let index = page
            .block_index(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;
        let start = block_origin(&page.blocks[index], index, self.config.default_row_height);
        let page_id = page.id.clone();

        let started = self.placement.begin(block_id, pointer_id, start);
        if started {
            self.drag_pages.insert(block_id.to_string(), page_id);
        }
        Ok(started)
    }

    pub fn drag(
        &mut self,
        block_id: &str,
        pointer_id: u64,
        delta: Point,
        canvas: Size,
        block: Size,
    ) -> Option<PlacementFrame> {
        self.placement.drag(block_id, pointer_id, delta, canvas, block)
    }

    /// Release a drag: persist the position, or select the block on a click.
    ///
    /// The position is written to the page the drag started on, even if
    /// another page was selected in the meantime.
    pub fn end_drag(&mut self, block_id: &str, pointer_id: u64) -> Result<Option<DragOutcome>, EditorError> {
        let Some(outcome) = self.placement.end(block_id, pointer_id) else {
            return Ok(None);
        };
        let page_id = match self.drag_pages.remove(block_id) {
            Some(page_id) => page_id,
            None => self.require_page()?,
        };

        match &outcome {
            DragOutcome::Moved { block_id, position } => {
                let mut props = Props::new();
                props.insert("x".to_string(), json!(position.x));
                props.insert("y".to_string(), json!(position.y));
                self.apply(Mutation::MergeProps {
                    page_id,
                    block_id: block_id.clone(),
                    props,
                })?;
            }
            DragOutcome::Clicked { block_id } => {
                if page_id == self.selected_page_id {
                    self.select_block(Some(block_id.as_str()))?;
                }
            }
        }
        Ok(Some(outcome))
    }

    pub fn guides(&self) -> AxisSnap {
        self.placement.guides()
    }

    pub fn drag_position(&self, block_id: &str) -> Option<Point> {
        self.placement.position(block_id)
    }

    // Sequencing

    /// Start reordering a block of the selected page. `false` if a reorder is
    /// already running.
    pub fn begin_reorder(&mut self, block_id: &str) -> Result<bool, EditorError> {
        if self.reorder.is_some() {
            return Ok(false);
        }
        let page = self.page().ok_or(EditorError::NoPageSelected)?;
        let drag = ReorderDrag::begin(page.block_ids(), block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;

        self.reorder = Some(ActiveReorder {
            page_id: page.id.clone(),
            drag,
        });
        Ok(true)
    }

    pub fn hover_reorder(&mut self, target: &DropTarget) -> bool {
        self.reorder.as_mut().is_some_and(|r| r.drag.hover(target))
    }

    /// Order to display while a reorder drag runs
    pub fn live_order(&self) -> Option<&[String]> {
        self.reorder.as_ref().map(|r| r.drag.live_order())
    }

    /// Finish the reorder and commit the resulting order if it changed
    pub fn drop_reorder(&mut self, target: Option<&DropTarget>) -> Result<bool, EditorError> {
        let Some(ActiveReorder { page_id, drag }) = self.reorder.take() else {
            return Ok(false);
        };
        match drag.drop(target) {
            Some(order) => self.apply(Mutation::ReorderBlocks { page_id, order }),
            None => Ok(false),
        }
    }

    /// Block whose gesture owns `page_id`'s block list, if any
    fn gesture_on_page(&self, page_id: &str, mutation: &Mutation) -> Option<&str> {
        if let Some(reorder) = &self.reorder {
            if reorder.page_id == page_id {
                return Some(reorder.drag.dragged());
            }
        }
        if matches!(mutation, Mutation::DeletePage { .. }) {
            return self
                .drag_pages
                .iter()
                .find(|(_, page)| page.as_str() == page_id)
                .map(|(block, _)| block.as_str());
        }
        None
    }

    fn gesture_in_progress(&self) -> bool {
        self.placement.has_active_drags() || self.reorder.is_some()
    }

    fn after_time_travel(&mut self) {
        self.revision += 1;
        self.repair_selection();
    }

    fn repair_selection(&mut self) {
        if self.project.page(&self.selected_page_id).is_none() {
            self.selected_page_id = first_page_id(&self.project);
            self.selected_block_id = None;
        }
        if let Some(block_id) = &self.selected_block_id {
            let still_there = self.page().is_some_and(|p| p.block(block_id).is_some());
            if !still_there {
                self.selected_block_id = None;
            }
        }
    }

    fn require_page(&self) -> Result<String, EditorError> {
        self.page().map(|p| p.id.clone()).ok_or(EditorError::NoPageSelected)
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

fn first_page_id(project: &Project) -> String {
    project.pages.first().map(|p| p.id.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditSession {
        EditSession::default()
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.project().name, "My App");
        assert_eq!(session.page().unwrap().title, "Home");
        assert_eq!(session.revision(), 0);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_add_block_commits_and_undoes() {
        let mut session = session();
        let id = session.add_block("text", Props::new()).unwrap();
        assert_eq!(session.page().unwrap().blocks.len(), 1);
        assert_eq!(session.revision(), 1);

        assert!(session.undo());
        assert!(session.page().unwrap().block(&id).is_none());
        assert!(session.redo());
        assert!(session.page().unwrap().block(&id).is_some());
    }

    #[test]
    fn test_unknown_block_type_adds_nothing() {
        let mut session = session();
        let err = session.add_block("bogus", Props::new()).unwrap_err();
        assert_eq!(
            err.as_mutation(),
            Some(&MutationError::UnknownBlockType("bogus".to_string()))
        );
        assert!(session.page().unwrap().blocks.is_empty());
        assert_eq!(session.revision(), 0);
    }

    #[test]
    fn test_delete_last_page_does_not_commit() {
        let mut session = session();
        let home = session.selected_page_id().to_string();
        assert!(!session.delete_page(&home).unwrap());
        assert_eq!(session.project().pages.len(), 1);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_delete_selected_page_selects_neighbour() {
        let mut session = session();
        let home = session.selected_page_id().to_string();
        let second = session.add_page(Some("Second")).unwrap();
        let third = session.add_page(Some("Third")).unwrap();
        session.select_page(&second).unwrap();

        assert!(session.delete_page(&second).unwrap());
        assert_eq!(session.selected_page_id(), third);

        session.select_page(&home).unwrap();
        assert!(session.delete_page(&third).unwrap());
        assert_eq!(session.selected_page_id(), home);
    }

    #[test]
    fn test_undo_repairs_page_selection() {
        let mut session = session();
        let added = session.add_page(None).unwrap();
        assert_eq!(session.selected_page_id(), added);

        session.undo();
        assert_ne!(session.selected_page_id(), added);
        assert!(session.page().is_some());
    }

    #[test]
    fn test_select_missing_page_is_not_found() {
        let mut session = session();
        let err = session.select_page("nope").unwrap_err();
        assert_eq!(err.as_mutation(), Some(&MutationError::PageNotFound("nope".to_string())));
    }

    #[test]
    fn test_click_selects_without_commit() {
        let mut session = session();
        let id = session.add_block("hero", Props::new()).unwrap();
        let revision = session.revision();

        assert!(session.begin_drag(&id, 1).unwrap());
        session.drag(&id, 1, Point::new(1.0, 1.0), Size::new(400.0, 640.0), Size::new(100.0, 40.0));
        let outcome = session.end_drag(&id, 1).unwrap();

        assert_eq!(outcome, Some(DragOutcome::Clicked { block_id: id.clone() }));
        assert_eq!(session.selected_block_id(), Some(id.as_str()));
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn test_drag_persists_position() {
        let mut session = session();
        let id = session.add_block("hero", Props::new()).unwrap();

        session.begin_drag(&id, 1).unwrap();
        session.drag(&id, 1, Point::new(40.0, 25.0), Size::new(400.0, 640.0), Size::new(100.0, 40.0));
        session.end_drag(&id, 1).unwrap();

        let block = session.page().unwrap().block(&id).unwrap();
        assert_eq!(block.number_prop("x"), Some(40.0));
        assert_eq!(block.number_prop("y"), Some(25.0));
        assert!(!session.guides().any());
    }

    #[test]
    fn test_mutations_refused_while_dragging() {
        let mut session = session();
        let id = session.add_block("text", Props::new()).unwrap();
        session.begin_drag(&id, 7).unwrap();

        let err = session.delete_block(&id).unwrap_err();
        assert_eq!(err.as_mutation(), Some(&MutationError::BlockBusy(id.clone())));
        assert!(!session.undo());

        session.end_drag(&id, 7).unwrap();
        assert!(session.delete_block(&id).unwrap());
    }

    #[test]
    fn test_snapped_drag_stores_centering_value() {
        let mut session = session();
        let id = session.add_block("hero", Props::new()).unwrap();
        let canvas = Size::new(400.0, 640.0);
        let block = Size::new(100.0, 40.0);

        session.begin_drag(&id, 1).unwrap();
        let frame = session.drag(&id, 1, Point::new(147.0, 296.0), canvas, block).unwrap();
        assert!(frame.snap.x && frame.snap.y);
        session.end_drag(&id, 1).unwrap();

        let stored = session.page().unwrap().block(&id).unwrap();
        assert_eq!(stored.number_prop("x"), Some(150.0));
        assert_eq!(stored.number_prop("y"), Some(300.0));
    }

    #[test]
    fn test_drag_lands_on_its_own_page_after_selection_changes() {
        let mut session = session();
        let home = session.selected_page_id().to_string();
        let id = session.add_block("text", Props::new()).unwrap();
        let other = session.add_page(Some("Other")).unwrap();
        session.select_page(&home).unwrap();

        session.begin_drag(&id, 1).unwrap();
        session.drag(&id, 1, Point::new(50.0, 60.0), Size::new(400.0, 640.0), Size::new(100.0, 40.0));
        session.select_page(&other).unwrap();

        let outcome = session.end_drag(&id, 1).unwrap();
        assert!(matches!(outcome, Some(DragOutcome::Moved { .. })));
        assert_eq!(session.selected_page_id(), other);

        let stored = session.project().page(&home).unwrap().block(&id).unwrap();
        assert_eq!(stored.number_prop("x"), Some(50.0));
        assert_eq!(stored.number_prop("y"), Some(60.0));
    }

    #[test]
    fn test_page_with_dragged_block_cannot_be_deleted() {
        let mut session = session();
        let home = session.selected_page_id().to_string();
        let id = session.add_block("text", Props::new()).unwrap();
        session.add_page(None).unwrap();
        session.select_page(&home).unwrap();

        session.begin_drag(&id, 2).unwrap();
        let err = session.delete_page(&home).unwrap_err();
        assert_eq!(err.as_mutation(), Some(&MutationError::BlockBusy(id.clone())));

        session.end_drag(&id, 2).unwrap();
        assert!(session.delete_page(&home).unwrap());
    }

    #[test]
    fn test_reorder_owns_its_page_blocks() {
        let mut session = session();
        let a = session.add_block("text", Props::new()).unwrap();
        let b = session.add_block("text", Props::new()).unwrap();
        let c = session.add_block("text", Props::new()).unwrap();

        session.begin_reorder(&c).unwrap();
        session.hover_reorder(&DropTarget::Gap(0));

        let err = session.delete_block(&a).unwrap_err();
        assert_eq!(err.as_mutation(), Some(&MutationError::BlockBusy(c.clone())));
        assert!(session.add_block("text", Props::new()).is_err());

        // Props edits don't change the block list and still go through
        let mut props = Props::new();
        props.insert("value".to_string(), json!("edited"));
        assert!(session.merge_props(&a, props).unwrap());

        assert!(session.drop_reorder(None).unwrap());
        assert_eq!(session.page().unwrap().block_ids(), vec![c, a.clone(), b]);
        assert!(session.delete_block(&a).unwrap());
    }

    #[test]
    fn test_reorder_round_trip() {
        let mut session = session();
        let a = session.add_block("text", Props::new()).unwrap();
        let b = session.add_block("text", Props::new()).unwrap();
        let c = session.add_block("text", Props::new()).unwrap();

        assert!(session.begin_reorder(&c).unwrap());
        assert!(session.hover_reorder(&DropTarget::Gap(0)));
        assert_eq!(session.live_order().unwrap(), [c.clone(), a.clone(), b.clone()].as_slice());
        assert!(session.drop_reorder(None).unwrap());

        assert_eq!(session.page().unwrap().block_ids(), vec![c, a, b]);
        assert!(session.live_order().is_none());
    }

    #[test]
    fn test_adopt_identity_rewrites_history() {
        let mut session = session();
        let provisional = session.project().id.clone();
        session.add_block("text", Props::new()).unwrap();

        let durable = ProjectId::parse("000000000000000000000001").unwrap();
        assert!(session.adopt_identity(&provisional, durable.clone()));
        assert_eq!(session.project().id, durable);

        session.undo();
        assert_eq!(session.project().id, durable);

        let other = ProjectId::parse("000000000000000000000002").unwrap();
        assert!(!session.adopt_identity(&provisional, other));
        assert_eq!(session.project().id, durable);
    }

    #[test]
    fn test_open_resets_history() {
        let mut session = session();
        session.add_block("text", Props::new()).unwrap();
        assert!(session.can_undo());

        session.open(template_project());
        assert!(!session.can_undo());
        assert!(session.page().unwrap().blocks.is_empty());
    }
}
