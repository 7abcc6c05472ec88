//! # Workspace
//!
//! Top-level controller a UI talks to. Owns the edit session, the session
//! context and the autosave controller, and wires them together:
//!
//! - every committing edit schedules an autosave
//! - opening or loading a project never does
//! - promoted identities are adopted only while the live document still
//!   carries the provisional id

use std::sync::Arc;

use blockcraft_editor::{template_project, EditSession, EditorError};
use blockcraft_schema::{Project, ProjectId};
use tokio::sync::mpsc;

use crate::{
    AutosaveController, AutosaveEvent, AutosaveStatus, Credential, ProjectStore, SessionHandle, WorkspaceConfig,
    WorkspaceError,
};

/// Autosave timers run on the ambient tokio runtime. Edits made outside
/// one still commit, but aren't scheduled for saving.
pub struct Workspace {
    store: Arc<dyn ProjectStore>,
    session: SessionHandle,
    editor: EditSession,
    autosave: AutosaveController,
    events: mpsc::UnboundedReceiver<AutosaveEvent>,
}

impl Workspace {
    /// Starts on the built-in template
    pub fn new(config: WorkspaceConfig, store: Arc<dyn ProjectStore>, session: SessionHandle) -> Self {
        let delay = config.autosave_delay();
        let (autosave, events) = AutosaveController::new(store.clone(), session.clone(), delay);
        Self {
            store,
            session,
            editor: EditSession::with_project(template_project(), config.editor),
            autosave,
            events,
        }
    }

    pub fn editor(&self) -> &EditSession {
        &self.editor
    }

    pub fn project(&self) -> &Project {
        self.editor.project()
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn autosave_status(&self) -> AutosaveStatus {
        self.autosave.status()
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Replace the open project without saving it
    pub fn open(&mut self, project: Project) {
        self.autosave.cancel();
        self.editor.open(project);
    }

    /// Fetch a stored project and open it
    pub async fn load(&mut self, id: &ProjectId) -> Result<(), WorkspaceError> {
        let credential = self.credential()?;
        let project = self.store.get(&credential, id).await?;
        self.open(project);
        Ok(())
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, WorkspaceError> {
        let credential = self.credential()?;
        Ok(self.store.list(&credential).await?)
    }

    /// Delete a stored project. If it is the open one, fall back to the template.
    pub async fn delete_project(&mut self, id: &ProjectId) -> Result<(), WorkspaceError> {
        let credential = self.credential()?;
        self.store.delete(&credential, id).await?;
        if &self.editor.project().id == id {
            self.open(template_project());
        }
        Ok(())
    }

    /// Run an editing operation; if it committed anything, schedule an autosave
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut EditSession) -> Result<T, EditorError>) -> Result<T, WorkspaceError> {
        let before = self.editor.revision();
        let result = f(&mut self.editor);
        self.after_edit(before);
        Ok(result?)
    }

    pub fn undo(&mut self) -> bool {
        let before = self.editor.revision();
        let changed = self.editor.undo();
        self.after_edit(before);
        changed
    }

    pub fn redo(&mut self) -> bool {
        let before = self.editor.revision();
        let changed = self.editor.redo();
        self.after_edit(before);
        changed
    }

    /// Manual save of the current document
    pub async fn save_now(&mut self) -> Result<(), WorkspaceError> {
        if !self.session.is_established() {
            return Err(WorkspaceError::NoSession);
        }
        let result = self.autosave.flush(self.editor.project().clone()).await;
        self.pump();
        result?;
        Ok(())
    }

    /// Apply autosave outcomes that are already waiting
    pub fn pump(&mut self) -> Vec<AutosaveEvent> {
        let mut handled = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            self.handle(&event);
            handled.push(event);
        }
        handled
    }

    /// Wait for the next autosave outcome and apply it
    pub async fn next_event(&mut self) -> Option<AutosaveEvent> {
        let event = self.events.recv().await?;
        self.handle(&event);
        Some(event)
    }

    fn handle(&mut self, event: &AutosaveEvent) {
        if let AutosaveEvent::IdentityPromoted { provisional, durable } = event {
            self.editor.adopt_identity(provisional, durable.clone());
        }
    }

    fn after_edit(&mut self, before: u64) {
        if self.editor.revision() != before {
            self.autosave.schedule(self.editor.project().clone());
        }
    }

    fn credential(&self) -> Result<Credential, WorkspaceError> {
        self.session.credential().ok_or(WorkspaceError::NoSession)
    }
}
