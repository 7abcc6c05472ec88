//! # Autosave
//!
//! Debounced persistence of the open project.
//!
//! ```text
//! commit ─▶ schedule ─▶ [quiet period] ─▶ save ─▶ AutosaveEvent
//!              │                            │
//!              └─ aborts the pending timer  ├─ provisional id → create, then IdentityPromoted
//!                                           ├─ durable id     → update
//!                                           └─ 401/403        → session cleared, no retry
//! ```
//!
//! Saves run one at a time. The controller remembers every provisional id it
//! has promoted, so a save that was scheduled before the promotion landed
//! still goes out as an `update` against the durable id.
//!
//! A save that already started is never cancelled; only the timer is. The
//! host decides whether a finished save still applies to the live document.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use blockcraft_schema::{Project, ProjectId};
use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{PersistenceError, ProjectStore, SessionHandle};

#[derive(Debug, Clone, PartialEq)]
pub enum AutosaveEvent {
    Saved {
        project_id: ProjectId,
        at: DateTime<Utc>,
    },
    /// First successful save of a provisional project
    IdentityPromoted {
        provisional: ProjectId,
        durable: ProjectId,
    },
    /// Non-fatal; the next edit schedules another attempt
    Failed {
        project_id: ProjectId,
        error: PersistenceError,
    },
    /// The store refused our credential; the session has been cleared
    AuthorizationRevoked { error: PersistenceError },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutosaveStatus {
    pub is_saving: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub last_error: Option<PersistenceError>,
}

#[derive(Debug, Default)]
struct Shared {
    status: AutosaveStatus,
    promoted: HashMap<ProjectId, ProjectId>,
}

/// Everything a save needs, cheap to clone into a task
#[derive(Clone)]
struct Saver {
    store: Arc<dyn ProjectStore>,
    session: SessionHandle,
    shared: Arc<Mutex<Shared>>,
    in_flight: Arc<tokio::sync::Mutex<()>>,
    events: mpsc::UnboundedSender<AutosaveEvent>,
}

impl Saver {
    fn shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: AutosaveEvent) {
        // Receiver may already be gone
        let _ = self.events.send(event);
    }

    async fn save(&self, mut project: Project) -> Result<Project, PersistenceError> {
        let _turn = self.in_flight.lock().await;

        let Some(credential) = self.session.credential() else {
            tracing::debug!("skipping save of {}: no session", project.id);
            return Err(PersistenceError::Unauthorized);
        };

        let provisional = {
            let mut shared = self.shared();
            if let Some(durable) = shared.promoted.get(&project.id) {
                project.id = durable.clone();
            }
            shared.status.is_saving = true;
            project.id.is_provisional().then(|| project.id.clone())
        };

        let result = match &provisional {
            Some(_) => self.store.create(&credential, &project).await,
            None => self.store.update(&credential, &project.id, &project).await,
        };

        let mut shared = self.shared();
        shared.status.is_saving = false;
        match result {
            Ok(saved) => {
                if let Some(provisional) = provisional {
                    tracing::info!("project {} saved as {}", provisional, saved.id);
                    shared.promoted.insert(provisional.clone(), saved.id.clone());
                    self.emit(AutosaveEvent::IdentityPromoted {
                        provisional,
                        durable: saved.id.clone(),
                    });
                }
                let at = Utc::now();
                shared.status.last_saved_at = Some(at);
                shared.status.last_error = None;
                self.emit(AutosaveEvent::Saved {
                    project_id: saved.id.clone(),
                    at,
                });
                Ok(saved)
            }
            Err(error) if error.is_authorization() => {
                tracing::warn!("save of {} refused: {}; clearing session", project.id, error);
                self.session.clear();
                shared.status.last_error = Some(error.clone());
                self.emit(AutosaveEvent::AuthorizationRevoked { error: error.clone() });
                Err(error)
            }
            Err(error) => {
                tracing::error!("save of {} failed: {}", project.id, error);
                shared.status.last_error = Some(error.clone());
                self.emit(AutosaveEvent::Failed {
                    project_id: project.id.clone(),
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }
}

pub struct AutosaveController {
    saver: Saver,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl AutosaveController {
    pub fn new(
        store: Arc<dyn ProjectStore>,
        session: SessionHandle,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<AutosaveEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            saver: Saver {
                store,
                session,
                shared: Arc::new(Mutex::new(Shared::default())),
                in_flight: Arc::new(tokio::sync::Mutex::new(())),
                events,
            },
            delay,
            pending: None,
        };
        (controller, receiver)
    }

    /// Restart the quiet period for `project`. Returns `false` (and does
    /// nothing) while no session is established, or when called outside a
    /// tokio runtime.
    pub fn schedule(&mut self, project: Project) -> bool {
        if !self.saver.session.is_established() {
            tracing::trace!("autosave inert: no session");
            return false;
        }
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!("autosave skipped for {}: no tokio runtime", project.id);
            return false;
        };

        self.cancel();
        let saver = self.saver.clone();
        let delay = self.delay;
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached: aborting the timer never cancels a started save
            tokio::spawn(async move {
                let _ = saver.save(project).await;
            });
        }));
        true
    }

    /// Save right away, dropping any pending timer
    pub async fn flush(&mut self, project: Project) -> Result<Project, PersistenceError> {
        self.cancel();
        self.saver.save(project).await
    }

    /// Drop the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a timer is still counting down
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn status(&self) -> AutosaveStatus {
        self.saver.shared().status.clone()
    }

    /// Durable id a provisional one was promoted to, if any
    pub fn promoted(&self, provisional: &ProjectId) -> Option<ProjectId> {
        self.saver.shared().promoted.get(provisional).cloned()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for AutosaveController {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Credential, MemoryStore, Role, StoreCall};
    use blockcraft_editor::template_project;

    const DELAY: Duration = Duration::from_millis(1500);

    fn setup() -> (
        Arc<MemoryStore>,
        SessionHandle,
        AutosaveController,
        mpsc::UnboundedReceiver<AutosaveEvent>,
    ) {
        let store = Arc::new(MemoryStore::new());
        let credential = Credential::new("owner");
        store.add_account(&credential, Role::Owner);

        let session = SessionHandle::new();
        session.establish(credential);

        let (controller, events) = AutosaveController::new(store.clone(), session.clone(), DELAY);
        (store, session, controller, events)
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_schedule_outside_runtime_is_skipped() {
        let (store, _session, mut controller, _events) = setup();

        assert!(!controller.schedule(template_project()));
        assert!(!controller.is_pending());
        assert!(store.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_inert_without_session() {
        let (store, session, mut controller, _events) = setup();
        session.clear();

        assert!(!controller.schedule(template_project()));
        tokio::time::advance(DELAY * 2).await;
        settle().await;
        assert!(store.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_restarts_quiet_period() {
        let (store, _session, mut controller, mut events) = setup();
        let project = template_project();

        controller.schedule(project.clone());
        tokio::time::advance(Duration::from_millis(1000)).await;
        controller.schedule(project.clone());
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        assert!(store.calls().is_empty());
        assert!(controller.is_pending());

        let event = events.recv().await.unwrap();
        assert!(matches!(event, AutosaveEvent::IdentityPromoted { .. }));
        assert_eq!(store.calls(), vec![StoreCall::Create]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_promotion_happens_once() {
        let (store, _session, mut controller, mut events) = setup();
        let project = template_project();
        let provisional = project.id.clone();

        let saved = controller.flush(project.clone()).await.unwrap();
        assert!(saved.id.is_durable());
        assert_eq!(
            events.recv().await,
            Some(AutosaveEvent::IdentityPromoted {
                provisional: provisional.clone(),
                durable: saved.id.clone(),
            })
        );

        // Still carrying the provisional id: the remembered mapping turns it into an update
        let again = controller.flush(project).await.unwrap();
        assert_eq!(again.id, saved.id);
        assert_eq!(store.calls(), vec![StoreCall::Create, StoreCall::Update(saved.id.clone())]);
        assert_eq!(controller.promoted(&provisional), Some(saved.id));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_authorization_failure_clears_session() {
        let (store, session, mut controller, mut events) = setup();
        store.fail_next(PersistenceError::Forbidden("guest".to_string()));

        controller.schedule(template_project());
        let event = events.recv().await.unwrap();
        assert!(matches!(event, AutosaveEvent::AuthorizationRevoked { .. }));
        assert!(!session.is_established());
        assert!(controller.status().last_error.is_some());

        // Later edits do nothing until someone signs in again
        assert!(!controller.schedule(template_project()));
        tokio::time::advance(DELAY * 4).await;
        settle().await;
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_is_recorded_and_next_edit_retries() {
        let (store, session, mut controller, mut events) = setup();
        store.fail_next(PersistenceError::Transient("offline".to_string()));

        controller.schedule(template_project());
        let event = events.recv().await.unwrap();
        assert!(matches!(event, AutosaveEvent::Failed { .. }));
        assert!(session.is_established());
        assert_eq!(
            controller.status().last_error,
            Some(PersistenceError::Transient("offline".to_string()))
        );

        controller.schedule(template_project());
        assert!(matches!(events.recv().await, Some(AutosaveEvent::IdentityPromoted { .. })));
        assert!(matches!(events.recv().await, Some(AutosaveEvent::Saved { .. })));

        let status = controller.status();
        assert!(status.last_error.is_none());
        assert!(status.last_saved_at.is_some());
        assert!(!status.is_saving);
    }
}
