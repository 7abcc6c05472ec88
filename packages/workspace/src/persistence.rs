//! # Persistence
//!
//! The remote store is an external collaborator; the editor only sees
//! [`ProjectStore`]. [`MemoryStore`] is a complete in-process implementation
//! with the same authorization rules, used by tests and the CLI.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use blockcraft_schema::{Project, ProjectId};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::Credential;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// No valid credential was presented
    #[error("not signed in")]
    Unauthorized,

    /// The credential is valid but may not perform this action
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("project not found: {0}")]
    NotFound(ProjectId),

    #[error("invalid project: {0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    Transient(String),
}

impl PersistenceError {
    /// Failures that end the session and must not be retried
    pub fn is_authorization(&self) -> bool {
        matches!(self, PersistenceError::Unauthorized | PersistenceError::Forbidden(_))
    }
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persist a new project; the returned copy carries its durable id
    async fn create(&self, credential: &Credential, project: &Project) -> Result<Project, PersistenceError>;

    async fn update(&self, credential: &Credential, id: &ProjectId, project: &Project) -> Result<Project, PersistenceError>;

    async fn get(&self, credential: &Credential, id: &ProjectId) -> Result<Project, PersistenceError>;

    /// Projects owned by the credential's account
    async fn list(&self, credential: &Credential) -> Result<Vec<Project>, PersistenceError>;

    async fn delete(&self, credential: &Credential, id: &ProjectId) -> Result<(), PersistenceError>;
}

/// Account kinds known to [`MemoryStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    /// Restricted account: may read but never write
    Guest,
}

/// One recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Create,
    Update(ProjectId),
    Get(ProjectId),
    List,
    Delete(ProjectId),
}

#[derive(Debug, Clone)]
struct Record {
    owner: String,
    project: Project,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreState {
    accounts: HashMap<String, Role>,
    records: BTreeMap<String, Record>,
    next_id: u64,
    failures: VecDeque<PersistenceError>,
    calls: Vec<StoreCall>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account; its token becomes a valid credential
    pub fn add_account(&self, credential: &Credential, role: Role) {
        self.lock().accounts.insert(credential.token().to_string(), role);
    }

    /// Make the next call fail with `error`, whatever it is
    pub fn fail_next(&self, error: PersistenceError) {
        self.lock().failures.push_back(error);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Stored copy, bypassing authorization
    pub fn snapshot(&self, id: &ProjectId) -> Option<Project> {
        self.lock().records.get(id.as_str()).map(|r| r.project.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log the call, apply injected failures, and resolve the caller's role
    fn begin(
        state: &mut StoreState,
        call: StoreCall,
        credential: &Credential,
    ) -> Result<Role, PersistenceError> {
        tracing::debug!("store {:?}", call);
        state.calls.push(call);
        if let Some(error) = state.failures.pop_front() {
            return Err(error);
        }
        state
            .accounts
            .get(credential.token())
            .copied()
            .ok_or(PersistenceError::Unauthorized)
    }

    fn owned<'a>(
        state: &'a mut StoreState,
        credential: &Credential,
        id: &ProjectId,
    ) -> Result<&'a mut Record, PersistenceError> {
        let record = state
            .records
            .get_mut(id.as_str())
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))?;
        if record.owner != credential.token() {
            return Err(PersistenceError::Forbidden(format!("project {} belongs to another account", id)));
        }
        Ok(record)
    }

    fn issue_id(state: &mut StoreState) -> Result<ProjectId, PersistenceError> {
        state.next_id += 1;
        let raw = format!("{:08x}{:016x}", timestamp_prefix(Utc::now().timestamp()), state.next_id);
        ProjectId::parse(raw).map_err(|e| PersistenceError::Transient(e.to_string()))
    }
}

/// Leading 8 hex digits of an issued id; saturates past 2106
fn timestamp_prefix(secs: i64) -> u32 {
    u32::try_from(secs.max(0)).unwrap_or(u32::MAX)
}

fn require_writer(role: Role) -> Result<(), PersistenceError> {
    match role {
        Role::Owner => Ok(()),
        Role::Guest => Err(PersistenceError::Forbidden("guest accounts cannot save projects".to_string())),
    }
}

fn validate(project: &Project) -> Result<(), PersistenceError> {
    if project.name.trim().is_empty() {
        return Err(PersistenceError::Validation("project name is required".to_string()));
    }
    if project.pages.is_empty() {
        return Err(PersistenceError::Validation("project has no pages".to_string()));
    }
    Ok(())
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create(&self, credential: &Credential, project: &Project) -> Result<Project, PersistenceError> {
        let mut state = self.lock();
        let role = Self::begin(&mut state, StoreCall::Create, credential)?;
        require_writer(role)?;
        validate(project)?;

        let id = Self::issue_id(&mut state)?;
        let mut saved = project.clone();
        saved.id = id.clone();
        state.records.insert(
            id.as_str().to_string(),
            Record {
                owner: credential.token().to_string(),
                project: saved.clone(),
                updated_at: Utc::now(),
            },
        );
        tracing::info!("created project {}", id);
        Ok(saved)
    }

    async fn update(&self, credential: &Credential, id: &ProjectId, project: &Project) -> Result<Project, PersistenceError> {
        let mut state = self.lock();
        let role = Self::begin(&mut state, StoreCall::Update(id.clone()), credential)?;
        require_writer(role)?;
        validate(project)?;

        let record = Self::owned(&mut state, credential, id)?;
        let mut saved = project.clone();
        saved.id = id.clone();
        record.project = saved.clone();
        record.updated_at = Utc::now();
        Ok(saved)
    }

    async fn get(&self, credential: &Credential, id: &ProjectId) -> Result<Project, PersistenceError> {
        let mut state = self.lock();
        Self::begin(&mut state, StoreCall::Get(id.clone()), credential)?;
        Ok(Self::owned(&mut state, credential, id)?.project.clone())
    }

    async fn list(&self, credential: &Credential) -> Result<Vec<Project>, PersistenceError> {
        let mut state = self.lock();
        Self::begin(&mut state, StoreCall::List, credential)?;

        let mut owned: Vec<&Record> = state
            .records
            .values()
            .filter(|r| r.owner == credential.token())
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(owned.into_iter().map(|r| r.project.clone()).collect())
    }

    async fn delete(&self, credential: &Credential, id: &ProjectId) -> Result<(), PersistenceError> {
        let mut state = self.lock();
        let role = Self::begin(&mut state, StoreCall::Delete(id.clone()), credential)?;
        require_writer(role)?;
        Self::owned(&mut state, credential, id)?;
        state.records.remove(id.as_str());
        tracing::info!("deleted project {}", id);
        Ok(())
    }
}
