//! Explicit session context.
//!
//! The host constructs one [`SessionHandle`] and hands clones to whatever
//! needs the credential. Clearing it through any clone clears it everywhere.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Opaque bearer credential. Never logged.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

#[derive(Clone, Default)]
pub struct SessionHandle {
    credential: Arc<RwLock<Option<Credential>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn establish(&self, credential: Credential) {
        *self.credential.write().unwrap_or_else(PoisonError::into_inner) = Some(credential);
        tracing::info!("session established");
    }

    pub fn clear(&self) {
        let previous = self.credential.write().unwrap_or_else(PoisonError::into_inner).take();
        if previous.is_some() {
            tracing::info!("session cleared");
        }
    }

    pub fn is_established(&self) -> bool {
        self.credential.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.credential.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("established", &self.is_established())
            .finish()
    }
}
