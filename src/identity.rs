//! Caller identity resolution.
//!
//! Authentication itself happens elsewhere (an external identity provider
//! issues the credential). This module only turns whatever the caller
//! presented into the owner id stamped on, and checked against, records.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::OwnerId;
use crate::error::LibraryError;

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable subject identifier; becomes the record owner
    pub subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

/// Source of the current caller's identity
#[async_trait]
pub trait IdentityProvider: Send + Sync + fmt::Debug {
    /// The caller's identity, or `None` for anonymous callers
    async fn user_identity(&self) -> Result<Option<Identity>>;
}

/// Resolve the owner for a read path
///
/// Never fails: provider errors are logged and treated as anonymous.
pub async fn resolve_owner(provider: &dyn IdentityProvider) -> Option<OwnerId> {
    match provider.user_identity().await {
        Ok(identity) => identity.map(|i| OwnerId::from(i.subject)),
        Err(e) => {
            warn!("Identity lookup failed, treating caller as anonymous: {:#}", e);
            None
        }
    }
}

/// Resolve the owner for a write path, failing with `Unauthenticated`
pub async fn resolve_owner_or_fail(
    provider: &dyn IdentityProvider,
) -> Result<OwnerId, LibraryError> {
    resolve_owner(provider)
        .await
        .ok_or(LibraryError::Unauthenticated)
}

/// Provider for callers without credentials
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

#[async_trait]
impl IdentityProvider for Anonymous {
    async fn user_identity(&self) -> Result<Option<Identity>> {
        Ok(None)
    }
}

/// Provider that always reports the same identity
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    identity: Identity,
}

impl StaticIdentity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(subject),
        }
    }
}

impl From<Identity> for StaticIdentity {
    fn from(identity: Identity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn user_identity(&self) -> Result<Option<Identity>> {
        Ok(Some(self.identity.clone()))
    }
}

/// Provider that resolves an opaque bearer credential through a lookup table
///
/// Unknown credentials resolve to anonymous rather than an error, so reads
/// degrade the same way as for callers with no credential at all.
#[derive(Clone, Default)]
pub struct CredentialIdentity {
    credential: Option<String>,
    accounts: HashMap<String, String>,
}

impl CredentialIdentity {
    /// Create a provider for `credential` given a credential -> subject table
    pub fn new(credential: Option<String>, accounts: HashMap<String, String>) -> Self {
        Self {
            credential,
            accounts,
        }
    }
}

// Manual impl so credentials never end up in logs
impl fmt::Debug for CredentialIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialIdentity")
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

#[async_trait]
impl IdentityProvider for CredentialIdentity {
    async fn user_identity(&self) -> Result<Option<Identity>> {
        let Some(credential) = self.credential.as_deref() else {
            return Ok(None);
        };

        Ok(self
            .accounts
            .get(credential)
            .map(|subject| Identity::new(subject.clone())))
    }
}
