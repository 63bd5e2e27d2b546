//! Owner-scoped operations over profiles, categories and videos.
//!
//! A [`Library`] pairs the shared [`Database`] with the identity of the
//! current caller. Writes require an owner and fail with
//! [`LibraryError::Unauthenticated`] otherwise; reads quietly return empty
//! results or `None` instead.
//!
//! # Record hierarchy
//!
//! ```text
//! Profile ──< Category ──< Video
//!   owner       profile_id    category_id (+ profile_id copy)
//!               order         order
//! ```
//!
//! Removing a parent removes its children record by record. Those cascades
//! and reorders are not transactional: an error midway leaves every record
//! that was already written as it is.

pub mod categories;
pub mod profiles;
pub mod search;
pub mod videos;

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{LibraryError, Result};
use crate::identity::{resolve_owner, resolve_owner_or_fail, IdentityProvider};
use crate::store::{Database, OrderedGroup, OwnerScope, Positioned};

pub use search::matches_title;

/// Behavior switches for library operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LibrarySettings {
    /// Reject reorders whose id list is not exactly the group's members
    #[serde(default)]
    pub strict_reorder: bool,
}

/// The video library as seen by one caller
#[derive(Debug, Clone)]
pub struct Library {
    db: Database,
    identity: Arc<dyn IdentityProvider>,
    settings: LibrarySettings,
}

impl Library {
    /// Create a library handle for the given caller
    pub fn new(db: Database, identity: impl IdentityProvider + 'static) -> Self {
        Self {
            db,
            identity: Arc::new(identity),
            settings: LibrarySettings::default(),
        }
    }

    /// Replace the behavior settings
    pub fn with_settings(mut self, settings: LibrarySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Same database and settings, different caller
    pub fn as_caller(&self, identity: impl IdentityProvider + 'static) -> Self {
        Self {
            db: self.db.clone(),
            identity: Arc::new(identity),
            settings: self.settings,
        }
    }

    /// Scope for a read path (`None` when anonymous)
    async fn reader(&self) -> Option<OwnerScope<'_>> {
        resolve_owner(self.identity.as_ref())
            .await
            .map(|owner| OwnerScope::new(&self.db, owner))
    }

    /// Scope for a write path
    async fn writer(&self) -> Result<OwnerScope<'_>> {
        let owner = resolve_owner_or_fail(self.identity.as_ref()).await?;
        Ok(OwnerScope::new(&self.db, owner))
    }

    /// Shared reorder logic for categories and videos
    fn reorder<R: Positioned>(
        &self,
        scope: &OwnerScope<'_>,
        group: &R::Group,
        ids: &[R::Id],
    ) -> Result<()> {
        let group = OrderedGroup::<R>::new(&self.db, group);

        if self.settings.strict_reorder && !group.covers_exactly(ids)? {
            return Err(LibraryError::SequenceMismatch { kind: R::KIND });
        }

        group.set_sequence(scope, ids)
    }
}
