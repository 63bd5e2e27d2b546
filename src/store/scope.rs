//! Owner-scoped access to the record store.
//!
//! Every lookup goes through here so that a record owned by someone else is
//! indistinguishable from a record that does not exist.

use crate::domain::OwnerId;
use crate::error::{LibraryError, Result};

use super::{Database, Record, StoreError};

/// Record access restricted to one owner
#[derive(Debug, Clone)]
pub struct OwnerScope<'a> {
    db: &'a Database,
    owner: OwnerId,
}

impl<'a> OwnerScope<'a> {
    pub fn new(db: &'a Database, owner: OwnerId) -> Self {
        Self { db, owner }
    }

    /// The owner this scope is bound to
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Fetch a record if it exists and belongs to this owner
    pub fn find<R: Record>(&self, id: &R::Id) -> Result<Option<R>, StoreError> {
        Ok(self
            .db
            .get::<R>(id)?
            .filter(|record| record.owner() == &self.owner))
    }

    /// Fetch a record, failing with `NotFound` when missing or foreign
    pub fn require<R: Record>(&self, id: &R::Id) -> Result<R> {
        self.find::<R>(id)?
            .ok_or_else(|| LibraryError::not_found(R::KIND, id))
    }

    /// Check that a record exists and belongs to this owner
    pub fn owns<R: Record>(&self, id: &R::Id) -> Result<bool, StoreError> {
        Ok(self.find::<R>(id)?.is_some())
    }
}
