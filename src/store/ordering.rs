//! Manual ordering within sibling groups.
//!
//! Positions are zero-based. Appending places a record at `max + 1` (or 0 in
//! an empty group), so a group that only ever sees appends stays dense.
//! Deleting leaves a gap; readers sort by position and do not care. Only
//! [`OrderedGroup::set_sequence`] re-densifies a group.

use std::collections::HashSet;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::Result;

use super::{Database, OwnerScope, Positioned, RecordId, StoreError};

/// Position that appends after the given existing positions
pub fn next_position(existing: impl IntoIterator<Item = i64>) -> i64 {
    existing.into_iter().max().map_or(0, |max| max + 1)
}

/// View of the records sharing one group key
#[derive(Debug)]
pub struct OrderedGroup<'a, R: Positioned> {
    db: &'a Database,
    key: &'a R::Group,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Positioned> OrderedGroup<'a, R> {
    pub fn new(db: &'a Database, key: &'a R::Group) -> Self {
        Self {
            db,
            key,
            _record: PhantomData,
        }
    }

    /// Group members, ascending by position
    pub fn members(&self) -> Result<Vec<R>, StoreError> {
        self.db.find_in_group::<R>(self.key)
    }

    /// Position for a record appended to this group
    pub fn next_position(&self) -> Result<i64, StoreError> {
        Ok(next_position(self.db.max_position::<R>(self.key)?))
    }

    /// Check that `ids` lists every current member exactly once and nothing else
    pub fn covers_exactly(&self, ids: &[R::Id]) -> Result<bool, StoreError> {
        let members = self.members()?;
        if members.len() != ids.len() {
            return Ok(false);
        }

        let wanted: HashSet<&str> = ids.iter().map(|id| id.as_str()).collect();
        if wanted.len() != ids.len() {
            return Ok(false);
        }

        Ok(members
            .iter()
            .all(|member| wanted.contains(member.id().as_str())))
    }

    /// Assign `position = index` to each id in turn
    ///
    /// Each id must be owned by the scope's owner. The first id that is not
    /// aborts with `NotFound`; positions already written stay written. Ids are
    /// not checked against the group membership.
    pub fn set_sequence(&self, scope: &OwnerScope<'_>, ids: &[R::Id]) -> Result<()> {
        for (index, id) in ids.iter().enumerate() {
            let record = scope.require::<R>(id)?;
            let position = index as i64;
            if record.position() != position {
                self.db.patch::<R>(id, &[("position", &position)])?;
            }
        }

        debug!(kind = R::KIND, group = %self.key, count = ids.len(), "Applied sequence");
        Ok(())
    }
}
