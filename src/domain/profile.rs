//! Child profiles.

use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::ids::{OwnerId, ProfileId};
use crate::store::Record;

/// Editable profile attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    /// Display name shown on the profile picker
    pub name: String,

    /// Avatar path, e.g. `/little-monsters-avatar-set/avatar-5.png`
    pub avatar: Option<String>,

    /// Parental PIN
    pub pin: Option<String>,
}

impl ProfileFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
            pin: None,
        }
    }

    /// Set the avatar path
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Set the parental PIN
    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }
}

/// A child profile owned by one parent account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,

    /// Parent account that owns this profile
    pub owner: OwnerId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new profile with a fresh id
    pub fn new(owner: OwnerId, fields: ProfileFields) -> Self {
        Self {
            id: ProfileId::generate(),
            owner,
            name: fields.name,
            avatar: fields.avatar,
            pin: fields.pin,
            created_at: Utc::now(),
        }
    }

    /// Whether the profile is locked behind a PIN
    pub fn has_pin(&self) -> bool {
        self.pin.as_deref().is_some_and(|pin| !pin.is_empty())
    }
}

impl Record for Profile {
    type Id = ProfileId;

    const KIND: &'static str = "Profile";
    const TABLE: &'static str = "profiles";
    const COLUMNS: &'static [&'static str] = &["owner", "name", "avatar", "pin", "created_at"];

    fn id(&self) -> &ProfileId {
        &self.id
    }

    fn owner(&self) -> &OwnerId {
        &self.owner
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.owner as &dyn ToSql,
            &self.name,
            &self.avatar,
            &self.pin,
            &self.created_at,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            owner: row.get("owner")?,
            name: row.get("name")?,
            avatar: row.get("avatar")?,
            pin: row.get("pin")?,
            created_at: row.get("created_at")?,
        })
    }
}
