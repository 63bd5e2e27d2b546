//! Categories shown on a profile's home screen.

use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, OwnerId, ProfileId};
use crate::store::{Positioned, Record};

/// Editable category attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    pub title: String,

    /// Icon name, e.g. `GraduationCap`
    pub icon: Option<String>,
}

impl CategoryFields {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
        }
    }

    /// Set the icon name
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A category of videos under one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub owner: OwnerId,

    /// Profile this category belongs to (ordering group)
    pub profile_id: ProfileId,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Zero-based position among the profile's categories
    pub order: i64,

    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category at the given position
    pub fn new(owner: OwnerId, profile_id: ProfileId, fields: CategoryFields, order: i64) -> Self {
        Self {
            id: CategoryId::generate(),
            owner,
            profile_id,
            title: fields.title,
            icon: fields.icon,
            order,
            created_at: Utc::now(),
        }
    }
}

impl Record for Category {
    type Id = CategoryId;

    const KIND: &'static str = "Category";
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &[
        "owner",
        "profile_id",
        "title",
        "icon",
        "position",
        "created_at",
    ];

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn owner(&self) -> &OwnerId {
        &self.owner
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.owner as &dyn ToSql,
            &self.profile_id,
            &self.title,
            &self.icon,
            &self.order,
            &self.created_at,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            owner: row.get("owner")?,
            profile_id: row.get("profile_id")?,
            title: row.get("title")?,
            icon: row.get("icon")?,
            order: row.get("position")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl Positioned for Category {
    type Group = ProfileId;

    const GROUP_COLUMN: &'static str = "profile_id";

    fn position(&self) -> i64 {
        self.order
    }
}
