//! Video entries curated into categories.

use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, OwnerId, ProfileId, VideoId};
use crate::store::{Positioned, Record};

/// Attributes supplied when adding a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFields {
    /// YouTube video id (11 characters)
    pub source_video_id: String,

    pub title: String,

    /// Thumbnail image URL
    pub thumbnail: String,
}

impl VideoFields {
    pub fn new(
        source_video_id: impl Into<String>,
        title: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            source_video_id: source_video_id.into(),
            title: title.into(),
            thumbnail: thumbnail.into(),
        }
    }
}

/// Changes applied by an update; `category` moves the video when set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUpdate {
    pub title: String,

    pub thumbnail: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
}

impl VideoUpdate {
    pub fn new(title: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            thumbnail: thumbnail.into(),
            category: None,
        }
    }

    /// Move the video into another category
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }
}

/// A YouTube video placed in a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,

    pub owner: OwnerId,

    /// Copy of the owning category's profile, for profile-wide listing
    pub profile_id: ProfileId,

    /// Category this video belongs to (ordering group)
    pub category_id: CategoryId,

    pub source_video_id: String,

    pub title: String,

    pub thumbnail: String,

    /// Zero-based position among the category's videos
    pub order: i64,

    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Create a new video at the given position
    pub fn new(
        owner: OwnerId,
        profile_id: ProfileId,
        category_id: CategoryId,
        fields: VideoFields,
        order: i64,
    ) -> Self {
        Self {
            id: VideoId::generate(),
            owner,
            profile_id,
            category_id,
            source_video_id: fields.source_video_id,
            title: fields.title,
            thumbnail: fields.thumbnail,
            order,
            created_at: Utc::now(),
        }
    }

    /// Embeddable player URL for this video
    pub fn embed_url(&self) -> String {
        crate::player::embed_url(&self.source_video_id)
    }
}

impl Record for Video {
    type Id = VideoId;

    const KIND: &'static str = "Video";
    const TABLE: &'static str = "videos";
    const COLUMNS: &'static [&'static str] = &[
        "owner",
        "profile_id",
        "category_id",
        "source_video_id",
        "title",
        "thumbnail",
        "position",
        "created_at",
    ];

    fn id(&self) -> &VideoId {
        &self.id
    }

    fn owner(&self) -> &OwnerId {
        &self.owner
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.owner as &dyn ToSql,
            &self.profile_id,
            &self.category_id,
            &self.source_video_id,
            &self.title,
            &self.thumbnail,
            &self.order,
            &self.created_at,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            owner: row.get("owner")?,
            profile_id: row.get("profile_id")?,
            category_id: row.get("category_id")?,
            source_video_id: row.get("source_video_id")?,
            title: row.get("title")?,
            thumbnail: row.get("thumbnail")?,
            order: row.get("position")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl Positioned for Video {
    type Group = CategoryId;

    const GROUP_COLUMN: &'static str = "category_id";

    fn position(&self) -> i64 {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_embed_url_uses_source_id() {
        let video = Video::new(
            OwnerId::from("user_1"),
            ProfileId::from("p"),
            CategoryId::from("c"),
            VideoFields::new("dQw4w9WgXcQ", "Song", "https://img/thumb.jpg"),
            0,
        );

        assert!(video
            .embed_url()
            .starts_with("https://www.youtube.com/embed/dQw4w9WgXcQ?"));
    }
}
