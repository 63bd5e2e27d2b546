//! Video operations.

use tracing::{debug, info, instrument};

use super::Library;
use crate::domain::{
    Category, CategoryId, Profile, ProfileId, Video, VideoFields, VideoId, VideoUpdate,
};
use crate::error::{LibraryError, Result};
use crate::store::{OrderedGroup, Record};

impl Library {
    /// Add a video at the end of a category
    ///
    /// The category must belong to `profile_id`; otherwise it is reported as
    /// not found.
    #[instrument(skip_all, fields(profile = %profile_id, category = %category_id))]
    pub async fn add_video(
        &self,
        profile_id: &ProfileId,
        category_id: &CategoryId,
        fields: VideoFields,
    ) -> Result<VideoId> {
        let scope = self.writer().await?;
        scope.require::<Profile>(profile_id)?;

        let category = scope.require::<Category>(category_id)?;
        if &category.profile_id != profile_id {
            return Err(LibraryError::not_found(Category::KIND, category_id));
        }

        let position = OrderedGroup::<Video>::new(&self.db, category_id).next_position()?;
        let video = Video::new(
            scope.owner().clone(),
            profile_id.clone(),
            category_id.clone(),
            fields,
            position,
        );
        self.db.insert(&video)?;

        info!(video = %video.id, source = %video.source_video_id, position, "Video added");
        Ok(video.id)
    }

    /// Update a video's title and thumbnail, optionally moving it
    ///
    /// When `update.category` names a different category, the video follows
    /// that category's profile and is appended to the end of its list.
    #[instrument(skip_all, fields(video = %id))]
    pub async fn update_video(&self, id: &VideoId, update: VideoUpdate) -> Result<VideoId> {
        let scope = self.writer().await?;
        let video = scope.require::<Video>(id)?;

        let target = match &update.category {
            Some(category_id) => Some(scope.require::<Category>(category_id)?),
            None => None,
        };

        match target {
            Some(category) if category.id != video.category_id => {
                let position = OrderedGroup::<Video>::new(&self.db, &category.id).next_position()?;
                self.db.patch::<Video>(
                    id,
                    &[
                        ("title", &update.title),
                        ("thumbnail", &update.thumbnail),
                        ("category_id", &category.id),
                        ("profile_id", &category.profile_id),
                        ("position", &position),
                    ],
                )?;
                info!(from = %video.category_id, to = %category.id, position, "Video moved");
            }
            _ => {
                self.db.patch::<Video>(
                    id,
                    &[("title", &update.title), ("thumbnail", &update.thumbnail)],
                )?;
                debug!("Video updated");
            }
        }

        Ok(id.clone())
    }

    /// Remove a single video
    ///
    /// Sibling positions are not renumbered.
    #[instrument(skip_all, fields(video = %id))]
    pub async fn remove_video(&self, id: &VideoId) -> Result<VideoId> {
        let scope = self.writer().await?;
        scope.require::<Video>(id)?;

        self.db.delete::<Video>(id)?;

        info!("Video removed");
        Ok(id.clone())
    }

    /// Set the order of a category's videos to the order of `ids`
    #[instrument(skip_all, fields(category = %category_id, count = ids.len()))]
    pub async fn reorder_videos(&self, category_id: &CategoryId, ids: &[VideoId]) -> Result<bool> {
        let scope = self.writer().await?;
        scope.require::<Category>(category_id)?;

        self.reorder::<Video>(&scope, category_id, ids)?;
        Ok(true)
    }

    /// A category's videos in display order
    pub async fn list_videos_by_category(&self, category_id: &CategoryId) -> Result<Vec<Video>> {
        let Some(scope) = self.reader().await else {
            return Ok(Vec::new());
        };
        if !scope.owns::<Category>(category_id)? {
            return Ok(Vec::new());
        }

        Ok(OrderedGroup::<Video>::new(&self.db, category_id).members()?)
    }

    /// Every video under a profile, across categories, in creation order
    pub async fn list_videos_by_profile(&self, profile_id: &ProfileId) -> Result<Vec<Video>> {
        let Some(scope) = self.reader().await else {
            return Ok(Vec::new());
        };
        if !scope.owns::<Profile>(profile_id)? {
            return Ok(Vec::new());
        }

        Ok(self.db.find_by::<Video>("profile_id", profile_id)?)
    }

    /// A single video, or `None` if missing or not the caller's
    pub async fn get_video(&self, id: &VideoId) -> Result<Option<Video>> {
        let Some(scope) = self.reader().await else {
            return Ok(None);
        };

        Ok(scope.find::<Video>(id)?)
    }
}
