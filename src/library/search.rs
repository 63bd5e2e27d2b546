//! Title search over already-fetched videos.
//!
//! Plain case-insensitive substring matching; there is no index.

use super::Library;
use crate::domain::{CategoryId, ProfileId, Video};
use crate::error::Result;

/// Case-insensitive substring match of a trimmed query against a title
pub fn matches_title(title: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    title.to_lowercase().contains(&query)
}

impl Library {
    /// Search every video under a profile by title
    ///
    /// A blank query matches nothing.
    pub async fn search_videos(&self, profile_id: &ProfileId, query: &str) -> Result<Vec<Video>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let videos = self.list_videos_by_profile(profile_id).await?;
        Ok(retain_matching(videos, query))
    }

    /// A category's videos in display order, narrowed by title
    ///
    /// A blank query keeps every video.
    pub async fn filter_category_videos(
        &self,
        category_id: &CategoryId,
        query: &str,
    ) -> Result<Vec<Video>> {
        let videos = self.list_videos_by_category(category_id).await?;
        if query.trim().is_empty() {
            return Ok(videos);
        }

        Ok(retain_matching(videos, query))
    }
}

/// Keep the videos whose title contains `query`, in their current order
fn retain_matching(mut videos: Vec<Video>, query: &str) -> Vec<Video> {
    videos.retain(|video| matches_title(&video.title, query));
    videos
}
