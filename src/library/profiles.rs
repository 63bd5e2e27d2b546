//! Profile operations.

use tracing::{debug, info, instrument};

use super::Library;
use crate::domain::{Category, Profile, ProfileFields, ProfileId};
use crate::error::Result;

impl Library {
    /// Create a profile owned by the caller
    #[instrument(skip_all, fields(name = %fields.name))]
    pub async fn create_profile(&self, fields: ProfileFields) -> Result<ProfileId> {
        let scope = self.writer().await?;

        let profile = Profile::new(scope.owner().clone(), fields);
        self.db.insert(&profile)?;

        info!(profile = %profile.id, "Profile created");
        Ok(profile.id)
    }

    /// Replace a profile's name, avatar and PIN
    ///
    /// `None` clears the avatar or PIN.
    #[instrument(skip_all, fields(profile = %id))]
    pub async fn update_profile(&self, id: &ProfileId, fields: ProfileFields) -> Result<ProfileId> {
        let scope = self.writer().await?;
        scope.require::<Profile>(id)?;

        self.db.patch::<Profile>(
            id,
            &[
                ("name", &fields.name),
                ("avatar", &fields.avatar),
                ("pin", &fields.pin),
            ],
        )?;

        debug!("Profile updated");
        Ok(id.clone())
    }

    /// Remove a profile with all of its categories and their videos
    #[instrument(skip_all, fields(profile = %id))]
    pub async fn remove_profile(&self, id: &ProfileId) -> Result<ProfileId> {
        let scope = self.writer().await?;
        scope.require::<Profile>(id)?;

        let categories: Vec<Category> = self.db.find_by::<Category>("profile_id", id)?;
        let mut videos_removed = 0;
        for category in &categories {
            videos_removed += self.purge_category(&category.id)?;
        }

        self.db.delete::<Profile>(id)?;

        info!(
            categories = categories.len(),
            videos = videos_removed,
            "Profile removed"
        );
        Ok(id.clone())
    }

    /// All of the caller's profiles, oldest first
    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let Some(scope) = self.reader().await else {
            return Ok(Vec::new());
        };

        Ok(self.db.find_by::<Profile>("owner", scope.owner())?)
    }

    /// A single profile, or `None` if missing or not the caller's
    pub async fn get_profile(&self, id: &ProfileId) -> Result<Option<Profile>> {
        let Some(scope) = self.reader().await else {
            return Ok(None);
        };

        Ok(scope.find::<Profile>(id)?)
    }
}
