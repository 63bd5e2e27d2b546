//! Category operations.
//!
//! Categories are ordered within their profile. New categories go to the end;
//! only [`Library::reorder_categories`] changes positions.

use tracing::{debug, info, instrument};

use super::Library;
use crate::domain::{Category, CategoryFields, CategoryId, Profile, ProfileId, Video};
use crate::error::Result;
use crate::store::{OrderedGroup, StoreError};

impl Library {
    /// Create a category at the end of a profile's list
    #[instrument(skip_all, fields(profile = %profile_id, title = %fields.title))]
    pub async fn create_category(
        &self,
        profile_id: &ProfileId,
        fields: CategoryFields,
    ) -> Result<CategoryId> {
        let scope = self.writer().await?;
        scope.require::<Profile>(profile_id)?;

        let position = OrderedGroup::<Category>::new(&self.db, profile_id).next_position()?;
        let category = Category::new(scope.owner().clone(), profile_id.clone(), fields, position);
        self.db.insert(&category)?;

        info!(category = %category.id, position, "Category created");
        Ok(category.id)
    }

    /// Replace a category's title and icon
    ///
    /// `None` clears the icon. Position and profile are left alone.
    #[instrument(skip_all, fields(category = %id))]
    pub async fn update_category(
        &self,
        id: &CategoryId,
        fields: CategoryFields,
    ) -> Result<CategoryId> {
        let scope = self.writer().await?;
        scope.require::<Category>(id)?;

        self.db.patch::<Category>(
            id,
            &[("title", &fields.title), ("icon", &fields.icon)],
        )?;

        debug!("Category updated");
        Ok(id.clone())
    }

    /// Remove a category and every video in it
    ///
    /// Sibling positions are not renumbered.
    #[instrument(skip_all, fields(category = %id))]
    pub async fn remove_category(&self, id: &CategoryId) -> Result<CategoryId> {
        let scope = self.writer().await?;
        scope.require::<Category>(id)?;

        let videos_removed = self.purge_category(id)?;

        info!(videos = videos_removed, "Category removed");
        Ok(id.clone())
    }

    /// Set the order of a profile's categories to the order of `ids`
    ///
    /// Without strict reordering the ids are not compared with the profile's
    /// actual categories; see [`LibrarySettings`](super::LibrarySettings).
    #[instrument(skip_all, fields(profile = %profile_id, count = ids.len()))]
    pub async fn reorder_categories(
        &self,
        profile_id: &ProfileId,
        ids: &[CategoryId],
    ) -> Result<bool> {
        let scope = self.writer().await?;
        scope.require::<Profile>(profile_id)?;

        self.reorder::<Category>(&scope, profile_id, ids)?;
        Ok(true)
    }

    /// A profile's categories in display order
    pub async fn list_categories_by_profile(&self, profile_id: &ProfileId) -> Result<Vec<Category>> {
        let Some(scope) = self.reader().await else {
            return Ok(Vec::new());
        };
        if !scope.owns::<Profile>(profile_id)? {
            return Ok(Vec::new());
        }

        Ok(OrderedGroup::<Category>::new(&self.db, profile_id).members()?)
    }

    /// A single category, or `None` if missing or not the caller's
    pub async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>> {
        let Some(scope) = self.reader().await else {
            return Ok(None);
        };

        Ok(scope.find::<Category>(id)?)
    }

    /// Delete a category's videos one by one, then the category itself
    ///
    /// Returns the number of videos removed. Callers check ownership first.
    pub(super) fn purge_category(&self, id: &CategoryId) -> Result<usize, StoreError> {
        let videos: Vec<Video> = self.db.find_by::<Video>("category_id", id)?;
        for video in &videos {
            self.db.delete::<Video>(&video.id)?;
        }

        self.db.delete::<Category>(id)?;
        debug!(category = %id, videos = videos.len(), "Category purged");
        Ok(videos.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{CategoryFields, ProfileFields};
    use crate::identity::StaticIdentity;
    use crate::store::Database;
    use crate::Library;

    #[tokio::test]
    async fn test_categories_append_in_call_order() {
        let library = Library::new(Database::open_in_memory().unwrap(), StaticIdentity::new("p"));
        let profile = library.create_profile(ProfileFields::new("Mia")).await.unwrap();

        for title in ["Music", "Science", "Animals"] {
            library
                .create_category(&profile, CategoryFields::new(title))
                .await
                .unwrap();
        }

        let listed = library.list_categories_by_profile(&profile).await.unwrap();
        let summary: Vec<(&str, i64)> = listed.iter().map(|c| (c.title.as_str(), c.order)).collect();
        assert_eq!(summary, vec![("Music", 0), ("Science", 1), ("Animals", 2)]);
    }

    #[tokio::test]
    async fn test_update_category_keeps_position() {
        let library = Library::new(Database::open_in_memory().unwrap(), StaticIdentity::new("p"));
        let profile = library.create_profile(ProfileFields::new("Mia")).await.unwrap();
        library.create_category(&profile, CategoryFields::new("First")).await.unwrap();
        let second = library
            .create_category(&profile, CategoryFields::new("Second").with_icon("Music"))
            .await
            .unwrap();

        library
            .update_category(&second, CategoryFields::new("Songs"))
            .await
            .unwrap();

        let category = library.get_category(&second).await.unwrap().unwrap();
        assert_eq!(category.title, "Songs");
        assert!(category.icon.is_none());
        assert_eq!(category.order, 1);
    }
}
