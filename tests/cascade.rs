//! Cascade Integration Tests
//!
//! Tests for removing categories and profiles along with their children.

use tempfile::TempDir;
use wuvo::store::Database;
use wuvo::{
    CategoryFields, Category, Library, ProfileFields, StaticIdentity, Video, VideoFields,
};

fn clip(source: &str, title: &str) -> VideoFields {
    VideoFields::new(source, title, "t.jpg")
}

#[tokio::test]
async fn test_remove_category_removes_its_videos() {
    let db = Database::open_in_memory().unwrap();
    let library = Library::new(db.clone(), StaticIdentity::new("parent_a"));

    let profile = library.create_profile(ProfileFields::new("Mia")).await.unwrap();
    let c1 = library
        .create_category(&profile, CategoryFields::new("Music"))
        .await
        .unwrap();
    let c2 = library
        .create_category(&profile, CategoryFields::new("Science"))
        .await
        .unwrap();
    let v1 = library.add_video(&profile, &c1, clip("aaaaaaaaaaa", "One")).await.unwrap();
    let v2 = library.add_video(&profile, &c1, clip("bbbbbbbbbbb", "Two")).await.unwrap();
    let kept = library.add_video(&profile, &c2, clip("ccccccccccc", "Stars")).await.unwrap();

    library.remove_category(&c1).await.unwrap();

    assert!(library.get_video(&v1).await.unwrap().is_none());
    assert!(library.get_video(&v2).await.unwrap().is_none());
    assert!(library.get_category(&c1).await.unwrap().is_none());
    // Direct group lookup, bypassing ownership
    assert!(db.find_in_group::<Video>(&c1).unwrap().is_empty());

    // Siblings are untouched
    assert!(library.get_video(&kept).await.unwrap().is_some());
    assert_eq!(library.get_category(&c2).await.unwrap().unwrap().order, 1);
}

#[tokio::test]
async fn test_remove_profile_removes_everything_below() {
    let db = Database::open_in_memory().unwrap();
    let library = Library::new(db.clone(), StaticIdentity::new("parent_a"));

    let mia = library.create_profile(ProfileFields::new("Mia")).await.unwrap();
    let leo = library.create_profile(ProfileFields::new("Leo")).await.unwrap();

    let music = library
        .create_category(&mia, CategoryFields::new("Music"))
        .await
        .unwrap();
    let art = library
        .create_category(&mia, CategoryFields::new("Art & Crafts"))
        .await
        .unwrap();
    library.add_video(&mia, &music, clip("aaaaaaaaaaa", "Song")).await.unwrap();
    library.add_video(&mia, &art, clip("bbbbbbbbbbb", "Paint")).await.unwrap();

    let leo_music = library
        .create_category(&leo, CategoryFields::new("Music"))
        .await
        .unwrap();
    let leo_song = library
        .add_video(&leo, &leo_music, clip("ccccccccccc", "Song"))
        .await
        .unwrap();

    library.remove_profile(&mia).await.unwrap();

    assert!(library.get_profile(&mia).await.unwrap().is_none());
    assert!(db.find_in_group::<Category>(&mia).unwrap().is_empty());
    assert!(db.find_by::<Video>("profile_id", &mia).unwrap().is_empty());
    assert!(db.find_in_group::<Video>(&music).unwrap().is_empty());
    assert!(db.find_in_group::<Video>(&art).unwrap().is_empty());

    // The other profile is untouched
    assert_eq!(library.list_profiles().await.unwrap().len(), 1);
    assert!(library.get_video(&leo_song).await.unwrap().is_some());
}

#[tokio::test]
async fn test_cascade_on_disk_database() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("library.db");

    let library = Library::new(Database::open(&path).unwrap(), StaticIdentity::new("parent_a"));
    let profile = library.create_profile(ProfileFields::new("Mia")).await.unwrap();
    let category = library
        .create_category(&profile, CategoryFields::new("Music"))
        .await
        .unwrap();
    let video = library
        .add_video(&profile, &category, clip("aaaaaaaaaaa", "Song"))
        .await
        .unwrap();

    library.remove_category(&category).await.unwrap();

    // Reopen and check the removal was persisted
    let reopened = Library::new(Database::open(&path).unwrap(), StaticIdentity::new("parent_a"));
    assert!(reopened.get_video(&video).await.unwrap().is_none());
    assert!(reopened.get_profile(&profile).await.unwrap().is_some());
}
