//! Ordering Integration Tests
//!
//! Tests for append order, reorder, partial reorder failure and strict mode.

use wuvo::{
    CategoryFields, CategoryId, Library, LibraryError, LibrarySettings, ProfileFields, ProfileId,
    StaticIdentity, VideoFields, VideoId,
};
use wuvo::store::Database;

fn library() -> Library {
    Library::new(Database::open_in_memory().unwrap(), StaticIdentity::new("parent_a"))
}

async fn profile_with_categories(library: &Library, titles: &[&str]) -> (ProfileId, Vec<CategoryId>) {
    let profile = library.create_profile(ProfileFields::new("Mia")).await.unwrap();

    let mut ids = Vec::new();
    for title in titles {
        ids.push(
            library
                .create_category(&profile, CategoryFields::new(*title))
                .await
                .unwrap(),
        );
    }
    (profile, ids)
}

async fn listed(library: &Library, profile: &ProfileId) -> Vec<(CategoryId, i64)> {
    library
        .list_categories_by_profile(profile)
        .await
        .unwrap()
        .into_iter()
        .map(|c| (c.id, c.order))
        .collect()
}

#[tokio::test]
async fn test_creates_append_in_call_order() {
    let library = library();
    let (profile, ids) = profile_with_categories(&library, &["C1", "C2", "C3"]).await;

    assert_eq!(
        listed(&library, &profile).await,
        vec![(ids[0].clone(), 0), (ids[1].clone(), 1), (ids[2].clone(), 2)]
    );
}

#[tokio::test]
async fn test_reorder_permutation() {
    let library = library();
    let (profile, ids) = profile_with_categories(&library, &["C1", "C2", "C3"]).await;

    let reordered = vec![ids[2].clone(), ids[0].clone(), ids[1].clone()];
    assert!(library.reorder_categories(&profile, &reordered).await.unwrap());

    assert_eq!(
        listed(&library, &profile).await,
        vec![(ids[2].clone(), 0), (ids[0].clone(), 1), (ids[1].clone(), 2)]
    );
}

#[tokio::test]
async fn test_reorder_videos_permutation() {
    let library = library();
    let (profile, categories) = profile_with_categories(&library, &["Music"]).await;
    let music = &categories[0];

    let mut videos: Vec<VideoId> = Vec::new();
    for (source, title) in [("aaaaaaaaaaa", "One"), ("bbbbbbbbbbb", "Two"), ("ccccccccccc", "Three")] {
        videos.push(
            library
                .add_video(&profile, music, VideoFields::new(source, title, "t.jpg"))
                .await
                .unwrap(),
        );
    }

    let reordered = vec![videos[1].clone(), videos[2].clone(), videos[0].clone()];
    library.reorder_videos(music, &reordered).await.unwrap();

    let titles: Vec<String> = library
        .list_videos_by_category(music)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.title)
        .collect();
    assert_eq!(titles, vec!["Two", "Three", "One"]);
}

#[tokio::test]
async fn test_reorder_abort_keeps_earlier_patches() {
    let library = library();
    let (profile, ids) = profile_with_categories(&library, &["C1", "C2", "C3"]).await;

    let sequence = vec![ids[2].clone(), CategoryId::from("missing"), ids[0].clone()];
    let err = library.reorder_categories(&profile, &sequence).await.unwrap_err();
    assert!(err.is_not_found());

    // C3 was patched to 0 before the abort; C1 and C2 were never touched
    let c3 = library.get_category(&ids[2]).await.unwrap().unwrap();
    let c1 = library.get_category(&ids[0]).await.unwrap().unwrap();
    let c2 = library.get_category(&ids[1]).await.unwrap().unwrap();
    assert_eq!(c3.order, 0);
    assert_eq!(c1.order, 0);
    assert_eq!(c2.order, 1);
}

#[tokio::test]
async fn test_video_reorder_abort_keeps_earlier_patches() {
    let library = library();
    let (profile, categories) = profile_with_categories(&library, &["Music"]).await;
    let music = &categories[0];

    let v1 = library
        .add_video(&profile, music, VideoFields::new("aaaaaaaaaaa", "One", "t.jpg"))
        .await
        .unwrap();
    let v2 = library
        .add_video(&profile, music, VideoFields::new("bbbbbbbbbbb", "Two", "t.jpg"))
        .await
        .unwrap();

    let sequence = vec![v2.clone(), VideoId::from("missing"), v1.clone()];
    let err = library.reorder_videos(music, &sequence).await.unwrap_err();
    assert!(matches!(err, LibraryError::NotFound { kind: "Video", .. }));

    // v2 was patched to 0 before the abort; v1 was never reached
    assert_eq!(library.get_video(&v2).await.unwrap().unwrap().order, 0);
    assert_eq!(library.get_video(&v1).await.unwrap().unwrap().order, 0);
}

#[tokio::test]
async fn test_partial_reorder_is_accepted_by_default() {
    let library = library();
    let (profile, ids) = profile_with_categories(&library, &["C1", "C2", "C3"]).await;

    library
        .reorder_categories(&profile, &[ids[2].clone()])
        .await
        .unwrap();

    let c3 = library.get_category(&ids[2]).await.unwrap().unwrap();
    let c2 = library.get_category(&ids[1]).await.unwrap().unwrap();
    assert_eq!(c3.order, 0);
    assert_eq!(c2.order, 1);
}

#[tokio::test]
async fn test_strict_reorder_rejects_mismatched_ids() {
    let library = library().with_settings(LibrarySettings {
        strict_reorder: true,
    });
    let (profile, ids) = profile_with_categories(&library, &["C1", "C2", "C3"]).await;

    let cases = vec![
        // Missing a member
        vec![ids[1].clone(), ids[0].clone()],
        // Duplicate
        vec![ids[1].clone(), ids[1].clone(), ids[0].clone()],
        // Unknown id
        vec![ids[1].clone(), ids[0].clone(), CategoryId::from("missing")],
    ];

    for sequence in cases {
        let err = library.reorder_categories(&profile, &sequence).await.unwrap_err();
        assert!(matches!(err, LibraryError::SequenceMismatch { kind: "Category" }));
    }

    // Nothing was patched
    assert_eq!(
        listed(&library, &profile).await,
        vec![(ids[0].clone(), 0), (ids[1].clone(), 1), (ids[2].clone(), 2)]
    );

    let full = vec![ids[1].clone(), ids[2].clone(), ids[0].clone()];
    library.reorder_categories(&profile, &full).await.unwrap();
    assert_eq!(listed(&library, &profile).await[0], (ids[1].clone(), 0));
}

#[tokio::test]
async fn test_delete_then_create_preserves_gap() {
    let library = library();
    let (profile, ids) = profile_with_categories(&library, &["C1", "C2", "C3"]).await;

    library.remove_category(&ids[1]).await.unwrap();
    let c4 = library
        .create_category(&profile, CategoryFields::new("C4"))
        .await
        .unwrap();

    let orders: Vec<i64> = listed(&library, &profile).await.into_iter().map(|(_, o)| o).collect();
    assert_eq!(orders, vec![0, 2, 3]);
    assert_eq!(library.get_category(&c4).await.unwrap().unwrap().order, 3);
}

#[tokio::test]
async fn test_reorder_requires_owned_parent() {
    let library = library();
    let (profile, ids) = profile_with_categories(&library, &["C1"]).await;

    let err = library
        .reorder_categories(&ProfileId::from("missing"), &ids)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let other = library.as_caller(StaticIdentity::new("parent_b"));
    let err = other.reorder_categories(&profile, &ids).await.unwrap_err();
    assert!(err.is_not_found());
}
