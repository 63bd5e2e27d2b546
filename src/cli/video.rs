//! Video subcommands.

use anyhow::Result;
use clap::Subcommand;

use super::Session;
use crate::domain::{CategoryId, ProfileId, VideoFields, VideoId, VideoUpdate};
use crate::player;

/// Video-related subcommands
#[derive(Subcommand, Debug)]
pub enum VideoCommands {
    /// Add a YouTube video at the end of a category
    Add {
        /// Profile ID
        profile_id: String,

        /// Category ID
        category_id: String,

        /// YouTube URL or 11-character video id
        source: String,

        /// Video title
        title: String,

        /// Thumbnail URL (defaults to YouTube's hqdefault image)
        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// Change a video's title and thumbnail, or move it to another category
    Update {
        /// Video ID
        video_id: String,

        /// Video title
        title: String,

        /// Thumbnail URL (keeps the current one when omitted)
        #[arg(long)]
        thumbnail: Option<String>,

        /// Move the video to the end of this category
        #[arg(long = "move-to")]
        move_to: Option<String>,
    },

    /// Remove a video
    Remove {
        /// Video ID
        video_id: String,
    },

    /// Put a category's videos in the given order
    Reorder {
        /// Category ID
        category_id: String,

        /// Video IDs, first to last
        #[arg(required = true)]
        video_ids: Vec<String>,
    },

    /// List videos in a category, or across a whole profile
    List {
        /// Category ID
        #[arg(short, long, conflicts_with = "profile")]
        category: Option<String>,

        /// Profile ID
        #[arg(short, long, required_unless_present = "category")]
        profile: Option<String>,
    },

    /// Show a video with its player URL
    Show {
        /// Video ID
        video_id: String,
    },
}

/// Execute video subcommands
pub async fn execute(session: &Session, command: VideoCommands) -> Result<()> {
    match command {
        VideoCommands::Add {
            profile_id,
            category_id,
            source,
            title,
            thumbnail,
        } => {
            let source_id = player::parse_video_id(&source)
                .ok_or_else(|| anyhow::anyhow!("Not a YouTube video URL or id: {}", source))?;
            let thumbnail = thumbnail.unwrap_or_else(|| player::thumbnail_url(&source_id));

            let id = session
                .library
                .add_video(
                    &ProfileId::from(profile_id),
                    &CategoryId::from(category_id),
                    VideoFields::new(source_id, title, thumbnail),
                )
                .await?;
            session.print_written("added", "Video", id.as_str())
        }
        VideoCommands::Update {
            video_id,
            title,
            thumbnail,
            move_to,
        } => update_video(session, &video_id, title, thumbnail, move_to).await,
        VideoCommands::Remove { video_id } => {
            let id = session
                .library
                .remove_video(&VideoId::from(video_id))
                .await?;
            session.print_written("removed", "Video", id.as_str())
        }
        VideoCommands::Reorder {
            category_id,
            video_ids,
        } => {
            let ids: Vec<VideoId> = video_ids.into_iter().map(VideoId::from).collect();
            let done = session
                .library
                .reorder_videos(&CategoryId::from(category_id), &ids)
                .await?;

            if session.json {
                return session.print_json(&serde_json::json!({ "reordered": done }));
            }
            eprintln!("Reordered {} videos", ids.len());
            Ok(())
        }
        VideoCommands::List { category, profile } => {
            let videos = match (category, profile) {
                (Some(category), _) => {
                    session
                        .library
                        .list_videos_by_category(&CategoryId::from(category))
                        .await?
                }
                (None, Some(profile)) => {
                    session
                        .library
                        .list_videos_by_profile(&ProfileId::from(profile))
                        .await?
                }
                (None, None) => anyhow::bail!("Pass --category or --profile"),
            };
            super::print_videos(session, &videos)
        }
        VideoCommands::Show { video_id } => show_video(session, &video_id).await,
    }
}

async fn update_video(
    session: &Session,
    video_id: &str,
    title: String,
    thumbnail: Option<String>,
    move_to: Option<String>,
) -> Result<()> {
    let id = VideoId::from(video_id);
    let current = session
        .library
        .get_video(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Video not found: {}", video_id))?;

    let thumbnail = thumbnail.unwrap_or(current.thumbnail);
    let mut update = VideoUpdate::new(title, thumbnail);
    if let Some(category) = move_to {
        update = update.with_category(CategoryId::from(category));
    }

    let id = session.library.update_video(&id, update).await?;
    session.print_written("updated", "Video", id.as_str())
}

async fn show_video(session: &Session, video_id: &str) -> Result<()> {
    let video = session
        .library
        .get_video(&VideoId::from(video_id))
        .await?
        .ok_or_else(|| anyhow::anyhow!("Video not found: {}", video_id))?;

    if session.json {
        return session.print_json(&serde_json::json!({
            "video": video,
            "embed_url": video.embed_url(),
        }));
    }

    println!("  ID: {}", video.id);
    println!("  Title: {}", video.title);
    println!("  YouTube: {}", video.source_video_id);
    println!("  Category: {}", video.category_id);
    println!("  Profile: {}", video.profile_id);
    println!("  Order: {}", video.order);
    println!("  Thumbnail: {}", video.thumbnail);
    println!("  Player: {}", video.embed_url());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryFields, ProfileFields};
    use crate::identity::StaticIdentity;
    use crate::library::Library;
    use crate::store::Database;

    #[tokio::test]
    async fn test_update_without_thumbnail_keeps_current_one() {
        let library = Library::new(Database::open_in_memory().unwrap(), StaticIdentity::new("p"));
        let profile = library.create_profile(ProfileFields::new("Mia")).await.unwrap();
        let music = library
            .create_category(&profile, CategoryFields::new("Music"))
            .await
            .unwrap();
        let id = library
            .add_video(
                &profile,
                &music,
                VideoFields::new("dQw4w9WgXcQ", "Song", "https://example.com/custom.jpg"),
            )
            .await
            .unwrap();

        let session = Session {
            library,
            json: true,
        };
        execute(
            &session,
            VideoCommands::Update {
                video_id: id.to_string(),
                title: "Song (live)".to_string(),
                thumbnail: None,
                move_to: None,
            },
        )
        .await
        .unwrap();

        let video = session.library.get_video(&id).await.unwrap().unwrap();
        assert_eq!(video.title, "Song (live)");
        assert_eq!(video.thumbnail, "https://example.com/custom.jpg");
    }
}
