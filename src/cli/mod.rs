//! Command-line interface for wuvo.
//!
//! Provides commands for managing kids' profiles, their video categories
//! and the videos inside them, plus lookups for the bundled avatars and
//! category icons.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::catalog::{avatar, preset_colors, CategoryIcon};
use crate::config::{self, ResolvedConfig};
use crate::domain::{ProfileId, Video};
use crate::identity::{Anonymous, CredentialIdentity, StaticIdentity};
use crate::library::Library;
use crate::store::Database;

pub mod category;
pub mod profile;
pub mod video;

/// wuvo - Curated YouTube libraries for kids
#[derive(Parser, Debug)]
#[command(name = "wuvo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Act as this owner subject
    #[arg(long = "as", global = true, env = "WUVO_USER")]
    pub subject: Option<String>,

    /// Credential resolved through the configured accounts table
    #[arg(long, global = true, env = "WUVO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Library database (overrides configuration)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage profiles
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommands,
    },

    /// Manage a profile's categories
    Category {
        #[command(subcommand)]
        command: category::CategoryCommands,
    },

    /// Manage videos inside categories
    Video {
        #[command(subcommand)]
        command: video::VideoCommands,
    },

    /// Search a profile's videos by title
    Search {
        /// Profile ID
        profile_id: String,

        /// Text to look for in video titles
        query: String,
    },

    /// List the bundled avatars
    Avatars,

    /// List the available category icons and preset colors
    Icons,

    /// Show resolved configuration (debug)
    Config,
}

/// Everything a command needs: the caller's library view and output mode
pub struct Session {
    pub library: Library,
    pub json: bool,
}

impl Session {
    /// Print a value as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{}", json);
        Ok(())
    }

    /// Report the id of a record a command just wrote
    pub fn print_written(&self, action: &str, kind: &str, id: &str) -> Result<()> {
        if self.json {
            return self.print_json(&serde_json::json!({ "id": id }));
        }

        eprintln!("{} {}", kind, action);
        println!("{}", id);
        Ok(())
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = config::config()?;

        match self.command {
            Commands::Avatars => return show_avatars(self.json),
            Commands::Icons => return show_icons(self.json),
            Commands::Config => return show_config(config),
            _ => {}
        }

        let library = self.open_library(config)?;
        let session = Session {
            library,
            json: self.json,
        };

        match self.command {
            Commands::Profile { command } => profile::execute(&session, command).await,
            Commands::Category { command } => category::execute(&session, command).await,
            Commands::Video { command } => video::execute(&session, command).await,
            Commands::Search { profile_id, query } => {
                search_videos(&session, &profile_id, &query).await
            }
            Commands::Avatars | Commands::Icons | Commands::Config => Ok(()),
        }
    }

    /// Open the database and bind it to the caller named by the flags
    ///
    /// `--token` wins over `--as`; with neither the caller is anonymous.
    fn open_library(&self, config: &ResolvedConfig) -> Result<Library> {
        let path = self.database.as_ref().unwrap_or(&config.database);
        let db = Database::open(path)
            .with_context(|| format!("Failed to open library database: {}", path.display()))?;
        debug!(database = %path.display(), "Library database opened");

        let library = match (&self.token, &self.subject) {
            (Some(token), _) => Library::new(
                db,
                CredentialIdentity::new(Some(token.clone()), config.accounts.clone()),
            ),
            (None, Some(subject)) => Library::new(db, StaticIdentity::new(subject.clone())),
            (None, None) => Library::new(db, Anonymous),
        };

        Ok(library.with_settings(config.library))
    }
}

/// Shorten a title for table output
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Print videos as a table (or JSON)
pub(crate) fn print_videos(session: &Session, videos: &[Video]) -> Result<()> {
    if session.json {
        return session.print_json(videos);
    }

    println!("{:<38} {:<6} {:<13} {:<40}", "ID", "ORDER", "YOUTUBE", "TITLE");
    println!("{}", "-".repeat(100));
    for video in videos {
        println!(
            "{:<38} {:<6} {:<13} {:<40}",
            video.id.as_str(),
            video.order,
            video.source_video_id,
            truncate(&video.title, 40)
        );
    }

    Ok(())
}

/// Search every video under a profile
async fn search_videos(session: &Session, profile_id: &str, query: &str) -> Result<()> {
    let profile_id = ProfileId::from(profile_id);
    let results = session.library.search_videos(&profile_id, query).await?;

    if !session.json && results.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }
    if !session.json {
        println!("Found {} result(s) for \"{}\":\n", results.len(), query);
    }

    print_videos(session, &results)
}

/// List the bundled avatars
fn show_avatars(json: bool) -> Result<()> {
    let avatars = avatar::all();

    if json {
        println!("{}", serde_json::to_string_pretty(&avatars)?);
        return Ok(());
    }

    for path in avatars {
        println!("{}", path);
    }
    Ok(())
}

/// List category icons and preset colors
fn show_icons(json: bool) -> Result<()> {
    if json {
        let colors: Vec<_> = preset_colors()
            .iter()
            .map(|(title, color)| serde_json::json!({ "title": title, "color": color }))
            .collect();
        let output = serde_json::json!({ "icons": CategoryIcon::ALL, "colors": colors });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Icons:");
    for icon in CategoryIcon::ALL {
        println!("  {}", icon);
    }

    println!("\nPreset colors:");
    for (title, color) in preset_colors() {
        println!("  {:<16} {}", title, color);
    }
    Ok(())
}

/// Show resolved configuration
fn show_config(config: &ResolvedConfig) -> Result<()> {
    println!("wuvo Configuration");
    println!("{}", "=".repeat(40));

    if let Some(ref path) = config.config_file {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: (none - using defaults)");
    }

    println!("Home:        {}", config.home.display());
    println!("Database:    {}", config.database.display());
    println!("Strict reorder: {}", config.library.strict_reorder);
    println!("Accounts:    {}", config.accounts.len());

    Ok(())
}
