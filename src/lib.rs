//! wuvo - Curated YouTube libraries for kids
//!
//! Parents build one or more kid profiles, organize each profile's videos
//! into ordered categories, and hand the device over. Every record carries
//! the owner that created it and is invisible to everyone else.
//!
//! # Architecture
//!
//! - Records live in SQLite behind a small generic store
//! - Each operation resolves the caller first, then checks ownership
//! - Categories and videos keep a dense display order that only an
//!   explicit reorder changes
//!
//! # Modules
//!
//! - `store`: SQLite persistence, owner scoping, ordered groups
//! - `domain`: Records and their ids (Profile, Category, Video)
//! - `identity`: Caller identity providers
//! - `library`: Owner-scoped operations, cascades and search
//! - `catalog`: Bundled avatars, category icons and colors
//! - `player`: YouTube embed URLs and link parsing
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Create a profile and a category
//! wuvo --as parent_1 profile create Mia --avatar 3
//! wuvo --as parent_1 category create <profile-id> Music --icon Music
//!
//! # Add a video from a YouTube link
//! wuvo --as parent_1 video add <profile-id> <category-id> https://youtu.be/dQw4w9WgXcQ "Song"
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod identity;
pub mod library;
pub mod player;
pub mod store;

// Re-export main types at crate root for convenience
pub use domain::{
    Category, CategoryFields, CategoryId, OwnerId, Profile, ProfileFields, ProfileId, Video,
    VideoFields, VideoId, VideoUpdate,
};
pub use error::{LibraryError, Result};
pub use identity::{Anonymous, CredentialIdentity, Identity, IdentityProvider, StaticIdentity};
pub use library::{Library, LibrarySettings};
pub use store::Database;
