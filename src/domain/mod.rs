//! Domain types for the video library.
//!
//! - Profile: a child profile owned by a parent account
//! - Category: an ordered group of videos under a profile
//! - Video: a YouTube video placed in a category

pub mod category;
pub mod ids;
pub mod profile;
pub mod video;

// Re-export commonly used types
pub use category::{Category, CategoryFields};
pub use ids::{CategoryId, OwnerId, ProfileId, VideoId};
pub use profile::{Profile, ProfileFields};
pub use video::{Video, VideoFields, VideoUpdate};
