//! Category icons and preset colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Color used for categories without a preset
pub const DEFAULT_COLOR: &str = "#6b7280";

/// Preset colors keyed by category title
const PRESET_COLORS: &[(&str, &str)] = &[
    ("Learning", "#3b82f6"),
    ("Entertainment", "#8b5cf6"),
    ("Music", "#ec4899"),
    ("Science", "#22c55e"),
    ("Art & Crafts", "#f59e0b"),
    ("Sports", "#ef4444"),
    ("Animals", "#14b8a6"),
    ("Stories", "#f97316"),
    ("School", "#14d97d"),
    ("Gaming", "#ed3a3aff"),
    ("Movies", "#ec4899"),
];

/// Icons a category can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryIcon {
    GraduationCap,
    Tv,
    Music,
    Atom,
    Palette,
    Trophy,
    Cat,
    BookOpen,
    #[default]
    Video,
    School,
    Gamepad2,
    Film,
}

impl CategoryIcon {
    /// All icons, in picker order
    pub const ALL: [CategoryIcon; 12] = [
        CategoryIcon::GraduationCap,
        CategoryIcon::Tv,
        CategoryIcon::Music,
        CategoryIcon::Atom,
        CategoryIcon::Palette,
        CategoryIcon::Trophy,
        CategoryIcon::Cat,
        CategoryIcon::BookOpen,
        CategoryIcon::Video,
        CategoryIcon::School,
        CategoryIcon::Gamepad2,
        CategoryIcon::Film,
    ];

    /// Name as stored on a category
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryIcon::GraduationCap => "GraduationCap",
            CategoryIcon::Tv => "Tv",
            CategoryIcon::Music => "Music",
            CategoryIcon::Atom => "Atom",
            CategoryIcon::Palette => "Palette",
            CategoryIcon::Trophy => "Trophy",
            CategoryIcon::Cat => "Cat",
            CategoryIcon::BookOpen => "BookOpen",
            CategoryIcon::Video => "Video",
            CategoryIcon::School => "School",
            CategoryIcon::Gamepad2 => "Gamepad2",
            CategoryIcon::Film => "Film",
        }
    }
}

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryIcon {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryIcon::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown category icon: {}", s))
    }
}

/// Preset `(title, color)` pairs, in picker order
pub fn preset_colors() -> &'static [(&'static str, &'static str)] {
    PRESET_COLORS
}

/// Icon to show for a stored icon name (unknown or missing -> `Video`)
pub fn icon_for(name: Option<&str>) -> CategoryIcon {
    name.and_then(|n| n.parse().ok()).unwrap_or_default()
}

/// Preset color for a category title, or [`DEFAULT_COLOR`]
pub fn default_color(title: &str) -> &'static str {
    PRESET_COLORS
        .iter()
        .find(|(preset, _)| *preset == title)
        .map_or(DEFAULT_COLOR, |(_, color)| color)
}
