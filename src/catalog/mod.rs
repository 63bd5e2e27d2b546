//! Fixed lookup tables shipped with the app.
//!
//! - `avatar`: the selectable profile avatars
//! - `icons`: category icons and preset category colors

pub mod avatar;
pub mod icons;

pub use icons::{default_color, icon_for, preset_colors, CategoryIcon, DEFAULT_COLOR};
