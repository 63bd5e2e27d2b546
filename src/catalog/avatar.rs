//! The "little monsters" avatar set.

/// Directory every bundled avatar lives in
pub const AVATAR_DIR: &str = "/little-monsters-avatar-set";

/// Number of avatars in the set
pub const AVATAR_COUNT: u32 = 18;

/// Path of avatar `n` (1-based)
pub fn path(n: u32) -> String {
    format!("{}/avatar-{}.png", AVATAR_DIR, n)
}

/// Every avatar path, in display order
pub fn all() -> Vec<String> {
    (1..=AVATAR_COUNT).map(path).collect()
}

/// File name component of an avatar path
pub fn filename(avatar: &str) -> &str {
    avatar.rsplit('/').next().unwrap_or(avatar)
}

/// Avatar number parsed from `avatar-N.png`
pub fn number(avatar: &str) -> Option<u32> {
    filename(avatar)
        .strip_prefix("avatar-")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

/// Check whether a path names one of the bundled avatars
pub fn is_known(avatar: &str) -> bool {
    avatar.starts_with(AVATAR_DIR)
        && number(avatar).is_some_and(|n| (1..=AVATAR_COUNT).contains(&n))
}
