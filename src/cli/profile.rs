//! Profile subcommands.

use anyhow::{Context, Result};
use clap::Subcommand;

use super::Session;
use crate::catalog::avatar;
use crate::domain::{ProfileFields, ProfileId};

/// Profile-related subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Create a profile
    Create {
        /// Display name
        name: String,

        /// Avatar path, or a number from the bundled set (1-18)
        #[arg(short, long)]
        avatar: Option<String>,

        /// PIN required to switch into this profile
        #[arg(long)]
        pin: Option<String>,
    },

    /// Replace a profile's name, avatar and PIN (omitted options are cleared)
    Update {
        /// Profile ID
        profile_id: String,

        /// Display name
        name: String,

        /// Avatar path, or a number from the bundled set (1-18)
        #[arg(short, long)]
        avatar: Option<String>,

        /// PIN required to switch into this profile
        #[arg(long)]
        pin: Option<String>,
    },

    /// Remove a profile with all of its categories and videos
    Remove {
        /// Profile ID
        profile_id: String,
    },

    /// List your profiles
    List,

    /// Show a single profile
    Show {
        /// Profile ID
        profile_id: String,
    },
}

/// Execute profile subcommands
pub async fn execute(session: &Session, command: ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Create { name, avatar, pin } => {
            let fields = profile_fields(name, avatar, pin)?;
            let id = session.library.create_profile(fields).await?;
            session.print_written("created", "Profile", id.as_str())
        }
        ProfileCommands::Update {
            profile_id,
            name,
            avatar,
            pin,
        } => {
            let fields = profile_fields(name, avatar, pin)?;
            let id = session
                .library
                .update_profile(&ProfileId::from(profile_id), fields)
                .await?;
            session.print_written("updated", "Profile", id.as_str())
        }
        ProfileCommands::Remove { profile_id } => {
            let id = session
                .library
                .remove_profile(&ProfileId::from(profile_id))
                .await?;
            session.print_written("removed", "Profile", id.as_str())
        }
        ProfileCommands::List => list_profiles(session).await,
        ProfileCommands::Show { profile_id } => show_profile(session, &profile_id).await,
    }
}

/// Build profile fields, expanding a bare avatar number
fn profile_fields(name: String, avatar: Option<String>, pin: Option<String>) -> Result<ProfileFields> {
    let mut fields = ProfileFields::new(name);

    if let Some(avatar) = avatar {
        fields = fields.with_avatar(expand_avatar(&avatar)?);
    }
    if let Some(pin) = pin {
        fields = fields.with_pin(pin);
    }

    Ok(fields)
}

/// `7` -> `/little-monsters-avatar-set/avatar-7.png`; paths pass through
fn expand_avatar(value: &str) -> Result<String> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Ok(value.to_string());
    }

    let n: u32 = value
        .parse()
        .with_context(|| format!("Invalid avatar number: {}", value))?;
    if !(1..=avatar::AVATAR_COUNT).contains(&n) {
        anyhow::bail!("Avatar number must be between 1 and {}", avatar::AVATAR_COUNT);
    }

    Ok(avatar::path(n))
}

async fn list_profiles(session: &Session) -> Result<()> {
    let profiles = session.library.list_profiles().await?;

    if session.json {
        return session.print_json(&profiles);
    }
    if profiles.is_empty() {
        println!("No profiles yet. Use 'wuvo profile create <name>' to add one.");
        return Ok(());
    }

    println!("{:<38} {:<20} {:<14} {:<4}", "ID", "NAME", "AVATAR", "PIN");
    println!("{}", "-".repeat(80));
    for profile in &profiles {
        let avatar = profile.avatar.as_deref().map(avatar::filename).unwrap_or("-");
        println!(
            "{:<38} {:<20} {:<14} {:<4}",
            profile.id.as_str(),
            super::truncate(&profile.name, 20),
            avatar,
            if profile.has_pin() { "yes" } else { "no" }
        );
    }

    println!("\nTotal: {} profiles", profiles.len());
    Ok(())
}

async fn show_profile(session: &Session, profile_id: &str) -> Result<()> {
    let id = ProfileId::from(profile_id);
    let profile = session
        .library
        .get_profile(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Profile not found: {}", profile_id))?;

    if session.json {
        return session.print_json(&profile);
    }

    let categories = session.library.list_categories_by_profile(&id).await?;

    println!("  ID: {}", profile.id);
    println!("  Name: {}", profile.name);
    if let Some(avatar) = &profile.avatar {
        println!("  Avatar: {}", avatar);
    }
    println!("  PIN: {}", if profile.has_pin() { "set" } else { "none" });
    println!("  Created: {}", profile.created_at);
    println!("  Categories: {}", categories.len());
    for category in &categories {
        println!("    {:>3}. {}", category.order, category.title);
    }

    Ok(())
}
