//! Category subcommands.

use anyhow::Result;
use clap::Subcommand;

use super::Session;
use crate::catalog::{default_color, icon_for, CategoryIcon};
use crate::domain::{CategoryFields, CategoryId, ProfileId};

/// Category-related subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a category at the end of a profile's list
    Create {
        /// Profile ID
        profile_id: String,

        /// Category title
        title: String,

        /// Icon name (see `wuvo icons`)
        #[arg(short, long)]
        icon: Option<CategoryIcon>,
    },

    /// Replace a category's title and icon (an omitted icon is cleared)
    Update {
        /// Category ID
        category_id: String,

        /// Category title
        title: String,

        /// Icon name (see `wuvo icons`)
        #[arg(short, long)]
        icon: Option<CategoryIcon>,
    },

    /// Remove a category and every video in it
    Remove {
        /// Category ID
        category_id: String,
    },

    /// Put a profile's categories in the given order
    Reorder {
        /// Profile ID
        profile_id: String,

        /// Category IDs, first to last
        #[arg(required = true)]
        category_ids: Vec<String>,
    },

    /// List a profile's categories in display order
    List {
        /// Profile ID
        profile_id: String,
    },

    /// Show a category with its videos
    Show {
        /// Category ID
        category_id: String,

        /// Only show videos whose title contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
}

/// Execute category subcommands
pub async fn execute(session: &Session, command: CategoryCommands) -> Result<()> {
    match command {
        CategoryCommands::Create {
            profile_id,
            title,
            icon,
        } => {
            let id = session
                .library
                .create_category(&ProfileId::from(profile_id), category_fields(title, icon))
                .await?;
            session.print_written("created", "Category", id.as_str())
        }
        CategoryCommands::Update {
            category_id,
            title,
            icon,
        } => {
            let id = session
                .library
                .update_category(&CategoryId::from(category_id), category_fields(title, icon))
                .await?;
            session.print_written("updated", "Category", id.as_str())
        }
        CategoryCommands::Remove { category_id } => {
            let id = session
                .library
                .remove_category(&CategoryId::from(category_id))
                .await?;
            session.print_written("removed", "Category", id.as_str())
        }
        CategoryCommands::Reorder {
            profile_id,
            category_ids,
        } => {
            let ids: Vec<CategoryId> = category_ids.into_iter().map(CategoryId::from).collect();
            let done = session
                .library
                .reorder_categories(&ProfileId::from(profile_id), &ids)
                .await?;

            if session.json {
                return session.print_json(&serde_json::json!({ "reordered": done }));
            }
            eprintln!("Reordered {} categories", ids.len());
            Ok(())
        }
        CategoryCommands::List { profile_id } => list_categories(session, &profile_id).await,
        CategoryCommands::Show {
            category_id,
            filter,
        } => show_category(session, &category_id, filter.as_deref()).await,
    }
}

fn category_fields(title: String, icon: Option<CategoryIcon>) -> CategoryFields {
    let fields = CategoryFields::new(title);
    match icon {
        Some(icon) => fields.with_icon(icon.as_str()),
        None => fields,
    }
}

async fn list_categories(session: &Session, profile_id: &str) -> Result<()> {
    let categories = session
        .library
        .list_categories_by_profile(&ProfileId::from(profile_id))
        .await?;

    if session.json {
        return session.print_json(&categories);
    }
    if categories.is_empty() {
        println!("No categories for profile: {}", profile_id);
        return Ok(());
    }

    println!("{:<38} {:<6} {:<14} {:<10} {:<30}", "ID", "ORDER", "ICON", "COLOR", "TITLE");
    println!("{}", "-".repeat(100));
    for category in &categories {
        println!(
            "{:<38} {:<6} {:<14} {:<10} {:<30}",
            category.id.as_str(),
            category.order,
            icon_for(category.icon.as_deref()).as_str(),
            default_color(&category.title),
            super::truncate(&category.title, 30)
        );
    }

    Ok(())
}

async fn show_category(session: &Session, category_id: &str, filter: Option<&str>) -> Result<()> {
    let id = CategoryId::from(category_id);
    let category = session
        .library
        .get_category(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", category_id))?;
    let videos = session
        .library
        .filter_category_videos(&id, filter.unwrap_or(""))
        .await?;

    if session.json {
        return session.print_json(&serde_json::json!({
            "category": category,
            "videos": videos,
        }));
    }

    println!("  ID: {}", category.id);
    println!("  Title: {}", category.title);
    println!("  Icon: {}", icon_for(category.icon.as_deref()));
    println!("  Color: {}", default_color(&category.title));
    println!("  Profile: {}", category.profile_id);
    println!("  Order: {}", category.order);
    println!();

    super::print_videos(session, &videos)
}
