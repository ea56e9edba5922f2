//! # Favorites Commands
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  nearby favorites add --id r7 ...                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  main: open Database → FavoriteStore::load()                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commands::favorites::add(&store, input, out)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.add(..) ──► memory ──► kv_store ("favorites")                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use nearby_core::{FavoriteItem, FavoriteItemInput};
use nearby_db::{AddOutcome, FavoriteStore};

use crate::error::{CliError, CliResult};

/// Prints the collection (or one category of it), oldest first.
pub fn list(
    store: &FavoriteStore,
    category: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    let items = match category {
        Some(c) => store.by_category(c),
        None => store.snapshot(),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;
        return Ok(());
    }

    if items.is_empty() {
        writeln!(out, "No favorites yet.")?;
        return Ok(());
    }

    for item in &items {
        writeln!(out, "{}", summary_line(item))?;
    }
    Ok(())
}

/// Prints one favorite in full.
pub fn show(store: &FavoriteStore, id: &str, out: &mut dyn Write) -> CliResult<()> {
    let item = store
        .get(id)
        .ok_or_else(|| CliError::NotFound(id.to_string()))?;
    writeln!(out, "{}", serde_json::to_string_pretty(&item)?)?;
    Ok(())
}

pub async fn add(
    store: &FavoriteStore,
    input: FavoriteItemInput,
    out: &mut dyn Write,
) -> CliResult<()> {
    let id = input.id.clone();
    match store.add(input).await? {
        AddOutcome::Added => writeln!(out, "Added {}", id)?,
        AddOutcome::AlreadyFavorite => writeln!(out, "{} is already a favorite", id)?,
    }
    Ok(())
}

pub async fn remove(store: &FavoriteStore, id: &str, out: &mut dyn Write) -> CliResult<()> {
    if store.remove(id).await {
        writeln!(out, "Removed {}", id)?;
    } else {
        writeln!(out, "{} was not a favorite", id)?;
    }
    Ok(())
}

pub async fn toggle(
    store: &FavoriteStore,
    input: FavoriteItemInput,
    out: &mut dyn Write,
) -> CliResult<()> {
    let id = input.id.clone();
    if store.toggle(input).await? {
        writeln!(out, "♥ {}", id)?;
    } else {
        writeln!(out, "♡ {}", id)?;
    }
    Ok(())
}

pub async fn clear(store: &FavoriteStore, out: &mut dyn Write) -> CliResult<()> {
    let n = store.len();
    store.clear_all().await;
    writeln!(out, "Cleared {} favorite(s)", n)?;
    Ok(())
}

/// Prints each category with its item count, first-favorited first.
pub fn categories(store: &FavoriteStore, out: &mut dyn Write) -> CliResult<()> {
    let counts = store.count_by_category();
    if counts.is_empty() {
        writeln!(out, "No favorites yet.")?;
    }
    for (category, n) in counts {
        writeln!(out, "{:<20} {}", category, n)?;
    }
    Ok(())
}

fn summary_line(item: &FavoriteItem) -> String {
    let mut line = format!("{:<12} {:<30} {}", item.id(), item.name(), item.category());
    if let Some(sub) = &item.entry.subcategory {
        line.push_str(&format!(" / {}", sub));
    }
    if let Some(price) = &item.entry.price {
        line.push_str(&format!("  {}", price));
    }
    if let Some(rating) = item.entry.rating {
        line.push_str(&format!("  ★{:.1}", rating));
    }
    line
}
