//! Favorites store: saved messages persisted as a JSON array of `{id, content}`.
//!
//! Independent of the live conversation; entries survive restarts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One saved message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub content: String,
}

/// In-memory favorites backed by a JSON file.
pub struct FavoritesStore {
    path: PathBuf,
    entries: Vec<Favorite>,
}

impl FavoritesStore {
    /// Load store from path; if file missing or invalid, starts empty.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                log::warn!("favorites: ignoring unreadable {}: {}", path.display(), e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        Self { path, entries }
    }

    async fn save(&self) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, json).await
    }

    pub fn list(&self) -> &[Favorite] {
        &self.entries
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|f| f.id == id)
    }

    /// Add the message if absent, remove it if present; persist. Returns true when now favorited.
    /// On a failed write the in-memory list is left as it was.
    pub async fn toggle(&mut self, id: &str, content: &str) -> anyhow::Result<bool> {
        let previous = self.entries.clone();
        let added = if let Some(i) = self.entries.iter().position(|f| f.id == id) {
            self.entries.remove(i);
            false
        } else {
            self.entries.push(Favorite {
                id: id.to_string(),
                content: content.to_string(),
            });
            true
        };
        if let Err(e) = self.save().await {
            self.entries = previous;
            return Err(anyhow::Error::new(e)
                .context(format!("failed to write favorites {}", self.path.display())));
        }
        Ok(added)
    }
}
