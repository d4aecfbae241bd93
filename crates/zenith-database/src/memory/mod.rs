//! In-process implementation of every store trait.
//!
//! Used by the `memory` database provider and by tests. All tables sit
//! behind one lock, so each store call is atomic the way a single SQL
//! statement or stored function is, and uniqueness checks cannot race.

mod accounts;
mod content;
mod resources;
mod sharing;

use std::collections::HashSet;

use tokio::sync::RwLock;
use uuid::Uuid;

use zenith_core::error::AppError;
use zenith_entity::file::File;
use zenith_entity::folder::Folder;
use zenith_entity::permission::Permission;
use zenith_entity::star::Star;
use zenith_entity::user::User;

/// Tables kept in insertion order.
#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    folders: Vec<Folder>,
    files: Vec<File>,
    permissions: Vec<Permission>,
    stars: Vec<Star>,
}

impl Tables {
    fn folder(&self, id: Uuid) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    fn file(&self, id: Uuid) -> Option<&File> {
        self.files.iter().find(|f| f.id == id)
    }

    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn is_starred(&self, user_id: Uuid, resource_id: Uuid) -> bool {
        self.stars
            .iter()
            .any(|s| s.user_id == user_id && s.resource_id == resource_id)
    }

    /// The folder and every descendant folder, breadth first.
    fn subtree(&self, root: Uuid) -> Vec<Uuid> {
        let mut ids = vec![root];
        let mut seen: HashSet<Uuid> = HashSet::from([root]);
        let mut cursor = 0;
        while cursor < ids.len() {
            let parent = ids[cursor];
            for child in self.folders.iter().filter(|f| f.parent_id == Some(parent)) {
                if seen.insert(child.id) {
                    ids.push(child.id);
                }
            }
            cursor += 1;
        }
        ids
    }
}

/// In-memory database implementing all store traits.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    tables: RwLock<Tables>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects per table, for assertions in tests.
    pub async fn row_counts(&self) -> RowCounts {
        let tables = self.tables.read().await;
        RowCounts {
            users: tables.users.len(),
            folders: tables.folders.len(),
            files: tables.files.len(),
            permissions: tables.permissions.len(),
            stars: tables.stars.len(),
        }
    }
}

/// Row counts returned by [`MemoryDatabase::row_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    /// Users.
    pub users: usize,
    /// Folders.
    pub folders: usize,
    /// Files.
    pub files: usize,
    /// Permissions.
    pub permissions: usize,
    /// Stars.
    pub stars: usize,
}

fn duplicate() -> AppError {
    AppError::conflict("Duplicate entry")
}

fn missing_reference(table: &str) -> AppError {
    AppError::database(format!("Foreign key violation on {table}"))
}

/// Emulates `fts @@ to_tsquery('simple', q)` for `"a & b"` queries over
/// names split on non-alphanumeric characters.
fn matches_tsquery(name: &str, tsquery: &str) -> bool {
    let lowered = name.to_lowercase();
    let words: HashSet<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let mut terms = tsquery
        .split('&')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .peekable();
    terms.peek().is_some() && terms.all(|term| words.contains(term.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsquery_requires_every_term() {
        assert!(matches_tsquery("Q3 Report.pdf", "q3 & report"));
        assert!(matches_tsquery("q3-report.pdf", "pdf"));
        assert!(!matches_tsquery("Q3 Report.pdf", "q3 & summary"));
        assert!(!matches_tsquery("Q3 Report.pdf", "rep"));
        assert!(!matches_tsquery("anything", ""));
    }
}
