//! SQLite-backed record store.
//!
//! Every table follows the same shape: a text `id` primary key, an `owner`
//! column, entity columns, and for grouped tables a `position` column that
//! keeps the manual sort order within a sibling group.
//!
//! The store itself knows nothing about callers. Ownership checks live in
//! [`OwnerScope`], dense ordering in [`OrderedGroup`].
//!
//! Each method here runs a single SQL statement, so every call commits on its
//! own. Multi-record operations built on top of it are not transactional.

pub mod ordering;
pub mod scope;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::types::{FromSql, ToSql};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::debug;

use crate::domain::OwnerId;

pub use ordering::{next_position, OrderedGroup};
pub use scope::OwnerScope;

/// Errors raised by the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to create database directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Database connection lock poisoned")]
    Poisoned,
}

/// Identifier usable as a primary or group key
pub trait RecordId: ToSql + FromSql + Clone + fmt::Debug + fmt::Display + Send + Sync {
    /// Raw string value
    fn as_str(&self) -> &str;
}

/// A row type persisted in its own table
pub trait Record: Sized {
    /// Primary key type
    type Id: RecordId;

    /// Human-readable kind, used in error messages
    const KIND: &'static str;

    /// Table name
    const TABLE: &'static str;

    /// Columns other than `id`, in the order [`Record::values`] yields them
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> &Self::Id;

    fn owner(&self) -> &OwnerId;

    /// Column values matching [`Record::COLUMNS`]
    fn values(&self) -> Vec<&dyn ToSql>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// A record that lives in a sibling group with a manual sort position
pub trait Positioned: Record {
    /// Key shared by all siblings
    type Group: RecordId;

    /// Column holding the group key
    const GROUP_COLUMN: &'static str;

    /// Current position within the group
    fn position(&self) -> i64;
}

/// Column/value pairs for a partial update
pub type Patch<'a> = [(&'static str, &'a dyn ToSql)];

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
    id          TEXT PRIMARY KEY NOT NULL,
    owner       TEXT NOT NULL,
    name        TEXT NOT NULL,
    avatar      TEXT,
    pin         TEXT,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS profiles_by_owner ON profiles(owner);
CREATE INDEX IF NOT EXISTS profiles_by_owner_and_name ON profiles(owner, name);

CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY NOT NULL,
    owner       TEXT NOT NULL,
    profile_id  TEXT NOT NULL,
    title       TEXT NOT NULL,
    icon        TEXT,
    position    INTEGER NOT NULL,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS categories_by_owner ON categories(owner);
CREATE INDEX IF NOT EXISTS categories_by_profile ON categories(profile_id);
CREATE INDEX IF NOT EXISTS categories_by_profile_and_position ON categories(profile_id, position);

CREATE TABLE IF NOT EXISTS videos (
    id               TEXT PRIMARY KEY NOT NULL,
    owner            TEXT NOT NULL,
    profile_id       TEXT NOT NULL,
    category_id      TEXT NOT NULL,
    source_video_id  TEXT NOT NULL,
    title            TEXT NOT NULL,
    thumbnail        TEXT NOT NULL,
    position         INTEGER NOT NULL,
    created_at       TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS videos_by_owner ON videos(owner);
CREATE INDEX IF NOT EXISTS videos_by_profile ON videos(profile_id);
CREATE INDEX IF NOT EXISTS videos_by_category ON videos(category_id);
CREATE INDEX IF NOT EXISTS videos_by_category_and_position ON videos(category_id, position);
"#;

/// Shared handle to the library database
///
/// Cloning is cheap; all clones share one connection.
#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) a database file and apply the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "Opened library database");
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    /// Path of the backing file (`None` for in-memory databases)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&conn)?)
    }

    /// Fetch a record by id, regardless of owner
    pub fn get<R: Record>(&self, id: &R::Id) -> Result<Option<R>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1",
            column_list::<R>(),
            R::TABLE
        );
        self.with_conn(|conn| conn.query_row(&sql, [id], |row| R::from_row(row)).optional())
    }

    /// Insert a new record
    pub fn insert<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        let placeholders = (1..=R::COLUMNS.len() + 1)
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            column_list::<R>(),
            placeholders
        );

        let mut values: Vec<&dyn ToSql> = vec![record.id() as &dyn ToSql];
        values.extend(record.values());

        self.with_conn(|conn| conn.execute(&sql, params_from_iter(values)).map(|_| ()))
    }

    /// Update only the named columns of one record
    ///
    /// Returns `false` when no row has the given id.
    pub fn patch<R: Record>(&self, id: &R::Id, fields: &Patch<'_>) -> Result<bool, StoreError> {
        if fields.is_empty() {
            return Ok(false);
        }

        let assignments = fields
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ?{}", column, i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?1", R::TABLE, assignments);

        let values = std::iter::once(id as &dyn ToSql).chain(fields.iter().map(|(_, v)| *v));

        self.with_conn(|conn| conn.execute(&sql, params_from_iter(values)).map(|n| n > 0))
    }

    /// Delete one record by id
    ///
    /// Returns `false` when nothing was deleted.
    pub fn delete<R: Record>(&self, id: &R::Id) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        self.with_conn(|conn| conn.execute(&sql, [id]).map(|n| n > 0))
    }

    /// All records whose `column` equals `value`, in insertion order
    pub fn find_by<R: Record>(
        &self,
        column: &str,
        value: &dyn ToSql,
    ) -> Result<Vec<R>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1 ORDER BY rowid",
            column_list::<R>(),
            R::TABLE,
            column
        );
        self.query(&sql, value)
    }

    /// Members of a sibling group, ascending by position
    pub fn find_in_group<R: Positioned>(&self, group: &R::Group) -> Result<Vec<R>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1 ORDER BY position ASC, rowid ASC",
            column_list::<R>(),
            R::TABLE,
            R::GROUP_COLUMN
        );
        self.query(&sql, group)
    }

    /// Highest position in a group, `None` when the group is empty
    pub fn max_position<R: Positioned>(&self, group: &R::Group) -> Result<Option<i64>, StoreError> {
        let sql = format!(
            "SELECT MAX(position) FROM {} WHERE {} = ?1",
            R::TABLE,
            R::GROUP_COLUMN
        );
        self.with_conn(|conn| conn.query_row(&sql, [group], |row| row.get::<_, Option<i64>>(0)))
    }

    fn query<R: Record>(&self, sql: &str, value: &dyn ToSql) -> Result<Vec<R>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map([value], |row| R::from_row(row))?;
            rows.collect()
        })
    }
}

fn column_list<R: Record>() -> String {
    std::iter::once("id")
        .chain(R::COLUMNS.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryFields, Profile, ProfileFields};
    use tempfile::TempDir;

    fn owner() -> OwnerId {
        OwnerId::from("user_1")
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let profile = Profile::new(owner(), ProfileFields::new("Mia").with_avatar("/a.png"));

        db.insert(&profile).unwrap();

        let loaded: Profile = db.get(&profile.id).unwrap().unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = Database::open_in_memory().unwrap();
        let missing = db.get::<Profile>(&"nope".into()).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_patch_only_touches_named_columns() {
        let db = Database::open_in_memory().unwrap();
        let profile = Profile::new(owner(), ProfileFields::new("Mia").with_pin("1234"));
        db.insert(&profile).unwrap();

        let name = "Mila".to_string();
        assert!(db.patch::<Profile>(&profile.id, &[("name", &name)]).unwrap());

        let loaded: Profile = db.get(&profile.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Mila");
        assert_eq!(loaded.pin.as_deref(), Some("1234"));
    }

    #[test]
    fn test_patch_and_delete_missing_row() {
        let db = Database::open_in_memory().unwrap();
        let id = "ghost".into();
        let name = "x".to_string();

        assert!(!db.patch::<Profile>(&id, &[("name", &name)]).unwrap());
        assert!(!db.delete::<Profile>(&id).unwrap());
    }

    #[test]
    fn test_group_members_sorted_by_position() {
        let db = Database::open_in_memory().unwrap();
        let profile = Profile::new(owner(), ProfileFields::new("Mia"));
        db.insert(&profile).unwrap();

        for (title, position) in [("b", 1), ("c", 2), ("a", 0)] {
            let category = Category::new(
                owner(),
                profile.id.clone(),
                CategoryFields::new(title),
                position,
            );
            db.insert(&category).unwrap();
        }

        let titles: Vec<String> = db
            .find_in_group::<Category>(&profile.id)
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(db.max_position::<Category>(&profile.id).unwrap(), Some(2));
    }

    #[test]
    fn test_open_file_creates_parent_and_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("library.db");
        let profile = Profile::new(owner(), ProfileFields::new("Mia"));

        {
            let db = Database::open(&path).unwrap();
            db.insert(&profile).unwrap();
            assert_eq!(db.path(), Some(path.as_path()));
        }

        let reopened = Database::open(&path).unwrap();
        assert!(reopened.get::<Profile>(&profile.id).unwrap().is_some());
    }
}
