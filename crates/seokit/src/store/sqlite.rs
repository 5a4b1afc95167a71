//! SQLite-backed override table.

use super::{DeletableBackend, EntityKey, OverrideBackend, SeoRecord};
use crate::data::SeoData;
use crate::error::{Result, SeoError};
use chrono::{DateTime, Utc};
use regex::Regex;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use tracing::info;

static TABLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").unwrap());

const COLUMNS: &str = "entity_type, entity_id, title, description, canonical_url, robots, \
     og_title, og_description, og_image, twitter_image, structured_data, \
     is_cornerstone, created_at, updated_at";

/// Override rows stored in one SQLite table.
pub struct SqliteStore {
    db: Mutex<Connection>,
    table: String,
}

impl SqliteStore {
    /// Open or create the database at `path` with the given table.
    pub fn open(path: &Path, table: &str) -> Result<Self> {
        let db = Connection::open(path)?;
        Self::with_connection(db, table)
    }

    /// Open the default database at `~/.seokit/seokit.db`.
    pub fn open_default(table: &str) -> Result<Self> {
        let path = default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::open(&path, table)
    }

    /// An in-memory store, mostly for tests and dry runs.
    pub fn in_memory(table: &str) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, table)
    }

    fn with_connection(db: Connection, table: &str) -> Result<Self> {
        if !TABLE_NAME_RE.is_match(table) {
            return Err(SeoError::InvalidTableName(table.to_string()));
        }

        db.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                entity_type TEXT NOT NULL,
                entity_id TEXT NOT NULL,
                title TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                canonical_url TEXT,
                robots TEXT,
                og_title TEXT NOT NULL DEFAULT '',
                og_description TEXT NOT NULL DEFAULT '',
                og_image TEXT NOT NULL DEFAULT '',
                twitter_image TEXT,
                structured_data TEXT,
                is_cornerstone INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (entity_type, entity_id)
            );"
        ))?;

        info!("override table {table} ready");
        Ok(Self {
            db: Mutex::new(db),
            table: table.to_string(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Insert or update the row for `record.key`. `created_at` of an existing
    /// row is kept.
    pub fn save(&self, record: &SeoRecord) -> Result<()> {
        let structured = record
            .data
            .structured_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn().execute(
            &format!(
                "INSERT INTO {table} ({COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                 ON CONFLICT (entity_type, entity_id) DO UPDATE SET
                    title = excluded.title,
                    description = excluded.description,
                    canonical_url = excluded.canonical_url,
                    robots = excluded.robots,
                    og_title = excluded.og_title,
                    og_description = excluded.og_description,
                    og_image = excluded.og_image,
                    twitter_image = excluded.twitter_image,
                    structured_data = excluded.structured_data,
                    is_cornerstone = excluded.is_cornerstone,
                    updated_at = excluded.updated_at",
                table = self.table
            ),
            params![
                record.key.entity_type,
                record.key.entity_id,
                record.data.title,
                record.data.description,
                record.data.canonical,
                record.data.robots,
                record.data.og_title,
                record.data.og_description,
                record.data.og_image,
                record.data.twitter_image,
                structured,
                record.is_cornerstone,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Every key with a stored row, ordered by type then id.
    pub fn list_keys(&self) -> Result<Vec<EntityKey>> {
        let db = self.conn();
        let mut stmt = db.prepare(&format!(
            "SELECT entity_type, entity_id FROM {} ORDER BY entity_type, entity_id",
            self.table
        ))?;
        let keys = stmt
            .query_map([], |row| {
                Ok(EntityKey {
                    entity_type: row.get(0)?,
                    entity_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OverrideBackend for SqliteStore {
    fn fetch(&self, key: &EntityKey) -> Result<Option<SeoRecord>> {
        let db = self.conn();
        let mut stmt = db.prepare(&format!(
            "SELECT {COLUMNS} FROM {} WHERE entity_type = ?1 AND entity_id = ?2",
            self.table
        ))?;

        let result = stmt.query_row(params![key.entity_type, key.entity_id], read_row);
        let raw = match result {
            Ok(raw) => raw,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        raw.into_record().map(Some)
    }
}

impl DeletableBackend for SqliteStore {
    fn delete(&self, key: &EntityKey) -> Result<bool> {
        let rows = self.conn().execute(
            &format!(
                "DELETE FROM {} WHERE entity_type = ?1 AND entity_id = ?2",
                self.table
            ),
            params![key.entity_type, key.entity_id],
        )?;
        Ok(rows > 0)
    }
}

/// Column values before JSON and timestamp decoding.
struct RawRow {
    key: EntityKey,
    data: SeoData,
    structured_data: Option<String>,
    is_cornerstone: bool,
    created_at: String,
    updated_at: String,
}

impl RawRow {
    fn into_record(self) -> Result<SeoRecord> {
        let mut data = self.data;
        data.structured_data = self
            .structured_data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(SeoRecord {
            key: self.key,
            data,
            is_cornerstone: self.is_cornerstone,
            created_at: parse_timestamp(12, &self.created_at)?,
            updated_at: parse_timestamp(13, &self.updated_at)?,
        })
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        key: EntityKey {
            entity_type: row.get(0)?,
            entity_id: row.get(1)?,
        },
        data: SeoData {
            title: row.get(2)?,
            description: row.get(3)?,
            canonical: row.get(4)?,
            robots: row.get(5)?,
            og_title: row.get(6)?,
            og_description: row.get(7)?,
            og_image: row.get(8)?,
            twitter_image: row.get(9)?,
            structured_data: None,
        },
        structured_data: row.get(10)?,
        is_cornerstone: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

fn parse_timestamp(column: usize, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            SeoError::Store(rusqlite::Error::FromSqlConversionFailure(
                column,
                Type::Text,
                Box::new(e),
            ))
        })
}

fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".seokit")
        .join("seokit.db")
}
