use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::model::DocumentSnapshot;

const DB_PATH: &str = "data/faker_browse.sqlite";

const SNAPSHOT_KEY: &str = "snapshot";
const VERSION_KEY: &str = "version";

pub fn connect() -> Result<Connection> {
    std::fs::create_dir_all("data").context("creating data directory")?;
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS ui_cache (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

/// Last successful snapshot plus the time it was cached.
pub struct CachedSnapshot {
    pub snapshot: DocumentSnapshot,
    pub cached_at: String,
}

/// Replace the cached snapshot and version wholesale. Both keys are written in
/// one transaction so readers never observe a partial update.
pub fn save_snapshot(conn: &Connection, snapshot: &DocumentSnapshot) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO ui_cache (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))",
        )?;
        stmt.execute(rusqlite::params![SNAPSHOT_KEY, json])?;
        stmt.execute(rusqlite::params![VERSION_KEY, snapshot.version])?;
    }
    tx.commit()?;
    Ok(())
}

pub fn load_snapshot(conn: &Connection) -> Result<Option<CachedSnapshot>> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT value, updated_at FROM ui_cache WHERE key = ?1",
            [SNAPSHOT_KEY],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;

    match row {
        Some((json, cached_at)) => {
            let snapshot =
                serde_json::from_str(&json).context("decoding cached snapshot")?;
            Ok(Some(CachedSnapshot { snapshot, cached_at }))
        }
        None => Ok(None),
    }
}

pub fn load_version(conn: &Connection) -> Result<Option<String>> {
    let version = conn
        .query_row(
            "SELECT value FROM ui_cache WHERE key = ?1",
            [VERSION_KEY],
            |r| r.get(0),
        )
        .optional()?;
    Ok(version)
}
