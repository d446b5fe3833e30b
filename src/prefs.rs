use crate::errors::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)";

pub const SIDEBAR_COLLAPSED_KEY: &str = "ui.sidebar_collapsed";
pub const APPRAISAL_SEARCH_KEY: &str = "appraisals.last_search";

/// Storage seam for UI preferences so screens can be tested without a real
/// persistence backend.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> AppResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("preference store poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> AppResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Storage("preference store poisoned".to_string()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// The two persisted UI preferences. Stored values have no schema version, so
/// anything unreadable falls back to the default instead of failing.
pub struct Preferences<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn sidebar_collapsed(&self) -> bool {
        let stored = match self.store.get(SIDEBAR_COLLAPSED_KEY) {
            Ok(stored) => stored,
            Err(_) => return false,
        };
        stored
            .and_then(|raw| serde_json::from_str::<bool>(&raw).ok())
            .unwrap_or(false)
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) -> AppResult<()> {
        let raw = serde_json::to_string(&collapsed)?;
        self.store.set(SIDEBAR_COLLAPSED_KEY, &raw)
    }

    /// Last search term on the appraisal list, stored as a plain string.
    pub fn appraisal_search(&self) -> Option<String> {
        self.store
            .get(APPRAISAL_SEARCH_KEY)
            .ok()
            .flatten()
            .filter(|term| !term.is_empty())
    }

    pub fn set_appraisal_search(&self, term: &str) -> AppResult<()> {
        if term.is_empty() {
            self.store.remove(APPRAISAL_SEARCH_KEY)
        } else {
            self.store.set(APPRAISAL_SEARCH_KEY, term)
        }
    }
}
