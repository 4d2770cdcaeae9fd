//! SQLite storage implementation

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, StoreError};
use crate::student::{NewStudent, RecordId, StudentRecord};
use super::schema;

/// An open connection whose schema has been confirmed
struct Ready {
    conn: Connection,
    path: Option<PathBuf>,
}

/// SQLite-backed storage for student records.
///
/// The store starts uninitialized and becomes ready after a successful
/// [`initialize`](Self::initialize). A single connection is held for the
/// lifetime of the store; every operation holds the lock for its full
/// duration, so callers on different threads are serialized.
pub struct StudentStore {
    state: Mutex<Option<Ready>>,
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentStore {
    /// Create an uninitialized store
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    /// Open a database file (creates if doesn't exist)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self::new();
        store.initialize(path)?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            state: Mutex::new(Some(Ready { conn, path: None })),
        })
    }

    /// Open (or create) the database at `path` and make sure the schema exists.
    ///
    /// Safe to call on a ready store: existing rows are untouched. The new
    /// handle only replaces the current one once both steps succeed.
    pub fn initialize(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::initialize_schema(&conn)?;

        let previous = self.lock().replace(Ready {
            conn,
            path: Some(path.to_path_buf()),
        });
        // Old connection closes here, outside the lock
        drop(previous);

        tracing::info!("Initialized student store at {}", path.display());
        Ok(())
    }

    /// Initialize the database schema
    fn initialize_schema(conn: &Connection) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, []).map_err(StoreError::SchemaFailed)?;
        }
        Ok(())
    }

    /// Release the connection; the store returns to the uninitialized state
    pub fn close(&self) {
        let previous = self.lock().take();
        if previous.is_some() {
            tracing::debug!("Closed student store");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.lock().is_some()
    }

    /// Path of the backing file, `None` for in-memory or uninitialized stores
    pub fn path(&self) -> Option<PathBuf> {
        self.lock().as_ref().and_then(|ready| ready.path.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Ready>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Recovering student store lock after a panic in another caller");
            poisoned.into_inner()
        })
    }

    /// Run `f` against the ready connection while holding the lock
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.lock();
        let ready = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        f(&ready.conn)
    }

    // ========== Student Operations ==========

    /// Insert a new student and return the id assigned by the database
    pub fn save(&self, student: &NewStudent) -> Result<RecordId> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO Students (Name, Age) VALUES (?1, ?2)",
                params![student.name(), student.age()],
            )
            .map_err(StoreError::WriteFailed)?;

            let id = RecordId(conn.last_insert_rowid());
            tracing::debug!("Saved student {} as id {}", student.name(), id);
            Ok(id)
        })
    }

    /// Validate and save in one step
    pub fn add(&self, name: &str, age: i64) -> Result<RecordId> {
        let student = NewStudent::new(name, age)?;
        self.save(&student)
    }

    /// All students in insertion order
    pub fn list_all(&self) -> Result<Vec<StudentRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT Id, Name, Age FROM Students ORDER BY Id ASC")
                .map_err(StoreError::ReadFailed)?;

            let students = stmt
                .query_map([], row_to_student)
                .map_err(StoreError::ReadFailed)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(StoreError::ReadFailed)?;

            tracing::debug!("Loaded {} students", students.len());
            Ok(students)
        })
    }

    /// First student (lowest id) whose name matches exactly.
    ///
    /// Duplicate names resolve to the earliest record only.
    pub fn search_by_name(&self, name: &str) -> Result<Option<StudentRecord>> {
        self.with_conn(|conn| {
            let found = conn
                .query_row(
                    "SELECT Id, Name, Age FROM Students WHERE Name = ?1 ORDER BY Id ASC LIMIT 1",
                    [name],
                    row_to_student,
                )
                .optional()
                .map_err(StoreError::ReadFailed)?;

            tracing::debug!("Search for {:?}: {}", name, if found.is_some() { "hit" } else { "miss" });
            Ok(found)
        })
    }

    /// Delete every student whose name matches exactly; returns rows removed
    pub fn delete_by_name(&self, name: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let deleted = conn
                .execute("DELETE FROM Students WHERE Name = ?1", [name])
                .map_err(StoreError::WriteFailed)?;

            tracing::debug!("Deleted {} students named {:?}", deleted, name);
            Ok(deleted)
        })
    }

    /// Count all students
    pub fn count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM Students", [], |row| row.get(0))
                .map_err(StoreError::ReadFailed)?;
            Ok(count as usize)
        })
    }
}

/// Helper to convert a row to a StudentRecord.
///
/// Older files have nullable columns; NULL name reads as "" and NULL age as 0.
fn row_to_student(row: &rusqlite::Row) -> rusqlite::Result<StudentRecord> {
    Ok(StudentRecord {
        id: RecordId(row.get(0)?),
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        age: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
    })
}
