//! Database connections for a mindcast store.
//!
//! Every write (episode imports, correlation upserts, pattern inserts, weak
//! correlation cleanup) goes through one connection, so a conditional insert
//! never races another writer. A file-backed store also keeps a few read-only
//! connections for the window scans the engines run per episode. An in-memory
//! database cannot be shared between connections, so it has no readers and
//! its reads are served by the writer.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use mindcast_core::errors::MindcastResult;

use crate::to_storage_err;

pub const DEFAULT_READERS: usize = 4;
const MAX_READERS: usize = 8;

/// Episodes and correlations are small rows; 8MB of page cache covers a
/// user's ±7-day scan many times over.
const WRITER_PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA cache_size = -8000;
    PRAGMA busy_timeout = 5000;
    PRAGMA temp_store = MEMORY;
";

const READER_PRAGMAS: &str = "
    PRAGMA cache_size = -4000;
    PRAGMA busy_timeout = 5000;
    PRAGMA query_only = ON;
";

pub struct Connections {
    writer: tokio::sync::Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
    path: Option<PathBuf>,
}

impl Connections {
    /// Open the writer first so the file exists (and is in WAL mode) before
    /// the read-only connections attach.
    pub fn open(path: &Path, readers: usize) -> MindcastResult<Self> {
        let writer = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        writer
            .execute_batch(WRITER_PRAGMAS)
            .map_err(|e| to_storage_err(e.to_string()))?;

        let count = readers.clamp(1, MAX_READERS);
        let mut pool = Vec::with_capacity(count);
        for _ in 0..count {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            conn.execute_batch(READER_PRAGMAS)
                .map_err(|e| to_storage_err(e.to_string()))?;
            pool.push(Mutex::new(conn));
        }

        Ok(Self {
            writer: tokio::sync::Mutex::new(writer),
            readers: pool,
            next_reader: AtomicUsize::new(0),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> MindcastResult<Self> {
        let writer = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        writer
            .execute_batch(WRITER_PRAGMAS)
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(Self {
            writer: tokio::sync::Mutex::new(writer),
            readers: Vec::new(),
            next_reader: AtomicUsize::new(0),
            path: None,
        })
    }

    /// Run `f` on the write connection. Must not be called from inside a
    /// tokio runtime.
    pub fn write<F, T>(&self, f: F) -> MindcastResult<T>
    where
        F: FnOnce(&Connection) -> MindcastResult<T>,
    {
        let guard = self.writer.blocking_lock();
        f(&guard)
    }

    /// Run `f` on the next reader, round-robin, or on the writer when the
    /// store has no readers.
    pub fn read<F, T>(&self, f: F) -> MindcastResult<T>
    where
        F: FnOnce(&Connection) -> MindcastResult<T>,
    {
        if self.readers.is_empty() {
            return self.write(f);
        }
        let idx = self.next_reader.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let guard = self.readers[idx]
            .lock()
            .map_err(|e| to_storage_err(format!("reader lock poisoned: {e}")))?;
        f(&guard)
    }

    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The writer's journal mode, lower-cased (`wal` for file stores,
    /// `memory` for in-memory ones).
    pub fn journal_mode(&self) -> MindcastResult<String> {
        self.write(|conn| {
            let mode: String = conn
                .pragma_query_value(None, "journal_mode", |row| row.get(0))
                .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(mode.to_ascii_lowercase())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_table(conn: &Connection) -> MindcastResult<()> {
        conn.execute_batch("CREATE TABLE t (v INTEGER); INSERT INTO t VALUES (7);")
            .map_err(|e| to_storage_err(e.to_string()))
    }

    fn read_value(conn: &Connection) -> MindcastResult<i64> {
        conn.query_row("SELECT v FROM t", [], |row| row.get(0))
            .map_err(|e| to_storage_err(e.to_string()))
    }

    #[test]
    fn in_memory_reads_go_through_the_writer() {
        let conns = Connections::open_in_memory().unwrap();
        assert_eq!(conns.reader_count(), 0);
        assert!(conns.path().is_none());
        conns.write(create_table).unwrap();
        assert_eq!(conns.read(read_value).unwrap(), 7);
    }

    #[test]
    fn reader_count_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let none = Connections::open(&dir.path().join("a.db"), 0).unwrap();
        assert_eq!(none.reader_count(), 1);
        let many = Connections::open(&dir.path().join("b.db"), 64).unwrap();
        assert_eq!(many.reader_count(), MAX_READERS);
    }

    #[test]
    fn file_readers_see_writes_and_refuse_to_write() {
        let dir = tempfile::tempdir().unwrap();
        let conns = Connections::open(&dir.path().join("c.db"), 2).unwrap();
        assert_eq!(conns.journal_mode().unwrap(), "wal");
        conns.write(create_table).unwrap();

        for _ in 0..conns.reader_count() {
            assert_eq!(conns.read(read_value).unwrap(), 7);
        }
        let denied = conns.read(|conn| {
            conn.execute("INSERT INTO t VALUES (8)", [])
                .map_err(|e| to_storage_err(e.to_string()))
        });
        assert!(denied.is_err());
    }
}
