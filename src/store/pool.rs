//! Connection pool module
//!
//! Keeps a capped list of idle read-only connections so handlers check one
//! out per request instead of paying an open/close per query. The checkout
//! guard returns its connection to the pool on drop, on every exit path.

use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use super::StoreError;

/// Pool of read-only connections to the verse database
pub struct VersePool {
    path: PathBuf,
    idle: Mutex<Vec<Connection>>,
    max_idle: usize,
}

impl VersePool {
    /// Create a pool for the database at `path`
    ///
    /// No connection is opened until the first checkout, so a missing
    /// database file surfaces as a per-request error rather than a startup
    /// failure.
    pub fn new(path: impl Into<PathBuf>, max_idle: usize) -> Self {
        Self {
            path: path.into(),
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Check a connection out of the pool, opening a new one if none are idle
    pub fn get(&self) -> Result<PooledConnection<'_>, StoreError> {
        let reused = self.idle.lock().ok().and_then(|mut idle| idle.pop());

        let conn = match reused {
            Some(conn) => conn,
            None => Connection::open_with_flags(
                &self.path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(StoreError::Open)?,
        };

        Ok(PooledConnection {
            pool: self,
            conn: Some(conn),
        })
    }
}

/// Checkout guard; hands its connection back to the pool when dropped
pub struct PooledConnection<'a> {
    pool: &'a VersePool,
    conn: Option<Connection>,
}

impl Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        // Some until drop
        self.conn.as_ref().expect("connection already returned")
    }
}

impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Ok(mut idle) = self.pool.idle.lock() {
                if idle.len() < self.pool.max_idle {
                    idle.push(conn);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_db() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        let conn = Connection::open(file.path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE kjv (book INTEGER, chapter INTEGER, verse INTEGER, text TEXT);
             INSERT INTO kjv VALUES (1, 1, 1, 'In the beginning');",
        )
        .unwrap();
        file
    }

    #[test]
    fn test_checkout_and_query() {
        let db = seeded_db();
        let pool = VersePool::new(db.path(), 2);

        let conn = pool.get().unwrap();
        let text = crate::store::verse_text(&conn, 1, 1, 1).unwrap();
        assert_eq!(text.as_deref(), Some("In the beginning"));
    }

    #[test]
    fn test_connection_returned_on_drop() {
        let db = seeded_db();
        let pool = VersePool::new(db.path(), 2);

        {
            let _conn = pool.get().unwrap();
            assert_eq!(pool.idle.lock().unwrap().len(), 0);
        }
        assert_eq!(pool.idle.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_idle_list_is_capped() {
        let db = seeded_db();
        let pool = VersePool::new(db.path(), 1);

        let first = pool.get().unwrap();
        let second = pool.get().unwrap();
        drop(first);
        drop(second);

        assert_eq!(pool.idle.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_database_is_open_error() {
        let pool = VersePool::new("/nonexistent/verses.db", 2);
        match pool.get() {
            Err(StoreError::Open(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected open failure"),
        };
    }

    #[test]
    fn test_connections_are_read_only() {
        let db = seeded_db();
        let pool = VersePool::new(db.path(), 2);

        let conn = pool.get().unwrap();
        let result = conn.execute("INSERT INTO kjv VALUES (9, 9, 9, 'nope')", []);
        assert!(result.is_err());
    }
}
