//! Verse store module
//!
//! Read-only access to the single `kjv(book, chapter, verse, text)` table.
//! Connections are checked out of a small pool; every query shape is a
//! parameterized statement returning rows in ascending (chapter, verse) order.

mod pool;

pub use pool::{PooledConnection, VersePool};

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

/// Store failures, each distinguishable from a legitimate empty result
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open verse database: {0}")]
    Open(#[source] rusqlite::Error),

    #[error("verse query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// One verse of a chapter listing; the chapter is echoed at the document level
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChapterVerse {
    pub verse: i64,
    pub text: String,
}

/// One verse of a passage listing
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PassageVerse {
    pub chapter: i64,
    pub verse: i64,
    pub text: String,
}

/// Look up the text of a single verse
pub fn verse_text(
    conn: &Connection,
    book: i64,
    chapter: i64,
    verse: i64,
) -> Result<Option<String>, StoreError> {
    conn.query_row(
        "SELECT text FROM kjv WHERE book = ?1 AND chapter = ?2 AND verse = ?3",
        params![book, chapter, verse],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

/// List every verse of a chapter in ascending verse order
pub fn chapter_verses(
    conn: &Connection,
    book: i64,
    chapter: i64,
) -> Result<Vec<ChapterVerse>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT verse, text FROM kjv WHERE book = ?1 AND chapter = ?2 ORDER BY verse ASC",
    )?;

    let verses = stmt
        .query_map(params![book, chapter], |row| {
            Ok(ChapterVerse {
                verse: row.get(0)?,
                text: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(verses)
}

/// List every verse of a book between two inclusive (chapter, verse) bounds
///
/// The bounds order verses lexicographically: a row is included iff
/// (chapter, verse) >= (`start_chapter`, `start_verse`) and
/// (chapter, verse) <= (`end_chapter`, `end_verse`).
pub fn passage_verses(
    conn: &Connection,
    book: i64,
    start_chapter: i64,
    start_verse: i64,
    end_chapter: i64,
    end_verse: i64,
) -> Result<Vec<PassageVerse>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT chapter, verse, text FROM kjv \
         WHERE book = ?1 \
           AND (chapter > ?2 OR (chapter = ?2 AND verse >= ?3)) \
           AND (chapter < ?4 OR (chapter = ?4 AND verse <= ?5)) \
         ORDER BY chapter ASC, verse ASC",
    )?;

    let verses = stmt
        .query_map(
            params![book, start_chapter, start_verse, end_chapter, end_verse],
            |row| {
                Ok(PassageVerse {
                    chapter: row.get(0)?,
                    verse: row.get(1)?,
                    text: row.get(2)?,
                })
            },
        )?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(verses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE kjv (book INTEGER, chapter INTEGER, verse INTEGER, text TEXT);
             INSERT INTO kjv VALUES (1, 1, 1, 'In the beginning');
             INSERT INTO kjv VALUES (1, 1, 2, 'And the earth was without form');
             INSERT INTO kjv VALUES (1, 1, 3, 'And God said, Let there be light');
             INSERT INTO kjv VALUES (1, 2, 1, 'Thus the heavens were finished');
             INSERT INTO kjv VALUES (1, 2, 2, 'And on the seventh day');
             INSERT INTO kjv VALUES (1, 3, 1, 'Now the serpent was more subtil');
             INSERT INTO kjv VALUES (2, 1, 1, 'Now these are the names');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_verse_text_found() {
        let conn = test_conn();
        let text = verse_text(&conn, 1, 1, 1).unwrap();
        assert_eq!(text.as_deref(), Some("In the beginning"));
    }

    #[test]
    fn test_verse_text_missing() {
        let conn = test_conn();
        assert_eq!(verse_text(&conn, 1, 1, 99).unwrap(), None);
        assert_eq!(verse_text(&conn, 99, 1, 1).unwrap(), None);
    }

    #[test]
    fn test_chapter_verses_ordered() {
        let conn = test_conn();
        let verses = chapter_verses(&conn, 1, 1).unwrap();
        assert_eq!(verses.len(), 3);
        let order: Vec<i64> = verses.iter().map(|v| v.verse).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_chapter_verses_empty_for_missing_chapter() {
        let conn = test_conn();
        assert!(chapter_verses(&conn, 1, 99).unwrap().is_empty());
    }

    #[test]
    fn test_passage_within_single_chapter() {
        let conn = test_conn();
        let verses = passage_verses(&conn, 1, 1, 2, 1, 3).unwrap();
        let keys: Vec<(i64, i64)> = verses.iter().map(|v| (v.chapter, v.verse)).collect();
        assert_eq!(keys, vec![(1, 2), (1, 3)]);
    }

    #[test]
    fn test_passage_spanning_chapters() {
        let conn = test_conn();
        // (1,2) through (3,1): tail of chapter 1, all of chapter 2, head of 3
        let verses = passage_verses(&conn, 1, 1, 2, 3, 1).unwrap();
        let keys: Vec<(i64, i64)> = verses.iter().map(|v| (v.chapter, v.verse)).collect();
        assert_eq!(keys, vec![(1, 2), (1, 3), (2, 1), (2, 2), (3, 1)]);
    }

    #[test]
    fn test_passage_stays_within_book() {
        let conn = test_conn();
        let verses = passage_verses(&conn, 1, 1, 1, 99, 99).unwrap();
        assert!(verses.iter().all(|v| v.chapter <= 3));
        assert_eq!(verses.len(), 6);
    }

    #[test]
    fn test_passage_inverted_bounds_empty() {
        let conn = test_conn();
        assert!(passage_verses(&conn, 1, 3, 1, 1, 1).unwrap().is_empty());
    }
}
