//! Verse lookup handlers
//!
//! Implements the verse, chapter, and passage operations over the store,
//! plus the route listing. Request bodies are JSON with numeric fields;
//! responses echo the query parameters alongside the matched rows.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use serde::{Deserialize, Serialize};

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::store::{self, ChapterVerse, PassageVerse, StoreError};

/// Body parameters for a single-verse lookup
#[derive(Debug, Deserialize)]
struct VerseQuery {
    book: i64,
    chapter: i64,
    verse: i64,
}

/// Body parameters for a chapter listing
#[derive(Debug, Deserialize)]
struct ChapterQuery {
    book: i64,
    chapter: i64,
}

/// Body parameters for a passage listing
#[derive(Debug, Deserialize)]
struct PassageQuery {
    book: i64,
    start_chapter: i64,
    start_verse: i64,
    end_chapter: i64,
    end_verse: i64,
}

/// Single-verse response document
#[derive(Debug, Serialize)]
struct VerseDoc {
    book: i64,
    chapter: i64,
    verse: i64,
    text: String,
}

/// Chapter response document; the chapter is echoed once, not per verse
#[derive(Debug, Serialize)]
struct ChapterDoc {
    book: i64,
    chapter: i64,
    verses: Vec<ChapterVerse>,
}

/// Passage response document; echoes the queried bounds
#[derive(Debug, Serialize)]
struct PassageDoc {
    book: i64,
    start_chapter: i64,
    start_verse: i64,
    end_chapter: i64,
    end_verse: i64,
    verses: Vec<PassageVerse>,
}

/// `GET /kjv/{book}/{chapter}/{verse}`
pub fn get_verse_by_path(path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let Some((book, chapter, verse)) = parse_verse_path(path) else {
        return http::bad_request("Invalid path: expected /kjv/{book}/{chapter}/{verse}\n");
    };
    lookup_verse(state, book, chapter, verse)
}

/// `POST /kjv/get_verse` with body `{"book":N,"chapter":N,"verse":N}`
pub async fn get_verse(
    req: Request<hyper::body::Incoming>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let Some(query) = parse_body::<VerseQuery>(req).await else {
        return http::bad_request("Invalid JSON: expected book, chapter, verse\n");
    };
    lookup_verse(state, query.book, query.chapter, query.verse)
}

/// `POST /kjv/get_chapter` with body `{"book":N,"chapter":N}`
pub async fn get_chapter(
    req: Request<hyper::body::Incoming>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let Some(query) = parse_body::<ChapterQuery>(req).await else {
        return http::bad_request("Invalid JSON: expected book, chapter\n");
    };

    let verses =
        match checked_out(state, |conn| store::chapter_verses(conn, query.book, query.chapter)) {
            Ok(verses) => verses,
            Err(err) => return store_failure(&err),
        };

    if verses.is_empty() {
        return http::not_found("Chapter not found\n");
    }

    http::json_response(
        &ChapterDoc {
            book: query.book,
            chapter: query.chapter,
            verses,
        },
        &state.config.http,
    )
}

/// `POST /kjv/get_passage` with body
/// `{"book":N,"start_chapter":N,"start_verse":N,"end_chapter":N,"end_verse":N}`
pub async fn get_passage(
    req: Request<hyper::body::Incoming>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let Some(query) = parse_body::<PassageQuery>(req).await else {
        return http::bad_request(
            "Invalid JSON: expected book, start_chapter, start_verse, end_chapter, end_verse\n",
        );
    };

    let verses = match checked_out(state, |conn| {
        store::passage_verses(
            conn,
            query.book,
            query.start_chapter,
            query.start_verse,
            query.end_chapter,
            query.end_verse,
        )
    }) {
        Ok(verses) => verses,
        Err(err) => return store_failure(&err),
    };

    if verses.is_empty() {
        return http::not_found("Passage not found\n");
    }

    http::json_response(
        &PassageDoc {
            book: query.book,
            start_chapter: query.start_chapter,
            start_verse: query.start_verse,
            end_chapter: query.end_chapter,
            end_verse: query.end_verse,
            verses,
        },
        &state.config.http,
    )
}

/// `GET /routes`
pub fn list_routes(state: &AppState) -> Response<Full<Bytes>> {
    http::plain_text(state.routes.describe())
}

fn lookup_verse(state: &AppState, book: i64, chapter: i64, verse: i64) -> Response<Full<Bytes>> {
    let text = match checked_out(state, |conn| store::verse_text(conn, book, chapter, verse)) {
        Ok(text) => text,
        Err(err) => return store_failure(&err),
    };

    match text {
        Some(text) => http::json_response(
            &VerseDoc {
                book,
                chapter,
                verse,
                text,
            },
            &state.config.http,
        ),
        None => http::not_found("Verse not found\n"),
    }
}

/// Run `query` against a pooled connection; the checkout is returned on
/// every exit path by the guard's drop
fn checked_out<T>(
    state: &AppState,
    query: impl FnOnce(&rusqlite::Connection) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let conn = state.store.get()?;
    query(&conn)
}

fn store_failure(err: &StoreError) -> Response<Full<Bytes>> {
    logger::log_error(&format!("Verse store failure: {err}"));
    http::internal_error()
}

/// Collect the request body and deserialize it; `None` on any failure
async fn parse_body<T: serde::de::DeserializeOwned>(
    req: Request<hyper::body::Incoming>,
) -> Option<T> {
    let body = req.collect().await.ok()?.to_bytes();
    serde_json::from_slice(&body).ok()
}

/// Parse `/kjv/{book}/{chapter}/{verse}` into its three numeric segments
fn parse_verse_path(path: &str) -> Option<(i64, i64, i64)> {
    let mut parts = path.trim_start_matches('/').split('/');
    if parts.next() != Some("kjv") {
        return None;
    }

    let book = parts.next()?.parse().ok()?;
    let chapter = parts.next()?.parse().ok()?;
    let verse = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some((book, chapter, verse))
}
