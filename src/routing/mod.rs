//! Routing module
//!
//! Maintains the ordered (pattern, handler) table the dispatcher matches
//! request paths against. First match wins, so list order is significant.

mod matcher;

pub use matcher::Pattern;

use std::fmt::Write;

/// Concrete handlers a route can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteHandler {
    /// Single verse addressed by JSON body
    Verse,
    /// Whole chapter addressed by JSON body
    Chapter,
    /// Inclusive verse range addressed by JSON body
    Passage,
    /// Single verse addressed by path segments
    VersePath,
    /// Plain-text listing of this table
    RouteList,
}

impl RouteHandler {
    /// One-line summary shown by `GET /routes`
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Verse => "POST {book, chapter, verse}",
            Self::Chapter => "POST {book, chapter}",
            Self::Passage => "POST {book, start_chapter, start_verse, end_chapter, end_verse}",
            Self::VersePath => "GET /kjv/{book}/{chapter}/{verse}",
            Self::RouteList => "GET, this listing",
        }
    }
}

/// A single table entry
pub struct Route {
    pub pattern: Pattern,
    pub handler: RouteHandler,
}

impl Route {
    fn new(pattern: &str, handler: RouteHandler) -> Self {
        Self {
            pattern: Pattern::parse(pattern),
            handler,
        }
    }
}

/// Ordered route table
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The verse service's fixed table
    pub fn kjv() -> Self {
        Self {
            routes: vec![
                Route::new("/kjv/get_verse", RouteHandler::Verse),
                Route::new("/kjv/get_chapter", RouteHandler::Chapter),
                Route::new("/kjv/get_passage", RouteHandler::Passage),
                Route::new("/kjv/*/*/*", RouteHandler::VersePath),
                Route::new("/routes", RouteHandler::RouteList),
            ],
        }
    }

    /// Find the first route whose pattern matches `path`
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.pattern.matches(path))
    }

    /// Plain-text listing served by `GET /routes`
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for route in &self.routes {
            let _ = writeln!(
                out,
                "{:<20} {}",
                route.pattern.as_str(),
                route.handler.summary()
            );
        }
        out
    }
}
