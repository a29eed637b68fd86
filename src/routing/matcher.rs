//! Route pattern matching
//!
//! Shell-glob style path patterns: a pattern is split on `/`, a literal
//! segment matches only itself, and `*` matches exactly one non-empty
//! segment. A wildcard never spans a `/`.

/// A parsed glob path pattern such as `/kjv/*/*/*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Wildcard,
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .trim_matches('/')
            .split('/')
            .map(|seg| {
                if seg == "*" {
                    Segment::Wildcard
                } else {
                    Segment::Literal(seg.to_string())
                }
            })
            .collect();

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Test a request path against this pattern
    pub fn matches(&self, path: &str) -> bool {
        let path = path.trim_start_matches('/');
        let parts: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        if parts.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(parts)
            .all(|(segment, part)| match segment {
                Segment::Literal(literal) => literal == part,
                Segment::Wildcard => !part.is_empty(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern_matches_itself_only() {
        let pattern = Pattern::parse("/kjv/get_verse");
        assert!(pattern.matches("/kjv/get_verse"));
        assert!(!pattern.matches("/kjv/get_chapter"));
        assert!(!pattern.matches("/kjv/get_verse/extra"));
        assert!(!pattern.matches("/kjv"));
    }

    #[test]
    fn test_wildcard_matches_one_segment() {
        let pattern = Pattern::parse("/kjv/*/*/*");
        assert!(pattern.matches("/kjv/1/2/3"));
        assert!(pattern.matches("/kjv/43/3/16"));
        assert!(!pattern.matches("/kjv/1/2"));
        assert!(!pattern.matches("/kjv/1/2/3/4"));
        assert!(!pattern.matches("/other/1/2/3"));
    }

    #[test]
    fn test_wildcard_rejects_empty_segment() {
        let pattern = Pattern::parse("/kjv/*/*/*");
        assert!(!pattern.matches("/kjv//2/3"));
        assert!(!pattern.matches("/kjv/1/2/"));
    }

    #[test]
    fn test_trailing_slash_is_an_extra_segment() {
        let pattern = Pattern::parse("/routes");
        assert!(pattern.matches("/routes"));
        assert!(!pattern.matches("/routes/"));
    }

    #[test]
    fn test_root_path_matches_nothing_in_table() {
        let pattern = Pattern::parse("/kjv/*/*/*");
        assert!(!pattern.matches("/"));
        assert!(!pattern.matches(""));
    }

    #[test]
    fn test_wildcard_segments_keep_raw_text() {
        let pattern = Pattern::parse("/kjv/*/*/*");
        assert_eq!(pattern.as_str(), "/kjv/*/*/*");
    }
}
