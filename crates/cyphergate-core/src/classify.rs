//! Lexical read/write classification of Cypher text.
//!
//! This is a keyword scan, not a parser: a mutating keyword inside a string
//! literal, a property name (`n.set`), or a label (`:Set`) still classifies
//! the query as a write.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::QueryIntent;

static WRITE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(MERGE|CREATE|SET|DELETE|REMOVE|ADD)\b").expect("static regex")
});

/// Classify query text as [`QueryIntent::Write`] if it contains any mutating
/// keyword as a whole word, [`QueryIntent::Read`] otherwise.
pub fn classify(text: &str) -> QueryIntent {
    if WRITE_KEYWORDS.is_match(text) {
        QueryIntent::Write
    } else {
        QueryIntent::Read
    }
}
