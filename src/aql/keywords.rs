//! Reserved words of the query language.
//!
//! Identifiers that collide with one of these must be quoted with backticks
//! when rendered. Matching is case-insensitive, as it is in the lexer of the
//! query engine.

const KEYWORDS: &[&str] = &[
    "AGGREGATE",
    "ALL",
    "AND",
    "ANY",
    "ASC",
    "COLLECT",
    "DESC",
    "DISTINCT",
    "FALSE",
    "FILTER",
    "FOR",
    "GRAPH",
    "IN",
    "INBOUND",
    "INSERT",
    "INTO",
    "K_SHORTEST_PATHS",
    "LET",
    "LIKE",
    "LIMIT",
    "NONE",
    "NOT",
    "NULL",
    "OR",
    "OUTBOUND",
    "PRUNE",
    "REMOVE",
    "REPLACE",
    "RETURN",
    "SEARCH",
    "SHORTEST_PATH",
    "SORT",
    "TRUE",
    "UPDATE",
    "UPSERT",
    "WINDOW",
    "WITH",
];

/// Returns true if `word` is a reserved word, ignoring case.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(word))
}
