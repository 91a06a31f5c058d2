//! Wildcard-aware matching between a declared scope and a query scope.
//!
//! Scopes are `/`-delimited paths such as `api/auth`. A trailing `/*`
//! denotes a subtree and a bare `*` is global. The relation is not
//! symmetric: a document scoped `api/*` answers the query `api/auth`, and a
//! document scoped `api/auth` answers the query `api/*`, but a document
//! scoped `api/auth` does not answer the query `api`.

/// The global wildcard.
pub const GLOBAL: &str = "*";

const SUBTREE_SUFFIX: &str = "/*";

/// Does a document declaring `declared` satisfy a request for `query`?
pub fn matches(declared: &str, query: &str) -> bool {
    if declared == GLOBAL || query == GLOBAL {
        return true;
    }

    if declared == query {
        return true;
    }

    if let Some(prefix) = declared.strip_suffix(SUBTREE_SUFFIX) {
        if is_within(query, prefix) {
            return true;
        }
    }

    if let Some(prefix) = query.strip_suffix(SUBTREE_SUFFIX) {
        if is_within(declared, prefix) {
            return true;
        }
        if declared.strip_suffix(SUBTREE_SUFFIX) == Some(prefix) {
            return true;
        }
    }

    false
}

/// Does any of `declared` satisfy `query`?
pub fn matches_any<S: AsRef<str>>(declared: &[S], query: &str) -> bool {
    declared.iter().any(|scope| matches(scope.as_ref(), query))
}

/// `scope` equals `prefix` or lies beneath it (`prefix/...`).
fn is_within(scope: &str, prefix: &str) -> bool {
    match scope.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
