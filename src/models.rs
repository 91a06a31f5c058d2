//! Core data models used throughout the scope resolver.
//!
//! These types describe a resolution request and the documents it
//! produces. Everything here is built fresh per invocation and dropped
//! once output has been written.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which root a document was discovered under.
///
/// The derived ordering places `Hub` before `Local`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Hub,
    Local,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Hub => "hub",
            Origin::Local => "local",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How resolved documents are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Concatenated raw content of every matched document.
    #[default]
    Bundle,
    /// One summary line per matched document.
    List,
    /// Machine-readable array of matched documents.
    Json,
}

/// A markdown document whose declared scopes matched the query.
#[derive(Debug, Clone)]
pub struct ContextDocument {
    pub absolute_path: PathBuf,
    /// Root-relative, `/`-separated on every platform.
    pub relative_path: String,
    pub declared_scopes: Vec<String>,
    pub origin: Origin,
    pub category: Option<&'static str>,
    pub category_weight: u32,
}

/// A single resolution query with its roots already resolved.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub query_scope: String,
    pub hub_root: Option<PathBuf>,
    pub local_root: PathBuf,
    pub output_format: OutputFormat,
}

/// A configured root that was not found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRoot {
    pub origin: Origin,
    pub path: PathBuf,
}

/// Result of a resolution: ordered documents plus the roots that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub documents: Vec<ContextDocument>,
    pub missing_roots: Vec<MissingRoot>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
