//! Recursive markdown discovery under a single root.
//!
//! Walks the root with `walkdir`, keeps regular files whose root-relative
//! path matches the include globs and none of the exclude globs. Entries the
//! walker cannot read (permission errors, symlink loops) are logged and
//! skipped so one bad subtree never aborts a resolution.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ScanConfig;

const DEFAULT_EXCLUDES: &[&str] = &["**/.git/**", "**/node_modules/**"];

/// A markdown file found under a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub absolute_path: PathBuf,
    pub relative_path: String,
}

/// Compiled include/exclude filters, built once and reused for every root.
pub struct Scanner {
    include_set: GlobSet,
    exclude_set: GlobSet,
    follow_symlinks: bool,
}

impl Scanner {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let include_set = build_globset(&config.include_globs)?;

        let mut excludes: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
        excludes.extend(config.exclude_globs.iter().cloned());
        let exclude_set = build_globset(&excludes)?;

        Ok(Self {
            include_set,
            exclude_set,
            follow_symlinks: config.follow_symlinks,
        })
    }

    /// List every matching file beneath `root`.
    ///
    /// A nonexistent root yields an empty list; reporting it is the
    /// caller's job.
    pub fn scan(&self, root: &Path) -> Vec<ScannedFile> {
        if !root.is_dir() {
            return Vec::new();
        }

        let mut files = Vec::new();

        let walker = WalkDir::new(root).follow_links(self.follow_symlinks);
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let at = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string());
                    warn!("Skipping unreadable entry {}: {}", at, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            let rel_str = to_slash_path(relative);

            if self.exclude_set.is_match(&rel_str) {
                continue;
            }
            if !self.include_set.is_match(&rel_str) {
                continue;
            }

            files.push(ScannedFile {
                absolute_path: path.to_path_buf(),
                relative_path: rel_str,
            });
        }

        debug!("Scanned {}: {} markdown files", root.display(), files.len());
        files
    }
}

/// Join a relative path's normal components with `/`.
fn to_slash_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid glob: '{}'", pattern))?);
    }
    Ok(builder.build()?)
}
