//! Index of every declared scope, shown by `ctx-scope scopes`.
//!
//! Gives a quick view of which scopes the hub and local roots cover, which
//! helps when choosing a query. Documents with no `## Scope` section are
//! counted separately since no query can reach them.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use crate::config::ScanConfig;
use crate::models::Origin;
use crate::resolve::load_root;
use crate::scanner::Scanner;

/// Documents declaring one scope, keyed by origin then relative path.
#[derive(Debug, Clone, Default)]
pub struct ScopeIndex {
    pub scopes: BTreeMap<String, Vec<(Origin, String)>>,
    pub unscoped: Vec<(Origin, String)>,
}

pub fn build_index(
    hub: Option<&Path>,
    local: &Path,
    scan_config: &ScanConfig,
) -> Result<ScopeIndex> {
    let scanner = Scanner::new(scan_config)?;
    let mut index = ScopeIndex::default();

    let roots = hub
        .map(|h| (Origin::Hub, h))
        .into_iter()
        .chain(std::iter::once((Origin::Local, local)));

    for (origin, root) in roots {
        if !root.is_dir() {
            warn!("{} root does not exist, skipping: {}", origin, root.display());
            continue;
        }
        for scoped in load_root(&scanner, root) {
            let rel = scoped.file.relative_path;
            if scoped.declared_scopes.is_empty() {
                index.unscoped.push((origin, rel));
                continue;
            }
            for scope in scoped.declared_scopes {
                index
                    .scopes
                    .entry(scope)
                    .or_default()
                    .push((origin, rel.clone()));
            }
        }
    }

    for documents in index.scopes.values_mut() {
        documents.sort();
        documents.dedup();
    }
    index.unscoped.sort();

    Ok(index)
}

pub fn run_scopes(hub: Option<&Path>, local: &Path, scan_config: &ScanConfig) -> Result<()> {
    let index = build_index(hub, local, scan_config)?;

    if index.scopes.is_empty() && index.unscoped.is_empty() {
        println!("No documents found.");
        return Ok(());
    }

    println!("Declared scopes");
    println!("===============");
    for (scope, documents) in &index.scopes {
        println!();
        println!("{}  ({})", scope, documents.len());
        for (origin, rel) in documents {
            println!("  [{}] {}", origin, rel);
        }
    }

    if !index.unscoped.is_empty() {
        println!();
        println!("Unscoped documents: {}", index.unscoped.len());
        for (origin, rel) in &index.unscoped {
            println!("  [{}] {}", origin, rel);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_index() {
        let tmp = TempDir::new().unwrap();
        let hub = tmp.path().join("hub");
        let local = tmp.path().join("local");
        fs::create_dir_all(&hub).unwrap();
        fs::create_dir_all(&local).unwrap();
        fs::write(hub.join("a.md"), "## Scope\n- api/*\n- billing\n").unwrap();
        fs::write(local.join("b.md"), "## Scope\n- api/*\n").unwrap();
        fs::write(local.join("c.md"), "# No scope\n").unwrap();

        let index = build_index(Some(&hub), &local, &ScanConfig::default()).unwrap();
        assert_eq!(
            index.scopes.keys().cloned().collect::<Vec<_>>(),
            vec!["api/*", "billing"]
        );
        assert_eq!(
            index.scopes["api/*"],
            vec![
                (Origin::Hub, "a.md".to_string()),
                (Origin::Local, "b.md".to_string())
            ]
        );
        assert_eq!(index.unscoped, vec![(Origin::Local, "c.md".to_string())]);
    }

    #[test]
    fn test_missing_roots_give_empty_index() {
        let tmp = TempDir::new().unwrap();
        let index = build_index(None, &tmp.path().join("none"), &ScanConfig::default()).unwrap();
        assert!(index.scopes.is_empty());
        assert!(index.unscoped.is_empty());
    }
}
