//! Resolution of a scope query across the hub and local roots.
//!
//! Each root is scanned, every markdown file is read once to extract its
//! declared scopes, and files with at least one matching scope are kept.
//! Hub results always come before local results; within a root, documents
//! are ordered by category weight and then by relative path.

use anyhow::{bail, Result};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::category;
use crate::config::ScanConfig;
use crate::matcher;
use crate::models::{ContextDocument, MissingRoot, Origin, ResolveRequest, Resolution};
use crate::scanner::{ScannedFile, Scanner};
use crate::scope;

/// A scanned file together with the scopes it declares.
#[derive(Debug, Clone)]
pub struct ScopedFile {
    pub file: ScannedFile,
    pub declared_scopes: Vec<String>,
}

/// Resolve `request` against its roots.
///
/// Missing roots are reported as warnings and recorded in the
/// [`Resolution`]; they are never an error. An empty result is success.
pub fn resolve(request: &ResolveRequest, scan_config: &ScanConfig) -> Result<Resolution> {
    let query = request.query_scope.trim();
    if query.is_empty() {
        bail!("Scope query must not be empty");
    }

    let scanner = Scanner::new(scan_config)?;
    let mut resolution = Resolution::default();

    for (origin, root) in roots_of(request) {
        if !root.is_dir() {
            warn!(
                "{} root does not exist, skipping: {}",
                origin,
                root.display()
            );
            resolution.missing_roots.push(MissingRoot {
                origin,
                path: root.to_path_buf(),
            });
            continue;
        }

        let mut documents: Vec<ContextDocument> = load_root(&scanner, root)
            .into_iter()
            .filter(|scoped| matcher::matches_any(&scoped.declared_scopes, query))
            .map(|scoped| into_document(scoped, origin))
            .collect();
        sort_documents(&mut documents);

        info!(
            "{} root {}: {} documents match '{}'",
            origin,
            root.display(),
            documents.len(),
            query
        );
        resolution.documents.extend(documents);
    }

    Ok(resolution)
}

/// The roots of a request in output order: hub (if configured), then local.
pub fn roots_of(request: &ResolveRequest) -> Vec<(Origin, &Path)> {
    let mut roots = Vec::with_capacity(2);
    if let Some(hub) = &request.hub_root {
        roots.push((Origin::Hub, hub.as_path()));
    }
    roots.push((Origin::Local, request.local_root.as_path()));
    roots
}

/// Scan `root` and extract the declared scopes of every file.
///
/// Files that cannot be read as UTF-8 text are logged and skipped.
pub fn load_root(scanner: &Scanner, root: &Path) -> Vec<ScopedFile> {
    scanner
        .scan(root)
        .into_iter()
        .filter_map(|file| match std::fs::read_to_string(&file.absolute_path) {
            Ok(text) => {
                let declared_scopes = scope::extract_scopes(&text);
                debug!("{}: scopes {:?}", file.relative_path, declared_scopes);
                Some(ScopedFile {
                    file,
                    declared_scopes,
                })
            }
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", file.absolute_path.display(), e);
                None
            }
        })
        .collect()
}

fn into_document(scoped: ScopedFile, origin: Origin) -> ContextDocument {
    let classified = category::classify(&scoped.file.relative_path);
    ContextDocument {
        absolute_path: scoped.file.absolute_path,
        relative_path: scoped.file.relative_path,
        declared_scopes: scoped.declared_scopes,
        origin,
        category: classified.map(|(name, _)| name),
        category_weight: classified
            .map(|(_, weight)| weight)
            .unwrap_or(category::UNCATEGORIZED_WEIGHT),
    }
}

/// Within-root order: category weight, then relative path.
pub fn sort_documents(documents: &mut [ContextDocument]) {
    documents.sort_by(|a, b| {
        a.category_weight
            .cmp(&b.category_weight)
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_doc(root: &Path, relative: &str, scopes: &[&str]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut body = format!("# {}\n\n## Scope\n", relative);
        for s in scopes {
            body.push_str(&format!("- {}\n", s));
        }
        body.push_str("\n## Details\n\nBody text.\n");
        fs::write(path, body).unwrap();
    }

    fn request(query: &str, hub: Option<PathBuf>, local: PathBuf) -> ResolveRequest {
        ResolveRequest {
            query_scope: query.to_string(),
            hub_root: hub,
            local_root: local,
            output_format: OutputFormat::List,
        }
    }

    fn paths(resolution: &Resolution) -> Vec<(Origin, String)> {
        resolution
            .documents
            .iter()
            .map(|d| (d.origin, d.relative_path.clone()))
            .collect()
    }

    #[test]
    fn test_hub_precedes_local_regardless_of_weight() {
        let tmp = TempDir::new().unwrap();
        let hub = tmp.path().join("hub");
        let local = tmp.path().join("local");
        write_doc(&hub, "architecture/api.md", &["api/*"]);
        write_doc(&local, "decisions/auth.md", &["api/auth"]);

        let resolution = resolve(
            &request("api/auth", Some(hub), local),
            &ScanConfig::default(),
        )
        .unwrap();

        assert_eq!(
            paths(&resolution),
            vec![
                (Origin::Hub, "architecture/api.md".to_string()),
                (Origin::Local, "decisions/auth.md".to_string()),
            ]
        );
        assert_eq!(resolution.documents[0].category, Some("architecture"));
        assert_eq!(resolution.documents[1].category_weight, 0);
        assert!(resolution.missing_roots.is_empty());
    }

    #[test]
    fn test_within_root_order() {
        let tmp = TempDir::new().unwrap();
        let local = tmp.path().join("local");
        write_doc(&local, "zz/notes.md", &["api"]);
        write_doc(&local, "playbooks/b.md", &["api"]);
        write_doc(&local, "decisions/b.md", &["api"]);
        write_doc(&local, "decisions/a.md", &["api"]);
        write_doc(&local, "aa/notes.md", &["api"]);
        write_doc(&local, "architecture/x.md", &["billing"]);

        let resolution = resolve(&request("api", None, local), &ScanConfig::default()).unwrap();
        let rels: Vec<String> = paths(&resolution).into_iter().map(|(_, p)| p).collect();
        assert_eq!(
            rels,
            vec![
                "decisions/a.md",
                "decisions/b.md",
                "playbooks/b.md",
                "aa/notes.md",
                "zz/notes.md",
            ]
        );
    }

    #[test]
    fn test_missing_hub_is_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let hub = tmp.path().join("no-such-hub");
        let local = tmp.path().join("local");
        write_doc(&local, "decisions/auth.md", &["api/auth"]);

        let resolution = resolve(
            &request("api/auth", Some(hub.clone()), local),
            &ScanConfig::default(),
        )
        .unwrap();

        assert_eq!(resolution.documents.len(), 1);
        assert_eq!(resolution.documents[0].origin, Origin::Local);
        assert_eq!(
            resolution.missing_roots,
            vec![MissingRoot {
                origin: Origin::Hub,
                path: hub
            }]
        );
    }

    #[test]
    fn test_missing_local_is_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let resolution = resolve(
            &request("api", None, tmp.path().join("context")),
            &ScanConfig::default(),
        )
        .unwrap();
        assert!(resolution.is_empty());
        assert_eq!(resolution.missing_roots.len(), 1);
        assert_eq!(resolution.missing_roots[0].origin, Origin::Local);
    }

    #[test]
    fn test_same_relative_path_in_both_roots_kept_twice() {
        let tmp = TempDir::new().unwrap();
        let hub = tmp.path().join("hub");
        let local = tmp.path().join("local");
        write_doc(&hub, "decisions/shared.md", &["api"]);
        write_doc(&local, "decisions/shared.md", &["api"]);

        let resolution =
            resolve(&request("api", Some(hub), local), &ScanConfig::default()).unwrap();
        assert_eq!(
            paths(&resolution),
            vec![
                (Origin::Hub, "decisions/shared.md".to_string()),
                (Origin::Local, "decisions/shared.md".to_string()),
            ]
        );
        assert_ne!(
            resolution.documents[0].absolute_path,
            resolution.documents[1].absolute_path
        );
    }

    #[test]
    fn test_unscoped_documents_never_match() {
        let tmp = TempDir::new().unwrap();
        let local = tmp.path().join("local");
        fs::create_dir_all(&local).unwrap();
        fs::write(local.join("plain.md"), "# Plain\n\nNo scope here.\n").unwrap();

        let resolution = resolve(&request("*", None, local), &ScanConfig::default()).unwrap();
        assert!(resolution.is_empty());
    }

    #[test]
    fn test_declared_scopes_keep_source_order() {
        let tmp = TempDir::new().unwrap();
        let local = tmp.path().join("local");
        write_doc(&local, "a.md", &["zeta", "api/*", "alpha"]);

        let resolution =
            resolve(&request("api/users", None, local), &ScanConfig::default()).unwrap();
        assert_eq!(
            resolution.documents[0].declared_scopes,
            vec!["zeta", "api/*", "alpha"]
        );
    }

    #[test]
    fn test_blank_query_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = resolve(&request("   ", None, tmp.path().to_path_buf()), &ScanConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_non_utf8_file_skipped() {
        let tmp = TempDir::new().unwrap();
        let local = tmp.path().join("local");
        write_doc(&local, "good.md", &["api"]);
        fs::write(local.join("bad.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let resolution = resolve(&request("api", None, local), &ScanConfig::default()).unwrap();
        assert_eq!(paths(&resolution).len(), 1);
        assert_eq!(resolution.documents[0].relative_path, "good.md");
    }
}
