//! Health of the configured roots, shown by `ctx-scope roots`.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::models::Origin;
use crate::scanner::Scanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootState {
    Ok,
    Missing,
    NotConfigured,
}

impl RootState {
    pub fn label(&self) -> &'static str {
        match self {
            RootState::Ok => "OK",
            RootState::Missing => "MISSING",
            RootState::NotConfigured => "NOT CONFIGURED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RootStatus {
    pub origin: Origin,
    pub path: Option<PathBuf>,
    pub state: RootState,
    pub markdown_files: usize,
}

pub fn get_roots(
    hub: Option<&Path>,
    local: &Path,
    scan_config: &ScanConfig,
) -> Result<Vec<RootStatus>> {
    let scanner = Scanner::new(scan_config)?;

    let hub_status = match hub {
        Some(path) => status_of(&scanner, Origin::Hub, path),
        None => RootStatus {
            origin: Origin::Hub,
            path: None,
            state: RootState::NotConfigured,
            markdown_files: 0,
        },
    };

    Ok(vec![hub_status, status_of(&scanner, Origin::Local, local)])
}

fn status_of(scanner: &Scanner, origin: Origin, path: &Path) -> RootStatus {
    let (state, markdown_files) = if path.is_dir() {
        (RootState::Ok, scanner.scan(path).len())
    } else {
        (RootState::Missing, 0)
    };
    RootStatus {
        origin,
        path: Some(path.to_path_buf()),
        state,
        markdown_files,
    }
}

pub fn list_roots(hub: Option<&Path>, local: &Path, scan_config: &ScanConfig) -> Result<()> {
    let roots = get_roots(hub, local, scan_config)?;

    println!("{:<8} {:<16} {:<7} PATH", "ROOT", "STATUS", "FILES");
    for root in &roots {
        let path = root
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<16} {:<7} {}",
            root.origin.as_str(),
            root.state.label(),
            root.markdown_files,
            path
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_roots_status() {
        let tmp = TempDir::new().unwrap();
        let local = tmp.path().join("context");
        fs::create_dir_all(local.join("decisions")).unwrap();
        fs::write(local.join("decisions/a.md"), "x").unwrap();
        fs::write(local.join("b.md"), "x").unwrap();

        let roots = get_roots(None, &local, &ScanConfig::default()).unwrap();
        assert_eq!(roots[0].origin, Origin::Hub);
        assert_eq!(roots[0].state, RootState::NotConfigured);
        assert_eq!(roots[1].state, RootState::Ok);
        assert_eq!(roots[1].markdown_files, 2);
    }

    #[test]
    fn test_missing_hub_reported() {
        let tmp = TempDir::new().unwrap();
        let hub = tmp.path().join("hub");
        let roots = get_roots(Some(&hub), tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(roots[0].state, RootState::Missing);
        assert_eq!(roots[0].state.label(), "MISSING");
        assert_eq!(roots[0].path.as_deref(), Some(hub.as_path()));
    }
}
