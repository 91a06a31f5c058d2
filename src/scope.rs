//! Extraction of declared scopes from a document's `## Scope` section.
//!
//! A document declares its scopes as a markdown list under a level-2
//! `## Scope` heading:
//!
//! ```markdown
//! ## Scope
//! - api/auth
//! - `api/users`
//! ```
//!
//! Only the first such section is read. The section ends at the next
//! level-1 or level-2 heading; prose and deeper headings inside it are
//! ignored.

/// Position of the line scanner relative to the scope section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside,
    Done,
}

/// Return the scopes declared in `text`, in source order.
pub fn extract_scopes(text: &str) -> Vec<String> {
    let mut scopes = Vec::new();
    let mut state = ScanState::Outside;

    for line in text.lines() {
        state = match state {
            ScanState::Outside => {
                if is_scope_heading(line) {
                    ScanState::Inside
                } else {
                    ScanState::Outside
                }
            }
            ScanState::Inside => {
                if is_section_break(line) {
                    ScanState::Done
                } else {
                    if let Some(item) = list_item_text(line) {
                        let scope = item.trim().replace('`', "");
                        let scope = scope.trim();
                        if !scope.is_empty() {
                            scopes.push(scope.to_string());
                        }
                    }
                    ScanState::Inside
                }
            }
            ScanState::Done => break,
        };
    }

    scopes
}

fn is_scope_heading(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("## scope")
}

/// A level-1 or level-2 ATX heading.
fn is_section_break(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed == "#"
        || trimmed == "##"
        || trimmed.starts_with("# ")
        || trimmed.starts_with("## ")
        || trimmed.starts_with("#\t")
        || trimmed.starts_with("##\t")
}

/// Text after a `-` or `*` bullet followed by whitespace.
fn list_item_text(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let rest = rest.strip_prefix('-').or_else(|| rest.strip_prefix('*'))?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let text = rest.trim_start_matches([' ', '\t']);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
