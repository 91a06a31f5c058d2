//! Output rendering for resolved documents.
//!
//! | Format | Output |
//! |--------|--------|
//! | `bundle` | Each document's raw content behind a delimiter comment |
//! | `list` | One summary line per document between banners |
//! | `json` | Pretty-printed array of document records |
//!
//! Bundle output re-reads every file rather than reusing the text read
//! during extraction.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::warn;

use crate::models::{ContextDocument, Origin, OutputFormat};

const BANNER_WIDTH: usize = 60;

/// Render `documents` (already ordered) for the query `query`.
pub fn render(query: &str, documents: &[ContextDocument], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Bundle => Ok(render_bundle(documents)),
        OutputFormat::List => Ok(render_list(query, documents)),
        OutputFormat::Json => render_json(documents),
    }
}

/// Delimiter line written before each document in a bundle.
pub fn bundle_delimiter(doc: &ContextDocument) -> String {
    format!("<!-- ctx-scope: [{}] {} -->", doc.origin, doc.relative_path)
}

fn render_bundle(documents: &[ContextDocument]) -> String {
    let mut out = String::new();
    for doc in documents {
        let content = match std::fs::read_to_string(&doc.absolute_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Skipping {} in bundle, re-read failed: {}",
                    doc.absolute_path.display(),
                    e
                );
                continue;
            }
        };

        out.push_str(&bundle_delimiter(doc));
        out.push('\n');
        out.push_str(&content);
        if !content.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

fn render_list(query: &str, documents: &[ContextDocument]) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Context documents for scope: {}", query);
    let _ = writeln!(out, "{}", rule);

    for doc in documents {
        let tag = format!("[{}]", doc.origin);
        let _ = writeln!(
            out,
            "{:<8} {}  ({})",
            tag,
            doc.relative_path,
            doc.declared_scopes.join(", ")
        );
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "{} document{} matched",
        documents.len(),
        if documents.len() == 1 { "" } else { "s" }
    );
    out
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    origin: Origin,
    relative_path: &'a str,
    absolute_path: String,
    declared_scopes: &'a [String],
    category: Option<&'a str>,
    category_weight: u32,
}

fn render_json(documents: &[ContextDocument]) -> Result<String> {
    let records: Vec<JsonDocument> = documents
        .iter()
        .map(|doc| JsonDocument {
            origin: doc.origin,
            relative_path: &doc.relative_path,
            absolute_path: doc.absolute_path.display().to_string(),
            declared_scopes: &doc.declared_scopes,
            category: doc.category,
            category_weight: doc.category_weight,
        })
        .collect();

    let mut json = serde_json::to_string_pretty(&records)?;
    json.push('\n');
    Ok(json)
}
