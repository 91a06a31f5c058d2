//! # Context Scope
//!
//! Resolves scoped markdown context documents for a query.
//!
//! Documents live under two roots: a shared **hub** and a project-local
//! **context** directory. Each document declares the scopes it covers in a
//! `## Scope` section. Given a query scope such as `api/auth` or `api/*`,
//! the resolver finds every document with a matching scope, orders them
//! (hub first, then by category, then by path) and renders them as a
//! concatenated bundle, a listing, or JSON.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────────┐   ┌──────────┐
//! │ Scanner  │──▶│ Extractor │──▶│ Matcher  │──▶│ Resolver │──▶ render
//! │ hub/local│   │ ## Scope  │   │ api/*    │   │ sort     │
//! └──────────┘   └───────────┘   └──────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! ctx-scope resolve api/auth                       # bundle from ./context
//! ctx-scope resolve 'api/*' --hub ~/hub --format list
//! ctx-scope roots                                  # root health
//! ctx-scope scopes                                 # every declared scope
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`scanner`] | Recursive markdown discovery |
//! | [`scope`] | `## Scope` section extraction |
//! | [`matcher`] | Wildcard-aware scope matching |
//! | [`category`] | Category ordering weights |
//! | [`resolve`] | Two-root resolution and ordering |
//! | [`render`] | Bundle, list, and JSON output |
//! | [`roots`] | Root health listing |
//! | [`index`] | Declared scope index |

pub mod category;
pub mod config;
pub mod index;
pub mod matcher;
pub mod models;
pub mod render;
pub mod resolve;
pub mod roots;
pub mod scanner;
pub mod scope;
