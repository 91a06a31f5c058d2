//! # Context Scope CLI (`ctx-scope`)
//!
//! Resolves the markdown context documents that apply to a scope and prints
//! them, by default as one concatenated bundle ready to hand to another tool.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ctx-scope resolve <scope>` | Print documents whose declared scopes match |
//! | `ctx-scope roots` | Show the hub and local roots and their status |
//! | `ctx-scope scopes` | List every declared scope and its documents |
//! | `ctx-scope completions <shell>` | Print a shell completion script |
//!
//! ## Examples
//!
//! ```bash
//! # Bundle everything relevant to authentication
//! ctx-scope resolve api/auth
//!
//! # Summarise a whole subtree across a shared hub
//! ctx-scope resolve 'api/*' --hub ~/context-hub --format list
//! ```
//!
//! Output goes to stdout; warnings and errors go to stderr. The exit status
//! is non-zero only for a bad invocation. Finding nothing is not an error.

use anyhow::{bail, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use context_scope::config::{self, Config};
use context_scope::models::{OutputFormat, ResolveRequest};
use context_scope::{index, render, resolve, roots};

/// Context Scope: resolve scoped markdown context from a hub and a local
/// context directory.
#[derive(Parser)]
#[command(
    name = "ctx-scope",
    about = "Resolve scoped markdown context documents from a hub and a local context directory",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When omitted, `./ctx-scope.toml` is used if it exists, otherwise
    /// built-in defaults apply.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Root overrides shared by every command that reads documents.
#[derive(Args)]
struct RootArgs {
    /// Shared hub directory. Overrides `[roots].hub`.
    #[arg(long)]
    hub: Option<PathBuf>,

    /// Project-local context directory. Overrides `[roots].local`
    /// (default `./context`).
    #[arg(long)]
    local: Option<PathBuf>,
}

impl RootArgs {
    fn hub(&self, cfg: &Config) -> Option<PathBuf> {
        self.hub.clone().or_else(|| cfg.roots.hub.clone())
    }

    fn local(&self, cfg: &Config) -> PathBuf {
        self.local.clone().unwrap_or_else(|| cfg.roots.local.clone())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print every document whose declared scopes match SCOPE.
    ///
    /// SCOPE is a `/`-delimited path such as `api/auth`. A trailing `/*`
    /// requests a subtree and a bare `*` matches every scoped document.
    Resolve {
        /// The scope to resolve.
        scope: String,

        #[command(flatten)]
        roots: RootArgs,

        /// Output format. Overrides `[output].format` (default `bundle`).
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show the configured roots, whether they exist, and how many
    /// markdown files each holds.
    Roots {
        #[command(flatten)]
        roots: RootArgs,
    },

    /// List every declared scope across both roots.
    Scopes {
        #[command(flatten)]
        roots: RootArgs,
    },

    /// Print a shell completion script to stdout.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Commands that don't need config
    match &cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "ctx-scope", &mut io::stdout());
            return Ok(());
        }
        Commands::Resolve { scope, .. } if scope.trim().is_empty() => {
            bail!("Scope must not be empty. Usage: ctx-scope resolve <SCOPE>");
        }
        _ => {}
    }

    let cfg = config::resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve {
            scope,
            roots: args,
            format,
        } => {
            let request = ResolveRequest {
                query_scope: scope.trim().to_string(),
                hub_root: args.hub(&cfg),
                local_root: args.local(&cfg),
                output_format: format.unwrap_or(cfg.output.format),
            };
            run_resolve(&request, &cfg)?;
        }
        Commands::Roots { roots: args } => {
            roots::list_roots(args.hub(&cfg).as_deref(), &args.local(&cfg), &cfg.scan)?;
        }
        Commands::Scopes { roots: args } => {
            index::run_scopes(args.hub(&cfg).as_deref(), &args.local(&cfg), &cfg.scan)?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}

fn run_resolve(request: &ResolveRequest, cfg: &Config) -> Result<()> {
    let resolution = resolve::resolve(request, &cfg.scan)?;

    if resolution.is_empty() {
        eprintln!("No documents matched scope '{}'.", request.query_scope);
        if request.output_format != OutputFormat::Json {
            return Ok(());
        }
    }

    let out = render::render(
        &request.query_scope,
        &resolution.documents,
        request.output_format,
    )?;
    write_stdout(&out)
}

/// Write to stdout, treating a closed pipe (e.g. `| head`) as success.
fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .without_time()
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(io::stderr)
        .init();
}
