//! Command handlers for the `appfinder` binary.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::icons::{IconCache, IconResolver};
use crate::models::{AppCatalog, Application};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // By default, only log from the appfinder crate at info level
    // Users can override with RUST_LOG environment variable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("appfinder=info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Run a command.
pub fn run(cli: Cli) -> Result<()> {
    init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "Starting appfinder");

    crate::config::init_config();
    let catalog = AppCatalog::from_apps(crate::discovery::discover());

    match cli.command {
        Commands::List { json, query } => list(&catalog, json, query.as_deref().unwrap_or("")),
        Commands::Icon { name, output } => write_icon(find(&catalog, &name)?, output),
        Commands::Launch { name } => {
            crate::process::launch(find(&catalog, &name)?)?;
            Ok(())
        }
    }
}

fn find<'a>(catalog: &'a AppCatalog, name: &str) -> Result<&'a Application> {
    catalog
        .find_by_name(name)
        .with_context(|| format!("No application named '{}'", name))
}

fn list(catalog: &AppCatalog, json: bool, query: &str) -> Result<()> {
    let apps = catalog.filter(query);
    let mut out = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &apps)?;
        writeln!(out)?;
        return Ok(());
    }

    let width = apps.iter().map(|a| a.name.chars().count()).max().unwrap_or(0);
    for app in apps {
        writeln!(out, "{:<width$}  {}", app.name, app.exec)?;
    }
    Ok(())
}

fn write_icon(app: &Application, output: Option<PathBuf>) -> Result<()> {
    let resolver = IconResolver::new(Arc::new(IconCache::new()));
    let icon = resolver
        .resolve_icon(app)
        .with_context(|| format!("No icon found for '{}'", app.name))?;

    let path = output.unwrap_or_else(|| PathBuf::from(&icon.name));
    std::fs::write(&path, &icon.data)
        .with_context(|| format!("Failed to write icon to {:?}", path))?;

    println!("{}", path.display());
    Ok(())
}
