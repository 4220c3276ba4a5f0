//! lingo-import - translation resource import command
//!
//! Scans the application, its modules and third-party components for
//! `domain.locale.format` resource files and merges them into the
//! translation store.

use anyhow::{Context, Result};
use clap::Parser;
use lingo_common::config::{resolve_config_path, CONFIG_ENV_VAR};
use lingo_common::db::init_database;
use lingo_common::LingoConfig;
use lingo_import::models::parse_domains;
use lingo_import::{FormatRegistry, ImportOptions, ImportRunner, RunSummary};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Command-line arguments for lingo-import
#[derive(Parser, Debug)]
#[command(name = "lingo-import")]
#[command(about = "Import translation files into the translation store")]
#[command(version)]
struct Args {
    /// Import only this module's translations
    bundle: Option<String>,

    /// Remove compiled translation caches for the imported locales
    #[arg(short, long)]
    cache_clear: bool,

    /// Overwrite existing translations
    #[arg(short, long)]
    force: bool,

    /// Import module translations from the application override directories
    #[arg(short, long)]
    globals: bool,

    /// Locale to import (repeatable); defaults to the managed locales
    #[arg(short, long)]
    locales: Vec<String>,

    /// Comma-separated domains to import; defaults to all
    #[arg(short, long)]
    domains: Option<String>,

    /// Lower-case locale, domain and key before import
    #[arg(short = 'i', long)]
    case_insensitive: bool,

    /// Merge by recency; application translations are imported last
    #[arg(short, long)]
    merge: bool,

    /// Import only from this path
    #[arg(short = 'p', long)]
    import_path: Option<PathBuf>,

    /// Skip the application translation directory
    #[arg(short, long)]
    only_vendors: bool,

    /// Configuration file
    /// (falls back to $LINGO_CONFIG, the user config dir, then ./lingo.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn to_options(&self) -> ImportOptions {
        ImportOptions {
            bundle: self.bundle.clone(),
            globals: self.globals,
            force: self.force,
            merge: self.merge,
            case_insensitive: self.case_insensitive,
            import_path: self.import_path.clone(),
            only_vendors: self.only_vendors,
            cache_clear: self.cache_clear,
            locales: self.locales.clone(),
            domains: self.domains.as_deref().map(parse_domains).unwrap_or_default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting lingo-import v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let options = args.to_options();

    // Flag conflicts are reported before anything is read
    options.validate()?;

    let config_path = resolve_config_path(args.config.as_deref(), CONFIG_ENV_VAR);
    let config = LingoConfig::load_or_default(config_path.as_deref()).context("Failed to load configuration")?;

    let mut formats = FormatRegistry::with_default_loaders();
    if let Some(allowed) = &config.formats {
        formats
            .restrict_to(allowed)
            .context("Invalid `formats` in configuration")?;
    }

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open translation store {}", db_path.display()))?;

    let runner = ImportRunner::from_config(pool.clone(), &config, formats);
    let summary = match runner.run(&options).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Import aborted: {}", e);
            pool.close().await;
            return Err(e.into());
        }
    };

    report(&summary);
    pool.close().await;

    Ok(())
}

fn report(summary: &RunSummary) {
    for failed in summary.failed_files() {
        warn!(
            "Not imported: {} ({})",
            failed.path.display(),
            failed.error.as_deref().unwrap_or("unknown error")
        );
    }

    info!(
        "Import finished for {}: {} file(s), {} translation(s) imported, {} skipped, {} failed, {} modified",
        summary.locales.join(", "),
        summary.total_files(),
        summary.total_imported(),
        summary.total_skipped(),
        summary.failed_files().len(),
        summary.modified_units
    );

    if summary.cache_files_removed > 0 {
        info!("Removed {} cached catalogue file(s)", summary.cache_files_removed);
    }
    if let Some(e) = &summary.cache_clear_error {
        warn!("Translation cache not cleared: {}", e);
    }
}
