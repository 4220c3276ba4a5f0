//! Import run orchestration
//!
//! One run: validate options, plan tasks, then for each task discover files
//! and merge them into the store, strictly in order.

use crate::db::translations;
use crate::error::ImportResult;
use crate::formats::FormatRegistry;
use crate::models::{FileOutcome, ImportOptions, RunSummary, TaskOutcome};
use crate::registry::{ComponentTable, ModuleRegistry, ProjectLayout};
use crate::services::cache_cleaner::CacheCleaner;
use crate::services::file_discoverer::{file_name_pattern, Discovery, FileDiscoverer};
use crate::services::location_planner::LocationPlanner;
use crate::services::merge_importer::MergeImporter;
use lingo_common::LingoConfig;
use sqlx::SqlitePool;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub struct ImportRunner {
    db: SqlitePool,
    layout: ProjectLayout,
    registry: ModuleRegistry,
    components: ComponentTable,
    formats: FormatRegistry,
    managed_locales: Vec<String>,
    cache_dir: PathBuf,
}

impl ImportRunner {
    pub fn new(
        db: SqlitePool,
        layout: ProjectLayout,
        registry: ModuleRegistry,
        components: ComponentTable,
        formats: FormatRegistry,
        managed_locales: Vec<String>,
        cache_dir: PathBuf,
    ) -> Self {
        Self {
            db,
            layout,
            registry,
            components,
            formats,
            managed_locales,
            cache_dir,
        }
    }

    /// Build a runner for the project described by `config`
    pub fn from_config(db: SqlitePool, config: &LingoConfig, formats: FormatRegistry) -> Self {
        Self::new(
            db,
            ProjectLayout::from_config(config),
            ModuleRegistry::from_config(config),
            ComponentTable::from_config(config),
            formats,
            config.managed_locales.clone(),
            config.cache_path(),
        )
    }

    /// Execute one import run
    ///
    /// Option, locale and filter problems are reported before the store or
    /// filesystem is touched. Per-file failures are collected in the summary;
    /// store failures abort.
    pub async fn run(&self, options: &ImportOptions) -> ImportResult<RunSummary> {
        options.validate()?;
        let locales = options.effective_locales(&self.managed_locales)?;
        let formats = self.formats.supported_formats();
        file_name_pattern(&locales, &options.domains, &formats)?;

        let tasks = LocationPlanner::new(&self.layout, &self.registry, &self.components).plan(options)?;

        let reset = translations::reset_modified_flags(&self.db).await?;
        if reset > 0 {
            info!("Cleared modified flag on {} translation(s) from a previous run", reset);
        }

        let policy = options.policy();
        let discoverer = FileDiscoverer::new(&self.layout.resources_dir);
        let importer = MergeImporter::new(&self.db, &self.formats);

        let mut summary = RunSummary {
            locales: locales.clone(),
            ..Default::default()
        };

        for task in &tasks {
            info!("*** Importing {} ***", task.label);

            let discovery = discoverer.discover(
                &task.root,
                &locales,
                &options.domains,
                &formats,
                task.autocomplete_path(),
            )?;

            let mut outcome = TaskOutcome {
                label: task.label.clone(),
                directory: discovery.directory().to_path_buf(),
                files: Vec::new(),
            };

            match discovery {
                Discovery::NoFiles { .. } => info!("No file to import"),
                Discovery::Files { files, .. } => {
                    for path in files {
                        match importer.import_file(&path, &policy).await {
                            Ok(report) => {
                                info!("Importing \"{}\" ... {} translations", path.display(), report.imported);
                                if !report.skipped_keys.is_empty() {
                                    warn!(
                                        "{} key(s) skipped in \"{}\": {}",
                                        report.skipped_keys.len(),
                                        path.display(),
                                        report.skipped_keys.join(", ")
                                    );
                                }
                                outcome.files.push(FileOutcome::imported(path, report));
                            }
                            Err(e) if !e.is_fatal() => {
                                error!("{}", e);
                                outcome.files.push(FileOutcome::failed(path, e.to_string()));
                            }
                            Err(e) => return Err(e),
                        }
                    }
                }
            }

            summary.tasks.push(outcome);
        }

        summary.modified_units = translations::count_modified(&self.db).await?;

        if options.cache_clear {
            info!("Removing translations cache files for {}", locales.join(", "));
            let cleaner = CacheCleaner::new(&self.cache_dir);
            record_cache_clear(&mut summary, cleaner.cache_dir(), cleaner.clear(&locales));
        }

        Ok(summary)
    }
}

/// Store the cache removal result; a failure is logged, never propagated
fn record_cache_clear(summary: &mut RunSummary, cache_dir: &Path, result: io::Result<usize>) {
    match result {
        Ok(removed) => summary.cache_files_removed = removed,
        Err(e) => {
            warn!("Failed to clear translation cache {}: {}", cache_dir.display(), e);
            summary.cache_clear_error = Some(e.to_string());
        }
    }
}
