//! Import location planning
//!
//! Turns the run options into an ordered list of root directories to scan.
//! Never touches the filesystem; the same options and registry always give
//! the same plan.

use crate::error::ImportResult;
use crate::models::{ImportOptions, ImportTask, TaskKind};
use crate::registry::{ComponentTable, ModuleInfo, ModuleRegistry, ProjectLayout};
use tracing::info;

pub struct LocationPlanner<'a> {
    layout: &'a ProjectLayout,
    registry: &'a ModuleRegistry,
    components: &'a ComponentTable,
}

impl<'a> LocationPlanner<'a> {
    pub fn new(layout: &'a ProjectLayout, registry: &'a ModuleRegistry, components: &'a ComponentTable) -> Self {
        Self {
            layout,
            registry,
            components,
        }
    }

    /// Plan the tasks of one run
    ///
    /// Order when neither a module nor a path is given:
    /// 1. application (unless merging or vendors only)
    /// 2. every module, global variant (with `globals`)
    /// 3. every module then every component (without `globals`)
    /// 4. application again (when merging, so it is compared last)
    pub fn plan(&self, options: &ImportOptions) -> ImportResult<Vec<ImportTask>> {
        options.validate()?;

        if let Some(name) = &options.bundle {
            let resolved = self.registry.resolve(name)?;
            if resolved.requested_child.is_some() {
                info!(
                    "Using: {} as module to lookup translation files for",
                    resolved.module.name
                );
            }
            return Ok(vec![self.module_task(&resolved.module, options.globals)]);
        }

        if let Some(path) = &options.import_path {
            return Ok(vec![ImportTask::new(
                path.clone(),
                format!("translations from path \"{}\"", path.display()),
                TaskKind::Path,
            )]);
        }

        let mut tasks = Vec::new();

        if !options.merge && !options.only_vendors {
            tasks.push(self.application_task());
        }

        if options.globals {
            for module in self.registry.list_modules() {
                tasks.push(self.module_task(module, true));
            }
        } else {
            for module in self.registry.list_modules() {
                tasks.push(self.module_task(module, false));
            }
            for (name, dir) in self.components.entries() {
                tasks.push(ImportTask::new(
                    dir.clone(),
                    format!("component {}", name),
                    TaskKind::Component,
                ));
            }
        }

        if options.merge {
            tasks.push(self.application_task());
        }

        Ok(tasks)
    }

    fn application_task(&self) -> ImportTask {
        ImportTask::new(
            self.layout.translations_dir.clone(),
            "application translation files",
            TaskKind::Application,
        )
    }

    fn module_task(&self, module: &ModuleInfo, global: bool) -> ImportTask {
        if global {
            ImportTask::new(
                self.layout.global_module_dir(&module.name),
                format!("{} (global)", module.name),
                TaskKind::GlobalModule,
            )
        } else {
            ImportTask::new(module.path.clone(), module.name.clone(), TaskKind::Module)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use std::path::PathBuf;

    struct Fixture {
        layout: ProjectLayout,
        registry: ModuleRegistry,
        components: ComponentTable,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                layout: ProjectLayout {
                    translations_dir: PathBuf::from("/app/translations"),
                    resources_dir: PathBuf::from("/app/app/Resources"),
                },
                registry: ModuleRegistry::new(vec![
                    ModuleInfo {
                        name: "Blog".to_string(),
                        path: PathBuf::from("/app/src/Blog"),
                        parent: None,
                    },
                    ModuleInfo {
                        name: "Shop".to_string(),
                        path: PathBuf::from("/app/src/Shop"),
                        parent: None,
                    },
                    ModuleInfo {
                        name: "AcmeBlog".to_string(),
                        path: PathBuf::from("/app/src/AcmeBlog"),
                        parent: Some("Blog".to_string()),
                    },
                ]),
                components: ComponentTable::new(vec![(
                    "validator".to_string(),
                    PathBuf::from("/app/vendor/validator/translations"),
                )]),
            }
        }

        fn plan(&self, options: &ImportOptions) -> ImportResult<Vec<ImportTask>> {
            LocationPlanner::new(&self.layout, &self.registry, &self.components).plan(options)
        }
    }

    fn kinds(tasks: &[ImportTask]) -> Vec<(TaskKind, String)> {
        tasks.iter().map(|t| (t.kind, t.root.display().to_string())).collect()
    }

    #[test]
    fn test_default_plan_order() {
        let tasks = Fixture::new().plan(&ImportOptions::default()).unwrap();
        assert_eq!(
            kinds(&tasks),
            vec![
                (TaskKind::Application, "/app/translations".to_string()),
                (TaskKind::Module, "/app/src/Blog".to_string()),
                (TaskKind::Module, "/app/src/Shop".to_string()),
                (TaskKind::Module, "/app/src/AcmeBlog".to_string()),
                (TaskKind::Component, "/app/vendor/validator/translations".to_string()),
            ]
        );
    }

    #[test]
    fn test_merge_moves_application_last() {
        let options = ImportOptions {
            merge: true,
            ..Default::default()
        };
        let tasks = Fixture::new().plan(&options).unwrap();
        assert_eq!(tasks.first().unwrap().kind, TaskKind::Module);
        assert_eq!(tasks.last().unwrap().kind, TaskKind::Application);
        assert_eq!(
            tasks.iter().filter(|t| t.kind == TaskKind::Application).count(),
            1
        );
    }

    #[test]
    fn test_only_vendors_skips_application() {
        let options = ImportOptions {
            only_vendors: true,
            ..Default::default()
        };
        let tasks = Fixture::new().plan(&options).unwrap();
        assert!(tasks.iter().all(|t| t.kind != TaskKind::Application));
        assert_eq!(tasks.len(), 4);
    }

    #[test]
    fn test_globals_plans_application_then_global_modules_only() {
        let options = ImportOptions {
            globals: true,
            ..Default::default()
        };
        let tasks = Fixture::new().plan(&options).unwrap();
        assert_eq!(
            kinds(&tasks),
            vec![
                (TaskKind::Application, "/app/translations".to_string()),
                (TaskKind::GlobalModule, "/app/app/Resources/Blog/translations".to_string()),
                (TaskKind::GlobalModule, "/app/app/Resources/Shop/translations".to_string()),
                (TaskKind::GlobalModule, "/app/app/Resources/AcmeBlog/translations".to_string()),
            ]
        );
        assert!(tasks[1..].iter().all(|t| t.is_global));
    }

    #[test]
    fn test_globals_with_merge_runs_application_last() {
        let options = ImportOptions {
            globals: true,
            merge: true,
            ..Default::default()
        };
        let tasks = Fixture::new().plan(&options).unwrap();
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].kind, TaskKind::GlobalModule);
        assert_eq!(tasks[3].kind, TaskKind::Application);
    }

    #[test]
    fn test_bundle_plans_exactly_one_task() {
        let options = ImportOptions {
            bundle: Some("Shop".to_string()),
            merge: true,
            ..Default::default()
        };
        let tasks = Fixture::new().plan(&options).unwrap();
        assert_eq!(kinds(&tasks), vec![(TaskKind::Module, "/app/src/Shop".to_string())]);
    }

    #[test]
    fn test_bundle_with_globals_uses_global_dir() {
        let options = ImportOptions {
            bundle: Some("Shop".to_string()),
            globals: true,
            ..Default::default()
        };
        let tasks = Fixture::new().plan(&options).unwrap();
        assert_eq!(
            kinds(&tasks),
            vec![(TaskKind::GlobalModule, "/app/app/Resources/Shop/translations".to_string())]
        );
    }

    #[test]
    fn test_bundle_with_parent_resolves_to_parent() {
        let options = ImportOptions {
            bundle: Some("AcmeBlog".to_string()),
            ..Default::default()
        };
        let tasks = Fixture::new().plan(&options).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].label, "Blog");
    }

    #[test]
    fn test_unknown_bundle_fails() {
        let options = ImportOptions {
            bundle: Some("Nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(Fixture::new().plan(&options), Err(ImportError::UnknownModule(_))));
    }

    #[test]
    fn test_import_path_plans_exactly_one_task() {
        let options = ImportOptions {
            import_path: Some(PathBuf::from("/data/translations")),
            force: true,
            ..Default::default()
        };
        let tasks = Fixture::new().plan(&options).unwrap();
        assert_eq!(kinds(&tasks), vec![(TaskKind::Path, "/data/translations".to_string())]);
        assert!(!tasks[0].autocomplete_path());
    }

    #[test]
    fn test_invalid_combinations_rejected_before_planning() {
        let fixture = Fixture::new();
        let options = ImportOptions {
            globals: true,
            only_vendors: true,
            ..Default::default()
        };
        assert!(matches!(fixture.plan(&options), Err(ImportError::Configuration(_))));

        let options = ImportOptions {
            import_path: Some(PathBuf::from("/x")),
            merge: true,
            ..Default::default()
        };
        assert!(matches!(fixture.plan(&options), Err(ImportError::Configuration(_))));
    }

    #[test]
    fn test_empty_registry_with_only_vendors_plans_nothing() {
        let layout = ProjectLayout {
            translations_dir: PathBuf::from("/app/translations"),
            resources_dir: PathBuf::from("/app/app/Resources"),
        };
        let registry = ModuleRegistry::default();
        let components = ComponentTable::default();
        let options = ImportOptions {
            only_vendors: true,
            ..Default::default()
        };
        let tasks = LocationPlanner::new(&layout, &registry, &components).plan(&options).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_plan_is_deterministic() {
        let fixture = Fixture::new();
        let options = ImportOptions {
            merge: true,
            ..Default::default()
        };
        assert_eq!(fixture.plan(&options).unwrap(), fixture.plan(&options).unwrap());
    }
}
