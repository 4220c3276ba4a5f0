//! Module registry, component table and project layout
//!
//! Everything the planner needs to know about the host application,
//! built once from [`LingoConfig`].

use crate::error::{ImportError, ImportResult};
use lingo_common::LingoConfig;
use std::path::PathBuf;
use tracing::warn;

/// A registered module with its root resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: String,
    pub path: PathBuf,
    pub parent: Option<String>,
}

/// Outcome of looking up a module by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Module whose translations are scanned
    pub module: ModuleInfo,
    /// Set when the requested module extends another one and the parent was
    /// chosen; holds the requested name
    pub requested_child: Option<String>,
}

/// Registered modules, in registration order
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleInfo>,
}

impl ModuleRegistry {
    pub fn new(modules: Vec<ModuleInfo>) -> Self {
        Self { modules }
    }

    pub fn from_config(config: &LingoConfig) -> Self {
        Self::new(
            config
                .modules
                .iter()
                .map(|m| ModuleInfo {
                    name: m.name.clone(),
                    path: config.resolve_path(&m.path),
                    parent: m.parent.clone(),
                })
                .collect(),
        )
    }

    pub fn list_modules(&self) -> &[ModuleInfo] {
        &self.modules
    }

    pub fn get(&self, name: &str) -> Option<&ModuleInfo> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Resolve `name` to the module to scan
    ///
    /// A module declaring a registered parent resolves to that parent.
    pub fn resolve(&self, name: &str) -> ImportResult<ResolvedModule> {
        let module = self
            .get(name)
            .ok_or_else(|| ImportError::UnknownModule(name.to_string()))?;

        if let Some(parent_name) = &module.parent {
            match self.get(parent_name) {
                Some(parent) => {
                    return Ok(ResolvedModule {
                        module: parent.clone(),
                        requested_child: Some(module.name.clone()),
                    })
                }
                None => warn!(
                    module = %module.name,
                    parent = %parent_name,
                    "Parent module is not registered, using the module itself"
                ),
            }
        }

        Ok(ResolvedModule {
            module: module.clone(),
            requested_child: None,
        })
    }
}

/// Third-party component translation directories
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    entries: Vec<(String, PathBuf)>,
}

impl ComponentTable {
    pub fn new(entries: Vec<(String, PathBuf)>) -> Self {
        Self { entries }
    }

    pub fn from_config(config: &LingoConfig) -> Self {
        Self::new(
            config
                .components
                .iter()
                .map(|(name, dir)| (name.clone(), config.resolve_path(dir)))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[(String, PathBuf)] {
        &self.entries
    }
}

/// Application directories the planner and discoverer anchor on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Application-level translation directory
    pub translations_dir: PathBuf,
    /// Canonical resources directory; global module overrides live below it
    pub resources_dir: PathBuf,
}

impl ProjectLayout {
    pub fn from_config(config: &LingoConfig) -> Self {
        Self {
            translations_dir: config.translations_path(),
            resources_dir: config.resources_path(),
        }
    }

    /// Application override directory for one module
    pub fn global_module_dir(&self, module_name: &str) -> PathBuf {
        self.resources_dir.join(module_name).join("translations")
    }
}
