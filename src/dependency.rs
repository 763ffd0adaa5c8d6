//! Registry of third-party tools installed in the workspace.
//!
//! Formatters, linters and compilers are looked up in the workspace's
//! `node_modules`. A tool that is not installed stays `Unloaded`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Tools the server knows how to delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    Prettyhtml,
    Eslint,
    EslintPluginVue,
    JsBeautify,
    Prettier,
    StylusSupremacy,
    Typescript,
}

impl Dependency {
    pub const ALL: [Dependency; 7] = [
        Dependency::Prettyhtml,
        Dependency::Eslint,
        Dependency::EslintPluginVue,
        Dependency::JsBeautify,
        Dependency::Prettier,
        Dependency::StylusSupremacy,
        Dependency::Typescript,
    ];

    /// npm package name.
    pub fn package_name(self) -> &'static str {
        match self {
            Dependency::Prettyhtml => "@starptech/prettyhtml",
            Dependency::Eslint => "eslint",
            Dependency::EslintPluginVue => "eslint-plugin-vue",
            Dependency::JsBeautify => "js-beautify",
            Dependency::Prettier => "prettier",
            Dependency::StylusSupremacy => "stylus-supremacy",
            Dependency::Typescript => "typescript",
        }
    }
}

/// Load state of a single tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeDependency {
    Unloaded {
        name: String,
    },
    Loaded {
        name: String,
        version: String,
        /// True when the tool ships with the server rather than the workspace.
        bundled: bool,
        /// Directory of the resolved package.
        module: PathBuf,
    },
}

impl RuntimeDependency {
    pub fn name(&self) -> &str {
        match self {
            RuntimeDependency::Unloaded { name } | RuntimeDependency::Loaded { name, .. } => name,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, RuntimeDependency::Loaded { .. })
    }
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    version: String,
}

/// Lazily populated table of known tools.
#[derive(Debug, Clone)]
pub struct DependencyRegistry {
    dependencies: HashMap<Dependency, RuntimeDependency>,
}

impl DependencyRegistry {
    /// All known tools, unloaded.
    pub fn new() -> Self {
        let dependencies = Dependency::ALL
            .into_iter()
            .map(|dep| {
                let name = dep.package_name().to_string();
                (dep, RuntimeDependency::Unloaded { name })
            })
            .collect();
        Self { dependencies }
    }

    /// Resolve every known tool from `<workspace_root>/node_modules`.
    ///
    /// Tools that are missing or have an unreadable manifest stay unloaded.
    pub fn load_workspace(&mut self, workspace_root: &Path) {
        let node_modules = workspace_root.join("node_modules");

        for dep in Dependency::ALL {
            let module = node_modules.join(dep.package_name());
            let manifest = module.join("package.json");
            if !manifest.is_file() {
                continue;
            }

            match read_package_version(&manifest) {
                Ok(version) => {
                    debug!(package = dep.package_name(), %version, "loaded workspace dependency");
                    self.dependencies.insert(
                        dep,
                        RuntimeDependency::Loaded {
                            name: dep.package_name().to_string(),
                            version,
                            bundled: false,
                            module,
                        },
                    );
                }
                Err(e) => warn!("{}", e),
            }
        }
    }

    pub fn get(&self, dep: Dependency) -> Option<&RuntimeDependency> {
        self.dependencies.get(&dep)
    }

    /// Loaded tools, in declaration order.
    pub fn loaded(&self) -> impl Iterator<Item = &RuntimeDependency> {
        Dependency::ALL
            .iter()
            .filter_map(|dep| self.dependencies.get(dep))
            .filter(|dep| dep.is_loaded())
    }
}

impl Default for DependencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn read_package_version(manifest: &Path) -> Result<String> {
    let content = std::fs::read_to_string(manifest).map_err(|source| Error::Io {
        path: manifest.to_path_buf(),
        source,
    })?;
    let parsed: PackageManifest =
        serde_json::from_str(&content).map_err(|source| Error::Manifest {
            path: manifest.to_path_buf(),
            source,
        })?;
    Ok(parsed.version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("vuesp-deps-test")
            .join(name)
            .join(format!("{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn install(root: &Path, package: &str, manifest: &str) {
        let dir = root.join("node_modules").join(package);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("package.json"), manifest).unwrap();
    }

    #[test]
    fn starts_unloaded() {
        let registry = DependencyRegistry::new();
        let ts = registry.get(Dependency::Typescript).unwrap();
        assert_eq!(ts.name(), "typescript");
        assert!(!ts.is_loaded());
        assert_eq!(registry.loaded().count(), 0);
    }

    #[test]
    fn loads_installed_packages() {
        let root = make_test_dir("installed");
        install(&root, "typescript", r#"{ "name": "typescript", "version": "5.4.2" }"#);
        install(&root, "@starptech/prettyhtml", r#"{ "version": "0.10.0" }"#);

        let mut registry = DependencyRegistry::new();
        registry.load_workspace(&root);

        assert_eq!(
            registry.get(Dependency::Typescript),
            Some(&RuntimeDependency::Loaded {
                name: "typescript".to_string(),
                version: "5.4.2".to_string(),
                bundled: false,
                module: root.join("node_modules").join("typescript"),
            })
        );
        let names: Vec<_> = registry.loaded().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["@starptech/prettyhtml", "typescript"]);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn malformed_manifest_stays_unloaded() {
        let root = make_test_dir("malformed");
        install(&root, "prettier", "{ not json");

        let mut registry = DependencyRegistry::new();
        registry.load_workspace(&root);
        assert!(!registry.get(Dependency::Prettier).unwrap().is_loaded());

        let err = read_package_version(&root.join("node_modules/prettier/package.json"));
        assert!(matches!(err, Err(Error::Manifest { .. })));

        let _ = std::fs::remove_dir_all(&root);
    }
}
