//! Settings infrastructure for vuesp.
//!
//! Loads `vuesp.toml` files that configure the default language of each block
//! type, e.g. a workspace whose templates are written in Pug by default.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::regions::{DefaultLanguages, LanguageId};

/// File name searched for during settings discovery.
pub const SETTINGS_FILE: &str = "vuesp.toml";

/// Root settings structure loaded from vuesp.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Default language per block type.
    pub languages: Option<LanguageSettings>,
}

/// Language ids used for blocks that declare no `lang` attribute.
#[derive(Debug, Default, Deserialize)]
pub struct LanguageSettings {
    pub template: Option<String>,
    pub script: Option<String>,
    pub style: Option<String>,
    pub custom: Option<String>,
}

impl Settings {
    /// Resolve the configured defaults on top of the built-in ones.
    ///
    /// Unknown language ids are reported and the built-in default is kept.
    pub fn default_languages(&self) -> DefaultLanguages {
        let mut defaults = DefaultLanguages::default();
        let Some(languages) = &self.languages else {
            return defaults;
        };

        override_language(&mut defaults.template, "template", languages.template.as_deref());
        override_language(&mut defaults.script, "script", languages.script.as_deref());
        override_language(&mut defaults.style, "style", languages.style.as_deref());
        override_language(&mut defaults.custom, "custom", languages.custom.as_deref());
        defaults
    }
}

fn override_language(slot: &mut LanguageId, block: &str, configured: Option<&str>) {
    let Some(configured) = configured else {
        return;
    };
    match configured.parse::<LanguageId>() {
        Ok(id) => *slot = id,
        Err(e) => warn!(block = block, "ignoring default language: {}", e),
    }
}

/// Read and parse a settings file.
pub fn read_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| Error::Settings {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings from a vuesp.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match read_settings(path) {
        Ok(settings) => settings,
        Err(Error::Io { .. }) => Settings::default(),
        Err(e) => {
            warn!("{}", e);
            Settings::default()
        }
    }
}

/// Discover vuesp.toml by searching up the directory tree, then direct children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found file. If not found, returns
/// `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join(SETTINGS_FILE);
                if candidate.is_file() {
                    return (load_settings(&candidate), entry.path());
                }
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("vuesp-test")
            .join(name)
            .join(format!("{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup_test_dir(dir: &Path) {
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn no_languages_section_keeps_builtin_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.default_languages(), DefaultLanguages::default());
    }

    #[test]
    fn configured_languages_override_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[languages]
template = "pug"
script = "typescript"
"#,
        )
        .unwrap();
        let defaults = settings.default_languages();
        assert_eq!(defaults.template, LanguageId::Pug);
        assert_eq!(defaults.script, LanguageId::Typescript);
        assert_eq!(defaults.style, LanguageId::Css);
    }

    #[test]
    fn unknown_language_keeps_builtin_default() {
        let settings: Settings = toml::from_str("[languages]\nstyle = \"sass\"\n").unwrap();
        assert_eq!(settings.default_languages().style, LanguageId::Css);
    }

    #[test]
    fn read_settings_reports_invalid_toml() {
        let dir = make_test_dir("invalid-toml");
        let path = dir.join(SETTINGS_FILE);
        std::fs::write(&path, "[languages\n").unwrap();

        let err = read_settings(&path).unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
        assert!(load_settings(&path).languages.is_none());

        cleanup_test_dir(&dir);
    }

    #[test]
    fn discover_settings_in_parent_dir() {
        let parent = make_test_dir("discover-parent");
        let child = parent.join("src");
        std::fs::create_dir_all(&child).unwrap();
        std::fs::write(parent.join(SETTINGS_FILE), "[languages]\nstyle = \"scss\"\n").unwrap();

        let (settings, settings_dir) = discover_settings(&child);
        assert_eq!(settings_dir, parent);
        assert_eq!(settings.default_languages().style, LanguageId::Scss);

        cleanup_test_dir(&parent);
    }

    #[test]
    fn discover_settings_in_child_dir() {
        let parent = make_test_dir("discover-child");
        let child = parent.join("config");
        std::fs::create_dir_all(&child).unwrap();
        std::fs::write(child.join(SETTINGS_FILE), "[languages]\ntemplate = \"pug\"\n").unwrap();

        let (settings, settings_dir) = discover_settings(&parent);
        assert_eq!(settings_dir, child);
        assert_eq!(settings.default_languages().template, LanguageId::Pug);

        cleanup_test_dir(&parent);
    }

    #[test]
    fn discover_settings_not_found() {
        let dir = make_test_dir("discover-none");

        let (settings, settings_dir) = discover_settings(&dir);
        assert_eq!(settings_dir, dir);
        assert!(settings.languages.is_none());

        cleanup_test_dir(&dir);
    }
}
