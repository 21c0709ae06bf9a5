//! Host configuration for color decorations.
//!
//! Mirrors the host's settings shape (`css.colorDecorators.enable`) so an
//! embedder can back its configuration with a settings.toml file next to the
//! stylesheets it edits.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::language::LanguageId;

/// Root settings structure loaded from settings.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    pub css: Option<LanguageSettings>,
    pub scss: Option<LanguageSettings>,
    pub less: Option<LanguageSettings>,
}

/// Per-language settings block.
#[derive(Debug, Default, Deserialize)]
pub struct LanguageSettings {
    #[serde(rename = "colorDecorators")]
    pub color_decorators: Option<ColorDecoratorSettings>,
}

/// Decoration toggles.
#[derive(Debug, Default, Deserialize)]
pub struct ColorDecoratorSettings {
    pub enable: Option<bool>,
}

impl Settings {
    /// The `<language>.colorDecorators.enable` flag; `None` when unset.
    pub fn color_decorators_enabled(&self, language: LanguageId) -> Option<bool> {
        let block = match language {
            LanguageId::Css => self.css.as_ref(),
            LanguageId::Scss => self.scss.as_ref(),
            LanguageId::Less => self.less.as_ref(),
        }?;
        block.color_decorators.as_ref()?.enable
    }

    /// Look up a flag by its dotted host configuration key.
    ///
    /// Only the decoration keys exist today; anything else is `None`.
    pub fn flag(&self, key: &str) -> Option<bool> {
        let (language, rest) = key.split_once('.')?;
        if rest != "colorDecorators.enable" {
            return None;
        }
        self.color_decorators_enabled(LanguageId::parse(language)?)
    }
}

/// Load settings from a settings.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("failed to parse {}: {}", path.display(), e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover settings.toml by searching up the directory tree from
/// `start_dir`.
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found settings.toml. If not found, returns
/// `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join("settings.toml");
        if candidate.is_file() {
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    (Settings::default(), start_dir.to_path_buf())
}
