use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::error::ConfigError;
use crate::locate::{MARKER_FILE, absolute_path, find_config_root};

const IFNDEF_ALLOWED: &str = "uppercase ASCII letters and underscores";
const NAMESPACE_ALLOWED: &str = "ASCII letters and underscores";

/// Raw contents of `.lockshaw.toml`.
///
/// Unknown keys are ignored. `testsuite_macro` is intentionally absent:
/// it is always derived from `ifndef_name` when loading from disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkerFile {
    pub project_name: String,
    #[serde(default)]
    pub build_target: Option<String>,
    #[serde(default)]
    pub test_target: Option<String>,
    #[serde(default)]
    pub ifndef_name: Option<String>,
    #[serde(default)]
    pub namespace_name: Option<String>,
}

/// Identity of one project, as declared by its marker file.
///
/// Only the raw overrides are stored. Every derived name is recomputed on
/// access, and character-set checks run when the name is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    project_name: String,
    config_root: PathBuf,
    build_target: Option<String>,
    test_target: Option<String>,
    ifndef_name: Option<String>,
    namespace_name: Option<String>,
    testsuite_macro: Option<String>,
}

impl ProjectConfig {
    pub fn new(project_name: impl Into<String>, config_root: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            config_root: config_root.into(),
            build_target: None,
            test_target: None,
            ifndef_name: None,
            namespace_name: None,
            testsuite_macro: None,
        }
    }

    pub fn with_build_target(mut self, target: impl Into<String>) -> Self {
        self.build_target = Some(target.into());
        self
    }

    pub fn with_test_target(mut self, target: impl Into<String>) -> Self {
        self.test_target = Some(target.into());
        self
    }

    pub fn with_ifndef_name(mut self, name: impl Into<String>) -> Self {
        self.ifndef_name = Some(name.into());
        self
    }

    pub fn with_namespace_name(mut self, name: impl Into<String>) -> Self {
        self.namespace_name = Some(name.into());
        self
    }

    /// Not reachable from the marker file.
    pub fn with_testsuite_macro(mut self, name: impl Into<String>) -> Self {
        self.testsuite_macro = Some(name.into());
        self
    }

    fn from_marker(config_root: PathBuf, marker: MarkerFile) -> Self {
        Self {
            project_name: marker.project_name,
            config_root,
            build_target: marker.build_target,
            test_target: marker.test_target,
            ifndef_name: marker.ifndef_name,
            namespace_name: marker.namespace_name,
            testsuite_macro: None,
        }
    }

    /// Locate the nearest config root above `start` and load its marker file.
    ///
    /// `Ok(None)` means no enclosing project; read and parse failures are errors.
    pub fn load(start: &Path) -> Result<Option<Self>> {
        let Some(root) = find_config_root(start) else {
            return Ok(None);
        };
        Self::load_from_root(&root).map(Some)
    }

    /// Load the marker file that lives directly in `config_root`.
    pub fn load_from_root(config_root: &Path) -> Result<Self> {
        let path = config_root.join(MARKER_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadMarker {
            path: path.clone(),
            source,
        })?;
        Self::parse(config_root, &path, &content)
    }

    /// Parse marker content as if it had been read from `config_root`.
    pub fn from_toml_str(config_root: &Path, content: &str) -> Result<Self> {
        Self::parse(config_root, &config_root.join(MARKER_FILE), content)
    }

    fn parse(config_root: &Path, path: &Path, content: &str) -> Result<Self> {
        let marker: MarkerFile =
            toml::from_str(content).map_err(|source| ConfigError::ParseMarker {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_marker(config_root.to_path_buf(), marker))
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn config_root(&self) -> &Path {
        &self.config_root
    }

    pub fn marker_path(&self) -> PathBuf {
        self.config_root.join(MARKER_FILE)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.config_root.join("build")
    }

    pub fn build_target(&self) -> String {
        self.build_target
            .clone()
            .unwrap_or_else(|| self.project_name.clone())
    }

    pub fn test_target(&self) -> String {
        self.test_target
            .clone()
            .unwrap_or_else(|| format!("{}-tests", self.project_name))
    }

    /// Include-guard prefix. Must consist of `A-Z` and `_` only.
    pub fn ifndef_name(&self) -> Result<String> {
        let name = self
            .ifndef_name
            .clone()
            .unwrap_or_else(|| self.project_name.to_uppercase());
        check_chars("ifndef_name", name, IFNDEF_ALLOWED, |c| {
            c.is_ascii_uppercase() || c == '_'
        })
    }

    /// C++ namespace. Must consist of ASCII letters and `_` only.
    pub fn namespace_name(&self) -> Result<String> {
        let name = self
            .namespace_name
            .clone()
            .unwrap_or_else(|| self.project_name.clone());
        check_chars("namespace_name", name, NAMESPACE_ALLOWED, |c| {
            c.is_ascii_alphabetic() || c == '_'
        })
    }

    pub fn testsuite_macro(&self) -> Result<String> {
        match &self.testsuite_macro {
            Some(name) => Ok(name.clone()),
            None => Ok(format!("{}_TEST_SUITE", self.ifndef_name()?)),
        }
    }
}

fn check_chars(
    field: &'static str,
    value: String,
    allowed: &'static str,
    is_allowed: impl Fn(char) -> bool,
) -> Result<String> {
    if value.chars().all(is_allowed) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidName {
            field,
            value,
            allowed,
        })
    }
}

/// Load the project identity enclosing `path`, if any.
pub fn get_config(path: &Path) -> Result<Option<ProjectConfig>> {
    ProjectConfig::load(&absolute_path(path))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
