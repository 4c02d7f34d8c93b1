//! Path resolution under the fixed `<root>/lib/{include,src}` layout.

use std::path::{Component, Path, PathBuf};

use crate::Result;
use crate::config::ProjectConfig;
use crate::error::ConfigError;
use crate::locate::{absolute_path, find_config_root};

pub const LIB_DIR: &str = "lib";
pub const INCLUDE_DIR: &str = "include";
pub const SRC_DIR: &str = "src";
pub const HEADER_EXTENSION: &str = ".hh";

fn require_config_root(path: &Path) -> Result<PathBuf> {
    find_config_root(path).ok_or_else(|| ConfigError::ProjectRootNotFound(path.to_path_buf()))
}

fn relative_to(path: &Path, base: &Path) -> Result<PathBuf> {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .map_err(|_| ConfigError::OutsideTree {
            path: path.to_path_buf(),
            base: base.to_path_buf(),
        })
}

fn require_dir(dir: PathBuf) -> Result<PathBuf> {
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(ConfigError::MissingLayoutDir(dir))
    }
}

/// `<config root>/lib` for the project enclosing `path`.
pub fn lib_root(path: &Path) -> Result<PathBuf> {
    let path = absolute_path(path);
    Ok(require_config_root(&path)?.join(LIB_DIR))
}

/// Replace every extension of the final component of `path` with `suffix`.
///
/// `foo/bar.tar.gz` with `.hh` becomes `foo/bar.hh`.
pub fn with_suffixes(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();
    path.with_file_name(format!("{stem}{suffix}"))
}

/// Include-guard token for `path`.
///
/// The path is taken relative to the library root. A leading `include/`
/// or `src/` is dropped and the extensions are replaced by `.hh`, so a
/// source file, its public header and its private header share one token.
/// Files elsewhere under `lib/` keep a `LIB` segment in front of their
/// relative path so they stay apart from `src/` and `include/` files of
/// the same name. Separators and dots become underscores and the result
/// is uppercased, so names that differ only in `_` versus `/` or `.`
/// (`a_b/c.hh` and `a/b_c.hh`) still collide.
pub fn include_guard_uid(path: &Path) -> Result<String> {
    let path = absolute_path(path);
    let root = require_config_root(&path)?;
    let lib = root.join(LIB_DIR);
    let relative = relative_to(&path, &lib)?;
    let config = ProjectConfig::load_from_root(&root)?;
    let ifndef = config.ifndef_name()?;

    let in_layout_dir = matches!(
        relative.components().next(),
        Some(Component::Normal(first)) if first == INCLUDE_DIR || first == SRC_DIR
    );
    let within_layout: PathBuf = if in_layout_dir {
        relative.components().skip(1).collect()
    } else {
        Path::new(LIB_DIR).join(relative)
    };
    let header = with_suffixes(&within_layout, HEADER_EXTENSION);
    let token: String = header
        .to_string_lossy()
        .to_uppercase()
        .chars()
        .map(|c| if c == '/' || c == '.' { '_' } else { c })
        .collect();
    Ok(format!("_{ifndef}_{token}"))
}

/// Where a source file's header was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVisibility {
    /// Under `lib/include/`.
    Public,
    /// Under `lib/src/`, next to its implementation.
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeader {
    pub visibility: HeaderVisibility,
    /// Relative to `include/` or `src/`, matching `visibility`.
    pub relative: PathBuf,
}

/// Find the header belonging to the source file `path`.
///
/// A public header always wins over a private one.
pub fn resolve_header(path: &Path) -> Result<ResolvedHeader> {
    let path = absolute_path(path);
    let lib = lib_root(&path)?;
    let include_dir = require_dir(lib.join(INCLUDE_DIR))?;
    let src_dir = require_dir(lib.join(SRC_DIR))?;

    let relative = relative_to(&path, &src_dir)?;
    let header = with_suffixes(&relative, HEADER_EXTENSION);

    let public = include_dir.join(&header);
    if public.exists() {
        return Ok(ResolvedHeader {
            visibility: HeaderVisibility::Public,
            relative: header,
        });
    }
    let private = src_dir.join(&header);
    if private.exists() {
        return Ok(ResolvedHeader {
            visibility: HeaderVisibility::Private,
            relative: header,
        });
    }
    Err(ConfigError::HeaderNotFound {
        source_file: path,
        public,
        private,
    })
}

/// Include path for the source file `path`, as written in `#include "..."`.
pub fn include_path(path: &Path) -> Result<String> {
    Ok(resolve_header(path)?.relative.display().to_string())
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
