//! Candidate file discovery for the formatter.

use anyhow::{Context, Result};
use lockshaw_config::HEADER_EXTENSION;
use std::path::{Path, PathBuf};

/// Extensions searched by default, in search order.
pub const DEFAULT_EXTENSIONS: [&str; 6] = [HEADER_EXTENSION, ".cc", ".cpp", ".cu", ".c", ".decl"];

/// Subtrees of `root` that never contain first-party sources.
pub fn default_blacklist(root: &Path) -> Vec<PathBuf> {
    ["triton", "deps", "build"]
        .iter()
        .map(|dir| root.join(dir))
        .collect()
}

fn is_blacklisted(path: &Path, blacklist: &[PathBuf]) -> bool {
    blacklist.iter().any(|dir| path.starts_with(dir))
}

/// Recursively find files under `root` ending in one of `extensions`.
///
/// Results are yielded lazily, one extension at a time. Anything under a
/// `blacklist` entry is skipped.
pub fn find_files<'a>(
    root: &Path,
    extensions: &[&str],
    blacklist: &'a [PathBuf],
) -> Result<impl Iterator<Item = PathBuf> + use<'a>> {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let walks = extensions
        .iter()
        .map(|ext| {
            let pattern = format!("{escaped_root}/**/*{}", glob::Pattern::escape(ext));
            glob::glob(&pattern).with_context(|| format!("Invalid search pattern: {pattern}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(walks
        .into_iter()
        .flatten()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(error) => {
                tracing::debug!(error = %error, "Skipping unreadable search entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .filter(move |path| !is_blacklisted(path, blacklist)))
}
