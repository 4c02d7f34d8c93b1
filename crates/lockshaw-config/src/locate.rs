//! Upward search for the directory holding the project marker file.

use std::path::{Component, Path, PathBuf};

/// File whose presence marks a project's config root.
pub const MARKER_FILE: &str = ".lockshaw.toml";

/// Make `path` absolute.
///
/// Existing paths are canonicalized, which resolves symlinks once so that
/// later parent traversal is purely lexical. For paths that do not exist
/// yet, the longest existing prefix is canonicalized and the remaining
/// `.` and `..` components are resolved lexically.
pub fn absolute_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => {
                resolved.push(other);
                if let Ok(canonical) = resolved.canonicalize() {
                    resolved = canonical;
                }
            }
        }
    }
    resolved
}

/// Find the nearest ancestor of `start` (inclusive) that contains
/// [`MARKER_FILE`] as a regular file.
///
/// Returns `None` when the filesystem root is reached without a match.
pub fn find_config_root(start: &Path) -> Option<PathBuf> {
    let mut dir = absolute_path(start);
    loop {
        if dir.join(MARKER_FILE).is_file() {
            tracing::debug!(root = %dir.display(), "Found config root");
            return Some(dir);
        }
        if !dir.pop() {
            tracing::debug!(start = %start.display(), "No config root found");
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch_marker(dir: &Path) {
        fs::write(dir.join(MARKER_FILE), "project_name = \"demo\"\n").unwrap();
    }

    #[test]
    fn finds_marker_in_start_directory() {
        let tmp = tempdir().unwrap();
        touch_marker(tmp.path());

        let root = find_config_root(tmp.path()).unwrap();
        assert_eq!(root, tmp.path().canonicalize().unwrap());
    }

    #[test]
    fn finds_marker_several_levels_up() {
        let tmp = tempdir().unwrap();
        touch_marker(tmp.path());
        let deep = tmp.path().join("lib/src/a/b");
        fs::create_dir_all(&deep).unwrap();
        let file = deep.join("c.cc");
        fs::write(&file, "").unwrap();

        assert_eq!(
            find_config_root(&file).unwrap(),
            tmp.path().canonicalize().unwrap()
        );
        assert_eq!(
            find_config_root(&deep).unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn nearest_marker_wins_over_outer_one() {
        let tmp = tempdir().unwrap();
        touch_marker(tmp.path());
        let inner = tmp.path().join("vendor/inner");
        fs::create_dir_all(inner.join("lib/src")).unwrap();
        touch_marker(&inner);

        let root = find_config_root(&inner.join("lib/src")).unwrap();
        assert_eq!(root, inner.canonicalize().unwrap());
    }

    #[test]
    fn marker_directory_is_not_a_match() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join(MARKER_FILE)).unwrap();

        // Only a regular file counts. Any match must come from above the tempdir.
        let found = find_config_root(tmp.path());
        if let Some(root) = found {
            assert!(!root.starts_with(tmp.path().canonicalize().unwrap()));
        }
    }

    #[test]
    fn nonexistent_path_still_walks_existing_ancestors() {
        let tmp = tempdir().unwrap();
        touch_marker(tmp.path());
        let missing = tmp.path().canonicalize().unwrap().join("not/yet/created.cc");

        assert_eq!(
            find_config_root(&missing).unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn parent_components_of_missing_paths_are_resolved() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        if find_config_root(&root).is_some() {
            return;
        }
        let sibling = root.join("x");
        fs::create_dir_all(&sibling).unwrap();
        touch_marker(&sibling);

        // `x/..` leads back to the tempdir, which has no marker of its own.
        assert_eq!(find_config_root(&root.join("x/../new.cc")), None);
        assert_eq!(absolute_path(&root.join("x/../new.cc")), root.join("new.cc"));
        assert_eq!(
            absolute_path(&root.join("x/./missing/../other.cc")),
            root.join("x/other.cc")
        );
    }

    #[test]
    fn filesystem_root_without_marker_is_absent() {
        // Guard against a stray marker at `/` on the test machine.
        if Path::new("/").join(MARKER_FILE).is_file() {
            return;
        }
        assert_eq!(find_config_root(Path::new("/")), None);
    }

    #[test]
    fn repeated_lookups_are_identical() {
        let tmp = tempdir().unwrap();
        touch_marker(tmp.path());
        let sub = tmp.path().join("lib");
        fs::create_dir_all(&sub).unwrap();

        assert_eq!(find_config_root(&sub), find_config_root(&sub));
    }

    #[test]
    fn absolute_path_joins_relative_onto_cwd() {
        let rel = Path::new("definitely/not/here.cc");
        let abs = absolute_path(rel);
        assert!(abs.is_absolute());
        assert!(abs.ends_with("definitely/not/here.cc"));
    }
}
