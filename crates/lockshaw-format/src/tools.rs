//! Local provisioning of external formatting tools under `<root>/.tools`.

use anyhow::{Context, Result, bail};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    ClangFormat,
}

impl Tool {
    pub fn executable(self) -> &'static str {
        match self {
            Tool::ClangFormat => "clang-format",
        }
    }

    /// Style file the tool reads, relative to the project root.
    pub fn config_file(self) -> Option<&'static str> {
        match self {
            Tool::ClangFormat => Some(".clang-format"),
        }
    }

    fn install_hint(self) -> &'static str {
        match self {
            Tool::ClangFormat => "install clang-format (e.g. `apt install clang-format`)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    Linux,
    Macos,
}

impl System {
    pub fn current() -> Result<Self> {
        match std::env::consts::OS {
            "linux" => Ok(System::Linux),
            "macos" => Ok(System::Macos),
            other => bail!("Unsupported operating system: {other}"),
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            System::Linux => write!(f, "linux"),
            System::Macos => write!(f, "macos"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Arm64,
}

impl Arch {
    pub fn current() -> Result<Self> {
        match std::env::consts::ARCH {
            "x86_64" => Ok(Arch::X86_64),
            "aarch64" => Ok(Arch::Arm64),
            other => bail!("Unsupported architecture: {other}"),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::X86_64 => write!(f, "x86_64"),
            Arch::Arm64 => write!(f, "arm64"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsConfig {
    pub tools_dir: PathBuf,
    pub system: System,
    pub arch: Arch,
}

impl ToolsConfig {
    /// Tools directory `<root>/.tools` for the host platform.
    pub fn for_root(root: &Path) -> Result<Self> {
        Ok(Self {
            tools_dir: root.join(".tools"),
            system: System::current()?,
            arch: Arch::current()?,
        })
    }

    pub fn binary_path(&self, tool: Tool) -> PathBuf {
        self.tools_dir
            .join(format!("{}-{}", self.system, self.arch))
            .join(tool.executable())
    }

    pub fn config_file_for_tool(&self, tool: Tool) -> Option<&'static str> {
        tool.config_file()
    }
}

/// Make sure `tool` is present in the tools directory and return its path.
///
/// A binary already in place is used as is. Otherwise the first match on
/// `PATH` is linked into the tools directory.
pub fn ensure_tool(tool: Tool, config: &ToolsConfig) -> Result<PathBuf> {
    let target = config.binary_path(tool);
    if target.is_file() {
        tracing::debug!(
            tool = tool.executable(),
            path = %target.display(),
            "Tool already provisioned"
        );
        return Ok(target);
    }

    let found = which::which(tool.executable()).with_context(|| {
        format!(
            "'{}' not found in {} or PATH; {}",
            tool.executable(),
            config.tools_dir.display(),
            tool.install_hint()
        )
    })?;

    install_binary(&found, &target)?;
    tracing::info!(
        tool = tool.executable(),
        from = %found.display(),
        to = %target.display(),
        "Provisioned tool"
    );
    Ok(target)
}

/// Place `source` at `target`, replacing whatever stale entry is there
/// (a dangling symlink left behind after the tool moved, for example).
fn install_binary(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create tools directory: {}", parent.display()))?;
    }
    if let Ok(metadata) = std::fs::symlink_metadata(target) {
        tracing::warn!(path = %target.display(), "Replacing stale tool entry");
        let removed = if metadata.is_dir() {
            std::fs::remove_dir_all(target)
        } else {
            std::fs::remove_file(target)
        };
        removed.with_context(|| format!("Failed to remove stale entry: {}", target.display()))?;
    }
    link_binary(source, target)
}

#[cfg(unix)]
fn link_binary(source: &Path, target: &Path) -> Result<()> {
    std::os::unix::fs::symlink(source, target).with_context(|| {
        format!(
            "Failed to link {} to {}",
            source.display(),
            target.display()
        )
    })
}

#[cfg(not(unix))]
fn link_binary(source: &Path, target: &Path) -> Result<()> {
    std::fs::copy(source, target)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(dir: &Path) -> ToolsConfig {
        ToolsConfig {
            tools_dir: dir.join(".tools"),
            system: System::Linux,
            arch: Arch::X86_64,
        }
    }

    #[test]
    fn binary_path_is_platform_scoped() {
        let cfg = config(Path::new("/proj"));
        assert_eq!(
            cfg.binary_path(Tool::ClangFormat),
            PathBuf::from("/proj/.tools/linux-x86_64/clang-format")
        );
    }

    #[test]
    fn clang_format_reads_dot_clang_format() {
        let cfg = config(Path::new("/proj"));
        assert_eq!(
            cfg.config_file_for_tool(Tool::ClangFormat),
            Some(".clang-format")
        );
    }

    #[test]
    fn ensure_tool_prefers_existing_binary() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path());
        let target = cfg.binary_path(Tool::ClangFormat);
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, "").unwrap();

        assert_eq!(ensure_tool(Tool::ClangFormat, &cfg).unwrap(), target);
    }

    #[cfg(unix)]
    #[test]
    fn install_binary_replaces_dangling_link() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path());
        let target = cfg.binary_path(Tool::ClangFormat);
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("moved-away"), &target).unwrap();
        assert!(!target.is_file());

        let real = tmp.path().join("bin/clang-format");
        std::fs::create_dir_all(real.parent().unwrap()).unwrap();
        std::fs::write(&real, "").unwrap();

        install_binary(&real, &target).unwrap();
        assert!(target.is_file());
        assert_eq!(std::fs::read_link(&target).unwrap(), real);
    }

    #[test]
    fn install_binary_replaces_directory_in_the_way() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path());
        let target = cfg.binary_path(Tool::ClangFormat);
        std::fs::create_dir_all(&target).unwrap();

        let real = tmp.path().join("clang-format-real");
        std::fs::write(&real, "").unwrap();

        install_binary(&real, &target).unwrap();
        assert!(target.is_file());
    }

    #[test]
    fn install_binary_creates_missing_tools_dir() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path());
        let target = cfg.binary_path(Tool::ClangFormat);
        let real = tmp.path().join("clang-format-real");
        std::fs::write(&real, "").unwrap();

        install_binary(&real, &target).unwrap();
        assert!(target.is_file());
    }

    #[test]
    fn host_platform_is_detected_on_supported_hosts() {
        if cfg!(any(target_os = "linux", target_os = "macos"))
            && cfg!(any(target_arch = "x86_64", target_arch = "aarch64"))
        {
            let cfg = ToolsConfig::for_root(Path::new("/proj")).unwrap();
            assert_eq!(cfg.tools_dir, PathBuf::from("/proj/.tools"));
        }
    }
}
