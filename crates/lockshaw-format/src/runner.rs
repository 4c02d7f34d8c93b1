use anyhow::{Context, Result, bail};
use lockshaw_config::ProjectConfig;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::discover::{DEFAULT_EXTENSIONS, default_blacklist, find_files};
use crate::tools::{Tool, ToolsConfig, ensure_tool};

fn clang_format_command(
    root: &Path,
    tools: &ToolsConfig,
    args: &[&str],
    files: &[PathBuf],
    use_default_style: bool,
) -> Result<Command> {
    let mut command = Command::new(tools.binary_path(Tool::ClangFormat));
    if !use_default_style {
        let style_file = tools
            .config_file_for_tool(Tool::ClangFormat)
            .context("clang-format has no style file configured")?;
        command.arg(format!("--style=file:{}", root.join(style_file).display()));
    }
    command.args(args).args(files);
    Ok(command)
}

/// Run the provisioned clang-format binary on `files` and wait for it.
///
/// A non-zero exit status is returned as an error.
pub fn run_clang_format(
    root: &Path,
    tools: &ToolsConfig,
    args: &[&str],
    files: &[PathBuf],
    use_default_style: bool,
) -> Result<()> {
    let mut command = clang_format_command(root, tools, args, files, use_default_style)?;
    if let [file] = files {
        tracing::debug!(command = ?command, "Running clang-format on 1 file: {}", file.display());
    } else {
        tracing::debug!(command = ?command, "Running clang-format on {} files", files.len());
    }

    let status = command
        .status()
        .with_context(|| format!("Failed to launch {}", command.get_program().to_string_lossy()))?;
    if !status.success() {
        match status.code() {
            Some(code) => bail!("clang-format exited with status {code}"),
            None => bail!("clang-format was terminated by a signal"),
        }
    }
    Ok(())
}

/// Format `files` in place, or every discovered source file of the project
/// when `files` is `None`.
pub fn run_formatter(config: &ProjectConfig, files: Option<Vec<PathBuf>>) -> Result<()> {
    let root = config.config_root();
    let files = match files {
        Some(files) => files,
        None => {
            let blacklist = default_blacklist(root);
            find_files(root, &DEFAULT_EXTENSIONS, &blacklist)?.collect()
        }
    };
    if files.is_empty() {
        tracing::info!("No files to format");
        return Ok(());
    }

    let tools = ToolsConfig::for_root(root)?;
    ensure_tool(Tool::ClangFormat, &tools)?;

    tracing::info!("Formatting the following files:");
    for file in &files {
        tracing::info!("- {}", file.display());
    }
    run_clang_format(root, &tools, &["-i"], &files, false)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
