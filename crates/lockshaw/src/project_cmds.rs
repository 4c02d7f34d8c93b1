use anyhow::{Context, Result};
use lockshaw_config::{ProjectConfig, find_config_root};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;

pub(crate) fn determine_start_dir(cd: Option<&Path>) -> Result<PathBuf> {
    let path = match cd {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    path.canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))
}

pub(crate) fn load_project(cd: Option<&Path>) -> Result<ProjectConfig> {
    let start = determine_start_dir(cd)?;
    ProjectConfig::load(&start)?.ok_or_else(|| {
        anyhow::anyhow!(
            "No .lockshaw.toml found in {} or any parent directory",
            start.display()
        )
    })
}

/// Returns the process exit code: 0 when a root was found, 1 otherwise.
pub(crate) fn handle_root(cd: Option<&Path>, format: OutputFormat) -> Result<i32> {
    let start = determine_start_dir(cd)?;
    let root = find_config_root(&start);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "config_root": root }));
        }
        OutputFormat::Text => {
            if let Some(root) = &root {
                println!("{}", root.display());
            } else {
                eprintln!("No project found above {}", start.display());
            }
        }
    }
    Ok(if root.is_some() { 0 } else { 1 })
}

#[derive(Debug, Serialize)]
struct ProjectSummary {
    project_name: String,
    config_root: PathBuf,
    build_dir: PathBuf,
    build_target: String,
    test_target: String,
    ifndef_name: String,
    namespace_name: String,
    testsuite_macro: String,
}

impl ProjectSummary {
    fn from_config(config: &ProjectConfig) -> Result<Self> {
        Ok(Self {
            project_name: config.project_name().to_string(),
            config_root: config.config_root().to_path_buf(),
            build_dir: config.build_dir(),
            build_target: config.build_target(),
            test_target: config.test_target(),
            ifndef_name: config.ifndef_name()?,
            namespace_name: config.namespace_name()?,
            testsuite_macro: config.testsuite_macro()?,
        })
    }
}

pub(crate) fn handle_show(cd: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = load_project(cd)?;
    let summary = ProjectSummary::from_config(&config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => {
            println!("project_name    = {}", summary.project_name);
            println!("config_root     = {}", summary.config_root.display());
            println!("build_dir       = {}", summary.build_dir.display());
            println!("build_target    = {}", summary.build_target);
            println!("test_target     = {}", summary.test_target);
            println!("ifndef_name     = {}", summary.ifndef_name);
            println!("namespace_name  = {}", summary.namespace_name);
            println!("testsuite_macro = {}", summary.testsuite_macro);
        }
    }
    Ok(())
}

pub(crate) fn handle_ifndef(path: &Path, format: OutputFormat) -> Result<()> {
    let uid = lockshaw_config::include_guard_uid(path)?;
    print_value("ifndef", &uid, format);
    Ok(())
}

pub(crate) fn handle_include_path(path: &Path, format: OutputFormat) -> Result<()> {
    let include = lockshaw_config::include_path(path)?;
    print_value("include_path", &include, format);
    Ok(())
}

fn print_value(key: &str, value: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let mut object = serde_json::Map::new();
            object.insert(key.to_string(), serde_json::Value::from(value));
            println!("{}", serde_json::Value::Object(object));
        }
        OutputFormat::Text => println!("{value}"),
    }
}
