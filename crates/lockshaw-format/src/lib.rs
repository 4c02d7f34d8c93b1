//! Source formatting: file discovery, clang-format provisioning and invocation.

pub mod discover;
pub mod runner;
pub mod tools;

pub use discover::{DEFAULT_EXTENSIONS, default_blacklist, find_files};
pub use runner::{run_clang_format, run_formatter};
pub use tools::{Arch, System, Tool, ToolsConfig, ensure_tool};
