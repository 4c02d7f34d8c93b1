//! Project configuration discovery (.lockshaw.toml) and layout path resolution.

pub mod config;
pub mod error;
pub mod locate;
pub mod paths;

pub use config::{MarkerFile, ProjectConfig, get_config};
pub use error::ConfigError;
pub use locate::{MARKER_FILE, absolute_path, find_config_root};
pub use paths::{
    HEADER_EXTENSION, HeaderVisibility, INCLUDE_DIR, LIB_DIR, ResolvedHeader, SRC_DIR,
    include_guard_uid, include_path, lib_root, resolve_header, with_suffixes,
};

pub type Result<T> = std::result::Result<T, ConfigError>;
