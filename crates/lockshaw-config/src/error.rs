use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("No .lockshaw.toml found in {} or any parent directory", .0.display())]
    ProjectRootNotFound(PathBuf),

    #[error("Failed to read marker file {}: {source}", path.display())]
    ReadMarker {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse marker file {}: {source}", path.display())]
    ParseMarker {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid {field} '{value}': only {allowed} are allowed")]
    InvalidName {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },

    #[error("Path {} is outside of {}", path.display(), base.display())]
    OutsideTree { path: PathBuf, base: PathBuf },

    #[error("Required layout directory {} does not exist", .0.display())]
    MissingLayoutDir(PathBuf),

    #[error(
        "No header found for {}: neither {} nor {} exists",
        source_file.display(),
        public.display(),
        private.display()
    )]
    HeaderNotFound {
        source_file: PathBuf,
        public: PathBuf,
        private: PathBuf,
    },
}
