use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for CLI responses
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "lockshaw")]
#[command(about = "Project conventions for lib/{include,src} source trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the directory holding the nearest .lockshaw.toml
    Root {
        /// Directory to search from (defaults to CWD)
        #[arg(long)]
        cd: Option<PathBuf>,
    },

    /// Show the project identity and every derived name
    Show {
        /// Directory to search from (defaults to CWD)
        #[arg(long)]
        cd: Option<PathBuf>,
    },

    /// Print the include-guard token for a file
    Ifndef {
        /// File inside the project's lib/ tree
        path: PathBuf,
    },

    /// Print the #include path of a source file's header
    IncludePath {
        /// Source file under lib/src
        path: PathBuf,
    },

    /// Run clang-format over the project's sources
    Format {
        /// Directory to search from (defaults to CWD)
        #[arg(long)]
        cd: Option<PathBuf>,

        /// Files to format; all project sources when omitted
        files: Vec<PathBuf>,
    },
}
