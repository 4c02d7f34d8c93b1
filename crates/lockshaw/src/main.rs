use anyhow::Result;
use clap::Parser;

mod cli;
mod project_cmds;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Root { cd } => {
            let exit_code = project_cmds::handle_root(cd.as_deref(), format)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Show { cd } => project_cmds::handle_show(cd.as_deref(), format)?,
        Commands::Ifndef { path } => project_cmds::handle_ifndef(&path, format)?,
        Commands::IncludePath { path } => project_cmds::handle_include_path(&path, format)?,
        Commands::Format { cd, files } => {
            let config = project_cmds::load_project(cd.as_deref())?;
            let files = if files.is_empty() { None } else { Some(files) };
            lockshaw_format::run_formatter(&config, files)?;
        }
    }

    Ok(())
}
