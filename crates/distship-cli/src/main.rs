#![forbid(unsafe_code)]

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use distship_config::{Config, ProjectMetadata, RawOptions};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(
    name = "distship",
    about = "Package a build directory and publish it to a Maven repository"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assemble the versioned archive without publishing it
    Package {
        /// Name the archive as a -SNAPSHOT pre-release
        #[arg(long)]
        snapshot: bool,
    },
    /// Assemble the archive and publish it via mvn deploy:deploy-file
    Deploy {
        /// Id of the configured repository to publish to
        #[arg(long)]
        repository: Option<String>,
        /// Publish as a -SNAPSHOT pre-release
        #[arg(long)]
        snapshot: bool,
        /// Show the deploy tool's output
        #[arg(long, short = 'v')]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Package { snapshot } => cmd_package(snapshot),
        Command::Deploy {
            repository,
            snapshot,
            verbose,
        } => cmd_deploy(repository.as_deref(), snapshot, verbose),
    };

    if let Err(msg) = result {
        eprintln!("error: {msg}");
        process::exit(1);
    }
}

/// Find the project root by looking for `distship.toml` in the current directory.
fn project_root() -> Result<PathBuf, Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    let manifest = cwd.join("distship.toml");
    if !manifest.exists() {
        return Err(
            "no distship.toml found in current directory — add one to configure deployment"
                .into(),
        );
    }
    Ok(cwd)
}

fn cmd_package(snapshot: bool) -> CliResult {
    let root = project_root()?;
    let raw = RawOptions::from_path(&root.join("distship.toml"))?;
    let metadata = ProjectMetadata::from_path(&root.join("package.json"))?;
    let config = Config::resolve(raw, &metadata);

    let archive_path = distship_engine::package(&root, &config, snapshot)?;
    eprintln!("    Packaged `{}`", archive_path.display());
    Ok(())
}

fn cmd_deploy(repository: Option<&str>, snapshot: bool, verbose: bool) -> CliResult {
    let root = project_root()?;
    let raw = RawOptions::from_path(&root.join("distship.toml"))?;

    let result = distship_engine::deploy(&root, repository, snapshot, raw)?;

    if verbose && !result.stdout.is_empty() {
        eprintln!("{}", result.stdout);
    }
    eprintln!(
        "    Deployed `{}` in {:.2}s",
        result.archive_path.display(),
        result.duration.as_secs_f64()
    );
    Ok(())
}
