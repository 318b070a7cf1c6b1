use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use svn_structure_guard::utils;

#[derive(Parser)]
#[command(name = "svn-structure-guard")]
#[command(about = "A Subversion pre-commit hook enforcing trunk/branches/tags layout conventions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pending transaction (invoked by the pre-commit hook)
    PreCommit {
        /// Path to the repository
        repos_path: PathBuf,
        /// Name of the pending transaction
        txn_name: String,
        /// Render the verdict as JSON on stdout instead of hook diagnostics
        #[arg(long)]
        json: bool,
    },
    /// Write a default configuration file into the repository's conf directory
    Init {
        /// Path to the repository
        repos_path: PathBuf,
    },
    /// Install the pre-commit hook script into the repository's hooks directory
    InstallHook {
        /// Path to the repository
        repos_path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::PreCommit {
            repos_path,
            txn_name,
            json,
        } => {
            // Exit status is the hook contract: zero lets the commit
            // proceed, anything else aborts it. An error from the backend
            // (the transaction could not be inspected) also aborts, via
            // the Err return.
            let accepted = utils::validate_transaction(&repos_path, &txn_name, json)?;
            if !accepted {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Init { repos_path } => utils::initialize_repository(&repos_path),
        Commands::InstallHook { repos_path } => utils::install_hook(&repos_path),
    }
}
