mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "elevator",
    version,
    about = "Mark programs to always run as administrator"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the elevator window (default; `elevatorw` opens it without a console)
    Open,
    /// Mark programs to always run as administrator
    Add {
        /// Executables to mark
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Stop marking programs to run as administrator
    Remove {
        /// Executables to unmark
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List the programs marked to run as administrator
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create the default configuration file
    Init,
    /// Check the configuration and registry access
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Open) {
        Commands::Open => commands::open::execute(),
        Commands::Add { paths } => commands::add::execute(&paths),
        Commands::Remove { paths, yes } => commands::remove::execute(&paths, yes),
        Commands::List { json } => commands::list::execute(json),
        Commands::Init => commands::init::execute(),
        Commands::Doctor => commands::doctor::execute(),
    }
}
