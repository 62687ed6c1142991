use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "appfinder")]
#[command(about = "Find installed applications and their icons")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List discovered applications
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Only show applications whose name contains this text
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Write an application's icon as PNG
    Icon {
        /// Application name
        name: String,
        /// Output file (defaults to the icon name in the current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Launch an application
    Launch {
        /// Application name
        name: String,
    },
}
