//! CLI interface for Blogpad

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blogpad")]
#[command(author = "Krakaw")]
#[command(version)]
#[command(about = "A small blog with user accounts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a blogpad.toml configuration file with a fresh secret key
    Init,

    /// Create the database tables
    InitDb {
        /// Drop existing tables (and all their data) first
        #[arg(long)]
        reset: bool,
    },

    /// Start the web server
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long, env = "BLOGPAD_HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long, env = "BLOGPAD_PORT")]
        port: Option<u16>,
    },
}
