use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_BIND, DEFAULT_STATIC_DIR};

#[derive(Parser, Debug)]
#[command(name = "notekeeper")]
#[command(version, about = "A small note-taking web application")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root holding .notekeeper/ (defaults to searching upward from the current directory)
    #[arg(long, global = true, env = "NOTEKEEPER_ROOT")]
    pub root: Option<PathBuf>,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// More logging (repeat for trace output)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty note store in the project root
    Init,

    /// Run the web application
    Serve(ServeArgs),

    /// Add a note from the command line
    Add {
        /// Note title
        title: String,

        /// Note description
        description: String,

        /// Importance flag (true, 1, on, yes mark the note as important)
        #[arg(long)]
        important: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get a single note
    Get {
        /// Note ID (sequence number like "3" or UUID prefix like "a1b2c")
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "NOTEKEEPER_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Directory served under /static
    #[arg(long, env = "NOTEKEEPER_STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,
}
