use clap::{Parser, Subcommand};
use dccfs_files::FileFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dccfs")]
#[command(author, version, about = "Inspect and manage files with extension-based type dispatch")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how a path resolves
    Info {
        /// Path to inspect (does not need to exist)
        path: PathBuf,
    },

    /// List a directory
    Ls {
        /// Directory to list
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Child kinds to list: file, directory (repeatable)
        #[arg(short, long)]
        filter: Vec<FileFilter>,

        /// Extensions to match (repeatable)
        #[arg(short, long = "ext")]
        ext: Vec<String>,

        /// Drop files matching --ext instead of keeping them
        #[arg(long)]
        exclude: bool,
    },

    /// Print a file's content
    Cat {
        /// File to read
        path: PathBuf,
    },

    /// Create or overwrite a file with its kind's default content
    Create {
        /// File to create
        path: PathBuf,

        /// Content to write instead of the default
        #[arg(long)]
        content: Option<String>,

        /// Parse --content as JSON
        #[arg(long, requires = "content")]
        json: bool,
    },

    /// Create a directory and any missing parents
    Mkdir {
        /// Directory to create
        path: PathBuf,
    },

    /// Copy a file
    Cp {
        /// File to copy
        source: PathBuf,

        /// Destination directory (defaults to the source's directory)
        #[arg(long)]
        to: Option<PathBuf>,

        /// Destination name without extension
        #[arg(long)]
        name: Option<String>,

        /// Preserve access and modification times
        #[arg(long)]
        preserve: bool,
    },

    /// Rename a file or directory in place
    Rename {
        /// Entity to rename
        path: PathBuf,

        /// New base name, extension included
        new_name: String,
    },

    /// Open a file with the configured editor
    Open {
        /// File to open
        path: PathBuf,
    },

    /// Compile a .ui file into a Python module
    Compile {
        /// The .ui file
        path: PathBuf,

        /// Output directory (defaults to the .ui file's directory)
        #[arg(long)]
        to: Option<PathBuf>,
    },

    /// List registered extensions and their kinds
    Kinds,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}
