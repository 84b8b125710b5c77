use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imagestore")]
#[command(author, version, about = "Store images and their thumbnails in a SQLite database")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload an image file into the database
    Upload {
        /// Image file to upload
        #[arg(required = true)]
        file: PathBuf,

        /// Create a thumbnail
        #[arg(long, conflicts_with = "no_thumbnail")]
        thumbnail: bool,

        /// Do not create a thumbnail, even if the config asks for one
        #[arg(long)]
        no_thumbnail: bool,

        /// Length of the thumbnail's longer edge in pixels
        #[arg(short, long)]
        size: Option<u32>,

        /// Declared content type (guessed from the extension if omitted)
        #[arg(long)]
        content_type: Option<String>,

        /// File name to store instead of the one on disk
        #[arg(long)]
        name: Option<String>,

        /// Output the stored record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the metadata of a stored image
    Show {
        /// Image ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored images
    List {
        /// Only list images with this exact file name
        #[arg(long)]
        name: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a stored image (or its thumbnail) to a file
    Export {
        /// Image ID
        id: String,

        /// Output file
        output: PathBuf,

        /// Export the thumbnail instead of the original
        #[arg(long)]
        thumbnail: bool,
    },

    /// Delete a stored image
    Delete {
        /// Image ID
        id: String,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write the config (default: ./imagestore.toml)
        path: Option<PathBuf>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
