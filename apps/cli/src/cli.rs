use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tailor")]
#[command(about = "Tailor a resume to a job posting from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a resume PDF and save its cleaned text
    Parse {
        /// PDF file; bare filenames are resolved inside the data directory
        file: String,
    },

    /// Fetch a job posting URL and save its relevant sentences
    Fetch { url: String },

    /// Generate tailoring suggestions from previously saved artifacts
    Suggest,

    /// Interactive end-to-end run: parse, fetch and filter, then tailor
    Run,
}
