//! Command-line interface definition for Gander
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat screen plus one-shot commands for
//! asking a question and managing documents.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gander - chat with your documents
///
/// Upload documents to a question-answering backend and ask
/// questions about them from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "gander")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the backend base URL
    #[arg(long, env = "GANDER_API_URL")]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute (defaults to `chat`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for Gander
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive chat screen
    Chat,

    /// Ask a single question and print the answer
    Ask {
        /// Question text
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },

    /// Manage documents on the backend
    Files {
        /// File management subcommand
        #[command(subcommand)]
        command: FileCommand,
    },
}

/// Document management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FileCommand {
    /// List active documents
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload one or more documents in a single request
    Upload {
        /// Local files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a document by file name
    Remove {
        /// File name as shown in the document list
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, with `chat` as the default
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            api_url: None,
            verbose: false,
            command: None,
        }
    }
}
