//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "persona-survey")]
#[command(author, version, about = "Simulated personas answer structured surveys through a local LLM", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Path to config.json (default: ~/.persona-survey/config.json)
    #[arg(long, global = true, env = "PERSONA_SURVEY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default config and prompt templates
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Import a survey from a JSON document
    Import {
        /// Survey JSON file
        file: PathBuf,
    },

    /// List stored surveys
    List,

    /// Have personas answer a survey
    Fill {
        survey_id: String,

        /// Only fill for this persona
        #[arg(long)]
        persona: Option<String>,
    },

    /// Per-question statistics over completed responses
    Analyze { survey_id: String },

    /// Write a survey with its responses and analytics as JSON
    Export {
        survey_id: String,

        /// Output file (default: survey_<id>_<timestamp>.json in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Response counts for a survey
    Stats { survey_id: String },

    /// Copy a survey under a new id
    Duplicate {
        survey_id: String,

        /// Title of the copy (default: "<title> (複製)")
        #[arg(long)]
        title: Option<String>,
    },

    /// Delete a survey and its responses
    Delete { survey_id: String },

    /// Check the generation backend is reachable
    Health,
}
