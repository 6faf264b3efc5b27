//! Ontoforge CLI
//!
//! Command-line interface for maintaining YAML entity ontologies: merge and
//! split per-entity files, unify modules, apply review fixes, normalize and
//! analyze.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ontoforge::OntologyConfig;
use ontoforge_cli::commands;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "ontoforge")]
#[command(about = "Maintenance tool for YAML entity ontologies")]
#[command(version = "0.1.0")]
struct Cli {
    /// Settings file overlaid on the bundled defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge per-entity files into one ontology document
    MergeEntities {
        /// Directory holding the entity files
        #[arg(long)]
        dir: PathBuf,

        /// Output ontology file
        #[arg(long)]
        output: PathBuf,

        /// Keep the merged entities as they are on disk
        #[arg(long)]
        no_normalize: bool,
    },

    /// Split an ontology document into one file per entity
    Split {
        /// Ontology file to split
        #[arg(long)]
        input: PathBuf,

        /// Directory for the entity files
        #[arg(long)]
        output_dir: PathBuf,
    },

    /// Combine the Time & Attendance and Absence ontologies
    Unify {
        /// Time & Attendance ontology
        #[arg(long)]
        time_attendance: PathBuf,

        /// Absence ontology
        #[arg(long)]
        absence: PathBuf,

        /// Output ontology file
        #[arg(long)]
        output: PathBuf,

        /// Skip entity normalization
        #[arg(long)]
        no_normalize: bool,
    },

    /// Install catalog entities, normalize and stamp maintenance notes
    Fix {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,
    },

    /// Normalize every entity of an ontology document
    Normalize {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,
    },

    /// Report entities lacking audit or versioning fields
    Analyze {
        #[arg(long)]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    } else if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    // JSON output must stay machine-readable
    let json_output = matches!(cli.command, Commands::Analyze { json: true, .. });

    match run(cli.config, cli.command) {
        Ok(()) => {
            if !cli.quiet && !json_output {
                println!("✅ Success");
            }
            process::exit(0);
        }
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(config_path: Option<PathBuf>, command: Commands) -> Result<()> {
    let config = OntologyConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    let today = chrono::Local::now().date_naive();

    match command {
        Commands::MergeEntities {
            dir,
            output,
            no_normalize,
        } => {
            commands::run_merge(&config, &dir, &output, !no_normalize, today)?;
        }
        Commands::Split { input, output_dir } => {
            commands::run_split(&config, &input, &output_dir)?;
        }
        Commands::Unify {
            time_attendance,
            absence,
            output,
            no_normalize,
        } => {
            commands::run_unify(&config, &time_attendance, &absence, &output, !no_normalize, today)?;
        }
        Commands::Fix { input, output } => {
            commands::run_fix(&config, &input, &output, today)?;
        }
        Commands::Normalize { input, output } => {
            commands::run_normalize(&config, &input, &output)?;
        }
        Commands::Analyze { input, json } => {
            commands::run_analyze(&input, json)?;
        }
    }
    Ok(())
}
