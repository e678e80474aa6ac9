//! esgboard CLI - Transform ESG portfolio CSVs into chart-ready tables
//!
//! # Main Commands
//!
//! ```bash
//! esgboard dashboard dataset.csv   # Full chart-spec bundle as JSON
//! esgboard counts dataset.csv      # Company counts per industry and country
//! esgboard risks dataset.csv       # Per-country risk averages
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! esgboard parse dataset.csv       # Just load and dump the table
//! esgboard columns                 # Show the expected schema
//! ```

use clap::{Parser, Subcommand};
use esgboard::{
    build_dashboard, columns_description, count_by, decode_content, detect_encoding,
    load_csv_file, load_str, risk_matrix, risk_means, Column, LoadResult, Table,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "esgboard")]
#[command(about = "Transform ESG portfolio CSVs into chart-ready aggregate tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a CSV file and output the table as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Company counts per industry and country
    Counts {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Per-country risk averages, long form or as a matrix
    Risks {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output the Country x risk-type matrix instead of long rows
        #[arg(short, long)]
        matrix: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Full dashboard: every chart spec plus the risk matrix
    Dashboard {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the expected input columns
    Columns,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Parse { input, delimiter, output } => {
            let table = load(&input, delimiter)?;
            write_output(&serde_json::to_value(&table)?, output)
        }

        Commands::Counts { input, delimiter, output } => {
            let table = load(&input, delimiter)?;
            let counts = count_by(
                &table,
                &[Column::Industry.header(), Column::Country.header()],
            )?;
            write_output(&serde_json::to_value(&counts)?, output)
        }

        Commands::Risks { input, delimiter, matrix, output } => {
            let table = load(&input, delimiter)?;
            let value = if matrix {
                serde_json::to_value(risk_matrix(&table)?)?
            } else {
                serde_json::to_value(risk_means(&table)?)?
            };
            write_output(&value, output)
        }

        Commands::Dashboard { input, delimiter, output } => {
            let table = load(&input, delimiter)?;
            let dashboard = build_dashboard(&table)?;
            write_output(&serde_json::to_value(&dashboard)?, output)
        }

        Commands::Columns => {
            print!("{}", columns_description());
            Ok(())
        }
    }
}

/// Load with auto-detection, or with an explicit delimiter.
fn load(input: &Path, delimiter: Option<char>) -> LoadResult<Table> {
    match delimiter {
        Some(d) => {
            let bytes = fs::read(input)?;
            let encoding = detect_encoding(&bytes);
            let content = decode_content(&bytes, &encoding)?;
            load_str(&content, d)
        }
        None => load_csv_file(input),
    }
}

fn write_output(
    value: &serde_json::Value,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
