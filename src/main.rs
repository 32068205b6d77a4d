use clap::{Parser, Subcommand};
use royalbit_tabula::cli;
use royalbit_tabula::config::TabulaConfig;
use royalbit_tabula::error::TabulaResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Spreadsheets in, deduplicated JSON category datasets out.")]
#[command(long_about = "Tabula - spreadsheet to JSON category datasets

Finds the header row of a sheet (the densest row), turns every row below it
into a JSON record keyed by the header names, and appends the records to a
per-category JSON file, dropping exact duplicates.

COMMANDS:
  convert  - Spreadsheet to JSON on stdout (nothing saved)
  import   - Append a spreadsheet to a category
  add      - Add one record at the front of a category
  fields   - Field names of a category
  show     - Print all records of a category
  serve    - Run the HTTP server

EXAMPLES:
  tabula convert parts.xlsx
  tabula import parts.xlsx --category parts
  tabula add parts --field Name=bolt --field Qty=4
  tabula fields parts
  tabula serve --port 8080")]
#[command(version)]
struct Cli {
    /// Directory holding one <category>.json per category
    #[arg(short, long, global = true, env = "TABULA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a spreadsheet to JSON records without saving them
    Convert {
        /// Spreadsheet file (.xlsx, .xlsm, .xlsb, .xls, .ods)
        file: PathBuf,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    #[command(long_about = "Import a spreadsheet into a category.

Only the first worksheet is read. Its densest row is taken as the header, so
title rows and banners above the table are skipped. Records already present in
the category (same fields, same order, same values) are not added twice.")]
    /// Append a spreadsheet's records to a category
    Import {
        /// Spreadsheet file
        file: PathBuf,

        /// Target category
        #[arg(short, long)]
        category: String,

        /// Show converted row count and fields
        #[arg(short, long)]
        verbose: bool,
    },

    /// Add one record at the front of a category
    Add {
        /// Target category
        category: String,

        /// Field as KEY=VALUE (repeatable, order is kept)
        #[arg(short, long = "field", value_parser = cli::parse_key_value)]
        fields: Vec<(String, String)>,
    },

    /// List the field names of a category
    Fields {
        /// Category name
        category: String,
    },

    /// Print every record of a category as JSON
    Show {
        /// Category name
        category: String,
    },

    /// Run the HTTP server
    Serve {
        /// YAML configuration file
        #[arg(short, long, env = "TABULA_CONFIG")]
        config: Option<PathBuf>,

        /// Host address to bind to
        #[arg(short = 'H', long, env = "TABULA_HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "TABULA_PORT")]
        port: Option<u16>,
    },
}

fn main() -> TabulaResult<()> {
    let cli = Cli::parse();
    let data_dir_arg = cli.data_dir;
    let data_dir = data_dir_arg
        .clone()
        .unwrap_or_else(|| TabulaConfig::default().data_dir);

    match cli.command {
        Commands::Convert { file, output } => cli::convert(file, output),

        Commands::Import {
            file,
            category,
            verbose,
        } => cli::import(file, category, data_dir, verbose),

        Commands::Add { category, fields } => cli::add(category, fields, data_dir),

        Commands::Fields { category } => cli::fields(category, data_dir),

        Commands::Show { category } => cli::show(category, data_dir),

        Commands::Serve { config, host, port } => {
            let mut config = TabulaConfig::load(config.as_deref())?;
            if let Some(data_dir) = data_dir_arg {
                config.data_dir = data_dir;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            cli::serve(config)
        }
    }
}
