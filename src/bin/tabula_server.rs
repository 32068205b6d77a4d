//! Tabula API Server binary
//!
//! HTTP server for spreadsheet uploads and category datasets.

use std::path::PathBuf;

use clap::Parser;
use royalbit_tabula::api::run_api_server;
use royalbit_tabula::config::TabulaConfig;

#[derive(Parser, Debug)]
#[command(name = "tabula-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Tabula API Server - spreadsheet uploads into JSON category datasets")]
#[command(long_about = r#"
Tabula API Server

Endpoints:
  - POST /upload                      - Import a spreadsheet (multipart: excelFile, category)
  - POST /api/add-data                - Add one record ({"category", "formData"})
  - GET  /api/get-headers/:category   - Fields of a category
  - GET  /api/get-data/:category      - All records of a category
  - POST /api/update-categories       - Register categories for the web UI

Additional endpoints:
  - GET  /health                      - Health check
  - GET  /version                     - Server version info
  - GET  /                            - Upload page
  - GET  /:category                   - Data page of a registered category

Configuration file (YAML, all keys optional):
  host, port, data_dir, public_dir, max_upload_bytes, request_timeout_secs

Example usage:
  tabula-server                                  # Start on localhost:3000
  tabula-server --host 0.0.0.0 --port 8080
  tabula-server --config tabula.yaml

  curl -F category=parts -F excelFile=@parts.xlsx http://localhost:3000/upload
"#)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "TABULA_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, env = "TABULA_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TABULA_PORT")]
    port: Option<u16>,

    /// Directory holding the category JSON files
    #[arg(short, long, env = "TABULA_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TabulaConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    run_api_server(config).await
}
