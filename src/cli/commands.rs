use crate::api::run_api_server;
use crate::config::TabulaConfig;
use crate::core::RecordService;
use crate::error::{TabulaError, TabulaResult};
use crate::store::JsonFileStore;
use crate::types::{DatasetState, Record};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

fn service(data_dir: &Path) -> RecordService<JsonFileStore> {
    RecordService::new(JsonFileStore::new(data_dir))
}

fn to_pretty_json(records: &[Record]) -> TabulaResult<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| TabulaError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Parse a `KEY=VALUE` argument. The value may itself contain `=`.
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", arg))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in '{}'", arg));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Execute the convert command: spreadsheet → JSON records, nothing persisted
pub fn convert(file: PathBuf, output: Option<PathBuf>) -> TabulaResult<()> {
    let bytes = fs::read(&file)?;
    let records = crate::excel::convert_bytes(&bytes)?;
    let json = to_pretty_json(&records)?;

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            println!("{}", "✅ Converted".bold().green());
            println!("   {} → {}", file.display(), path.display());
            println!("   Records: {}", records.len().to_string().bold());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Execute the import command: spreadsheet → category dataset (append + dedupe)
pub fn import(file: PathBuf, category: String, data_dir: PathBuf, verbose: bool) -> TabulaResult<()> {
    println!("{}", "📥 Tabula - Importing spreadsheet".bold().green());
    println!("   File: {}", file.display());
    println!("   Category: {}\n", category.bright_blue().bold());

    let bytes = fs::read(&file)?;
    let svc = service(&data_dir);

    let before = svc.fetch_all(&category)?.len();
    let converted = svc.convert(&bytes)?;
    if verbose {
        println!("   Converted {} rows", converted.len());
        if let Some(first) = converted.first() {
            let fields: Vec<&str> = first.keys().map(String::as_str).collect();
            println!("   Fields: {}", fields.join(", ").cyan());
        }
    }

    let saved = svc.import_bulk(&category, converted)?;
    let added = saved.len().saturating_sub(before);

    println!("{}", "✅ Import complete".bold().green());
    println!(
        "   {} new, {} total → {}",
        added.to_string().bold().green(),
        saved.len(),
        svc.store().path_for(&category).display()
    );
    Ok(())
}

/// Execute the add command: one record at the front of a category
pub fn add(category: String, fields: Vec<(String, String)>, data_dir: PathBuf) -> TabulaResult<()> {
    if fields.is_empty() {
        return Err(TabulaError::MissingInput("formData"));
    }
    let record: Record = fields
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    let saved = service(&data_dir).add_single(&category, record)?;

    println!("{}", "✅ Record added".bold().green());
    println!(
        "   Category: {} ({} records)",
        category.bright_blue().bold(),
        saved.len()
    );
    Ok(())
}

/// Execute the fields command: keys of the first stored record
pub fn fields(category: String, data_dir: PathBuf) -> TabulaResult<()> {
    let listing = service(&data_dir).list_fields(&category)?;

    println!("{}", "📋 Fields".bold().green());
    println!("   Category: {}", category.bright_blue().bold());
    match listing.state {
        DatasetState::Populated => {
            for field in &listing.fields {
                println!("   • {}", field.cyan());
            }
        }
        DatasetState::Empty | DatasetState::Missing => {
            println!("   {}", listing.message().yellow());
        }
    }
    Ok(())
}

/// Execute the show command: print every stored record as JSON
pub fn show(category: String, data_dir: PathBuf) -> TabulaResult<()> {
    let records = service(&data_dir).fetch_all(&category)?;
    println!("{}", to_pretty_json(&records)?);
    Ok(())
}

/// Execute the serve command: run the HTTP server until interrupted
pub fn serve(config: TabulaConfig) -> TabulaResult<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(run_api_server(config))
        .map_err(|e| TabulaError::Server(e.to_string()))
}
