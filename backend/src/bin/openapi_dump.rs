//! Print the OpenAPI document as pretty JSON, to stdout or a file.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use utoipa::OpenApi;
use wedding_backend::ApiDoc;

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Write the wedding backend OpenAPI document as JSON",
    version
)]
struct CliArgs {
    /// Write to this file instead of stdout.
    #[arg(long, short, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    let args = CliArgs::parse();
    let mut json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(std::io::Error::other)?;
    json.push('\n');

    match args.output {
        Some(path) => std::fs::write(path, json),
        None => std::io::stdout().lock().write_all(json.as_bytes()),
    }
}
