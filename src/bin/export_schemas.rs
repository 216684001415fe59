//! Writes the JSON Schema of the schema document format, plus every
//! built-in schema, into a directory.
//!
//! ```text
//! export_schemas --out-dir ./schemas
//! ```

use anyhow::{Context, Result};
use borsh_inspect::application::fixtures;
use borsh_inspect::domain::schema::Schema;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "export_schemas")]
#[command(about = "Export the schema document JSON Schema and built-in schemas")]
struct Args {
    /// Output directory
    #[arg(short, long, default_value = "schemas")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let meta = schemars::schema_for!(Schema);
    write_json(&args.out_dir.join("schema.schema.json"), &serde_json::to_value(&meta)?)?;

    for schema in fixtures::all() {
        let path = args.out_dir.join(format!("{}.json", schema.name));
        write_json(&path, &schema.to_json_value())?;
    }

    tracing::info!(dir = %args.out_dir.display(), count = fixtures::NAMES.len() + 1, "exported schemas");
    Ok(())
}

fn write_json(path: &std::path::Path, value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote");
    Ok(())
}
