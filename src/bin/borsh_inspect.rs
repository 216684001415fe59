//! # Borsh Inspect CLI
//!
//! Decode and encode Borsh buffers from the command line.
//!
//! ```text
//! borsh-inspect decode --schema token_account --input @account.hex
//! borsh-inspect decode --schema ./layout.json --input ASwBAAA= --format base64
//! borsh-inspect encode --schema user_profile --value '{"username": "alice", ...}'
//! borsh-inspect schemas
//! ```
//!
//! `--schema` takes a built-in schema name or a path to a JSON schema file.
//! Arguments starting with `@` are read from the named file. Results are
//! printed as JSON; the exit code is 1 when decoding or encoding failed.

use anyhow::{Context, Result};
use borsh_inspect::application::fixtures;
use borsh_inspect::application::input::{ByteSource, parse_bytes};
use borsh_inspect::config::InspectorConfig;
use borsh_inspect::domain::pubkey::PubkeyEncoding;
use borsh_inspect::domain::schema::Schema;
use borsh_inspect::Inspector;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "borsh-inspect", version)]
#[command(about = "Schema-driven Borsh decoder and encoder")]
struct Cli {
    /// Configuration file (TOML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Text encoding for public keys
    #[arg(long, global = true)]
    pubkey_encoding: Option<PubkeyEncoding>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode bytes against a schema
    Decode {
        /// Built-in schema name or schema file
        #[arg(short, long)]
        schema: String,
        /// Encoded bytes, or @file
        #[arg(short, long)]
        input: String,
        /// How the input represents bytes: hex, base64 or text
        #[arg(short, long)]
        format: Option<ByteSource>,
    },
    /// Encode a JSON value against a schema
    Encode {
        /// Built-in schema name or schema file
        #[arg(short, long)]
        schema: String,
        /// JSON value, or @file
        #[arg(short, long)]
        value: String,
    },
    /// List built-in schemas, or print one as JSON
    Schemas {
        /// Schema to print
        name: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    let mut config = InspectorConfig::load(cli.config.as_deref())?;
    if let Some(encoding) = cli.pubkey_encoding {
        config = config.with_pubkey_encoding(encoding);
    }
    if cli.compact {
        config = config.with_pretty_json(false);
    }
    let inspector = Inspector::new(config);

    match cli.command {
        Commands::Decode {
            schema,
            input,
            format,
        } => {
            let schema = load_schema(&schema)?;
            let format = format.unwrap_or(config.default_input());
            let bytes = read_input(&input, format)?;
            tracing::info!(schema = %schema.name, len = bytes.len(), %format, "decoding");

            let result = inspector.decode(&bytes, &schema);
            print_json(&result.to_json(config.pubkey_encoding()), &config)?;
            Ok(exit_code(result.is_valid))
        }
        Commands::Encode { schema, value } => {
            let schema = load_schema(&schema)?;
            let text = read_argument(&value)?;
            let json: serde_json::Value =
                serde_json::from_str(&text).context("value is not valid JSON")?;
            tracing::info!(schema = %schema.name, "encoding");

            let result = inspector.encode_json(&json, &schema);
            print_json(&result, &config)?;
            Ok(exit_code(result.is_valid))
        }
        Commands::Schemas { name: Some(name) } => {
            let schema = fixtures::by_name(&name)?;
            print_json(&schema, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Schemas { name: None } => {
            for schema in fixtures::all() {
                println!(
                    "{:<16} {}",
                    schema.name,
                    schema.description.as_deref().unwrap_or_default()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_schema(reference: &str) -> Result<Schema> {
    let path = Path::new(reference);
    if !path.is_file() {
        return Ok(fixtures::by_name(reference)?);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file {}", path.display()))?;
    Schema::from_json_str(&text)
        .with_context(|| format!("invalid schema file {}", path.display()))
}

fn read_argument(argument: &str) -> Result<String> {
    match argument.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
        }
        None => Ok(argument.to_string()),
    }
}

fn read_input(argument: &str, format: ByteSource) -> Result<Vec<u8>> {
    // text files are taken byte for byte, even when not UTF-8
    if let (Some(path), ByteSource::Text) = (argument.strip_prefix('@'), format) {
        return std::fs::read(path).with_context(|| format!("failed to read {path}"));
    }
    let text = read_argument(argument)?;
    Ok(parse_bytes(&text, format)?)
}

fn print_json<T: Serialize>(value: &T, config: &InspectorConfig) -> Result<()> {
    let rendered = if config.pretty_json() {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
