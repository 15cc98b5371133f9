use clap::{Args, Parser, Subcommand};
use format_json::JsonFormatConfig;
use row_api::Schema;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "row-decode", about = "Decode JSON records into typed rows")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode newline-delimited JSON records and print one row per line
    Decode(DecodeArgs),
}

#[derive(Args, Clone, Debug)]
pub struct DecodeArgs {
    /// Path to the TOML decoder config
    #[arg(long, default_value = "decoder.toml", env = "DECODER_CONFIG")]
    pub config: String,

    /// Input file with one JSON record per line (stdin if omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Stop at the first bad record instead of skipping it
    #[arg(long)]
    pub fail_fast: bool,
}

// ---- TOML Config ----

#[derive(Debug, Deserialize)]
pub struct DecoderConfig {
    /// Topic name, used as log context.
    #[serde(default = "default_topic")]
    pub topic: String,
    pub schema: Schema,
    #[serde(default)]
    pub json: JsonFormatConfig,
}

fn default_topic() -> String {
    "default".to_string()
}

impl DecoderConfig {
    pub fn load(path: &str) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config { context: "read", detail: format!("'{path}': {e}") })?;
        Self::parse(&content)
            .map_err(|e| CliError::Config { context: "parse", detail: format!("'{path}': {e}") })
    }

    pub fn parse(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
