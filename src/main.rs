//! # Mundart Harness CLI (`mundart`)
//!
//! The `mundart` binary is the primary interface for the extraction
//! pipeline. It provides commands for inspecting the geographic scope
//! catalog, compiling corpus query parameters, extracting and ranking
//! records from corpus documents, and starting the MCP server.
//!
//! ## Usage
//!
//! ```bash
//! mundart --config ./config/mundart.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mundart scopes` | List the geographic scope catalog |
//! | `mundart compile <word>` | Validate a request and print query parameters |
//! | `mundart extract <file> <word> [--limit N]` | Extract, score and rank records from a document |
//! | `mundart serve mcp` | Start the MCP-compatible HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Show every scope and the geography it resolves to
//! mundart scopes
//!
//! # Compile parameters for a district search
//! mundart compile Haus --scope landkreis_ansbach
//!
//! # Compile with a town override inside an area
//! mundart compile Haus --scope area_ansbach --town Feuchtwangen
//!
//! # Extract from a saved corpus response (use - for stdin)
//! mundart extract response.xml Haus
//!
//! # Start MCP server
//! mundart serve mcp --config ./config/mundart.toml
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use mundart_harness::extract::HomeArea;
use mundart_harness::request::RawSearchRequest;
use mundart_harness::{config, params, pipeline, scope, server};

/// Mundart Harness CLI — confidence-scored dialect-record extraction for
/// the Franconian dictionary corpus.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/mundart.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "mundart",
    about = "Mundart Harness — confidence-scored dialect-record extraction for the Franconian dictionary corpus",
    version,
    long_about = "Mundart Harness compiles geographic search scopes into corpus query parameters, \
    extracts German-to-Franconian translation records from BDO-WBF XML documents, and ranks them \
    with a deterministic semantic-confidence heuristic, via a CLI and MCP-compatible HTTP server."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/mundart.toml`. The file is optional; built-in
    /// defaults apply when it is absent.
    #[arg(long, global = true, default_value = "./config/mundart.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List the geographic scope catalog.
    ///
    /// Prints every scope token with its family and the place-name or
    /// district-code constraints it resolves to.
    Scopes,

    /// Validate a request and print the compiled query parameters.
    ///
    /// The request goes through the same validation as the tool server:
    /// length and character-set limits on the word and town, and a known
    /// scope token.
    Compile {
        /// German search word.
        word: String,

        /// Geographic scope token (see `mundart scopes`).
        /// Defaults to the Ansbach district.
        #[arg(long)]
        scope: Option<String>,

        /// Free-text town override. Replaces the place-name constraint
        /// but keeps any district constraint.
        #[arg(long)]
        town: Option<String>,

        /// Request an exact-match search.
        #[arg(long)]
        exact: bool,
    },

    /// Extract, score and rank records from a corpus document.
    ///
    /// Reads the XML document from the given file (or stdin with `-`),
    /// extracts translation records, scores each against the search word,
    /// and prints them sorted by confidence.
    Extract {
        /// Path to the corpus XML document, or `-` for stdin.
        file: String,

        /// German search word to score records against.
        word: String,

        /// Keep only the top N records after ranking.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Start the MCP-compatible HTTP server.
    ///
    /// Exposes the pipeline via a JSON API for integration with
    /// MCP-compatible AI tools.
    Serve {
        #[command(subcommand)]
        service: ServeService,
    },
}

/// Server subcommands.
#[derive(Subcommand)]
enum ServeService {
    /// Start the MCP tool server.
    ///
    /// Binds to the address configured in `[server].bind` and serves
    /// the tool endpoints.
    Mcp,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config_or_default(&cli.config)?;

    match cli.command {
        Commands::Scopes => {
            let catalog = scope::catalog();
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        Commands::Compile {
            word,
            scope,
            town,
            exact,
        } => {
            let raw = RawSearchRequest {
                word,
                scope,
                town,
                exact,
            };
            let request = raw.validate()?;
            let compiled = params::compile(&request);
            let output = serde_json::json!({
                "scope": request.scope.as_str(),
                "parameters": compiled,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Extract { file, word, limit } => {
            let xml = read_document(&file)?;
            let home = HomeArea {
                district_code: cfg.home.district_code.clone(),
                town: cfg.home.town.clone(),
            };
            let mut extraction = pipeline::run(&xml, &word, &home)?;
            if let Some(limit) = limit {
                extraction.translations.truncate(limit);
            }
            println!("{}", serde_json::to_string_pretty(&extraction)?);
        }
        Commands::Serve { service } => match service {
            ServeService::Mcp => {
                server::run_server(&cfg).await?;
            }
        },
    }

    Ok(())
}

/// Reads the corpus document from a file path, or from stdin when the
/// path is `-`.
fn read_document(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read document from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read document file: {}", file))
    }
}
