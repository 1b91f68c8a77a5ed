// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! licensedb — curation tool for the SW360 license catalog in CouchDB.
//!
//! Thin caller over `licensedb-client`: every subcommand maps to one
//! repository operation (two for `review`, which reads then writes).
//! Connection settings come from flags or `LICENSEDB_*` environment
//! variables.

mod output;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use licensedb_client::{CouchConfig, LicenseInput, LicenseRepository};
use serde_json::Value;

use output::{print_document, print_documents, OutputFormat};

/// Version string, pulled from Cargo.toml at compile time.
const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

/// licensedb — manage licenses in an SW360 CouchDB database.
#[derive(Parser, Debug)]
#[command(name = "licensedb", version = VERSION, about = "SW360 license catalog tool")]
struct Cli {
    /// CouchDB server URL.
    #[arg(long, env = "LICENSEDB_URL", default_value = "http://localhost:5984")]
    url: String,

    /// Database holding the license documents.
    #[arg(long, env = "LICENSEDB_DATABASE", default_value = "sw360db")]
    database: String,

    /// Basic-auth user.
    #[arg(long, env = "LICENSEDB_USERNAME", default_value = "admin")]
    username: String,

    /// Basic-auth password.
    #[arg(long, env = "LICENSEDB_PASSWORD", default_value = "password", hide_env_values = true)]
    password: String,

    /// Request timeout in seconds (none by default).
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check connectivity and credentials.
    Ping,
    /// List databases on the server.
    Databases,
    /// List licenses.
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one license by document id.
    Get { id: String },
    /// Find licenses by exact short name.
    Find { short_name: String },
    /// List licenses by flag.
    Filter {
        #[arg(value_enum)]
        flag: FilterFlag,
    },
    /// Count licenses.
    Count,
    /// Totals per flag.
    Stats,
    /// Case-insensitive substring search (fetches every license).
    Search {
        text: String,
        /// Field to search; repeatable. Defaults to fullName, shortName, text.
        #[arg(long = "field")]
        fields: Vec<String>,
    },
    /// Create a license.
    Create(LicenseArgs),
    /// Replace a license at a known revision.
    Update {
        id: String,
        rev: String,
        #[command(flatten)]
        license: LicenseArgs,
    },
    /// Delete a license at a known revision.
    Delete { id: String, rev: String },
    /// Mark the license with this short name as checked.
    Review { short_name: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterFlag {
    Osi,
    Checked,
    Unchecked,
}

#[derive(Args, Debug)]
struct LicenseArgs {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    short_name: String,
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    osi_approved: bool,
    #[arg(long)]
    checked: bool,
    /// Extra field as `key=value`; the value is parsed as JSON when possible.
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, Value)>,
}

impl LicenseArgs {
    fn to_input(&self) -> LicenseInput {
        let mut input = LicenseInput::new(&self.full_name, &self.short_name)
            .osi_approved(self.osi_approved)
            .checked(self.checked);
        if let Some(text) = &self.text {
            input = input.with_text(text);
        }
        for (key, value) in &self.fields {
            input = input.with_field(key, value.clone());
        }
        input
    }
}

/// Parse `key=value`, reading the value as JSON and falling back to a string.
fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CouchConfig::new(&cli.url, &cli.database)
        .with_credentials(&cli.username, &cli.password);
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(std::time::Duration::from_secs(secs));
    }
    tracing::debug!(?config, "Connecting");

    let repo = LicenseRepository::new(config).context("invalid connection settings")?;
    run(&repo, cli.command, cli.format).await
}

async fn run(repo: &LicenseRepository, command: Command, format: OutputFormat) -> anyhow::Result<()> {
    match command {
        Command::Ping => {
            let info = repo.client().server_info().await?;
            println!("[OK] Connected to CouchDB {}", info.version);
        }
        Command::Databases => {
            for db in repo.client().list_databases().await? {
                println!("{db}");
            }
        }
        Command::List { limit } => {
            print_documents(&repo.list_licenses(limit).await?, format)?;
        }
        Command::Get { id } => {
            print_document(&repo.get_license(&id).await?, format)?;
        }
        Command::Find { short_name } => {
            print_documents(&repo.find_by_short_name(&short_name).await?, format)?;
        }
        Command::Filter { flag } => {
            let docs = match flag {
                FilterFlag::Osi => repo.osi_approved_licenses().await?,
                FilterFlag::Checked => repo.checked_licenses().await?,
                FilterFlag::Unchecked => repo.unchecked_licenses().await?,
            };
            print_documents(&docs, format)?;
        }
        Command::Count => {
            println!("{}", repo.count_licenses().await?);
        }
        Command::Stats => {
            println!("Total licenses:     {}", repo.count_licenses().await?);
            println!("OSI approved:       {}", repo.osi_approved_licenses().await?.len());
            println!("Reviewed (checked): {}", repo.checked_licenses().await?.len());
            println!("Pending review:     {}", repo.unchecked_licenses().await?.len());
        }
        Command::Search { text, fields } => {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            let fields = (!fields.is_empty()).then_some(fields.as_slice());
            print_documents(&repo.search_licenses(&text, fields).await?, format)?;
        }
        Command::Create(license) => {
            let result = repo.create_license(&license.to_input()).await?;
            println!("[OK] Created license");
            println!("  ID:       {}", result.id);
            println!("  Revision: {}", result.revision);
        }
        Command::Update { id, rev, license } => {
            let result = repo.update_license(&id, &rev, &license.to_input()).await?;
            println!("[OK] Updated license {}", result.id);
            println!("  New revision: {}", result.revision);
        }
        Command::Delete { id, rev } => {
            let result = repo.delete_license(&id, &rev).await?;
            println!("[OK] Deleted license {}", result.id);
        }
        Command::Review { short_name } => {
            let matches = repo.find_by_short_name(&short_name).await?;
            let Some(doc) = matches.first() else {
                bail!("no license with short name '{short_name}'");
            };
            if doc.checked {
                println!("'{short_name}' is already reviewed");
                return Ok(());
            }
            let result = repo
                .update_license(&doc.id, &doc.revision, &doc.to_input().checked(true))
                .await?;
            println!("[OK] Marked '{short_name}' as reviewed");
            println!("  New revision: {}", result.revision);
        }
    }
    Ok(())
}
