//! quarry: inspect a table catalog
//!
//! # Usage
//!
//! ```bash
//! # List inferred relationships
//! quarry relationships --catalog catalog.json
//!
//! # Show which tables classify as join tables
//! quarry join-tables --catalog catalog.toml
//!
//! # Render the query behind a relationship
//! quarry query --catalog catalog.json --table users --relationship posts_user_id_fkey --bind 42
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use quarry::config::{OutputFormat, QuarryConfig};
use quarry::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(version)]
#[command(about = "Relationship inference and SQL rendering over a table catalog", long_about = None)]
#[command(after_help = "EXAMPLES:
    quarry relationships --catalog catalog.json --format json
    quarry join-tables --catalog catalog.toml
    quarry query --catalog catalog.json --table users --relationship fk_role --bind 7")]
struct Cli {
    /// Config file (defaults to $QUARRY_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the relationships inferred for every table
    Relationships {
        /// Catalog file (.json or .toml)
        #[arg(short, long, env = "QUARRY_CATALOG")]
        catalog: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
    /// List the tables classified as join tables
    JoinTables {
        #[arg(short, long, env = "QUARRY_CATALOG")]
        catalog: Option<PathBuf>,
    },
    /// Render the SELECT that loads a relationship
    Query {
        #[arg(short, long, env = "QUARRY_CATALOG")]
        catalog: Option<PathBuf>,

        /// Table holding the relationship
        #[arg(short, long)]
        table: String,

        /// Relationship name
        #[arg(short, long)]
        relationship: String,

        /// postgres, mysql or sqlite
        #[arg(short, long)]
        dialect: Option<String>,

        /// Source key values, in column-name order
        #[arg(short, long, value_delimiter = ',')]
        bind: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "quarry=debug" } else { "quarry=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = QuarryConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match &cli.command {
        Commands::Relationships { catalog, format } => {
            let catalog = open_catalog(catalog.as_deref(), &config)?;
            let format = format.map(OutputFormat::from).unwrap_or(config.format);
            show_relationships(catalog.relationships()?, format)
        }
        Commands::JoinTables { catalog } => {
            let catalog = open_catalog(catalog.as_deref(), &config)?;
            show_join_tables(&catalog);
            Ok(())
        }
        Commands::Query {
            catalog,
            table,
            relationship,
            dialect,
            bind,
        } => {
            let catalog = open_catalog(catalog.as_deref(), &config)?;
            let dialect = match dialect {
                Some(d) => d.parse::<DialectKind>()?,
                None => config.dialect,
            };
            let rel = catalog.relationships()?.find(table, relationship)?;
            let values: Vec<Value> = bind.iter().map(|b| Value::parse_loose(b)).collect();
            show_query(rel, values, dialect, config.start_index)
        }
    }
}

fn open_catalog(flag: Option<&Path>, config: &QuarryConfig) -> Result<Catalog> {
    let path = match (flag, &config.catalog_path) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(path)) => path.clone(),
        (None, None) => bail!("no catalog given; pass --catalog or set catalog_path in the config"),
    };
    Catalog::load(&path).with_context(|| format!("opening catalog {}", path.display()))
}

fn show_relationships(rels: &Relationships, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(rels)?);
        return Ok(());
    }

    if rels.is_empty() {
        println!("{}", "(no relationships)".dimmed());
        return Ok(());
    }

    for (table, list) in rels.iter() {
        println!("{}", table.cyan().bold());
        for rel in list {
            let kind = if rel.is_to_many() { "to-many" } else { "to-one" };
            let route = match rel.through() {
                Some(join) => format!("via {} → {}", join, rel.target().unwrap_or("?")),
                None => format!("→ {}", rel.target().unwrap_or("?")),
            };
            println!("  {} {} {}", rel.name.white(), route.yellow(), kind.dimmed());
            for side in &rel.sides {
                let pairs: Vec<String> = side
                    .pairs
                    .iter()
                    .map(|(from, to)| format!("{}.{} = {}.{}", side.from, from, side.to, to))
                    .collect();
                println!("    {}", pairs.join(", ").dimmed());
            }
        }
    }
    Ok(())
}

fn show_join_tables(catalog: &Catalog) {
    let mut found = false;
    for table in catalog.join_tables() {
        found = true;
        let targets: Vec<&str> = table.foreign_keys.iter().map(|fk| fk.foreign_table.as_str()).collect();
        println!("{} {}", table.name.cyan().bold(), targets.join(" ↔ ").dimmed());
    }
    if !found {
        println!("{}", "(no join tables)".dimmed());
    }
}

fn show_query(rel: &Relationship, values: Vec<Value>, dialect: DialectKind, start: usize) -> Result<()> {
    let q = related_query(rel, values)?;

    let mut buf = Vec::new();
    let args = q.render(&mut buf, dialect.dialect(), start)?;
    let sql = String::from_utf8(buf)?;

    println!("{}", "Generated SQL:".green().bold());
    print!("{}", sql.white());

    if !args.is_empty() {
        println!();
        println!("{}", "Bindings:".cyan());
        for (i, arg) in args.iter().enumerate() {
            println!("  {} = {}", dialect.dialect().placeholder(start + i), arg.to_string().yellow());
        }
    }
    Ok(())
}
