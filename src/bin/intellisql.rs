//! IntelliSQL CLI
//!
//! Serves the web UI, seeds the fixture database, and runs one-off questions
//! or raw SQL from the terminal.

use clap::{Parser, Subcommand};
use intellisql::db::fixture;
use intellisql::otel::init_tracing;
use intellisql::web::{self, AppState};
use intellisql::config::DatabaseSettings;
use intellisql::{build_assistant, Executor, LlmClient, QueryOutput, Settings, StatementPolicy};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// IntelliSQL - ask questions about the Students database in plain English
#[derive(Parser)]
#[command(name = "intellisql")]
#[command(about = "Natural language to SQL assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Database file (overrides the config file and INTELLISQL_DB_PATH)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// JSON config file (environment is used when omitted)
    #[arg(long, global = true, env = "INTELLISQL_CONFIG")]
    config: Option<PathBuf>,

    /// Allow generated statements that modify data
    #[arg(long, global = true)]
    allow_writes: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI
    Serve {
        /// Host to bind
        #[arg(long, env = "INTELLISQL_HOST")]
        host: Option<String>,

        /// Port to bind
        #[arg(long, env = "INTELLISQL_PORT")]
        port: Option<u16>,
    },

    /// Create the Students table and insert the fixture rows
    Seed {
        /// Drop and recreate the table first
        #[arg(long)]
        reset: bool,
    },

    /// Ask a question in natural language
    Ask {
        /// Question in natural language
        question: String,

        /// Print the generated SQL without executing it
        #[arg(long)]
        sql_only: bool,
    },

    /// Run SQL directly against the database
    Query {
        /// SQL statement
        sql: String,
    },

    /// List models available to the configured API key
    Models,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (optional, ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = cli.config.as_deref();
    let db_path = cli.db_path.as_deref();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut settings = load_settings(config, db_path, cli.allow_writes)?;
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            cmd_serve(settings).await?;
        }
        Commands::Seed { reset } => {
            let database = load_database(config, db_path, cli.allow_writes)?;
            cmd_seed(&database.path, reset)?;
        }
        Commands::Ask { question, sql_only } => {
            let settings = load_settings(config, db_path, cli.allow_writes)?;
            cmd_ask(&settings, &question, sql_only).await?;
        }
        Commands::Query { sql } => {
            let database = load_database(config, db_path, cli.allow_writes)?;
            cmd_query(&database, &sql).await?;
        }
        Commands::Models => {
            let settings = load_settings(config, db_path, cli.allow_writes)?;
            cmd_models(&settings).await?;
        }
    }

    Ok(())
}

fn load_settings(
    config: Option<&Path>,
    db_path: Option<&Path>,
    allow_writes: bool,
) -> anyhow::Result<Settings> {
    let mut settings = match config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::from_env()?,
    };
    settings.database = settings.database.with_overrides(db_path, allow_writes);
    Ok(settings)
}

/// Database settings only; `seed` and `query` need no API key.
fn load_database(
    config: Option<&Path>,
    db_path: Option<&Path>,
    allow_writes: bool,
) -> anyhow::Result<DatabaseSettings> {
    let database = match config {
        Some(path) => DatabaseSettings::from_file(path)?,
        None => DatabaseSettings::from_env(),
    };
    Ok(database.with_overrides(db_path, allow_writes))
}

async fn cmd_serve(settings: Settings) -> anyhow::Result<()> {
    if !settings.database.path.exists() {
        tracing::warn!(
            path = %settings.database.path.display(),
            "Database file not found. Run: intellisql seed"
        );
    }

    let assistant = build_assistant(&settings)?;
    let state = Arc::new(AppState::new(assistant));
    web::serve(state, &settings.server.bind_addr()).await
}

fn cmd_seed(db_path: &Path, reset: bool) -> anyhow::Result<()> {
    let inserted = fixture::seed(db_path, reset)?;

    if inserted == 0 {
        println!("Database already seeded: {}", db_path.display());
        println!("  Use --reset to recreate the Students table");
        return Ok(());
    }

    let executor = Executor::new(db_path, StatementPolicy::ReadOnly);
    let output = executor.execute("SELECT * FROM Students")?;

    println!("Inserted Records:");
    print_output(&output);
    println!();
    println!("✓ Database '{}' created successfully!", db_path.display());
    Ok(())
}

async fn cmd_ask(settings: &Settings, question: &str, sql_only: bool) -> anyhow::Result<()> {
    let assistant = build_assistant(settings)?;

    let sql = assistant.generate_sql(question).await?;
    println!("{}", sql);
    if sql_only {
        return Ok(());
    }

    let answer = assistant.run(question, sql).await?;
    println!();
    if answer.output.is_empty() {
        println!("No records found matching your query.");
    } else {
        println!("Found {} record(s)", answer.output.row_count());
        print_output(&answer.output);
    }
    Ok(())
}

async fn cmd_query(database: &DatabaseSettings, sql: &str) -> anyhow::Result<()> {
    let executor = Executor::new(
        database.path.clone(),
        StatementPolicy::from_allow_writes(database.allow_writes),
    );
    let output = executor.execute_async(sql).await?;

    if output.columns.is_empty() {
        println!("✓ Statement executed");
    } else {
        print_output(&output);
    }
    Ok(())
}

async fn cmd_models(settings: &Settings) -> anyhow::Result<()> {
    let client = LlmClient::new(&settings.llm)?;
    let models = client.list_models().await?;

    println!("Your available models:");
    for model in models {
        println!("  {}", model);
    }
    Ok(())
}

/// Print rows as an aligned text table.
fn print_output(output: &QueryOutput) {
    let cells: Vec<Vec<String>> = output
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = output.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |values: &[String]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", format_row(&output.columns));
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    for row in &cells {
        println!("{}", format_row(row));
    }
}
