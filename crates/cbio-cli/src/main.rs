use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cbio_grants::PermissionError;

mod commands;

/// Exit status for a failed privilege gate (`EX_NOPERM`).
const EXIT_PERMISSION_DENIED: u8 = 77;
const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "cbio-mcp",
    version,
    about = "cBioPortal MCP server over ClickHouse",
    long_about = "Read-only ClickHouse tools for cBioPortal data.\n\n\
                  Connection and identity come from CLICKHOUSE_* environment variables \
                  (a .env file in the working directory is loaded first). Every command \
                  that touches the database verifies the user's privileges before anything else."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify that the ClickHouse user is read-only and can read the catalog.
    Check,

    /// Inspect and call the MCP tools.
    Tools {
        #[command(subcommand)]
        cmd: ToolsCommand,
    },

    /// Print a JSON snapshot of the tables and columns in the configured database.
    Schema,
}

#[derive(Subcommand, Debug)]
enum ToolsCommand {
    /// List the available tools (does not connect to the database).
    List {
        /// Also print server instructions and input schemas.
        #[arg(long, short)]
        verbose: bool,
    },

    /// Show the full definition of one tool.
    Describe {
        /// Tool name, e.g. clickhouse_list_tables
        name: String,
    },

    /// Call a tool and print its JSON response.
    Call {
        /// Tool name, e.g. clickhouse_run_select_query
        name: String,

        /// Tool arguments as a JSON object, e.g. '{"query": "SELECT 1"}'
        #[arg(long, short)]
        arguments: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.cmd).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(exit_status_for(&err)),
    }
}

async fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Check => commands::check::run().await,
        Command::Tools { cmd } => match cmd {
            ToolsCommand::List { verbose } => commands::tools::list(verbose),
            ToolsCommand::Describe { name } => commands::tools::describe(&name),
            ToolsCommand::Call { name, arguments } => {
                commands::tools::call(&name, arguments.as_deref()).await
            }
        },
        Command::Schema => commands::schema::run().await,
    }
}

fn exit_status_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PermissionError>() {
        Some(permission) => {
            error!("{}", permission);
            EXIT_PERMISSION_DENIED
        }
        None => {
            error!("{:#}", err);
            EXIT_FAILURE
        }
    }
}
