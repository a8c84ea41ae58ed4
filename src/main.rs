use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use statusboard::serve::{self, AppState};
use statusboard::store::SnapshotStore;
use statusboard_core::config::Config;
use statusboard_core::export::{self, ExportFormat};
use statusboard_core::search::StatusFilter;
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "statusboard", about = "Project ledger and daily status from a team workbook")]
struct Cli {
    /// TOML file layered over the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workbook to read instead of the configured one.
    #[arg(long, global = true)]
    workbook: Option<PathBuf>,

    /// Log at debug level to stderr (RUST_LOG still wins when set).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print ledger rows as JSON Lines.
    Ledger {
        /// Only rows with a column containing this text.
        #[arg(long)]
        search: Option<String>,
    },
    /// Print daily status records as JSON Lines.
    Status {
        /// Only records under this date section (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Only records for this member; repeatable.
        #[arg(long)]
        member: Vec<String>,
    },
    /// Export a table as CSV or JSON Lines.
    Export {
        #[arg(value_enum)]
        table: Table,
        #[arg(long, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Write here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Serve the HTTP API.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Table {
    Status,
    Ledger,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(workbook) = cli.workbook {
        config = config.with_workbook(workbook);
    }

    match cli.command {
        Command::Ledger { search } => {
            let snapshot = statusboard_sheets::load_workbook(&config);
            let mut out = std::io::stdout().lock();
            for row in snapshot.ledger.search(search.as_deref().unwrap_or("")) {
                serde_json::to_writer(&mut out, row)?;
                out.write_all(b"\n")?;
            }
        }
        Command::Status { date, member } => {
            let snapshot = statusboard_sheets::load_workbook(&config);
            let filter = StatusFilter {
                date,
                members: member,
            };
            let mut out = std::io::stdout().lock();
            for record in snapshot.status.filter(&filter) {
                serde_json::to_writer(&mut out, record)?;
                out.write_all(b"\n")?;
            }
        }
        Command::Export {
            table,
            format,
            output,
        } => {
            let snapshot = statusboard_sheets::load_workbook(&config);
            let out: Box<dyn Write> = match &output {
                Some(path) => Box::new(
                    std::fs::File::create(path)
                        .with_context(|| format!("creating {}", path.display()))?,
                ),
                None => Box::new(std::io::stdout().lock()),
            };
            match table {
                Table::Status => export::write_status(&snapshot.status.records, format, out)?,
                Table::Ledger => export::write_ledger(
                    &snapshot.ledger.columns,
                    &snapshot.ledger.rows,
                    format,
                    out,
                )?,
            }
        }
        Command::Serve { bind } => {
            let state = AppState::new(
                SnapshotStore::for_config(config.clone()),
                config.vocabulary.clone(),
            );
            tokio::runtime::Runtime::new()?.block_on(serve::run(bind, state))?;
        }
    }
    Ok(())
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
    tracing::debug!("statusboard logging to stderr");
}
