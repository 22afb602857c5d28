use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use smstrack_core::{DateRange, Filter, Table, summarize};
use smstrack_ingest::{NormalizeOptions, normalize_with, read_csv, write_csv, write_csv_path};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod render;
mod state;

use config::Config;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SMSTRACK_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "smstrack",
    version,
    long_version = LONG_VERSION,
    about = "Summarize and filter spending from SMS / bank CSV exports"
)]
struct Cli {
    /// User name, required when the config defines users
    #[arg(long, global = true)]
    user: Option<String>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Total, count, category breakdown and spending per day
    Summary {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        filters: FilterArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the filtered transactions
    List {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum rows to print (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Write the filtered transactions as CSV
    Export {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output path, `-` for stdout (default from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show date bounds and the values each filter accepts
    Facets {
        #[command(flatten)]
        source: Source,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Print a password hash for the [auth.users] table
    HashPassword {
        /// User name to print alongside the hash
        #[arg(long, default_value = "user")]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
}

#[derive(Args, Debug)]
struct Source {
    /// CSV export to read
    #[arg(long)]
    csv: PathBuf,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Start date, inclusive (YYYY-MM-DD; default: earliest date in file)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End date, inclusive (YYYY-MM-DD; default: latest date in file)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Keep only these categories (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Keep only these locations (repeatable)
    #[arg(long = "location")]
    locations: Vec<String>,

    /// Keep only these payment modes (repeatable)
    #[arg(long = "payment")]
    payment_modes: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },

        Command::HashPassword { name } => auth::hash_password_cmd(&name)?,

        Command::Summary {
            source,
            filters,
            json,
        } => {
            let cfg = config::load_config()?;
            auth::require_login(&cfg, cli.user.as_deref())?;
            let Some(table) = load_table(&source, &cfg)? else {
                return Ok(());
            };
            let filtered = apply_filters(&table, &filters)?;
            let summary = summarize(&filtered);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else if summary.is_empty() {
                println!("{}", render::NO_MATCHES);
            } else {
                print!(
                    "{}",
                    render::render_summary(&summary, &cfg.display.currency_symbol, filtered.has_dates)
                );
            }
        }

        Command::List {
            source,
            filters,
            limit,
        } => {
            let cfg = config::load_config()?;
            auth::require_login(&cfg, cli.user.as_deref())?;
            let Some(table) = load_table(&source, &cfg)? else {
                return Ok(());
            };
            let filtered = apply_filters(&table, &filters)?;

            if filtered.is_empty() {
                println!("{}", render::NO_MATCHES);
            } else {
                let limit = limit.unwrap_or(cfg.display.list_limit);
                print!("{}", render::render_transactions(&filtered, limit));
            }
        }

        Command::Export {
            source,
            filters,
            out,
        } => {
            let cfg = config::load_config()?;
            auth::require_login(&cfg, cli.user.as_deref())?;
            let Some(table) = load_table(&source, &cfg)? else {
                return Ok(());
            };
            let filtered = apply_filters(&table, &filters)?;

            if filtered.is_empty() {
                println!("{}", render::NO_MATCHES);
                return Ok(());
            }

            let out = out.unwrap_or_else(|| PathBuf::from(&cfg.export.default_file));
            if out.as_os_str() == "-" {
                write_csv(&filtered, std::io::stdout().lock()).context("writing csv to stdout")?;
            } else {
                write_csv_path(&filtered, &out)
                    .with_context(|| format!("writing {}", out.display()))?;
                println!("Wrote {} rows to {}", filtered.len(), out.display());
            }
        }

        Command::Facets { source } => {
            let cfg = config::load_config()?;
            auth::require_login(&cfg, cli.user.as_deref())?;
            let Some(table) = load_table(&source, &cfg)? else {
                return Ok(());
            };
            print!("{}", render::render_facets(&table));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load and normalize the CSV. `None` means the file had no data rows.
fn load_table(source: &Source, cfg: &Config) -> Result<Option<Table>> {
    if !source.csv.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", source.csv.display());
    }

    let raw = read_csv(&source.csv).with_context(|| format!("reading {}", source.csv.display()))?;
    if raw.rows.is_empty() {
        println!("No data loaded: {} has no rows.", source.csv.display());
        return Ok(None);
    }

    let opts = NormalizeOptions {
        currency_symbol: cfg.display.currency_symbol.clone(),
    };
    let normalized = normalize_with(raw, &opts);
    for issue in &normalized.issues {
        eprintln!("note: {issue}");
    }
    if normalized.unknown_dates > 0 {
        eprintln!(
            "note: {} row(s) have unreadable dates and are excluded by date filters",
            normalized.unknown_dates
        );
    }

    Ok(Some(normalized.table))
}

/// Build the filter from CLI args and apply it. The date range defaults to
/// the table's own bounds; without a date column it is skipped. Only a range
/// with both ends given explicitly can be rejected as inverted.
fn apply_filters(table: &Table, args: &FilterArgs) -> Result<Table> {
    let mut filter = Filter::new()
        .with_categories(args.categories.iter().cloned())
        .with_locations(args.locations.iter().cloned())
        .with_payment_modes(args.payment_modes.iter().cloned());

    let explicit = args.from.is_some() || args.to.is_some();
    if table.has_dates {
        let bounds = table
            .date_bounds()
            .or_else(|| explicit.then_some((NaiveDate::MIN, NaiveDate::MAX)));
        if let Some((lo, hi)) = bounds {
            // A single bound past the data must not invert the defaulted end.
            let (start, end) = match (args.from, args.to) {
                (Some(from), Some(to)) => (from, to),
                (Some(from), None) => (from, hi.max(from)),
                (None, Some(to)) => (lo.min(to), to),
                (None, None) => (lo, hi),
            };
            filter = filter.with_date_range(DateRange::new(start, end)?);
        }
    } else if explicit {
        eprintln!("note: ignoring --from/--to, the file has no date column");
    }

    Ok(filter.apply(table)?)
}
