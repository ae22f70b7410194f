use std::fmt;
use std::io::Write as _;

use report_core::model::ActivityId;
use services::{OutputMode, PageRequirements, QuestionReport, RenderContext, ReportRenderer};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;
use ui::{SsrTemplates, render_page};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidActivityId { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidActivityId { raw } => {
                write!(f, "invalid --activity-id value: {raw}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, PartialEq)]
struct Args {
    db_url: String,
    activity_id: ActivityId,
    mode: OutputMode,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--activity-id <id>] [--download <format>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://report.sqlite3");
    eprintln!("  --activity-id 1");
    eprintln!("  no --download: interactive view");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  REPORT_DB_URL, REPORT_ACTIVITY_ID, RUST_LOG");
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env_db_url: Option<String>,
        env_activity_id: Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut db_url =
            env_db_url.map_or_else(|| "sqlite://report.sqlite3".into(), normalize_sqlite_url);
        let mut activity_id = env_activity_id
            .and_then(|value| value.parse::<ActivityId>().ok())
            .unwrap_or_else(|| ActivityId::new(1));
        let mut mode = OutputMode::View;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--activity-id" => {
                    let value = require_value(args, "--activity-id")?;
                    activity_id = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidActivityId { raw: value.clone() })?;
                }
                "--download" => {
                    let value = require_value(args, "--download")?;
                    mode = OutputMode::from_download_param(&value);
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self {
            db_url,
            activity_id,
            mode,
        }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(
        &mut argv,
        std::env::var("REPORT_DB_URL").ok(),
        std::env::var("REPORT_ACTIVITY_ID").ok(),
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    // Open + migrate SQLite here so the library crates never touch process config.
    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    let target = storage.activities.get_activity(args.activity_id).await?;
    tracing::info!(
        activity_id = %args.activity_id,
        course = %target.course().short_name,
        "rendering question report"
    );

    let report = QuestionReport::new(storage.provider.clone());
    let templates = SsrTemplates::new();
    let mut page = PageRequirements::new();
    let mut body = String::new();
    {
        let mut ctx = RenderContext::new(&templates, &mut page, &mut body);
        report.display(&target, &args.mode, &mut ctx).await?;
    }

    let footer = page.render_footer()?;
    let html = render_page(&target.activity().name, &body, &footer);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
