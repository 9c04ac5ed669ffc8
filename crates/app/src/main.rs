use std::fmt;

use services::{AppServices, Clock, Command, QuizConfig, QuizController, SessionMode, resolve_mode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

use commands::{HELP, Request};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidDbUrl { raw: String },
    InvalidMode(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidMode(msg) => write!(f, "invalid --mode/--filter: {msg}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--db <sqlite_url> | --memory] [--mode <all|major|sub>] [--filter <id>] [--seed <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:drill.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_DB_URL, DRILL_SEED, RUST_LOG");
}

struct Args {
    db_url: Option<String>,
    mode: Option<SessionMode>,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = Some(
            std::env::var("DRILL_DB_URL")
                .ok()
                .map_or_else(|| "sqlite://drill.sqlite3".into(), normalize_sqlite_url),
        );
        let mut seed = std::env::var("DRILL_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());
        let mut mode_kind: Option<String> = None;
        let mut filter: Option<String> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = Some(normalize_sqlite_url(value));
                }
                "--memory" => db_url = None,
                "--mode" => mode_kind = Some(require_value(args, "--mode")?),
                "--filter" => filter = Some(require_value(args, "--filter")?),
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let mode = match (mode_kind, filter) {
            (None, None) => None,
            (kind, filter) => {
                let kind = kind.unwrap_or_else(|| "sub".to_owned());
                let mode = resolve_mode(&kind, filter.as_deref())
                    .map_err(|err| ArgsError::InvalidMode(err.to_string()))?;
                Some(mode)
            }
        };

        Ok(Self { db_url, mode, seed })
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
    // Logs go to stderr so they never interleave with the rendered screen.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = log_fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn show(controller: &QuizController) {
    println!("{}\n", render::screen(controller));
}

/// Feeds stdin lines and playback ticks into the controller until `quit` or EOF.
async fn drive(controller: &mut QuizController) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    show(controller);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                let request = match commands::parse(&line) {
                    Ok(request) => request,
                    Err(commands::ParseError::Empty) => continue,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                match request {
                    Request::Quit => return Ok(()),
                    Request::Help => println!("{HELP}"),
                    Request::Show => show(controller),
                    request => match request.resolve(controller) {
                        Ok(command) => apply(controller, command).await,
                        Err(err) => println!("{err}"),
                    },
                }
            }
            () = controller.next_tick() => {
                controller.on_tick();
                show(controller);
            }
        }
    }
}

async fn apply(controller: &mut QuizController, command: Command) {
    match controller.dispatch(command).await {
        Ok(outcome) => {
            info!(?outcome, "command applied");
            show(controller);
        }
        Err(err) => {
            warn!(error = %err, "command rejected");
            println!("{err}");
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = Clock::default();
    let config = QuizConfig::default();
    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    let services = match &parsed.db_url {
        Some(db_url) => {
            prepare_sqlite_file(db_url)?;
            AppServices::new_sqlite(db_url, clock, config).await?
        }
        None => AppServices::in_memory(clock, config),
    };

    let mut controller = services.controller().await?;
    if let Some(seed) = parsed.seed {
        controller = controller.with_seed(seed);
    }
    if let Some(mode) = parsed.mode {
        controller.dispatch(Command::Start(mode)).await?;
    }

    drive(&mut controller).await
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
