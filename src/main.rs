mod app;
mod config;
mod dataset;
mod theme;
mod transfer;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::{App, Exit};
use config::AppConfig;
use dataset::{Dataset, DatasetFormat, Outcome};
use theme::Theme;
use transfer::Transfer;

#[derive(Parser, Debug)]
#[command(name = "ferry")]
#[command(version)]
#[command(about = "Move items between an available and a chosen list, then print the chosen keys")]
struct Args {
    /// Dataset file with `items` and `chosen` (JSON or TOML)
    dataset: PathBuf,

    /// Dataset format (defaults to the file extension)
    #[arg(short, long, value_enum)]
    format: Option<DatasetFormat>,

    /// Comma-separated chosen keys, replacing the dataset's list
    #[arg(long, value_delimiter = ',')]
    chosen: Option<Vec<String>>,

    /// Pane titles as LEFT,RIGHT
    #[arg(long, value_delimiter = ',')]
    titles: Option<Vec<String>>,

    /// Hide the search lines
    #[arg(long)]
    no_search: bool,

    /// Rows in each pane's list
    #[arg(long)]
    height: Option<u16>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the outcome JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a partition summary of the dataset as JSON and exit
    #[arg(long)]
    check: bool,

    /// Log file for interactive runs (defaults to the cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args);

    let mut dataset = Dataset::load(&args.dataset, args.format)
        .await
        .with_context(|| format!("Could not load dataset {}", args.dataset.display()))?;

    if let Some(chosen) = args.chosen.clone() {
        dataset.chosen = chosen;
    }

    // Handle CLI-only commands
    if args.check {
        println!("{}", serde_json::to_string_pretty(&dataset.summary())?);
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let config = apply_overrides(config, &args, dataset.titles.take());
    let theme = Theme::load(config.theme_path.as_deref());

    let transfer = Transfer::new(dataset.items, dataset.chosen, config.transfer_options());
    let mut app = App::new(transfer, config.confirm_discard);

    match run_tui(&mut app, &theme)? {
        Exit::Confirmed => {
            let outcome = Outcome::new(&app.transfer, &app.initial_chosen, app.moves.clone());
            if outcome.is_unchanged() {
                tracing::info!("Confirmed without changes");
            }
            outcome.write(args.output.as_deref()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Exit::Cancelled => {
            tracing::info!("Cancelled, {} move(s) discarded", app.moves.len());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// `--check` logs to stderr. The TUI owns the terminal, so interactive
/// runs log to a file instead.
fn init_logging(args: &Args) {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    if args.check {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
        return;
    }

    let Some(path) = log_path(args) else {
        registry.init();
        return;
    };
    match open_log_file(&path) {
        Ok(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        Err(e) => {
            eprintln!("ferry: not logging, cannot open {}: {}", path.display(), e);
            registry.init();
        }
    }
}

fn log_path(args: &Args) -> Option<PathBuf> {
    args.log_file
        .clone()
        .or_else(|| dirs::cache_dir().map(|dir| dir.join("ferry").join("ferry.log")))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Dataset titles override the config file; CLI flags override both
fn apply_overrides(mut config: AppConfig, args: &Args, titles: Option<[String; 2]>) -> AppConfig {
    if let Some(titles) = titles {
        config.titles = titles;
    }
    match args.titles.as_deref() {
        Some([left, right]) => config.titles = [left.clone(), right.clone()],
        Some(other) => tracing::warn!("Ignoring --titles, expected 2 values, got {}", other.len()),
        None => {}
    }
    if args.no_search {
        config.search_enabled = false;
    }
    if let Some(height) = args.height {
        config.list_height = height;
    }
    config
}

fn run_tui(app: &mut App, theme: &Theme) -> Result<Exit> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, app, theme);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    theme: &Theme,
) -> Result<Exit> {
    loop {
        terminal.draw(|f| ui::draw(f, app, theme))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if let Some(exit) = app.exit {
            return Ok(exit);
        }

        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "ferry",
            "plan.json",
            "--titles",
            "Courses,Bound",
            "--no-search",
            "--height",
            "5",
            "--chosen",
            "c1,c2",
        ]);

        assert_eq!(args.chosen, Some(vec!["c1".to_string(), "c2".to_string()]));

        let config = apply_overrides(
            AppConfig::default(),
            &args,
            Some(["From".to_string(), "Dataset".to_string()]),
        );
        assert_eq!(config.titles, ["Courses".to_string(), "Bound".to_string()]);
        assert!(!config.search_enabled);
        assert_eq!(config.list_height, 5);
    }

    #[test]
    fn test_dataset_titles_used_without_flag() {
        let args = Args::parse_from(["ferry", "plan.toml", "--format", "toml"]);
        assert_eq!(args.format, Some(DatasetFormat::Toml));

        let config = apply_overrides(
            AppConfig::default(),
            &args,
            Some(["Courses".to_string(), "Bound".to_string()]),
        );
        assert_eq!(config.titles[0], "Courses");
        assert!(config.search_enabled);
    }

    #[test]
    fn test_log_file_flag_wins() {
        let args = Args::parse_from(["ferry", "plan.json", "--log-file", "/tmp/ferry-run.log"]);
        assert_eq!(log_path(&args), Some(PathBuf::from("/tmp/ferry-run.log")));

        let args = Args::parse_from(["ferry", "plan.json"]);
        if let Some(path) = log_path(&args) {
            assert!(path.ends_with("ferry/ferry.log"));
        }
    }

    #[test]
    fn test_open_log_file_creates_parent_and_appends() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("ferry.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
