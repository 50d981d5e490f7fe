use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;

use cellsuggest::app::App;
use cellsuggest::config::{self, CellSettings, ConfigResult};
use cellsuggest::suggest::{Source, delayed_source, filter_candidates, load_candidates, order_choices};

/// How long to wait for input before running due re-queries
const TICK: Duration = Duration::from_millis(16);

/// Spreadsheet-style cell editor with autocompleting candidates
#[derive(Parser, Debug)]
#[command(name = "cellsuggest", version, about)]
struct Args {
    /// JSON file holding an array of candidates
    source: Option<PathBuf>,

    /// Print the ranked candidates for TEXT and exit
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Match candidates case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Show every candidate, ordered but not filtered
    #[arg(long)]
    no_filter: bool,

    /// Highlight the best match so committing picks it
    #[arg(long)]
    strict: bool,

    /// Rows the dropdown shows before scrolling
    #[arg(long, value_name = "N")]
    visible_rows: Option<usize>,

    /// Serve candidates from a background thread after this delay
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,

    /// Config file to use instead of ~/.config/cellsuggest/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Args {
    /// Flags win over the config file
    fn apply_to(&self, settings: &mut CellSettings) {
        if self.case_sensitive {
            settings.filtering_case_sensitive = true;
        }
        if self.no_filter {
            settings.filter = false;
        }
        if self.strict {
            settings.strict = true;
        }
        if let Some(rows) = self.visible_rows {
            settings.visible_rows = rows;
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(debug_assertions)]
    init_logging();

    let args = Args::parse();

    let ConfigResult { config, warning } = match &args.config {
        Some(path) => config::load_config_or_default(path),
        None => config::load_config(),
    };
    let mut settings = config.cell;
    args.apply_to(&mut settings);

    let items = match &args.source {
        Some(path) => read_candidates(path)?,
        None => Vec::new(),
    };

    if let Some(query) = &args.query {
        if let Some(warning) = &warning {
            eprintln!("Warning: {}", warning);
        }
        return print_ranked(&items, query, &settings);
    }

    let source = match args.latency_ms {
        Some(ms) => delayed_source(
            items,
            Duration::from_millis(ms),
            settings.filtering_case_sensitive,
            settings.filter,
        ),
        None => Source::Static(items),
    };
    let app = App::new(Vec::new(), Some(source), settings).with_notice(warning);

    let terminal = ratatui::init();
    let result = run(terminal, app);
    ratatui::restore();

    result
}

fn read_candidates(path: &Path) -> Result<Vec<String>> {
    let items = load_candidates(path)
        .wrap_err_with(|| format!("Failed to load candidates from {}", path.display()))?;

    Ok(items.unwrap_or_else(|| {
        log::debug!("{} holds no candidate list", path.display());
        Vec::new()
    }))
}

fn print_ranked(items: &[String], query: &str, settings: &CellSettings) -> Result<()> {
    let case_sensitive = settings.filtering_case_sensitive;
    let filtered = filter_candidates(items, query, case_sensitive, settings.filter);
    let (ranked, _) = order_choices(query, filtered, case_sensitive, settings.filter);

    let mut out = io::stdout().lock();
    for candidate in ranked {
        writeln!(out, "{}", candidate)?;
    }
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key_event(key, Instant::now());
                }
                Event::Resize(width, height) => app.resize(Rect::new(0, 0, width, height)),
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Debug builds log to a file so the terminal UI stays clean
#[cfg(debug_assertions)]
fn init_logging() {
    let path = std::env::temp_dir().join("cellsuggest.log");
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
