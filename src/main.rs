//! synpane - read-only syntax highlighting terminal viewer

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use synpane::config::Config;
use synpane::error::{Result, ViewerError};
use synpane::lexer::{self, Lexer, PlainText};
use synpane::pane::SyntaxPane;
use synpane::style::{StyleTable, Theme};
use synpane::terminal::Terminal;
use synpane::viewer::Viewer;

/// Command-line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    file: PathBuf,
    theme: Option<PathBuf>,
    highlight: Vec<usize>,
    offset: Option<usize>,
    no_hover: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = match parse_args(env::args().skip(1))? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        Command::Run(options) => options,
    };

    let mut config = Config::load()?;
    apply_options(&mut config, &options);
    let _log_guard = config.log_file.as_deref().and_then(configure_logging);

    let text = fs::read_to_string(&options.file).map_err(|source| ViewerError::FileNotFound {
        path: options.file.clone(),
        source,
    })?;

    let theme = match &config.theme {
        Some(path) => Theme::load(path)?,
        None => StyleTable::default_theme(),
    };

    let mut pane = SyntaxPane::new();
    // Settings first, content and spans last
    pane.set_theme(Arc::new(theme));
    config.apply_to(&mut pane);
    pane.set_highlighted_line_list(options.highlight.iter().copied());
    pane.set_content(&text);

    let language = lexer::for_path(&options.file);
    let spans = match &language {
        Some(lang) => lang.lex(&text),
        None => PlainText.lex(&text),
    };
    let outcome = pane.set_style(spans);
    debug!(?outcome, "initial_style");

    let title = match &language {
        Some(lang) => format!("{} [{}]", display_name(&options.file), lang.name),
        None => display_name(&options.file),
    };
    info!(file = %options.file.display(), "opening");

    let terminal = Terminal::new()?;
    let mut viewer = Viewer::new(terminal, pane, title, &config);
    viewer.run()
}

/// Parse arguments (program name already skipped)
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut options = Options::default();
    let mut file = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--no-hover" => options.no_hover = true,
            "-t" | "--theme" => {
                let value = required_value(&arg, args.next())?;
                options.theme = Some(PathBuf::from(value));
            }
            "-l" | "--highlight" => {
                let value = required_value(&arg, args.next())?;
                for part in value.split(',').filter(|part| !part.trim().is_empty()) {
                    options.highlight.push(parse_number(&arg, part)?);
                }
            }
            "-o" | "--offset" => {
                let value = required_value(&arg, args.next())?;
                options.offset = Some(parse_number(&arg, &value)?);
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(ViewerError::Usage(format!("unknown option '{}'", arg)));
            }
            _ => {
                if file.replace(PathBuf::from(&arg)).is_some() {
                    return Err(ViewerError::Usage("only one FILE may be given".to_string()));
                }
            }
        }
    }

    options.file =
        file.ok_or_else(|| ViewerError::Usage("missing FILE (try --help)".to_string()))?;
    Ok(Command::Run(options))
}

/// Fold command-line options into the config; the command line wins.
///
/// The pane's offset only grows, so it must be settled here and set once.
fn apply_options(config: &mut Config, options: &Options) {
    if let Some(offset) = options.offset {
        config.view.line_number_offset = offset;
    }
    if options.no_hover {
        config.view.highlight_when_mouse_over = false;
    }
    if options.theme.is_some() {
        config.theme = options.theme.clone();
    }
}

fn required_value(option: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| ViewerError::Usage(format!("option '{}' needs a value", option)))
}

fn parse_number(option: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        ViewerError::Usage(format!("option '{}': '{}' is not a line number", option, value))
    })
}

/// Log to `path`; stdout belongs to the viewer
fn configure_logging(path: &Path) -> Option<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path.file_name()?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()?;
    Some(guard)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_usage() {
    println!("synpane {} - read-only syntax highlighting viewer", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: synpane [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -t, --theme FILE         Load a TOML theme");
    println!("  -l, --highlight N[,N..]  Highlight displayed line numbers");
    println!("  -o, --offset N           Add N to displayed line numbers");
    println!("      --no-hover           Do not highlight the line under the mouse");
    println!("  -h, --help               Show this help message");
    println!("  -V, --version            Show version information");
    println!();
    println!("Keys:");
    println!("  Up/Down, j/k             Scroll one line");
    println!("  PageUp/PageDown, b/Space Scroll one page");
    println!("  Home/End, g/G            Go to top/bottom");
    println!("  m                        Mark the line under the mouse");
    println!("  c                        Clear marked lines");
    println!("  n                        Toggle line numbers");
    println!("  C-l                      Redraw screen");
    println!("  q, Esc, C-c              Quit");
    println!();
    println!("Settings are read from ~/.synpane.toml; RUST_LOG filters the log.");
}

fn print_version() {
    println!("synpane {}", env!("CARGO_PKG_VERSION"));
}
