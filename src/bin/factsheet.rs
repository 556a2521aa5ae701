//! Factsheet CLI — browse facts, categories and research from a GraphQL endpoint.
//!
//! Usage:
//!   factsheet list [--categories 1,3] [--search text]
//!   factsheet show <id>
//!   factsheet open <location>
//!   factsheet browse [location]

use clap::{Parser, Subcommand};
use factsheet::render::render;
use factsheet::{App, Config, GraphqlSource, Location, LoadState, ScreenView};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "factsheet",
    version,
    about = "Browse verified facts and their supporting research"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// GraphQL endpoint (overrides config and FACTSHEET_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Search debounce delay in milliseconds
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List facts, optionally filtered
    List {
        /// Comma-separated category ids
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,
        /// Free-text search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one fact with its research
    Show {
        /// Fact id
        id: String,
    },
    /// Render any location, e.g. "/?categories=1,3" or "/fact/7"
    Open {
        location: String,
    },
    /// Interactive session on stdin
    Browse {
        /// Starting location
        #[arg(default_value = "/")]
        location: String,
    },
}

const HELP: &str = "\
commands:
  search <text>    type into the search box
  clear            empty the search box
  tag <id>         click a category tag
  open <id>        open a fact
  go <location>    enter a location, e.g. /?categories=1,3
  back | forward   move through history
  home             back to the unfiltered list
  url              print the current location
  help             this text
  quit";

enum Command {
    Search(String),
    Clear,
    Tag(String),
    Open(String),
    Go(String),
    Back,
    Forward,
    Home,
    Url,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = |name: &str| {
        if rest.is_empty() {
            Err(format!("'{}' needs an argument", name))
        } else {
            Ok(rest.to_string())
        }
    };
    match word {
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "clear" => Ok(Command::Clear),
        "tag" | "t" => arg("tag").map(Command::Tag),
        "open" | "o" => arg("open").map(Command::Open),
        "go" => arg("go").map(Command::Go),
        "back" | "b" => Ok(Command::Back),
        "forward" | "f" => Ok(Command::Forward),
        "home" => Ok(Command::Home),
        "url" => Ok(Command::Url),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}' (try 'help')", other)),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config, String> {
    let mut config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(ref endpoint) = cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(ms) = cli.debounce_ms {
        config.debounce_ms = ms;
    }
    config.validate().map_err(|e| e.to_string())?;
    tracing::info!(endpoint = %config.endpoint, debounce_ms = config.debounce_ms, "configuration resolved");
    Ok(config)
}

fn open_app(config: &Config, location: Location, search: Option<String>) -> Result<App, String> {
    let source = GraphqlSource::new(config.endpoint.clone(), config.request_timeout())
        .map_err(|e| format!("Failed to create client: {}", e))?;
    Ok(App::open_with_search(
        Arc::new(source),
        location,
        config.debounce(),
        search,
    ))
}

/// Exit status for a settled screen: failures and unknown paths are errors.
fn exit_code(view: &ScreenView) -> i32 {
    match view {
        ScreenView::List(screen) if matches!(screen.grid, LoadState::Failed(_)) => 1,
        ScreenView::Detail(screen) if matches!(screen.fact, LoadState::Failed(_)) => 1,
        ScreenView::NotFound { .. } => 1,
        _ => 0,
    }
}

async fn cmd_render(config: &Config, location: Location, search: Option<String>) -> i32 {
    let mut app = match open_app(config, location, search) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    app.settle().await;

    let view = app.view();
    print!("{}", render(&view));
    exit_code(&view)
}

fn print_screen(app: &App) {
    println!();
    print!("{}", render(&app.view()));
}

/// Apply one command. Returns `None` to quit, otherwise whether to redraw.
fn apply_command(app: &mut App, command: Command) -> Option<bool> {
    match command {
        Command::Search(text) => {
            if !app.set_search_text(Some(text)) {
                println!("No search box on this screen.");
            }
            Some(false)
        }
        Command::Clear => {
            app.set_search_text(None);
            Some(false)
        }
        Command::Tag(id) => {
            if !app.select_category(&id) {
                println!("No tags on this screen.");
                return Some(false);
            }
            Some(true)
        }
        Command::Open(id) => {
            app.open_fact(&id);
            Some(true)
        }
        Command::Go(raw) => {
            app.navigate(Location::parse(&raw));
            Some(true)
        }
        Command::Back => {
            if !app.back() {
                println!("Already at the start of history.");
            }
            Some(true)
        }
        Command::Forward => {
            if !app.forward() {
                println!("Already at the end of history.");
            }
            Some(true)
        }
        Command::Home => {
            app.home();
            Some(true)
        }
        Command::Url => {
            println!("{}", app.location());
            Some(false)
        }
        Command::Help => {
            println!("{}", HELP);
            Some(false)
        }
        Command::Quit => None,
    }
}

async fn cmd_browse(config: &Config, location: Location) -> i32 {
    let mut app = match open_app(config, location, None) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", HELP);
    print_screen(&app);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => return 0,
                    Err(e) => {
                        eprintln!("Error: failed to read input: {}", e);
                        return 1;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(command) => match apply_command(&mut app, command) {
                        None => return 0,
                        Some(true) => print_screen(&app),
                        Some(false) => {}
                    },
                    Err(e) => println!("{}", e),
                }
            }
            _ = app.step(), if !app.is_settled() => {
                if app.is_settled() {
                    print_screen(&app);
                }
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let command = cli.command;
    let code = rt.block_on(async move {
        match command {
            Commands::List { categories, search } => {
                cmd_render(&config, Location::list(&categories), search).await
            }
            Commands::Show { id } => cmd_render(&config, Location::fact(&id), None).await,
            Commands::Open { location } => {
                cmd_render(&config, Location::parse(&location), None).await
            }
            Commands::Browse { location } => cmd_browse(&config, Location::parse(&location)).await,
        }
    });
    std::process::exit(code);
}
