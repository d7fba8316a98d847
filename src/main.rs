//! termtell - relay a command's output with a label in front of every line
//!
//! termtell reads standard input and writes it to standard output, printing
//! a `[label] ` prefix at the start of every line and optionally coloring the
//! text. Carriage returns (progress bars) are respected.
//!
//! # Quick Start
//!
//! ```text
//! make 2>&1 | termtell -p build            # [build] ...
//! ./server | termtell -t -c cyan           # [12:03:44.120] ... in cyan
//! ```

use std::env;
use std::io;

use termtell::{Color, Config, PipeSource};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line options
#[derive(Default)]
struct Options {
    prefix: Option<String>,
    timestamp: bool,
    color: Option<Color>,
    bright: bool,
    debug: bool,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("termtell {}", VERSION);
}

fn print_help() {
    eprintln!("termtell {} - label and colorize streamed output", VERSION);
    eprintln!();
    eprintln!("Usage: <command> | termtell [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --prefix <LABEL>  Print [LABEL] in front of every line");
    eprintln!("  -t, --timestamp       Use the current time as label");
    eprintln!("  -c, --color <NAME>    Text color: red, green, yellow, blue,");
    eprintln!("                        purple, cyan, white, none");
    eprintln!("  -b, --bright          Bright (bold) text");
    eprintln!("      --debug           Debug logging");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Configuration: ~/.termtell/config.toml");
    eprintln!("Log file:      ~/.termtell/termtell.log (level via TERMTELL_LOG)");
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-p" | "--prefix" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing prefix argument".to_string());
                }
                options.prefix = Some(args[i].clone());
            }
            "-t" | "--timestamp" => {
                options.timestamp = true;
            }
            "-c" | "--color" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing color argument".to_string());
                }
                let color = Color::by_name(&args[i])
                    .ok_or_else(|| format!("Unknown color: {}", args[i]))?;
                options.color = Some(color);
            }
            "-b" | "--bright" => {
                options.bright = true;
            }
            "--debug" => {
                options.debug = true;
            }
            arg => {
                return Err(format!("Unknown option: {}", arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Log to ~/.termtell/termtell.log; stdout belongs to the relayed output
fn init_logging(debug: bool) {
    let log_path = termtell::config::config_dir()
        .map(|dir| dir.join("termtell.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("termtell.log"));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let default_level = if debug { "debug" } else { "info" };
        let filter = EnvFilter::try_from_env("TERMTELL_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging(options.debug);
    info!("termtell starting...");

    // Command line overrides the config file
    let mut config = Config::load();
    if options.timestamp {
        config.timestamp = true;
    }
    if options.prefix.is_some() {
        config.prefix = options.prefix;
        config.timestamp = options.timestamp;
    }
    if let Some(color) = options.color {
        config.color.color = Some(color);
    }
    if options.bright {
        config.color.bright = Some(true);
    }

    let console = config.console_builder().build();
    info!(
        "Relaying stdin, tty: {}, prefix: {:?}",
        console.is_tty(),
        console.output_prefix()
    );

    let mut source = PipeSource::spawn_with_interval(io::stdin(), config.poll_interval());
    console.tell_pty_stream(&mut source, &config.color);

    info!("Input ended");
    Ok(())
}
