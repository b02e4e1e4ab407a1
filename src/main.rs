//! Handraw CLI
//!
//! Usage:
//!   handraw [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>  Write the SVG here instead of stdout
//!   -c, --config <FILE>  Config file (default: handraw.config.json if present)
//!       --width <PX>     Canvas width (default 800)
//!       --height <PX>    Canvas height (default 600)
//!   -h, --help           Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;

use handraw::{parse_config, render_with_config, Config, RenderConfig};

/// Picked up from the working directory when `--config` is not given
const CONFIG_FILE: &str = "handraw.config.json";

#[derive(Parser)]
#[command(name = "handraw")]
#[command(about = "Render hand-drawn-style diagrams from declarative JSON")]
struct Cli {
    /// Input diagram file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output file (prints SVG to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Config file with background and padding settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.width == 0 || cli.height == 0 {
        eprintln!("Error: width and height must be positive");
        std::process::exit(1);
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    };

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let render_config = RenderConfig::new()
        .with_config(config)
        .with_size(cli.width, cli.height);

    match render_with_config(&source, render_config) {
        Ok(svg) => match &cli.output {
            Some(path) => match fs::write(path, svg) {
                Ok(()) => println!("Diagram saved to: {}", path.display()),
                Err(e) => {
                    eprintln!("Error writing file '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            },
            None => println!("{}", svg),
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Load the config file. An explicit `--config` path must exist and parse;
/// the implicit working-directory file is only used when present.
fn load_config(explicit: Option<&Path>) -> Result<Config, String> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default = Path::new(CONFIG_FILE);
            if !default.exists() {
                return Ok(Config::default());
            }
            debug!("using config file {}", default.display());
            default
        }
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("reading config '{}': {}", path.display(), e))?;
    parse_config(&text).map_err(|e| format!("config '{}': {}", path.display(), e))
}

fn print_intro() {
    println!(
        r#"Handraw - hand-drawn-style diagrams from declarative JSON

USAGE:
    handraw [OPTIONS] [FILE]
    echo '<json>' | handraw

OPTIONS:
    -o, --output <FILE>   Write the SVG here instead of stdout
    -c, --config <FILE>   Config file (default: handraw.config.json if present)
        --width <PX>      Canvas width (default 800)
        --height <PX>     Canvas height (default 600)
    -h, --help            Print help

QUICK START:
    echo '{{"elements": [
        {{"id": "a", "type": "rectangle", "label": "Client"}},
        {{"id": "b", "type": "ellipse", "x": 200, "label": "Server"}},
        {{"type": "arrow", "start": "a", "end": "b", "label": "request"}}
    ]}}' | handraw > diagram.svg

Elements: rectangle, ellipse, diamond, container, text, line, arrow.
Shapes default to 100x60 and may nest children; arrows reference other
elements by id and attach to their nearest edge automatically."#
    );
}
