use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mdtok::Config;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Debug,
}

#[derive(Parser)]
#[command(name = "mdtok")]
#[command(about = "Print the token tree of a Markdown file")]
struct Cli {
    /// Input Markdown file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::compiled_default(),
    };

    let markdown = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut content = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut content) {
                eprintln!("Error reading stdin: {}", e);
                std::process::exit(1);
            }
            content
        }
    };

    let blocks = mdtok::tokenize_with_config(&markdown, &config);
    log::debug!("{} top-level blocks", blocks.len());

    match cli.format {
        Format::Json => match serde_json::to_string_pretty(&blocks) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing tokens: {}", e);
                std::process::exit(1);
            }
        },
        Format::Debug => println!("{blocks:#?}"),
    }
}
