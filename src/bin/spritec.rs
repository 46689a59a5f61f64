use std::io::Read;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use spritec::asset::{is_cpp_identifier, DEFAULT_CPP_NAME};
use spritec::{Asset, Config, Format, Sheet};

/// Compile bordered ascii art into a terminal sprite asset.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Art file to compile. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Treat the input as a sheet of `@name` sprite blocks.
    #[arg(long, default_value_t = false)]
    sheet: bool,

    /// Identifier of a single sprite in C++ output.
    #[arg(long, default_value = DEFAULT_CPP_NAME)]
    name: String,

    /// Output format: cpp, json, plain.
    #[arg(short, long, default_value_t = Format::Cpp)]
    format: Format,

    /// TOML file with border, filler and directive settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(
        is_cpp_identifier(&cli.name),
        "--name {:?} is not a C++ identifier",
        cli.name
    );

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => Config::default(),
    };

    let source = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            buf
        }
    };
    log::info!("compiling {} bytes as {}", source.len(), cli.format);

    let output = if cli.sheet {
        Sheet::parse(&source, &config)?.emit(cli.format)
    } else {
        Asset::compile(&source, &config)?.emit(cli.format, &cli.name)
    };
    print!("{}", output);
    Ok(())
}
