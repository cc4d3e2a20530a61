use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nexus_queue::cli::args::{Cli, Commands};
use nexus_queue::cli::commands;
use nexus_queue::config::{Config, Paths};
use nexus_queue::error::QueueError;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        let code = e.downcast_ref::<QueueError>().map_or(1, QueueError::exit_code);
        std::process::exit(code);
    }
}

fn init_logging(config: &Config, verbose: u8) {
    let level = match verbose {
        0 => config.general.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn read_script(paths: &Paths, name: &str) -> Result<String> {
    if name == "-" {
        let mut script = String::new();
        std::io::stdin()
            .read_to_string(&mut script)
            .context("Failed to read script from stdin")?;
        return Ok(script);
    }
    let path = paths.script(name);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read script {}", path.display()))
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::default();
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    init_logging(&config, cli.verbose);
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match &cli.command {
        Commands::Replay(args) => {
            let script = read_script(&paths, &args.script)?;
            commands::replay(&config, args, &script, format)?
        },
        Commands::Decode { spec } => commands::decode(&config, spec, format)?,
        Commands::Encode { spec } => commands::encode(&config, spec, format)?,
        Commands::Aliases => commands::aliases(&config, format)?,
        Commands::Completions { shell } => commands::completions(*shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
