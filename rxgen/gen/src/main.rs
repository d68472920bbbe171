//! RxHttp Code Generator
//!
//! Runs one generation round over a JSON description of annotated
//! declarations and writes the generated Java sources.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use rxgen_gen::config::{
    DEBUG_OPTION, GeneratorConfig, INCREMENTAL_OPTION, PACKAGE_OPTION, RXJAVA_OPTION,
};
use rxgen_gen::diagnostics::ConsoleSink;
use rxgen_gen::errors::{GeneratorError, Result};
use rxgen_gen::input::load_round;
use rxgen_gen::output::JavaFileSink;
use rxgen_gen::processor::{Processor, RoundOutcome};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// RxHttp code generator - turns annotated declarations into request wrappers
#[derive(Parser, Debug)]
#[command(name = "rxgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file describing the round's declarations
    #[arg(short, long, required_unless_present = "print_options")]
    input: Option<PathBuf>,

    /// Source root for generated files
    #[arg(short, long, default_value = "build/generated/source/rxgen")]
    output: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Processor option as KEY=VALUE (repeatable)
    #[arg(short = 'A', value_name = "KEY=VALUE", value_parser = parse_option)]
    options: Vec<(String, String)>,

    /// Package for generated types (overrides -A rxhttp_package)
    #[arg(long, env = "RXHTTP_PACKAGE")]
    package: Option<String>,

    /// Reactive integration: rxjava2, rxjava3 or false (overrides -A rxhttp_rxjava)
    #[arg(long, env = "RXHTTP_RXJAVA")]
    rxjava: Option<String>,

    /// Report a note describing each round
    #[arg(long)]
    debug: bool,

    /// Run as a non-incremental processor
    #[arg(long)]
    no_incremental: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs and diagnostics as JSON
    #[arg(long)]
    json: bool,

    /// Print the processor option keys this configuration supports and exit
    #[arg(long)]
    print_options: bool,
}

impl Cli {
    /// Merges `-A` options with the dedicated flags; flags win.
    fn processor_options(&self) -> HashMap<String, String> {
        let mut options: HashMap<_, _> = self.options.iter().cloned().collect();
        if let Some(package) = &self.package {
            options.insert(PACKAGE_OPTION.to_string(), package.clone());
        }
        if let Some(rxjava) = &self.rxjava {
            options.insert(RXJAVA_OPTION.to_string(), rxjava.clone());
        }
        if self.debug {
            options.insert(DEBUG_OPTION.to_string(), "true".to_string());
        }
        if self.no_incremental {
            options.insert(INCREMENTAL_OPTION.to_string(), "false".to_string());
        }
        options
    }
}

fn parse_option(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,rxgen_gen=info".to_string(),
            2 => "info,rxgen_gen=debug".to_string(),
            _ => "debug,rxgen_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

/// Option keys the host should forward, one per line.
fn supported_options(cli: &Cli) -> Result<Vec<&'static str>> {
    let config = GeneratorConfig::from_options(&cli.processor_options())?;
    Ok(config.supported_options())
}

fn run(cli: &Cli) -> Result<RoundOutcome> {
    let config = GeneratorConfig::from_options(&cli.processor_options())?;
    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| GeneratorError::Config("--input is required".to_string()))?;
    let round = load_round(input)?;

    let mut processor = Processor::new(config);
    let mut diagnostics = if cli.json {
        ConsoleSink::json()
    } else {
        ConsoleSink::new()
    };
    let mut emitter = JavaFileSink::new(&cli.output, cli.dry_run);

    let outcome = processor.process_and_emit(&round, &mut diagnostics, &mut emitter)?;

    if cli.verbose > 0 && !cli.dry_run {
        for path in emitter.written() {
            eprintln!("{} {}", "wrote".green(), path.display());
        }
    }
    Ok(outcome)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    if cli.print_options {
        return match supported_options(&cli) {
            Ok(options) => {
                for option in options {
                    println!("{option}");
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{} {err}", "error:".red().bold());
                ExitCode::FAILURE
            }
        };
    }

    match run(&cli) {
        Ok(RoundOutcome::Aborted) => {
            eprintln!("{}", "generation aborted; see errors above".red().bold());
            ExitCode::FAILURE
        }
        Ok(RoundOutcome::Generated(types)) => {
            if cli.verbose > 0 {
                eprintln!("Generated {} types", types.len());
            }
            ExitCode::SUCCESS
        }
        Ok(RoundOutcome::Skipped) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxgen_gen::config::AGGREGATING_OPTION;

    #[test]
    fn clap_requires_input() {
        let result = Cli::try_parse_from(["rxgen"]);
        assert!(result.is_err());
    }

    #[test]
    fn clap_accepts_print_options_without_input() {
        let cli = Cli::try_parse_from(["rxgen", "--print-options"]).unwrap();
        assert!(cli.print_options);
        assert!(cli.input.is_none());
    }

    #[test]
    fn clap_collects_processor_options() {
        let cli = Cli::try_parse_from([
            "rxgen",
            "--input",
            "round.json",
            "-A",
            "rxhttp_rxjava=rxjava2",
            "-A",
            "rxhttp_incremental=false",
        ])
        .unwrap();
        let options = cli.processor_options();
        assert_eq!(options.get(RXJAVA_OPTION).map(String::as_str), Some("rxjava2"));
        assert_eq!(options.get(INCREMENTAL_OPTION).map(String::as_str), Some("false"));
    }

    #[test]
    fn clap_rejects_option_without_value() {
        let result = Cli::try_parse_from(["rxgen", "--input", "round.json", "-A", "rxhttp_debug"]);
        assert!(result.is_err());
    }

    #[test]
    fn dedicated_flags_override_processor_options() {
        let cli = Cli::try_parse_from([
            "rxgen",
            "--input",
            "round.json",
            "-A",
            "rxhttp_debug=false",
            "--debug",
            "--no-incremental",
        ])
        .unwrap();
        let options = cli.processor_options();
        assert_eq!(options.get(DEBUG_OPTION).map(String::as_str), Some("true"));
        assert_eq!(options.get(INCREMENTAL_OPTION).map(String::as_str), Some("false"));
    }

    #[test]
    fn supported_options_follow_incremental_flag() {
        let cli = Cli::try_parse_from(["rxgen", "--print-options"]).unwrap();
        let options = supported_options(&cli).unwrap();
        assert!(options.contains(&RXJAVA_OPTION));
        assert!(options.contains(&AGGREGATING_OPTION));

        let cli = Cli::try_parse_from(["rxgen", "--print-options", "--no-incremental"]).unwrap();
        let options = supported_options(&cli).unwrap();
        assert!(!options.contains(&AGGREGATING_OPTION));
        assert_eq!(options.len(), 4);
    }
}
