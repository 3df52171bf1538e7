use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use diegraph_core::print::{write_synthetic, write_tree};
use diegraph_core::{DebugFile, LoadOptions, Offset};
use diegraph_utils::{info, LogConfig, LogFormat, LogLevel};

/// Inspect, check and backfill the DWARF entry graph of an object file.
#[derive(Parser, Debug)]
#[command(name = "diegraph")]
#[command(version)]
#[command(about = "Inspect, check and backfill the DWARF entry graph of an object file", long_about = None)]
struct Cli
{
    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true, value_parser = parse_level)]
    log_level: Option<LogLevel>,

    /// Log format: pretty or json (overrides DIEGRAPH_LOG_FORMAT)
    #[arg(long, global = true, value_parser = parse_format)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Input
{
    /// Path to an ELF, Mach-O or PE file carrying DWARF
    file: PathBuf,

    /// Declare undefined symbols the debug info does not mention
    #[arg(long, default_value_t = false)]
    reconcile: bool,

    /// Skip entries with unknown tags instead of failing
    #[arg(long, default_value_t = false)]
    skip_unknown: bool,
}

impl Input
{
    fn load(&self) -> Result<DebugFile, Box<dyn std::error::Error>>
    {
        let options = LoadOptions::default()
            .with_symbol_reconciliation(self.reconcile)
            .with_unknown_tags_skipped(self.skip_unknown);
        Ok(DebugFile::open(&self.file, options)?)
    }
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Print the entry tree
    Dump
    {
        #[command(flatten)]
        input: Input,
        /// Print only the subtree at this offset (hex with 0x, or decimal)
        #[arg(long, value_parser = parse_offset)]
        offset: Option<Offset>,
    },
    /// Report references whose target is not in the graph
    Check
    {
        #[command(flatten)]
        input: Input,
    },
    /// Resolve a path of names from the file root, e.g. `main` or `Point x`
    Resolve
    {
        #[command(flatten)]
        input: Input,
        /// Names, outermost first
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the declarations reconciliation adds
    Synthetic
    {
        /// Path to an ELF, Mach-O or PE file carrying DWARF
        file: PathBuf,
    },
}

fn main()
{
    let cli = Cli::parse();

    // Flags win over RUST_LOG and DIEGRAPH_LOG_FORMAT
    let guard = match LogConfig::from_env()
        .with_level(cli.log_level)
        .with_format(cli.log_format)
        .init()
    {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    let code = match run_command(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    // process::exit skips destructors; flush the file sink first
    drop(guard);
    process::exit(code);
}

/// Runs one command, returning the process exit code.
fn run_command(command: Commands) -> Result<i32, Box<dyn std::error::Error>>
{
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Dump { input, offset } => {
            let file = input.load()?;
            let start = offset.unwrap_or(Offset::ROOT);
            info!("dumping {} from {}", file.path().display(), start);
            write_tree(file.dieset(), start, &mut out, |_| true)?;
            Ok(0)
        }
        Commands::Check { input } => {
            let file = input.load()?;
            let report = file.dieset().integrity_check(Offset::ROOT)?;
            for violation in &report.violations {
                writeln!(
                    out,
                    "{}: {} -> {} (not found)",
                    violation.referencing, violation.attr, violation.target
                )?;
            }
            writeln!(
                out,
                "{} references checked, {} unresolved",
                report.checked,
                report.violations.len()
            )?;
            Ok(if report.is_clean() { 0 } else { 2 })
        }
        Commands::Resolve { input, names } => {
            let file = input.load()?;
            let set = file.dieset();
            let found = match names.split_first() {
                Some((first, rest)) => set
                    .resolve_toplevel_name(first)
                    .and_then(|unit_child| set.resolve_named_path(unit_child, rest)),
                None => None,
            };
            match found.and_then(|offset| set.find(offset)) {
                Some(die) => {
                    writeln!(out, "{}", die)?;
                    Ok(0)
                }
                None => {
                    writeln!(out, "{}: not found", names.join(" "))?;
                    Ok(2)
                }
            }
        }
        Commands::Synthetic { file } => {
            let options = LoadOptions::default().with_symbol_reconciliation(true);
            let file = DebugFile::open(&file, options)?;
            if let Some(report) = file.reconcile_report() {
                info!(
                    "{} of {} undefined symbols declared",
                    report.declared.len(),
                    report.considered
                );
            }
            write_synthetic(file.dieset(), &mut out)?;
            Ok(0)
        }
    }
}

fn parse_level(s: &str) -> Result<LogLevel, String>
{
    s.parse().map_err(|e: diegraph_utils::LoggingError| e.to_string())
}

fn parse_format(s: &str) -> Result<LogFormat, String>
{
    s.parse().map_err(|e: diegraph_utils::LoggingError| e.to_string())
}

fn parse_offset(s: &str) -> Result<Offset, String>
{
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed
        .map(Offset::new)
        .map_err(|e| format!("invalid offset '{}': {}", s, e))
}
