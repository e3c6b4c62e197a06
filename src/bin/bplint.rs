//! Check bitpeek picture strings in source files and print their bit maps.
//!
//! Usage:
//!   bplint [-q] [-m MSTR] [-v...] [--pic PIC]... [FILE ...]
//!   bplint < file.go
//!
//! Picture strings are the first (or, with a skip digit, a later) string
//! literal after a `//bitpeek[:tag[:skip]]` comment.
//!
//! Exit code 1 if any picture string has an error, a file can not be read,
//! or no picture string was found at all.

use anyhow::{Context, Result};
use bplint::parser::{locate, LocateOptions};
use bplint::report::{banner, underlined};
use bplint::validate;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bplint", version, about = "Lint bitpeek picture strings")]
struct Cli {
    /// Suppress report output. Exit status still reflects errors.
    #[arg(short, long)]
    quiet: bool,

    /// Check only picture strings with a tag that contains MSTR.
    #[arg(short = 'm', long = "match", value_name = "MSTR")]
    tag_filter: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Check a picture string given on the command line.
    #[arg(long = "pic", value_name = "PIC")]
    pics: Vec<String>,

    /// Source files to scan. Reads stdin when none are given.
    files: Vec<PathBuf>,
}

/// Minimal stderr logger; the library only emits debug and trace records.
struct StderrLogger {
    level: log::LevelFilter,
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn log_level(verbose: u8) -> log::LevelFilter {
    let from_env = std::env::var("BPLINT_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<log::LevelFilter>().ok());
    match verbose {
        0 => from_env.unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    let level = log_level(verbose);
    if log::set_boxed_logger(Box::new(StderrLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}

#[derive(Debug, Default)]
struct Tally {
    seen: usize,
    errors: usize,
}

impl Tally {
    fn check(&mut self, tag: Option<&str>, origin: &str, line: usize, pic: &str, quiet: bool) -> Result<()> {
        let report = validate(pic);
        self.seen += 1;
        if !report.is_ok() {
            self.errors += 1;
        }
        if !quiet {
            io::stdout().write_all(banner(tag, origin, line, &report).as_bytes())?;
        }
        Ok(())
    }

    fn scan_source(&mut self, origin: &str, source: &str, cli: &Cli, options: &LocateOptions) -> Result<()> {
        let found = locate(source, options).with_context(|| format!("scanning {origin}"))?;
        log::info!("{origin}: {} picture string(s)", found.len());
        for pic in found {
            self.check(pic.tag, origin, pic.line, pic.text, cli.quiet)?;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let options = LocateOptions {
        tag_filter: cli.tag_filter.clone(),
    };

    let mut tally = Tally::default();
    let mut has_error = false;

    for (i, pic) in cli.pics.iter().enumerate() {
        tally.check(Some("--pic"), "<args>", i + 1, pic, cli.quiet)?;
    }

    if cli.files.is_empty() && cli.pics.is_empty() {
        let mut src = String::new();
        io::stdin().read_to_string(&mut src).context("reading stdin")?;
        tally.scan_source("<stdin>", &src, &cli, &options)?;
    }

    for path in &cli.files {
        let src = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                if !cli.quiet {
                    eprintln!("{}", underlined(&format!("Can not open {}: {}", path.display(), e)));
                }
                has_error = true;
                continue;
            }
        };
        tally.scan_source(&path.display().to_string(), &src, &cli, &options)?;
    }

    if tally.seen == 0 {
        has_error = true;
        if !cli.quiet {
            eprintln!("{}", underlined("Error: no matching picstrings found!"));
        }
    }
    if tally.errors > 0 {
        has_error = true;
        if !cli.quiet {
            eprintln!("bplint: {} of {} picture string(s) failed", tally.errors, tally.seen);
        }
    }
    if has_error {
        std::process::exit(1);
    }
    Ok(())
}
