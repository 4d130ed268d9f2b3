use anyhow::Context;
use chrono::Local;
use clap::Parser;
use log::{LevelFilter, error, info};
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use wordfreq_rs::{CharSource, ReaderSource, WriteReporter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Count word frequencies in a text stream", long_about = None)]
struct Args {
    /// Set verbosity level (0: errors, 1: info, 2: debug, 3: trace)
    #[arg(short, long, default_value_t = 1)]
    verbose: u8,

    /// Minimum count threshold for words to be reported
    #[arg(short, long, default_value_t = 1)]
    min_count: u64,

    /// Report at most this many words; 0 for all
    #[arg(long, default_value_t = 0)]
    max_words: usize,

    /// Input file path (if not provided, reads from stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

/// Settings for one run, built from command-line arguments.
#[derive(Debug, Clone)]
struct Config {
    input: Option<PathBuf>,
    min_count: u64,
    max_words: usize,
    log_level: LevelFilter,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let log_level = match args.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Config {
            input: args.input,
            min_count: args.min_count,
            max_words: args.max_words,
            log_level,
        }
    }
}

fn open_source(input: Option<&PathBuf>) -> anyhow::Result<Box<dyn CharSource>> {
    let source: Box<dyn CharSource> = match input {
        Some(path) => Box::new(
            ReaderSource::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?,
        ),
        None => Box::new(ReaderSource::new(io::stdin().lock())),
    };
    Ok(source)
}

fn run(config: &Config) -> anyhow::Result<()> {
    let source = open_source(config.input.as_ref())?;
    let table = wordfreq_rs::count_words(source)?;

    let time_str = Local::now().format("%x - %I:%M.%S%p");
    info!(
        "{time_str}, counted {} words, {} distinct",
        table.total(),
        table.len()
    );

    let ranked = wordfreq_rs::rank(&table);
    let selected = wordfreq_rs::select(&ranked, config.min_count, config.max_words);

    let stdout = BufWriter::new(io::stdout().lock());
    let written = wordfreq_rs::report(selected, WriteReporter::new(stdout))?;
    info!("reported {written} of {} words", ranked.len());
    Ok(())
}

fn main() {
    let config = Config::from(Args::parse());

    // Logging goes to stderr so stdout carries only the report.
    if let Err(e) = TermLogger::init(
        config.log_level,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: could not set up logging: {e}");
    }

    if let Err(e) = run(&config) {
        error!("{e:#}");
        process::exit(1);
    }
}
