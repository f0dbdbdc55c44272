use log::Log;
use std::io::Write;
use std::process::ExitCode;

use readsfq::{Command, FastqCounter, USAGE, parse_args};

/// Module that emits scan warnings.
const WARN_TARGET: &str = "readsfq::counter";

// Scan warnings always reach stderr; RUST_LOG can add output, never remove it.
fn init_logging() {
    let env = || env_logger::Env::default().default_filter_or("warn");
    let scan_warning = log::Metadata::builder()
        .level(log::Level::Warn)
        .target(WARN_TARGET)
        .build();
    let warnings_on = env_logger::Builder::from_env(env())
        .build()
        .enabled(&scan_warning);

    let mut builder = env_logger::Builder::from_env(env());
    builder.format(|buf, record| match record.level() {
        log::Level::Warn => writeln!(buf, "Warning: {}", record.args()),
        level => writeln!(buf, "[{level}] {}", record.args()),
    });
    if !warnings_on {
        builder.filter_module(WARN_TARGET, log::LevelFilter::Warn);
    }
    builder.init();
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (input, options) = match parse_args(std::env::args_os())? {
        Command::Usage => {
            eprintln!("{USAGE}");
            return Ok(ExitCode::FAILURE);
        }
        Command::Count { input, options } => (input, options),
    };

    let counter = match input {
        Some(path) => FastqCounter::from_path(path, options)?,
        None => FastqCounter::from_stdin(options),
    };
    let summary = counter.count()?;
    println!("{}", summary.reads);
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
