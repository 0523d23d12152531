mod config;
mod consts;
mod driver;
mod ops;
mod prompt;
mod report;
mod structure;
mod util;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use env_logger::Env;
use log::{error, info};

use crate::config::Config;
use crate::ops::sectors::query_sectors_at;
use crate::ops::verify::Verifier;
use crate::report::Reporter;

const EXIT_VERIFY_FAILED: u8 = 1;
const EXIT_QUERY_FAILED: u8 = 2;
const EXIT_USAGE: u8 = 64;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(err) if err.use_stderr() => {
            eprintln!("{}", err.message);
            return ExitCode::from(EXIT_USAGE);
        }
        Err(err) => err.exit(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run(&config, &mut stdin.lock(), stdout.lock()) {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            error!("cannot write report: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Runs the enabled phases and returns the exit status.
fn run<R: BufRead, W: Write>(config: &Config, input: &mut R, out: W) -> io::Result<u8> {
    let mut reporter = Reporter::new(out);

    if config.list_codes {
        reporter.codes(config.scheme)?;
        return Ok(0);
    }

    reporter.start()?;
    let mut status = 0;

    if !config.skip_verify && !verify_phase(config, &mut reporter)? {
        status |= EXIT_VERIFY_FAILED;
    }
    if !config.skip_query && !query_phase(config, input, &mut reporter)? {
        status |= EXIT_QUERY_FAILED;
    }

    Ok(status)
}

fn verify_phase<W: Write>(config: &Config, reporter: &mut Reporter<W>) -> io::Result<bool> {
    info!("verifying entries of {}", config.mount_point.display());
    reporter.verify_started()?;

    let mut verifier = Verifier::new(config.payload_size, rand::thread_rng());
    match verifier.verify(&config.mount_point) {
        Ok(reports) => {
            for report in reports.iter() {
                reporter.entry(report)?;
            }
            reporter.verify_summary(&reports)?;
            Ok(reports.iter().all(|r| r.outcome.is_ok()))
        }
        Err(err) => {
            reporter.error("cannot list files", &err)?;
            Ok(false)
        }
    }
}

fn query_phase<R: BufRead, W: Write>(config: &Config, input: &mut R, reporter: &mut Reporter<W>) -> io::Result<bool> {
    let filename = match &config.filename {
        Some(name) => name.clone(),
        None => match prompt::read_filename(input, reporter.writer()) {
            Ok(name) => name,
            Err(err) => {
                reporter.error("IOCTL failed", &err)?;
                return Ok(false);
            }
        },
    };

    reporter.calling()?;
    match query_sectors_at(&config.device, &filename, config.scheme) {
        Ok(sectors) => {
            reporter.sectors(&sectors)?;
            Ok(true)
        }
        Err(err) => {
            reporter.error("IOCTL failed", &err)?;
            Ok(false)
        }
    }
}
