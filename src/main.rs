use std::io::Write;

use anyhow::Context;
use backtrace::Backtrace;
use clap::{value_parser, Arg, ArgAction, Command};
use log::{debug, error, LevelFilter};
use tracing_log::{AsTrace, LogTracer};

mod config;
mod report;

use config::Config;

fn main() {
    // custom panic hook to terminate whole process after unwinding
    std::panic::set_hook(Box::new(|s| {
        eprintln!("{s}");
        eprintln!("{:?}", Backtrace::new());
        std::process::exit(101);
    }));

    let config = Config::from(&command().get_matches());

    if let Err(e) = init_logging(&config) {
        eprintln!("failed to initialize logging: {e:#}");
    }

    // a report that could not be written is still a completed run
    if let Err(e) = run() {
        error!("{e:#}");
    }
}

fn command() -> Command {
    Command::new(env!("CARGO_BIN_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print a one-shot hardware and software inventory of this host")
        .arg(
            Arg::new("VERBOSE")
                .long("verbose")
                .short('v')
                .help("Increase the verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("LOG_LEVEL")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level to use instead of the -v count")
                .value_parser(value_parser!(LevelFilter))
                .action(ArgAction::Set),
        )
}

/// Route `log` records from every crate into a stderr subscriber.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let level = config.log().level();

    LogTracer::init_with_filter(level).context("installing log bridge")?;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.as_trace())
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("installing subscriber")?;

    debug!("logging at {level}");

    Ok(())
}

fn run() -> anyhow::Result<()> {
    let host = hostfacts::collect();

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    report::render(&host, &mut stdout).context("writing report")?;
    stdout.flush().context("flushing report")?;

    Ok(())
}
