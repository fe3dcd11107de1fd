use clap::ArgMatches;
use log::LevelFilter;

/// Settings for one run, taken from the command line. There is no config
/// file: everything not set here has a fixed default.
#[derive(Clone, Debug, Default)]
pub struct Config {
    log: Log,
}

impl Config {
    pub fn new(verbose: u8, level: Option<LevelFilter>) -> Self {
        Self {
            log: Log::new(verbose, level),
        }
    }

    pub fn log(&self) -> &Log {
        &self.log
    }
}

impl From<&ArgMatches> for Config {
    fn from(args: &ArgMatches) -> Self {
        Self::new(
            *args.get_one::<u8>("VERBOSE").unwrap_or(&0),
            args.get_one::<LevelFilter>("LOG_LEVEL").copied(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct Log {
    level: LevelFilter,
}

impl Default for Log {
    fn default() -> Self {
        Self { level: log_level() }
    }
}

impl Log {
    /// An explicit level wins over the repeat count of `-v`.
    fn new(verbose: u8, level: Option<LevelFilter>) -> Self {
        let level = level.unwrap_or(match verbose {
            0 => log_level(),
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        });

        Self { level }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

// warnings only, so diagnostics stay out of the way of the report
fn log_level() -> LevelFilter {
    LevelFilter::Warn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level() {
        assert_eq!(Config::default().log().level(), LevelFilter::Warn);
        assert_eq!(Config::new(0, None).log().level(), LevelFilter::Warn);
    }

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(Config::new(1, None).log().level(), LevelFilter::Info);
        assert_eq!(Config::new(2, None).log().level(), LevelFilter::Debug);
        assert_eq!(Config::new(9, None).log().level(), LevelFilter::Trace);
    }

    fn parse(args: &[&str]) -> Config {
        let matches = crate::command()
            .try_get_matches_from(args)
            .expect("arguments should parse");
        Config::from(&matches)
    }

    #[test]
    fn command_line() {
        assert_eq!(parse(&["hwsnap"]).log().level(), LevelFilter::Warn);
        assert_eq!(parse(&["hwsnap", "-vv"]).log().level(), LevelFilter::Debug);
        assert_eq!(
            parse(&["hwsnap", "-v", "--log-level", "error"])
                .log()
                .level(),
            LevelFilter::Error
        );
        assert!(crate::command()
            .try_get_matches_from(["hwsnap", "--log-level", "loud"])
            .is_err());
    }

    #[test]
    fn explicit_level_wins() {
        assert_eq!(
            Config::new(3, Some(LevelFilter::Error)).log().level(),
            LevelFilter::Error
        );
    }
}
