//! clap [Args](clap::Args) for logging configuration.

use clap::{ArgAction, Args};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// The log configuration.
#[derive(Debug, Args)]
#[clap(next_help_heading = "LOGGING")]
pub struct LogArgs {
    /// The filter to use for logs written to stdout. Overrides the verbosity
    /// flags when set.
    #[clap(long = "log.filter", value_name = "FILTER", global = true, default_value = "")]
    pub log_filter: String,

    /// The verbosity settings for the tracer.
    #[clap(flatten)]
    pub verbosity: Verbosity,
}

impl LogArgs {
    /// Initializes tracing with the configured options from cli args.
    pub fn init_tracing(&self) -> eyre::Result<()> {
        let filter = if self.log_filter.is_empty() {
            EnvFilter::builder()
                .with_default_directive(self.verbosity.directive().into())
                .from_env_lossy()
        } else {
            EnvFilter::try_new(&self.log_filter)?
        };

        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
        Ok(())
    }
}

/// The verbosity settings for the cli.
#[derive(Debug, Copy, Clone, Args)]
#[clap(next_help_heading = "DISPLAY")]
pub struct Verbosity {
    /// Increase logging verbosity (-v = debug, -vv = trace).
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbosity: u8,

    /// Silence all log output.
    #[clap(long, alias = "silent", short = 'q', global = true)]
    quiet: bool,
}

impl Verbosity {
    /// The level filter the flags map to.
    pub fn directive(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::OFF;
        }
        match self.verbosity {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
