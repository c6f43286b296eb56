pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use error::Error;
use log_args::LogArgs;
use output::{render_accounts, render_mode, render_report};
use tracing::{error, info, warn};

use clap::{Parser, Subcommand};

use chaindoctor_common::utils::version::Version;
use chaindoctor_config::{resolve_mode, ConfigSnapshot, OperatingMode};
use chaindoctor_diagnostics::{smoke, verify, SmokeArgs, VerifyArgs};

#[derive(Debug, Parser)]
#[clap(name = "chaindoctor", version)]
pub struct Arguments {
    #[clap(subcommand)]
    pub sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(
    about = "Chaindoctor verifies that an EVM development environment (local chain, mainnet fork, or the sepolia testnet) is correctly provisioned and behaving."
)]
pub enum Subcommands {
    #[clap(name = "verify", about = "Run environment diagnostics against the active network")]
    Verify(VerifyArgs),

    #[clap(name = "smoke", about = "Run the smoke-test suite for the resolved operating mode")]
    Smoke(SmokeArgs),

    #[clap(name = "mode", about = "Print the operating mode resolved from the environment")]
    Mode(ModeArgs),

    #[clap(
        name = "check-runtime",
        about = "Check that the Node toolchain runtime is a supported version"
    )]
    CheckRuntime(CheckRuntimeArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct ModeArgs {
    /// Override the declared network name from the environment.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub network: String,
}

#[derive(Debug, Clone, Parser)]
pub struct CheckRuntimeArgs {
    /// Check this version string instead of invoking `node --version`.
    #[clap(long, default_value = None, hide_default_value = true)]
    pub version_string: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Arguments::parse();

    // setup logging
    let _ = args.logs.init_tracing();

    let exit_code = match args.sub {
        Subcommands::Verify(cmd) => {
            let as_json = cmd.json;
            match verify(cmd).await {
                Ok(result) => {
                    if as_json {
                        match serde_json::to_string_pretty(&result.report) {
                            Ok(json) => println!("{json}"),
                            Err(e) => error!("failed to serialize report: {e}"),
                        }
                    } else {
                        render_mode(result.mode);
                        render_report(&result.report);
                        render_accounts(&result.accounts);
                    }
                    i32::from(!result.report.is_success())
                }
                Err(e) => {
                    error!("failed to verify environment: {e}");
                    1
                }
            }
        }

        Subcommands::Smoke(cmd) => {
            let as_json = cmd.json;
            match smoke(cmd).await {
                Ok(result) => {
                    if as_json {
                        match serde_json::to_string_pretty(&result.report) {
                            Ok(json) => println!("{json}"),
                            Err(e) => error!("failed to serialize report: {e}"),
                        }
                    } else {
                        render_mode(result.mode);
                        render_report(&result.report);
                    }
                    i32::from(!result.report.is_success())
                }
                Err(e) => {
                    error!("failed to run smoke suite: {e}");
                    1
                }
            }
        }

        Subcommands::Mode(cmd) => {
            let mut snapshot = ConfigSnapshot::from_env();
            if !cmd.network.is_empty() {
                snapshot = snapshot.with_network(&cmd.network);
            }
            match resolve_mode(&snapshot) {
                Ok(mode) => {
                    render_mode(mode);
                    0
                }
                Err(e) => {
                    warn!("{e}; falling back to local mode");
                    render_mode(OperatingMode::Local);
                    0
                }
            }
        }

        Subcommands::CheckRuntime(cmd) => match check_runtime(cmd) {
            Ok(supported) => i32::from(!supported),
            Err(e) => {
                error!("failed to check runtime version: {e}");
                1
            }
        },
    };

    std::process::exit(exit_code);
}

/// Reads the Node toolchain runtime version and gates it against the
/// supported major range.
fn check_runtime(args: CheckRuntimeArgs) -> Result<bool, Error> {
    let version_string = match args.version_string {
        Some(version_string) => version_string,
        None => {
            let output = std::process::Command::new("node").arg("--version").output()?;
            String::from_utf8(output.stdout)
                .map_err(|_| Error::Generic("node printed a non-utf8 version".to_string()))?
        }
    };

    let version: Version = version_string.parse()?;

    if version.runtime_supported() {
        if version.runtime_recommended() {
            info!("runtime v{version} is a recommended LTS release");
        } else {
            info!("runtime v{version} is supported");
        }
        Ok(true)
    } else {
        error!(
            "runtime v{version} is outside the supported major range {:?}",
            chaindoctor_common::utils::version::SUPPORTED_RUNTIME_MAJORS
        );
        Ok(false)
    }
}
