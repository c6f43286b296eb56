use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Verify that the active network environment is correctly configured",
    override_usage = "chaindoctor verify [OPTIONS]"
)]
/// Arguments for the environment-verification operation.
pub struct VerifyArgs {
    /// The RPC endpoint of the active network.
    #[clap(long, short, default_value = "http://localhost:8545")]
    pub rpc_url: String,

    /// Override the declared network name from the environment.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub network: String,

    /// Print the report as JSON instead of the human-readable table.
    #[clap(long)]
    pub json: bool,
}

impl VerifyArgsBuilder {
    /// Creates a new VerifyArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            rpc_url: Some(String::from("http://localhost:8545")),
            network: Some(String::new()),
            json: Some(false),
        }
    }
}

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Run the smoke-test suite for the resolved operating mode",
    override_usage = "chaindoctor smoke [OPTIONS]"
)]
/// Arguments for the smoke-test operation.
pub struct SmokeArgs {
    /// The RPC endpoint of the active network.
    #[clap(long, short, default_value = "http://localhost:8545")]
    pub rpc_url: String,

    /// Override the declared network name from the environment.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub network: String,

    /// Print the report as JSON instead of the human-readable table.
    #[clap(long)]
    pub json: bool,
}

impl SmokeArgsBuilder {
    /// Creates a new SmokeArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            rpc_url: Some(String::from("http://localhost:8545")),
            network: Some(String::new()),
            json: Some(false),
        }
    }
}
