use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

pub use clap_complete::Shell;

#[derive(Parser, Debug)]
#[clap(name = "licensepr", version, author = "Kaden Gruizenga")]
#[clap(about = "Picks a license, fills its parameters and opens pull requests applying it.", long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the license backend.
    #[clap(long, global = true, env = "LICENSEPR_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Access token sent in the X-GITHUB-TOKEN header.
    #[clap(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to the YAML config file.
    #[clap(long, global = true, value_name = "FILE_PATH")]
    pub config: Option<PathBuf>,

    /// Print detailed status messages during execution (to stderr).
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Generate shell completion script.
    #[clap(long = "generate-completion", value_enum, global = true, help = "Generate shell completion script for the specified shell")]
    pub generate_completion: Option<Shell>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the parameters a license needs before it can be applied.
    Params(ParamsArgs),
    /// Open one pull request per repository applying the filled license.
    Submit(SubmitArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ParamsArgs {
    /// Key of the license template (e.g. "mit", "apache-2.0").
    pub license_key: String,
}

#[derive(ClapArgs, Debug)]
pub struct SubmitArgs {
    /// Key of the license template to apply.
    pub license_key: String,
    /// Repository to open a pull request against, as ORG/REPO. Repeatable.
    #[clap(short = 'r', long = "repo", value_name = "ORG/REPO", required = true)]
    pub repos: Vec<String>,
    /// Parameter value, as NAME=VALUE. Repeatable. "year" defaults to the current year.
    #[clap(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(crate::error::ActionError::InvalidParameter(raw.to_string()).to_string()),
    }
}
