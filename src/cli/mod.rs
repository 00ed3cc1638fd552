use clap::{Parser, Subcommand};

use crate::app_err::ApplicationError;
use crate::commands;

#[derive(Parser, Debug)]
#[command(name = "rosa", version, about = "Command line tool for Red Hat OpenShift Service on AWS", long_about = None)]
pub struct Args {
    /// Enable debug mode
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all resources of a specific type
    #[command(subcommand)]
    List(ListCommand),
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List available regions
    #[command(
        visible_alias = "region",
        long_about = "List regions that are available for the current AWS account.",
        after_help = "Examples:\n  # List all available regions\n  rosa list regions"
    )]
    Regions(RegionsArgs),
}

#[derive(clap::Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionsArgs {
    /// List only regions with support for multiple availability zones
    #[arg(
        long = "multi-az",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub multi_az: Option<bool>,
}

impl Args {
    pub async fn execute(self) -> Result<(), ApplicationError> {
        match self.command {
            Commands::List(ListCommand::Regions(args)) => commands::regions::execute(args).await,
        }
    }
}
