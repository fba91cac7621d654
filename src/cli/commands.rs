// CLI command definitions

use super::generate::GenerateCommand;
use super::split::SplitCommand;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "image2deploy",
    version,
    about = "Generate Kubernetes Deployment manifests from CSV image lists",
    long_about = "Reads a CSV list of container images and emits a Deployment with one container per image, or splits a master list into group CSVs"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a Deployment manifest from a CSV image list
    Generate(GenerateCommand),

    /// Split a master CSV into one CSV per image group
    Split(SplitCommand),
}

impl CliArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.execute(),
            Commands::Split(cmd) => cmd.execute(),
        }
    }
}
