//! `split` command

use crate::cli::display::TableRenderer;
use crate::domain::partition::GroupingStrategy;
use crate::domain::pipeline::SplitPipeline;
use crate::infrastructure::constants::{DEFAULT_GROUP_DIR, DEFAULT_GROUP_PREFIX};
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct SplitCommand {
    /// Master CSV image list
    #[arg(long = "in", value_name = "PATH")]
    pub input: String,

    /// Directory to write group CSV files into
    #[arg(long, default_value = DEFAULT_GROUP_DIR)]
    pub out_dir: String,

    /// Output CSV filename prefix
    #[arg(long, default_value = DEFAULT_GROUP_PREFIX)]
    pub prefix: String,

    /// Group by the Nth path segment of the image (0-based). Example: --segment 3
    #[arg(long)]
    pub segment: Option<usize>,

    /// Mapping list needle=group,needle=group. Example: db2u=db2u,opensearch=opensearch
    #[arg(long)]
    pub contains: Option<String>,

    /// Regex whose first capture group is the key. Example: '(db2u|opensearch|cpfs)'
    #[arg(long)]
    pub regex: Option<String>,
}

impl SplitCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let strategy = self.strategy()?;
        let pipeline = SplitPipeline::new(strategy, &self.out_dir, self.prefix.clone());

        let written = pipeline
            .run(&self.input)
            .with_context(|| format!("Failed to split {}", self.input))?;

        println!("{}", TableRenderer::new().render_groups(&written));
        Ok(())
    }

    pub fn strategy(&self) -> anyhow::Result<GroupingStrategy> {
        Ok(GroupingStrategy::from_options(
            self.segment,
            self.contains.as_deref(),
            self.regex.as_deref(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cmd = SplitCommand::parse_from(["split", "--in", "master.csv", "--segment", "3"]);
        assert_eq!(cmd.out_dir, "groups");
        assert_eq!(cmd.prefix, "images_");
        assert!(matches!(cmd.strategy().unwrap(), GroupingStrategy::Segment(3)));
    }

    #[test]
    fn test_conflicting_modes_rejected() {
        let cmd = SplitCommand::parse_from([
            "split",
            "--in",
            "master.csv",
            "--segment",
            "1",
            "--regex",
            "(db2u)",
        ]);
        assert!(cmd.strategy().is_err());

        let cmd = SplitCommand::parse_from(["split", "--in", "master.csv"]);
        assert!(cmd.strategy().is_err());
    }
}
