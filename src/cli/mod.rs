//! Command-line interface

pub mod commands;
pub mod display;
pub mod generate;
pub mod split;

pub use self::commands::{CliArgs, Commands};
