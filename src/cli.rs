//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use storeplan_core::EditorFlavor;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Config file to use instead of the platform default
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store layout to operate on (overrides the config)
    #[arg(long = "store", value_name = "NAME")]
    pub store: Option<String>,

    /// Layout directory (overrides the config)
    #[arg(long = "layout-dir", value_name = "DIR")]
    pub layout_dir: Option<PathBuf>,

    /// Log level (overrides the config; RUST_LOG wins over both)
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the fixtures in the layout
    Summary,
    /// Add a fixture and save the layout
    Add {
        #[arg(long, value_enum)]
        flavor: Option<FlavorArg>,
        #[arg(long, requires = "y", allow_hyphen_values = true)]
        x: Option<f64>,
        #[arg(long, requires = "x", allow_hyphen_values = true)]
        y: Option<f64>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a fixture by id and save the layout
    Delete { id: String },
    /// Delete the saved layout
    Clear,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlavorArg {
    Triangle,
    Rectangle,
}

impl From<FlavorArg> for EditorFlavor {
    fn from(arg: FlavorArg) -> Self {
        match arg {
            FlavorArg::Triangle => EditorFlavor::Triangle,
            FlavorArg::Rectangle => EditorFlavor::Rectangle,
        }
    }
}

impl CliArgs {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Summary)
    }
}
