//! CLI interface for preamp-ctl

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Volume and input control for a stepped-attenuator preamp
#[derive(Parser)]
#[command(name = "preamp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the attenuator code for one volume step
    Code {
        /// Number of volume steps
        #[arg(long)]
        steps: u8,

        /// Selected step
        #[arg(long)]
        step: u8,

        /// Attenuation at the loudest step in dB
        #[arg(long, default_value = "0")]
        min: u8,

        /// Attenuation at step zero in dB
        #[arg(long)]
        max: u8,
    },

    /// Print the attenuator code for every volume step
    Table {
        /// Take the profile from this configuration file
        #[arg(short, long, conflicts_with_all = ["steps", "min", "max"])]
        config: Option<PathBuf>,

        /// Number of volume steps
        #[arg(long, default_value = "60")]
        steps: u8,

        /// Attenuation at the loudest step in dB
        #[arg(long, default_value = "0")]
        min: u8,

        /// Attenuation at step zero in dB
        #[arg(long, default_value = "60")]
        max: u8,

        /// Print JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "preamp.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,

    /// Drive the controller with key names read from stdin
    Simulate {
        /// Configuration file path
        #[arg(short, long, default_value = "preamp.yaml")]
        config: PathBuf,

        /// Runtime state file path
        #[arg(short, long, default_value = "preamp.state.yaml")]
        state: PathBuf,
    },
}
