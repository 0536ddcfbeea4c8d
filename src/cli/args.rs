use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::config::Preset;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about,
    help_template(
        "{before-help}{name} {version}\n{author-with-newline}{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}{after-help}"
    )
)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["preset", "custom", "config", "list"])
))]
pub struct Args {
    /// Use a preset configuration.
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Build a configuration from the command line flags.
    #[arg(long)]
    pub custom: bool,

    /// Path to a TOML or JSON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List the available presets.
    #[arg(long)]
    pub list: bool,

    /// Number of read ports.
    #[arg(long, visible_alias = "rd_ports", default_value_t = 1)]
    pub rd_ports: usize,

    /// Number of write ports.
    #[arg(long, visible_alias = "wr_ports", default_value_t = 1)]
    pub wr_ports: usize,

    /// Memory depth in words.
    #[arg(long, default_value_t = 1024)]
    pub size: usize,

    /// Data width in bits.
    #[arg(long, default_value_t = 32)]
    pub width: usize,

    /// Memory ID passed to the MEMID parameter [default: generic_mem].
    #[arg(long)]
    pub memid: Option<String>,

    /// Name of the generated instance [default: memory_inst].
    #[arg(long, visible_alias = "instance_name")]
    pub instance_name: Option<String>,

    /// Name of the wrapper module.
    #[arg(long, visible_alias = "module_name")]
    pub module_name: Option<String>,

    /// File or directory to which the output should be saved.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generate a full wrapper module instead of only the instance.
    #[arg(long, visible_alias = "full_module", conflicts_with = "signals_only")]
    pub full_module: bool,

    /// Generate only the signal declarations.
    #[arg(long, visible_alias = "signals_only")]
    pub signals_only: bool,
}
