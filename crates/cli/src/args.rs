pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "sapient")]
#[command(about = "Sign, seal and encrypt HTTP message bodies")]
pub struct Args {
    /// Base URL for `send` (overrides `remote` in config.toml)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the sapient config directory (defaults to ~/.sapient)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}
