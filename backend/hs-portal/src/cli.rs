use std::path::PathBuf;

use clap::Parser;

/// Role-gated portal shell
#[derive(Parser, Debug)]
#[command(name = "hs-portal", version, about)]
pub struct Cli {
    /// Configuration directory (overrides HS_CONFIG_DIR)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Start at this path instead of the configured home route
    #[arg(long, value_name = "PATH")]
    pub start: Option<String>,
}
