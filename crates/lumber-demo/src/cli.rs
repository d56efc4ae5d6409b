//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;
use lumber_core::Level;

/// Replays a reference logging session and reports what got through.
#[derive(Parser, Debug, Clone)]
#[command(name = "lumber-demo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON registry configuration file.
    #[arg(short, long, env = "LUMBER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Master level applied halfway through the session.
    #[arg(short, long, env = "LUMBER_RAISE_TO", default_value = "error")]
    pub raise_to: Level,

    /// Render the second logger through blocking alerts instead of the console.
    #[arg(long)]
    pub alerts: bool,

    /// Skip the stack trace printed after trace messages.
    #[arg(long)]
    pub no_backtrace: bool,

    /// Print the recorded history as JSON when done.
    #[arg(long)]
    pub history: bool,
}
