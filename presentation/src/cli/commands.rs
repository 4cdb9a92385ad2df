//! CLI command definitions

use arena_domain::{GenerationStrategy, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for debate-arena
#[derive(Parser, Debug)]
#[command(name = "debate-arena")]
#[command(
    author,
    version,
    about = "Turn a debate topic into opposing stances and philosopher camps"
)]
#[command(long_about = r#"
Debate Arena turns a free-form debate topic into a structured stance set:

1. Normalization: long topics are condensed into a title of at most 15 characters
2. Positions: two short, opposing position statements are generated
3. Assignment: five philosophers each pick a side with a short reason

Both sides always have at least one philosopher. If the backend fails
repeatedly, a deterministic fallback result is printed instead.

The result is printed to stdout; progress and logs go to stderr.

Configuration files are loaded from (in priority order):
1. ARENA_<SECTION>__<KEY>   Environment variables
2. --config <path>          Explicit config file
3. ./arena.toml             Project-level config
4. ~/.config/debate-arena/config.toml   Global config

Example:
  debate-arena "我们应该限制人工智能的发展吗？"
  debate-arena --strategy fan-out -o text "真爱存在吗?"
  debate-arena --no-retry -vv "远程办公是否优于坐班"
"#)]
pub struct Cli {
    /// The debate topic
    #[arg(required_unless_present = "show_config")]
    pub topic: Option<String>,

    /// Generation strategy: combined, batched or fan-out
    #[arg(short, long, value_name = "STRATEGY")]
    pub strategy: Option<GenerationStrategy>,

    /// Make a single attempt and report its error instead of falling back
    #[arg(long)]
    pub no_retry: bool,

    /// Backend model identifier
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format: json, pretty or text
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Log filter directive for the verbosity count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
