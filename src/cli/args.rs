use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "nexus-queue")]
#[command(about = "Track a balance-gated server action queue and send actions ahead of it")]
#[command(long_about = "nexus-queue - client-side action queue reconciliation

Keeps a local model of the server's action queue in step with the queue
notifications the server sends, and queues local actions ahead of time
without overrunning the server queue or stacking balance-consuming actions.

QUICK START:
  nexus-queue replay session.nq      Replay an event script and show what was sent
  nexus-queue decode free            Show the flags behind a queue type
  nexus-queue encode '!tbe'          Canonical letters for a queue type
  nexus-queue aliases                List queue-type alias words

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  nexus-queue <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Config file to use instead of ~/.nexus-queue/config.yaml
    #[arg(long, global = true, env = "NEXUS_QUEUE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay an event script against a fresh engine
    ///
    /// Each line is one event. Server notifications:
    ///
    ///   track <command> <queue>            entry appended
    ///   track-first <command> <queue>      entry put at the front
    ///   track-at <pos> <command> <queue>   entry inserted before pos
    ///   track-replace <pos> <command> <queue>
    ///   track-remove <pos>
    ///   clear <queue|all>
    ///   run <command> <queue>              entry ran
    ///   blocked                            last sent entry was refused
    ///
    /// Local requests:
    ///
    ///   do <command> <queue> [--free] [--repeat]
    ///   undo <command>
    ///   dispatch
    ///   show
    ///
    /// Quote commands containing spaces. Lines starting with # are comments.
    ///
    /// # Examples
    ///
    ///   nexus-queue replay combat.nq
    ///   cat combat.nq | nexus-queue replay -
    ///   nexus-queue replay combat.nq --capacity 3 --output json
    Replay(ReplayArgs),

    /// Decode a queue type into its flags
    ///
    /// Accepts letters (e, b, c, s, p, w, u, t with ! for negation) or an
    /// alias word such as free or full.
    Decode {
        /// Queue type letters or alias
        spec: String,
    },

    /// Print the canonical letters for a queue type
    Encode {
        /// Queue type letters or alias
        spec: String,
    },

    /// List the alias words and the letters they stand for
    Aliases,

    /// Generate shell completions
    ///
    /// Example: nexus-queue completions bash > ~/.bash_completion.d/nexus-queue
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for replaying an event script.
#[derive(Args)]
pub struct ReplayArgs {
    /// Script path, a name saved in ~/.nexus-queue/scripts, or - for stdin
    pub script: String,

    /// Override the configured server queue capacity
    #[arg(long, short = 'c')]
    pub capacity: Option<usize>,
}
