//! salt-events CLI - classify Salt event tags and decode event streams.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::{classify, decode, kinds};

#[derive(Parser)]
#[command(name = "salt-events")]
#[command(about = "Classify and decode Salt master event streams")]
struct Cli {
    /// Log at debug level (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the event kind each tag selects
    Classify {
        /// Event tags
        #[arg(required = true)]
        tags: Vec<String>,
        /// Output as JSON, including tag captures
        #[arg(long)]
        json: bool,
    },
    /// Decode a JSON-lines stream of {"tag": ..., "data": ...} envelopes
    Decode {
        /// Input file (or stdin if not provided)
        input: Option<String>,
        /// Exit with error on the first line that fails to decode
        #[arg(long)]
        strict: bool,
        /// Also print envelopes whose tag matches no known kind
        #[arg(long)]
        show_unknown: bool,
        /// Stop after reading N lines (default: unlimited)
        #[arg(long)]
        max_events: Option<u64>,
    },
    /// List known event kinds in match order
    Kinds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "salt_events=debug"
    } else {
        "salt_events=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Classify { tags, json } => classify::run(tags, json),
        Commands::Decode {
            input,
            strict,
            show_unknown,
            max_events,
        } => decode::run(input, strict, show_unknown, max_events),
        Commands::Kinds { json } => kinds::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
