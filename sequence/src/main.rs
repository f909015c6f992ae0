use anyhow::Result;
use clap::Parser;
use sequence::{render, DEFAULT_COUNT};
use tracing::debug;

/// Print the first N terms of the Fibonacci sequence
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of terms to print
    #[arg(long, short = 'n', default_value_t = DEFAULT_COUNT)]
    count: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(count = args.count, "Generating sequence");

    print!("{}", render(args.count));
    Ok(())
}
