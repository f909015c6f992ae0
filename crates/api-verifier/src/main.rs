use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use api_verifier::{
    verify_round_trip, verify_run_lifecycle, BackendClient, Console, Payload, RoundTripPlan,
    RunPlan, VerifierConfig, VerifyError,
};
use clap::{Parser, Subcommand};
use tracing::debug;

/// Smoke-test the NebulaCode backend APIs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides NEBULA_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Workspace to write into (overrides NEBULA_WORKSPACE_ID)
    #[arg(long, global = true)]
    workspace: Option<String>,

    /// File id to write and read back (overrides NEBULA_FILE_ID)
    #[arg(long, global = true)]
    file: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a file, read it back and compare (default)
    Files {
        /// Leading text of the written content (overrides NEBULA_CONTENT_PREFIX)
        #[arg(long)]
        content_prefix: Option<String>,

        /// Suffix the content with the current time instead of "step 1"
        #[arg(long, default_value_t = false)]
        timestamped: bool,

        /// Also require the file to appear in the workspace listing
        #[arg(long, default_value_t = false)]
        check_listing: bool,
    },
    /// Exercise run creation, status, cancel and timeout
    Runs {
        /// Seconds to wait before the final status poll (overrides NEBULA_RUN_SETTLE_SECS)
        #[arg(long)]
        settle_secs: Option<u64>,
    },
}

impl Args {
    fn config(&self) -> VerifierConfig {
        let mut config = VerifierConfig::default();
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(workspace) = &self.workspace {
            config.workspace_id = workspace.clone();
        }
        if let Some(file) = &self.file {
            config.file_id = file.clone();
        }
        match &self.command {
            Some(Command::Files {
                content_prefix: Some(prefix),
                ..
            }) => config.content_prefix = prefix.clone(),
            Some(Command::Runs {
                settle_secs: Some(secs),
            }) => config.run_settle = Duration::from_secs(*secs),
            _ => {}
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    debug!(?config, "Verifier starting");

    let mut console = Console::stdout();
    let client = match BackendClient::new(&config.base_url) {
        Ok(client) => client,
        Err(err @ VerifyError::Client(_)) => {
            return Err(err)
                .with_context(|| format!("Failed to set up client for {}", config.base_url));
        }
        Err(err) => {
            console.failure(&err);
            return Ok(ExitCode::from(1));
        }
    };

    let outcome: Result<(), VerifyError> = match args.command {
        None => {
            let plan = RoundTripPlan::from_config(&config, Payload::Fixed, false);
            verify_round_trip(&client, &plan, &mut console).await.map(drop)
        }
        Some(Command::Files {
            timestamped,
            check_listing,
            ..
        }) => {
            let payload = if timestamped {
                Payload::Timestamped
            } else {
                Payload::Fixed
            };
            let plan = RoundTripPlan::from_config(&config, payload, check_listing);
            verify_round_trip(&client, &plan, &mut console).await.map(drop)
        }
        Some(Command::Runs { .. }) => {
            let plan = RunPlan::from_config(&config);
            verify_run_lifecycle(&client, &plan, &mut console)
                .await
                .map(drop)
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            debug!(step = ?err.step(), "Verification failed: {err}");
            console.failure(&err);
            Ok(ExitCode::from(1))
        }
    }
}
