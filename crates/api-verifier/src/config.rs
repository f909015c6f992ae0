use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_WORKSPACE_ID: &str = "script-test-workspace";
pub const DEFAULT_FILE_ID: &str = "test-file.txt";
pub const DEFAULT_CONTENT_PREFIX: &str = "Verified via script at ";
/// Suffix appended to the prefix when the payload is not timestamped.
pub const FIXED_CONTENT_SUFFIX: &str = "step 1";
/// How long the run check waits for the simulated lifecycle to finish.
pub const DEFAULT_RUN_SETTLE: Duration = Duration::from_secs(4);

/// Target backend and file key for the smoke checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Backend root, e.g. `http://localhost:4000`
    pub base_url: String,
    pub workspace_id: String,
    pub file_id: String,
    /// Leading part of the written content
    pub content_prefix: String,
    /// Delay between run creation and the final status check
    pub run_settle: Duration,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("NEBULA_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            workspace_id: std::env::var("NEBULA_WORKSPACE_ID")
                .unwrap_or_else(|_| DEFAULT_WORKSPACE_ID.into()),
            file_id: std::env::var("NEBULA_FILE_ID").unwrap_or_else(|_| DEFAULT_FILE_ID.into()),
            content_prefix: std::env::var("NEBULA_CONTENT_PREFIX")
                .unwrap_or_else(|_| DEFAULT_CONTENT_PREFIX.into()),
            run_settle: Self::settle_from_env().unwrap_or(DEFAULT_RUN_SETTLE),
        }
    }
}

impl VerifierConfig {
    fn settle_from_env() -> Option<Duration> {
        let secs = std::env::var("NEBULA_RUN_SETTLE_SECS").ok()?;
        match secs.trim().parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(e) => {
                tracing::warn!(value = %secs, "Ignoring invalid NEBULA_RUN_SETTLE_SECS: {e}");
                None
            }
        }
    }

    /// Config pointing at `base_url` with every other field at its built-in default.
    ///
    /// Ignores the environment, so tests get the same values everywhere.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            workspace_id: DEFAULT_WORKSPACE_ID.into(),
            file_id: DEFAULT_FILE_ID.into(),
            content_prefix: DEFAULT_CONTENT_PREFIX.into(),
            run_settle: DEFAULT_RUN_SETTLE,
        }
    }
}
