//! Workspace file round-trip check.
//!
//! A linear pipeline: save → read → compare → (optionally) list. Each stage
//! takes the previous stage's success value, so a stage can only run once
//! everything before it has passed; the first `Err` ends the check.

use std::io::Write;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

use crate::client::BackendClient;
use crate::config::{VerifierConfig, FIXED_CONTENT_SUFFIX};
use crate::console::Console;
use crate::error::{Step, VerifyError, VerifyResult};
use crate::types::{contains_node, WorkspaceFile};

/// How the written content is built from the configured prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Payload {
    /// `prefix + "step 1"`, identical on every run.
    #[default]
    Fixed,
    /// `prefix + <current UTC time, RFC 3339>`.
    Timestamped,
}

impl Payload {
    pub fn content(self, prefix: &str) -> String {
        match self {
            Self::Fixed => format!("{prefix}{FIXED_CONTENT_SUFFIX}"),
            Self::Timestamped => format!(
                "{prefix}{}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripPlan {
    pub workspace_id: String,
    pub file_id: String,
    pub content: String,
    /// Also require the file to show up in the workspace listing.
    pub check_listing: bool,
}

impl RoundTripPlan {
    pub fn from_config(config: &VerifierConfig, payload: Payload, check_listing: bool) -> Self {
        Self {
            workspace_id: config.workspace_id.clone(),
            file_id: config.file_id.clone(),
            content: payload.content(&config.content_prefix),
            check_listing,
        }
    }
}

/// What a successful check observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripReport {
    pub save_status: u16,
    pub content: String,
    /// The listing was checked and contained the file.
    pub listed: bool,
}

/// Proof that the write was accepted.
#[derive(Debug)]
struct Saved {
    status: u16,
}

/// The file as read back after a successful save.
#[derive(Debug)]
struct Fetched {
    file: WorkspaceFile,
}

pub async fn verify_round_trip<W: Write>(
    client: &BackendClient,
    plan: &RoundTripPlan,
    console: &mut Console<W>,
) -> VerifyResult<RoundTripReport> {
    console.line(format!(
        "Testing against {}...",
        client.base_url().as_str().trim_end_matches('/')
    ));

    let saved = save(client, plan, console).await?;
    let fetched = read(client, plan, &saved, console).await?;
    let content = compare(plan, fetched, console)?;
    if plan.check_listing {
        list(client, plan, console).await?;
    }

    console.done("All tests passed!");
    info!(
        workspace = %plan.workspace_id,
        file = %plan.file_id,
        status = saved.status,
        "Round trip verified"
    );

    Ok(RoundTripReport {
        save_status: saved.status,
        content,
        listed: plan.check_listing,
    })
}

async fn save<W: Write>(
    client: &BackendClient,
    plan: &RoundTripPlan,
    console: &mut Console<W>,
) -> VerifyResult<Saved> {
    console.step(
        1,
        format!(
            "Saving file '{}' to workspace '{}'...",
            plan.file_id, plan.workspace_id
        ),
    );
    let status = client
        .save_file(&plan.workspace_id, &plan.file_id, &plan.content)
        .await?;
    console.pass("Save successful.");
    Ok(Saved {
        status: status.as_u16(),
    })
}

async fn read<W: Write>(
    client: &BackendClient,
    plan: &RoundTripPlan,
    saved: &Saved,
    console: &mut Console<W>,
) -> VerifyResult<Fetched> {
    console.step(2, format!("Reading file '{}'...", plan.file_id));
    debug!(save_status = saved.status, file = %plan.file_id, "Reading back saved file");
    let file = client.get_file(&plan.workspace_id, &plan.file_id).await?;
    Ok(Fetched { file })
}

fn compare<W: Write>(
    plan: &RoundTripPlan,
    fetched: Fetched,
    console: &mut Console<W>,
) -> VerifyResult<String> {
    let content = fetched
        .file
        .content
        .ok_or_else(|| VerifyError::MalformedBody {
            step: Step::Read,
            detail: "response has no 'content' field".into(),
        })?;
    console.detail(format!("Got content: {content}"));

    if content != plan.content {
        return Err(VerifyError::ContentMismatch {
            expected: plan.content.clone(),
            actual: content,
        });
    }
    console.pass("Content verification passed.");
    Ok(content)
}

async fn list<W: Write>(
    client: &BackendClient,
    plan: &RoundTripPlan,
    console: &mut Console<W>,
) -> VerifyResult<()> {
    console.step(
        3,
        format!("Listing files in workspace '{}'...", plan.workspace_id),
    );
    let nodes = client.list_files(&plan.workspace_id).await?;
    console.detail(format!("Got {} items.", nodes.len()));

    if !contains_node(&nodes, &plan.file_id) {
        return Err(VerifyError::NotListed {
            file_id: plan.file_id.clone(),
            listing: serde_json::to_string_pretty(&nodes).unwrap_or_default(),
        });
    }
    console.pass(format!("File '{}' found in listing.", plan.file_id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_payload() {
        assert_eq!(
            Payload::Fixed.content("Verified via script at "),
            "Verified via script at step 1"
        );
    }

    #[test]
    fn test_timestamped_payload() {
        let content = Payload::Timestamped.content("p:");
        let stamp = content.strip_prefix("p:").unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
        assert!(stamp.ends_with('Z'));
    }

    #[test]
    fn test_plan_from_config() {
        let config = VerifierConfig::for_base_url("http://localhost:4000");
        let plan = RoundTripPlan::from_config(&config, Payload::Fixed, false);
        assert_eq!(plan.workspace_id, "script-test-workspace");
        assert_eq!(plan.file_id, "test-file.txt");
        assert_eq!(plan.content, "Verified via script at step 1");
        assert!(!plan.check_listing);
    }
}
