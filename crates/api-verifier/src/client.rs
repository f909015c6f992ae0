//! Thin HTTP client over the backend's workspace file and run endpoints.
//!
//! Each method performs exactly one request and classifies the outcome:
//! transport failures become [`VerifyError::Connection`], rejected statuses
//! become [`VerifyError::UnexpectedStatus`] with the response body attached.

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Step, VerifyError, VerifyResult};
use crate::types::{CreateRunRequest, FileNode, RunInfo, SaveFileRequest, WorkspaceFile};

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    /// Build a client with reqwest's default settings (no request timeout).
    pub fn new(base_url: &str) -> VerifyResult<Self> {
        let base = Url::parse(base_url).map_err(|e| VerifyError::InvalidBaseUrl {
            url: base_url.to_string(),
            detail: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(VerifyError::InvalidBaseUrl {
                url: base_url.to_string(),
                detail: "URL cannot carry a path".into(),
            });
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(VerifyError::Client)?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// A file id containing `/` stays a single segment (`src%2Fmain.rs`).
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn file_url(&self, workspace_id: &str, file_id: &str) -> Url {
        self.endpoint(&["workspaces", workspace_id, "files", file_id])
    }

    /// `POST /workspaces/{ws}/files/{file}`; accepts 200 or 201.
    pub async fn save_file(
        &self,
        workspace_id: &str,
        file_id: &str,
        content: &str,
    ) -> VerifyResult<StatusCode> {
        let url = self.file_url(workspace_id, file_id);
        debug!(%url, bytes = content.len(), "Saving file");
        let response = self
            .http
            .post(url)
            .json(&SaveFileRequest { content })
            .send()
            .await
            .map_err(|source| VerifyError::Connection {
                step: Step::Save,
                source,
            })?;
        let response = accept(Step::Save, response, |s| {
            s == StatusCode::OK || s == StatusCode::CREATED
        })
        .await?;
        Ok(response.status())
    }

    /// `GET /workspaces/{ws}/files/{file}`; accepts 200 only.
    pub async fn get_file(&self, workspace_id: &str, file_id: &str) -> VerifyResult<WorkspaceFile> {
        let url = self.file_url(workspace_id, file_id);
        debug!(%url, "Reading file");
        let response = self.send_get(Step::Read, url).await?;
        let response = accept(Step::Read, response, |s| s == StatusCode::OK).await?;
        decode(Step::Read, response).await
    }

    /// `GET /workspaces/{ws}/files`; the full file tree.
    pub async fn list_files(&self, workspace_id: &str) -> VerifyResult<Vec<FileNode>> {
        let url = self.endpoint(&["workspaces", workspace_id, "files"]);
        debug!(%url, "Listing files");
        let response = self.send_get(Step::List, url).await?;
        let response = accept(Step::List, response, |s| s.is_success()).await?;
        decode(Step::List, response).await
    }

    /// `POST /run` for the given file.
    pub async fn create_run(&self, workspace_id: &str, file_id: &str) -> VerifyResult<RunInfo> {
        let url = self.endpoint(&["run"]);
        debug!(%url, workspace_id, file_id, "Creating run");
        let response = self
            .http
            .post(url)
            .json(&CreateRunRequest {
                workspace_id,
                file_id,
            })
            .send()
            .await
            .map_err(|source| VerifyError::Connection {
                step: Step::CreateRun,
                source,
            })?;
        let response = accept(Step::CreateRun, response, |s| s.is_success()).await?;
        decode(Step::CreateRun, response).await
    }

    /// `GET /run/{id}/status`.
    pub async fn run_status(&self, run_id: &str) -> VerifyResult<RunInfo> {
        let url = self.endpoint(&["run", run_id, "status"]);
        let response = self.send_get(Step::RunStatus, url).await?;
        let response = accept(Step::RunStatus, response, |s| s.is_success()).await?;
        decode(Step::RunStatus, response).await
    }

    /// `POST /run/{id}/cancel`.
    pub async fn cancel_run(&self, run_id: &str) -> VerifyResult<RunInfo> {
        self.run_action(Step::Cancel, run_id, "cancel").await
    }

    /// `POST /run/{id}/timeout`.
    pub async fn timeout_run(&self, run_id: &str) -> VerifyResult<RunInfo> {
        self.run_action(Step::Timeout, run_id, "timeout").await
    }

    async fn run_action(&self, step: Step, run_id: &str, action: &str) -> VerifyResult<RunInfo> {
        let url = self.endpoint(&["run", run_id, action]);
        debug!(%url, "Run action");
        let response = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|source| VerifyError::Connection { step, source })?;
        let response = accept(step, response, |s| s.is_success()).await?;
        decode(step, response).await
    }

    async fn send_get(&self, step: Step, url: Url) -> VerifyResult<Response> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|source| VerifyError::Connection { step, source })
    }
}

/// Pass the response through if its status is acceptable, otherwise turn it
/// into an `UnexpectedStatus` carrying the body text.
async fn accept(
    step: Step,
    response: Response,
    ok: impl Fn(StatusCode) -> bool,
) -> VerifyResult<Response> {
    let status = response.status();
    if ok(status) {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(VerifyError::UnexpectedStatus {
        step,
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(step: Step, response: Response) -> VerifyResult<T> {
    let text = response
        .text()
        .await
        .map_err(|source| VerifyError::Connection { step, source })?;
    serde_json::from_str(&text).map_err(|e| VerifyError::MalformedBody {
        step,
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url_encodes_segments() {
        let client = BackendClient::new("http://localhost:4000").unwrap();
        assert_eq!(
            client.file_url("ws", "test-file.txt").as_str(),
            "http://localhost:4000/workspaces/ws/files/test-file.txt"
        );
        assert_eq!(
            client.file_url("ws", "src/main.rs").as_str(),
            "http://localhost:4000/workspaces/ws/files/src%2Fmain.rs"
        );
        assert_eq!(
            client.file_url("my ws", "a b.txt").as_str(),
            "http://localhost:4000/workspaces/my%20ws/files/a%20b.txt"
        );
    }

    #[test]
    fn test_base_with_path_prefix() {
        let client = BackendClient::new("http://localhost:4000/api/").unwrap();
        assert_eq!(
            client.endpoint(&["run", "r1", "status"]).as_str(),
            "http://localhost:4000/api/run/r1/status"
        );
    }

    #[test]
    fn test_rejects_invalid_base() {
        assert!(matches!(
            BackendClient::new("not a url"),
            Err(VerifyError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            BackendClient::new("mailto:someone@example.com"),
            Err(VerifyError::InvalidBaseUrl { .. })
        ));
    }
}
