//! HTTP Issue API
//!
//! `reqwest` implementation of [`IssueApi`]. In the browser every request is
//! sent with credentials so the session cookie travels along.

use async_trait::async_trait;
use log::debug;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use super::traits::{ApiError, ApiResult, IssueApi, IssueDraft};
use super::wire::{CreateIssueBody, IssueRecord, UpdateIssueBody, UserRecord, DEFAULT_PRIORITY};
use crate::config::SessionUser;
use crate::domain::{ReorderEntry, Status, WorkItem};

#[derive(Debug, Clone)]
pub struct HttpIssueApi {
    client: Client,
    api_base: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpIssueApi {
    pub fn new(api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.api_base, path)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = with_credentials(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|body| body.message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request
}

#[async_trait(?Send)]
impl IssueApi for HttpIssueApi {
    async fn list_issues(&self, project_id: u32) -> ApiResult<Vec<WorkItem>> {
        let url = self.url(&format!("/issues/project/{}", project_id));
        debug!("[API] GET {}", url);
        let records: Vec<IssueRecord> = self
            .send(self.client.get(url))
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| record.into_item(index))
            .collect())
    }

    async fn update_status(&self, id: u32, status: Status) -> ApiResult<()> {
        let encoded = utf8_percent_encode(status.as_str(), NON_ALPHANUMERIC);
        let url = self.url(&format!("/issues/{}/status/{}", id, encoded));
        debug!("[API] PUT {}", url);
        self.send(self.client.put(url)).await?;
        Ok(())
    }

    async fn reorder(&self, entries: &[ReorderEntry]) -> ApiResult<()> {
        let url = self.url("/issues/reorder");
        debug!("[API] PUT {} ({} entries)", url, entries.len());
        self.send(self.client.put(url).json(entries)).await?;
        Ok(())
    }

    async fn create_issue(&self, project_id: u32, draft: &IssueDraft) -> ApiResult<()> {
        let body = CreateIssueBody {
            title: &draft.title,
            description: &draft.description,
            status: draft.status,
            priority: DEFAULT_PRIORITY,
            project_id,
        };
        self.send(self.client.post(self.url("/issues")).json(&body)).await?;
        Ok(())
    }

    async fn update_issue(&self, id: u32, draft: &IssueDraft) -> ApiResult<()> {
        let body = UpdateIssueBody {
            title: &draft.title,
            description: &draft.description,
            status: draft.status,
            priority: DEFAULT_PRIORITY,
        };
        self.send(self.client.put(self.url(&format!("/issues/{}", id))).json(&body))
            .await?;
        Ok(())
    }

    async fn delete_issue(&self, id: u32) -> ApiResult<()> {
        self.send(self.client.delete(self.url(&format!("/issues/{}", id))))
            .await?;
        Ok(())
    }

    async fn current_user(&self) -> ApiResult<SessionUser> {
        let record: UserRecord = self
            .send(self.client.get(self.url("/auth/user")))
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(record.into())
    }
}
