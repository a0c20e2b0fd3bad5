use crate::config::ClientConfig;
use crate::models::{ApiResponse, DashboardSnapshot, NewTaskForm, TaskId, ToggleDailyRequest};
use reqwest::{multipart, Client, Response};
use std::future::Future;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service answered and said no.
    #[error("{0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// The task service as seen by the dashboard.
pub trait TaskApi {
    fn dashboard(&self) -> impl Future<Output = Result<DashboardSnapshot, ApiError>>;

    /// Returns the exp the service credited.
    fn complete_task(&self, task_id: TaskId) -> impl Future<Output = Result<u32, ApiError>>;

    fn delete_task(&self, task_id: TaskId) -> impl Future<Output = Result<(), ApiError>>;

    fn toggle_daily(
        &self,
        task_id: TaskId,
        is_daily: bool,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn create_task(
        &self,
        form: &NewTaskForm,
    ) -> impl Future<Output = Result<Option<TaskId>, ApiError>>;
}

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Reads the `{success, error}` envelope whatever the status code; a body
/// without `success: true` is a rejection.
async fn envelope(response: Response) -> Result<ApiResponse, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let body: ApiResponse =
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Malformed(err.to_string()))?;
    debug!(%status, success = body.success, "task api response");

    if body.success {
        Ok(body)
    } else {
        Err(ApiError::Rejected(body.error.unwrap_or_else(|| {
            format!("request failed with status {status}")
        })))
    }
}

impl TaskApi for HttpTaskApi {
    async fn dashboard(&self) -> Result<DashboardSnapshot, ApiError> {
        let snapshot = self
            .client
            .get(self.url("/api/dashboard"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(snapshot)
    }

    async fn complete_task(&self, task_id: TaskId) -> Result<u32, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/api/tasks/{task_id}/complete")))
            .send()
            .await?;
        let body = envelope(response).await?;
        body.exp_gained
            .ok_or_else(|| ApiError::Malformed("missing exp_gained".to_string()))
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/tasks/{task_id}")))
            .send()
            .await?;
        envelope(response).await.map(|_| ())
    }

    async fn toggle_daily(&self, task_id: TaskId, is_daily: bool) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/api/tasks/{task_id}/toggle-daily")))
            .json(&ToggleDailyRequest { is_daily })
            .send()
            .await?;
        envelope(response).await.map(|_| ())
    }

    async fn create_task(&self, form: &NewTaskForm) -> Result<Option<TaskId>, ApiError> {
        let multipart = form
            .fields()
            .into_iter()
            .fold(multipart::Form::new(), |parts, (name, value)| {
                parts.text(name, value)
            });
        let response = self
            .client
            .post(self.url("/api/tasks"))
            .multipart(multipart)
            .send()
            .await?;
        envelope(response).await.map(|body| body.task_id)
    }
}
