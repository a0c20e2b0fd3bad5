use crate::errors::AppError;
use crate::models::{
    ApiResponse, DashboardSnapshot, NewTaskForm, Task, TaskId, ToggleDailyRequest,
};
use crate::rollover::{apply_penalties_at, refresh_daily_tasks_at};
use crate::service::{complete_task_at, create_task_at, dashboard_at, delete_task, set_daily};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let data = state.data.lock().await;
    Json(dashboard_at(today(), &data))
}

pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let data = state.data.lock().await;
    Json(data.tasks.values().cloned().collect())
}

pub async fn create_task(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse>, AppError> {
    let mut fields = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|err| AppError::bad_request(err.to_string()))?;
        fields.push((name, value));
    }
    let form = NewTaskForm::from_fields(fields).map_err(AppError::bad_request)?;

    let task_id = state
        .update(|data| create_task_at(today(), data, form))
        .await?;

    info!(task_id, "task created");
    Ok(Json(ApiResponse {
        task_id: Some(task_id),
        ..ApiResponse::ok()
    }))
}

pub async fn remove_task(
    State(state): State<AppState>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<ApiResponse>, AppError> {
    state.update(|data| delete_task(data, task_id)).await?;

    info!(task_id, "task removed");
    Ok(Json(ApiResponse::ok()))
}

pub async fn complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<ApiResponse>, AppError> {
    let exp_gained = state
        .update(|data| complete_task_at(today(), data, task_id))
        .await?;

    info!(task_id, exp_gained, "task completed");
    Ok(Json(ApiResponse {
        exp_gained: Some(exp_gained),
        ..ApiResponse::ok()
    }))
}

pub async fn toggle_daily(
    State(state): State<AppState>,
    Path(task_id): Path<TaskId>,
    Json(payload): Json<ToggleDailyRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    state
        .update(|data| set_daily(data, task_id, payload.is_daily))
        .await?;

    info!(task_id, is_daily = payload.is_daily, "daily flag updated");
    Ok(Json(ApiResponse::ok()))
}

pub async fn apply_penalties(State(state): State<AppState>) -> Result<Json<ApiResponse>, AppError> {
    let penalty = state
        .update(|data| Ok(apply_penalties_at(today(), data)))
        .await?;

    info!(penalty, "penalties applied");
    Ok(Json(ApiResponse::ok()))
}

pub async fn refresh_daily_tasks(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse>, AppError> {
    let created = state
        .update(|data| Ok(refresh_daily_tasks_at(today(), data)))
        .await?;

    info!(created, "daily tasks refreshed");
    Ok(Json(ApiResponse::ok()))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
