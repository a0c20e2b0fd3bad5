use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route("/api/tasks/:task_id", delete(handlers::remove_task))
        .route("/api/tasks/:task_id/complete", post(handlers::complete_task))
        .route("/api/tasks/:task_id/toggle-daily", post(handlers::toggle_daily))
        .route("/api/penalties", post(handlers::apply_penalties))
        .route("/api/daily-tasks/refresh", post(handlers::refresh_daily_tasks))
        .with_state(state)
}
