use crate::catalogue::default_predefined_tasks;
use crate::errors::AppError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn load_data(path: &Path) -> AppData {
    let mut data = match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    };

    if data.predefined_tasks.is_empty() {
        data.predefined_tasks = default_predefined_tasks();
        info!("seeded {} predefined tasks", data.predefined_tasks.len());
    }
    let highest = data.tasks.keys().next_back().copied().unwrap_or(0);
    data.next_task_id = data.next_task_id.max(highest + 1);

    data
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
