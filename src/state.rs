use crate::errors::AppError;
use crate::models::AppData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Applies `op` to a copy of the data and persists the copy. The shared
    /// data only changes once the write succeeded.
    pub async fn update<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut AppData) -> Result<T, AppError>,
    {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let value = op(&mut next)?;
        persist_data(&self.data_path, &next).await?;
        *data = next;
        Ok(value)
    }
}
