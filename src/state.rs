use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub idle_days: i64,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, idle_days: i64, data: AppData) -> Self {
        Self {
            data_path,
            idle_days,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
