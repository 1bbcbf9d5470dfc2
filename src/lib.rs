pub mod app;
pub mod date;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;
pub mod view;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path, resolve_idle_days};
