pub mod api;
pub mod app;
pub mod catalogue;
pub mod clock;
pub mod command;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod rollover;
pub mod service;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;
pub mod view;

pub use api::{ApiError, HttpTaskApi, TaskApi};
pub use app::router;
pub use config::{ClientConfig, ServiceConfig};
pub use controller::{CommandError, Confirm, DashboardController, Notifier};
pub use state::AppState;
pub use storage::load_data;
