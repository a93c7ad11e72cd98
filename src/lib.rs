pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{FileStore, MemoryStore, Store};
pub use tracker::{Rollover, Tracker};
