mod classifier;
mod model_service;
mod ort_service;
mod preprocess;
mod record;
mod routes;
mod server;
mod storage;
mod store;

pub mod app;
pub mod config;

pub use app::start_app;
