//! Desktop client for a multi-agent quant problem generator.
/// Per-user application folders.
pub mod app_dirs;
/// Persisted settings loaded at startup.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Writing exported quizzes to disk.
pub mod export;
/// Tracing setup with rotating log files.
pub mod logging;
/// Quiz entities exchanged with the backend.
pub mod quiz;
/// Typed client for the generation backend.
pub mod api;
/// Display aggregations over generated problems.
pub mod insights;
/// Request lifecycle state and its reducer.
pub mod store;

pub(crate) mod http_client;
