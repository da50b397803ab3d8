//! Application layer logic for taskdeck.
//!
//! This crate provides the repository contract and its implementations, the
//! task and user services, spreadsheet export and configuration shared by the
//! HTTP server, the CLI and the tool bridge.

pub mod backend;
pub mod config;
pub mod export;
pub mod memory;
pub mod repository;
pub mod service;
mod sqlite;
pub mod user_service;

// Re-exports for convenience
pub use backend::{Backend, Backends};
pub use config::{AppConfig, BackendKind, ServerConfig, StorageConfig};
pub use export::{ExportError, ExportFile, ExportFormat, HEADERS, export_tasks};
pub use memory::InMemoryRepository;
pub use repository::{Entity, Repository};
pub use service::{ServiceError, TaskService};
pub use user_service::UserService;
