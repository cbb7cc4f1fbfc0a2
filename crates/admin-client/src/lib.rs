pub mod api;
pub mod bulk;
pub mod client;
pub mod config;
pub mod disputes;
pub mod export;

pub use api::AdminApi;
pub use bulk::BulkAction;
pub use client::{AdminService, SessionListener};
pub use export::ExportFile;
