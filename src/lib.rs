pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::SiteConfig;
pub use crate::core::server::{build_router, AppState, SiteServer};
pub use crate::core::session::SessionSigner;
pub use utils::error::{Result, SiteError};
