mod app_context;
mod config_warnings;

pub use app_context::{AppContext, resolve_db_path};
pub use config_warnings::warn_unconfigured;
