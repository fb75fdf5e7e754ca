//! Command implementations for bench-cli

pub mod app;
pub mod exclude;
pub mod init;
pub mod list;
pub mod sync;

pub use app::{run_get_app, run_remove_app};
pub use exclude::{run_exclude_app, run_include_app};
pub use init::run_init;
pub use list::run_list_apps;
pub use sync::run_sync;
