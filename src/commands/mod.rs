//! Command handlers for the simsync CLI

mod info;
mod sync;

pub use info::cmd_info;
pub use sync::cmd_sync;
