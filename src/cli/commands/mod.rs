//! CLI command handlers. Each command is in its own file.

mod fetch;
mod inflate;

pub use fetch::run_fetch;
pub use inflate::run_inflate;
