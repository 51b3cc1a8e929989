pub mod cli;
pub mod config;
pub mod fetcher;
pub mod inflate;
pub mod logging;
pub mod outdir;
pub mod session;
pub mod settle;
