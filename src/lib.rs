#![allow(clippy::uninlined_format_args)]

pub mod app;
pub mod catalog;
pub mod config;
pub mod data;
pub mod download;
pub mod links;
pub mod logging;
pub mod player;
pub mod selector;
pub mod table;
#[cfg(test)]
mod test_server;
pub mod ui;
pub mod viewer;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use app::run;
pub use links::to_download_link;
