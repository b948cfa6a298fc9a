//! Daily mood tracking library
//!
//! This library records mood ratings with optional notes in a local SQLite
//! file, averages them per day and draws the last seven days as a bar chart.

mod aggregate;
mod chart;
mod cli;
mod config;
mod entry;
mod errors;
mod helper;
mod presenter;
mod storage;
mod theme;
mod types;

// Re-export key components
pub use aggregate::*;
pub use chart::*;
pub use cli::*;
pub use config::*;
pub use entry::*;
pub use errors::*;
pub use helper::*;
pub use presenter::*;
pub use storage::*;
pub use theme::*;
pub use types::*;
