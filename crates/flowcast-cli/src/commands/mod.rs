//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config, input loading, anchor dates)
//! - `analyze` - Full dashboard output
//! - `report` - Single-view reports (months, categories, subscriptions, forecast, insights)
//! - `demo` - Synthetic transaction generation
//! - `config` - Effective configuration display

pub mod analyze;
pub mod config;
pub mod core;
pub mod demo;
pub mod report;

// Re-export command functions for main.rs
pub use analyze::*;
pub use config::*;
pub use core::*;
pub use demo::*;
pub use report::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
