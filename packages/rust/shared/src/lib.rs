//! Shared types, error model, and configuration for CareerGuide.
//!
//! This crate is the foundation depended on by all other CareerGuide crates.
//! It provides:
//! - [`CareerGuideError`] — the unified error type
//! - Domain types ([`CareerSummary`], [`DetailSection`], [`AggregatedContext`])
//! - Configuration ([`AppConfig`], [`FilterConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, FilterConfig, GeminiSettings, config_dir, config_file_path,
    init_config, load_config, load_config_from, resolve_api_key,
};
pub use error::{CareerGuideError, Result};
pub use types::{AggregatedContext, CareerBlock, CareerFailure, CareerSummary, DetailSection};
