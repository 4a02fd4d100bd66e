//! A Bilibili bangumi descriptor exporter and danmaku script generator library

// Re-export key types for convenience
pub use crate::error::{DanmugetError, Result};

pub mod api;
pub mod cache;
pub mod config;
pub mod danmu;
pub mod descriptor;
pub mod error;
pub mod models;
pub mod process;
pub mod script;
pub mod xml;

// Re-export commonly used types
pub use models::{Anime, Episode};
