//! # Reviewsup Common Library
//!
//! Shared code for the Reviewsup backend including:
//! - Domain models (showcases, reviews, workspaces)
//! - Review ranking strategies
//! - Pagination types
//! - Short identifier generation
//! - Error types

pub mod error;
pub mod ids;
pub mod models;
pub mod pagination;
pub mod ranking;

pub use error::{Error, Result};
pub use models::{Review, Showcase, ShowcaseConfig, SortBy};
