//! Pagination types for list endpoints

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default page size when a list request omits it
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page request as supplied by the caller (1-indexed)
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    /// Both page and pageSize must be positive integers.
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(Error::InvalidInput(format!(
                "page must be a positive integer, got {}",
                self.page
            )));
        }
        if self.page_size < 1 {
            return Err(Error::InvalidInput(format!(
                "pageSize must be a positive integer, got {}",
                self.page_size
            )));
        }
        Ok(())
    }

    /// Zero-based row offset for SQL LIMIT/OFFSET queries
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Metadata accompanying a page of results
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

/// One page of items plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            meta: PageMeta {
                page: request.page,
                page_size: request.page_size,
                total,
            },
        }
    }
}
