//! Record sources - where a page's collection comes from.
//!
//! Filtering and summaries only ever see a `Vec<T>`; the source decides
//! whether that is fixture data, the HTTP backend or the local database.

pub mod db;
pub mod http;

use crate::errors::Result;
use async_trait::async_trait;

pub use db::DbSource;
pub use http::{HttpSource, Resource};

/// Fetches the full collection of one record type.
#[async_trait]
pub trait RecordSource<T>: Send + Sync {
    /// Returns every record, in the source's natural order.
    async fn fetch_all(&self) -> Result<Vec<T>>;
}

/// In-memory source over a fixed collection.
#[derive(Debug, Clone)]
pub struct StaticSource<T> {
    records: Vec<T>,
}

impl<T> Default for StaticSource<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> StaticSource<T> {
    /// Wraps `records`.
    #[must_use]
    pub const fn new(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T> From<Vec<T>> for StaticSource<T> {
    fn from(records: Vec<T>) -> Self {
        Self::new(records)
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> RecordSource<T> for StaticSource<T> {
    async fn fetch_all(&self) -> Result<Vec<T>> {
        Ok(self.records.clone())
    }
}
