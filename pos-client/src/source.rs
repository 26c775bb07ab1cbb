//! Poll sources
//!
//! The pollers only see these traits, so they can be driven by the HTTP
//! client in production and by in-memory fakes in tests.

use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::table::TableSnapshot;

/// Source of occupied-table snapshots
#[async_trait]
pub trait OccupancySource: Send + Sync {
    async fn fetch_occupancy(&self) -> ClientResult<TableSnapshot>;
}

/// Source of a bar's rendered feed; success doubles as the liveness signal
#[async_trait]
pub trait LivenessSource: Send + Sync {
    async fn fetch_fragment(&self, bar: &str) -> ClientResult<String>;
}

#[async_trait]
impl OccupancySource for HttpClient {
    async fn fetch_occupancy(&self) -> ClientResult<TableSnapshot> {
        self.fetch_occupied_tables().await
    }
}

#[async_trait]
impl LivenessSource for HttpClient {
    async fn fetch_fragment(&self, bar: &str) -> ClientResult<String> {
        self.fetch_bar_fragment(bar).await
    }
}
