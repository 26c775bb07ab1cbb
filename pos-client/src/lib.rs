//! POS Client - polling, transport and view controllers
//!
//! Connects the pure state in `shared` to the POS server: periodic occupancy
//! and liveness polls, order submission, and the controllers that own the
//! state of the table overview and of an open table.

pub mod config;
pub mod error;
pub mod http;
pub mod liveness;
pub mod logger;
pub mod overview;
pub mod poller;
pub mod session;
pub mod source;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use liveness::{LivenessMonitor, LivenessState, ServerStatus};
pub use overview::ServiceOverview;
pub use poller::OccupancyPoller;
pub use session::{Navigator, TableSession};
pub use source::{LivenessSource, OccupancySource};
