//! Seeds an HRM API with a synthetic workforce and a year of attendance and
//! production history.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod utils;

pub use config::Config;
pub use dispatch::{Delay, Dispatcher, HttpReply, RetryPolicy, Transport};
pub use error::{ErrorKind, SeedError};
pub use pipeline::{Pipeline, PipelineOutcome, SeedReport};
