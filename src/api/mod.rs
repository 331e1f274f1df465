//! Client side of the records service's HTTP API

pub mod client;
pub mod types;

pub use client::{ApiResponse, RecordsClient};
pub use types::{LoginRequest, Record, UpdatePayload};
