//! Video platform API client and response schemas

pub mod client;
pub mod data_api;

pub use client::*;
pub use data_api::*;
