//! Outbound HTTP

mod client;

pub use client::{HttpClient, HttpClientTrait, Query};

#[cfg(test)]
pub use client::mock;
