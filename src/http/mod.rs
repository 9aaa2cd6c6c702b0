//! Cluster HTTP API access.
//!
//! - [`client`] - The [`Api`] trait and its `reqwest` implementation
//! - [`json`] - Path navigation into parsed JSON responses

pub mod client;
pub mod json;

pub use client::{Api, ApiResponse, Credentials, HttpApi};
pub use json::{JsonPath, Lookup, Segment};
