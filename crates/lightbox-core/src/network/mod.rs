//! HTTP plumbing for the Lightbox REST API.
//!
//! This module provides:
//! - A thin reqwest wrapper with timeout and user-agent handling
//! - The `AssetService` port the pipeline is written against
//! - The REST implementation of that port

mod client;
mod rest;

pub use client::HttpClient;
pub use rest::{AssetService, RestService};
