//! HTTP client used to reach the recipe source API.
//!
//! Production code goes through `ReqwestClient`; tests swap in `MockClient`
//! so the pipeline can run without network access.

mod client;

pub use client::{HttpClient, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder};
