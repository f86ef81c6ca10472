//! Transport adapters implementing the [`HttpClient`] trait.
//!
//! [`HttpClient`]: crate::traits::HttpClient

pub mod mock;
mod reqwest_http;

pub use reqwest_http::ReqwestHttpClient;
