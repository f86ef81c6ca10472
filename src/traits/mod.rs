//! Trait abstractions for external collaborators.

mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, StreamResponse};
