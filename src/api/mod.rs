/// Image search API module
///
/// This module handles:
/// - Building the shared HTTP client (client.rs)
/// - Querying the Pixabay search endpoint (client.rs)
/// - Decoding search responses (response.rs)

pub mod client;
pub mod response;

pub use client::{build_http_client, PixabayClient};
pub use response::{Hit, SearchResponse};
