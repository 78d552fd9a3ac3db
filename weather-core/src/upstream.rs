use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::TransportError;

pub mod weatherstack;

pub use weatherstack::WeatherstackClient;

/// One synchronous outbound call to the weather provider.
///
/// Implementations issue exactly one request per invocation: no caching, no
/// batching, no retry. The body is returned as raw text; classifying it is
/// the caller's job.
#[async_trait]
pub trait UpstreamClient: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<String, TransportError>;
}
