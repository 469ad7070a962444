//! Client Module
//!
//! Everything between the cache and the network: the admission gate, the
//! transport seam and the classifying API client.

mod api_client;
mod rate_limiter;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use api_client::{classify, interpret, ApiClient, NETWORK_ERROR_MESSAGE};
pub use rate_limiter::RateLimiter;
pub use transport::{GraphQlRequest, GraphQlResponse, HttpTransport, Transport, TransportError};
