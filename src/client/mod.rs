//! Client facade, its configuration and the transport it sends requests through.

pub(crate) mod config;
pub(crate) mod structure;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_API_URL};
pub use structure::{SmsActivateClient, SmsActivateClientBuilder};
pub use transport::{HttpTransport, Transport, TransportError};
