//! HTTP adapters speaking the adapter REST API.

mod client;
mod handshake;
pub mod paths;

pub use client::{HttpAdapterClient, HttpAdapterClientFactory};
pub use handshake::HttpHandshakeClient;
