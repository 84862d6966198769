// gearloan-api: Async Rust client for the equipment record store

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::StoreClient;
pub use error::Error;
pub use models::{Ack, Action, RawItem};
pub use transport::{TlsMode, TransportConfig};
