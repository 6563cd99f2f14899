// src/core/mod.rs
//! Backend access: the trait the session talks to and its HTTP implementation

pub mod backend;
pub mod service_client;

pub use backend::AnalyzerBackend;
pub use service_client::ServiceClient;
