//! Client for a résumé / job-description matching service.
//!
//! [`session::AnalyzerSession`] holds the form state and drives the two
//! backend calls; [`core::ServiceClient`] speaks HTTP to the backend;
//! [`presentation`] turns results into terminal output.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod presentation;
pub mod session;
pub mod types;
pub mod upload;
pub mod utils;

pub use config::ClientConfig;
pub use core::{AnalyzerBackend, ServiceClient};
pub use error::{ClientError, ValidationError};
pub use session::{AnalyzerSession, FormState, RequestStatus};
pub use types::AnalysisResult;
pub use upload::ResumeFile;
