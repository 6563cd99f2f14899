// src/types/mod.rs
pub mod response;

pub use response::{
    AnalysisResult, DeleteResponse, ErrorBody, GeneratedDescription, HealthStatus, HistoryEntry,
    HistoryResponse, JobRolesResponse,
};
