// src/core/backend.rs
//! Seam between the session state and whatever answers its two requests

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::AnalysisResult;
use crate::upload::ResumeFile;

#[async_trait]
pub trait AnalyzerBackend: Send + Sync {
    /// Ask the backend to write a job description for a title
    async fn generate_job_description(&self, job_title: &str) -> Result<String, ClientError>;

    /// Score a résumé against a job description
    async fn analyze(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<AnalysisResult, ClientError>;
}
