// src/core/service_client.rs
//! HTTP client for the résumé analysis backend

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::config::ClientConfig;
use crate::core::backend::AnalyzerBackend;
use crate::error::ClientError;
use crate::types::{
    AnalysisResult, DeleteResponse, ErrorBody, GeneratedDescription, HealthStatus, HistoryEntry,
    HistoryResponse, JobRolesResponse,
};
use crate::upload::ResumeFile;

const HEALTH_ENDPOINT: &str = "/";
const GENERATE_JD_ENDPOINT: &str = "/generate-jd";
const ANALYZE_ENDPOINT: &str = "/analyze";
const JOB_ROLES_ENDPOINT: &str = "/job-roles";
const HISTORY_ENDPOINT: &str = "/history";

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a client for the configured backend origin
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 1. Job description generation - sends the title as a form field
    pub async fn generate_job_description(
        &self,
        job_title: &str,
    ) -> Result<GeneratedDescription, ClientError> {
        let url = self.url(GENERATE_JD_ENDPOINT);
        info!("Calling job description generator: {}", url);

        let response = self
            .client
            .post(&url)
            .form(&[("job_title", job_title)])
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// 2. Résumé analysis - sends the file and description as multipart
    pub async fn analyze_resume(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<AnalysisResult, ClientError> {
        let url = self.url(ANALYZE_ENDPOINT);

        let file_part = Part::bytes(resume.bytes.clone())
            .file_name(resume.file_name.clone())
            .mime_str(&resume.mime_type)?;

        let form = Form::new()
            .part("file", file_part)
            .text("job_description", job_description.to_string());

        info!(
            "Calling analysis service: {} ({}, {} bytes)",
            url,
            resume.file_name,
            resume.len()
        );

        let response = self.client.post(&url).multipart(form).send().await?;

        Self::parse_json(response).await
    }

    /// Backend liveness and database connectivity
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.url(HEALTH_ENDPOINT);
        debug!("Checking backend health: {}", url);

        let response = self.client.get(&url).send().await?;
        Self::parse_json(response).await
    }

    /// Role templates the generator knows about
    pub async fn job_roles(&self) -> Result<Vec<String>, ClientError> {
        let url = self.url(JOB_ROLES_ENDPOINT);
        debug!("Fetching job roles: {}", url);

        let response = self.client.get(&url).send().await?;
        let roles: JobRolesResponse = Self::parse_json(response).await?;
        Ok(roles.roles)
    }

    /// Most recent stored analyses, newest first
    pub async fn history(&self, limit: u32) -> Result<Vec<HistoryEntry>, ClientError> {
        let url = self.url(HISTORY_ENDPOINT);
        debug!("Fetching analysis history: {} (limit {})", url, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;
        let history: HistoryResponse = Self::parse_json(response).await?;
        Ok(history.data)
    }

    pub async fn delete_analysis(&self, analysis_id: &str) -> Result<DeleteResponse, ClientError> {
        let url = self.history_record_url(analysis_id)?;
        info!("Deleting analysis record: {}", url);

        let response = self.client.delete(url).send().await?;
        Self::parse_json(response).await
    }

    /// `/history/{id}` with the id percent-encoded as a single path segment
    fn history_record_url(&self, analysis_id: &str) -> Result<Url, ClientError> {
        if matches!(analysis_id.trim(), "" | "." | "..") {
            return Err(ClientError::InvalidAnalysisId(analysis_id.to_string()));
        }

        let mut url = Url::parse(&self.url(HISTORY_ENDPOINT))
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .push(analysis_id);
        Ok(url)
    }

    /// Decode a 2xx body, or turn anything else into `ClientError::Server`
    /// carrying the backend's `detail` when it sent one.
    async fn parse_json<R: DeserializeOwned>(response: Response) -> Result<R, ClientError> {
        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                error!("Unexpected response body ({}): {}", e, body);
                ClientError::Parse(e)
            });
        }

        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail_message());

        error!("Backend returned error status {}: {}", status, body);
        Err(ClientError::Server {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl AnalyzerBackend for ServiceClient {
    async fn generate_job_description(&self, job_title: &str) -> Result<String, ClientError> {
        let generated = ServiceClient::generate_job_description(self, job_title).await?;
        Ok(generated.job_description)
    }

    async fn analyze(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<AnalysisResult, ClientError> {
        self.analyze_resume(resume, job_description).await
    }
}
