// src/session.rs
//! Form state of the analyzer and the two actions that talk to the backend.
//!
//! Each action is split into a `begin_*` step (validate, flip the in-flight
//! flag, clear stale output) and a `finish_*` step (apply the backend's
//! answer), so a front end can render the pending state while the request
//! runs. `generate_job_description` and `analyze` chain the two around the
//! backend call.

use tracing::debug;

use crate::core::AnalyzerBackend;
use crate::error::{ClientError, ValidationError};
use crate::types::AnalysisResult;
use crate::upload::ResumeFile;
use crate::utils::is_blank;

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate job description. Please try again.";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed. Please try again.";

/// What the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub file: Option<ResumeFile>,
    pub job_description: String,
    pub job_title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Generating,
    Analyzing,
}

/// Inputs captured when an analysis starts.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: ResumeFile,
    pub job_description: String,
}

pub struct AnalyzerSession<B> {
    backend: B,
    form: FormState,
    generating: bool,
    analyzing: bool,
    result: Option<AnalysisResult>,
    error: Option<String>,
}

impl<B: AnalyzerBackend> AnalyzerSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            form: FormState::default(),
            generating: false,
            analyzing: false,
            result: None,
            error: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn status(&self) -> RequestStatus {
        if self.analyzing {
            RequestStatus::Analyzing
        } else if self.generating {
            RequestStatus::Generating
        } else {
            RequestStatus::Idle
        }
    }

    /// The generate button is disabled while its own request is pending
    pub fn can_generate(&self) -> bool {
        !self.generating
    }

    pub fn can_analyze(&self) -> bool {
        !self.analyzing
    }

    pub fn set_job_title(&mut self, title: impl Into<String>) {
        self.form.job_title = title.into();
    }

    pub fn set_job_description(&mut self, description: impl Into<String>) {
        self.form.job_description = description.into();
    }

    /// Store the picked file if it was declared as a PDF. Anything else,
    /// including an empty selection, clears the stored file.
    pub fn select_file(&mut self, file: Option<ResumeFile>) {
        match file {
            Some(file) if file.is_pdf() => {
                debug!("Selected resume {} ({} bytes)", file.file_name, file.len());
                self.form.file = Some(file);
                self.error = None;
            }
            other => {
                if let Some(rejected) = other {
                    debug!(
                        "Rejected resume {} with type {}",
                        rejected.file_name, rejected.mime_type
                    );
                }
                self.form.file = None;
                self.fail(ValidationError::InvalidFileType);
            }
        }
    }

    /// Validate the title and mark generation as pending.
    ///
    /// Returns the title to send, or `None` when a generation is already
    /// pending or validation failed, and no request should be made.
    pub fn begin_generation(&mut self) -> Option<String> {
        if self.generating {
            debug!("Generation already pending");
            return None;
        }
        if is_blank(&self.form.job_title) {
            self.fail(ValidationError::MissingJobTitle);
            return None;
        }

        self.generating = true;
        self.error = None;
        Some(self.form.job_title.clone())
    }

    pub fn finish_generation(&mut self, outcome: Result<String, ClientError>) {
        self.generating = false;
        match outcome {
            Ok(description) => {
                self.form.job_description = description;
                self.error = None;
            }
            Err(e) => {
                debug!("Job description generation failed: {}", e);
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Validate inputs, clear the previous result and error, and mark the
    /// analysis as pending. Returns `None` while an analysis is pending.
    pub fn begin_analysis(&mut self) -> Option<AnalysisRequest> {
        if self.analyzing {
            debug!("Analysis already pending");
            return None;
        }
        let Some(resume) = self.form.file.clone() else {
            self.fail(ValidationError::MissingResume);
            return None;
        };
        if is_blank(&self.form.job_description) {
            self.fail(ValidationError::MissingJobDescription);
            return None;
        }

        self.analyzing = true;
        self.error = None;
        self.result = None;
        Some(AnalysisRequest {
            resume,
            job_description: self.form.job_description.clone(),
        })
    }

    pub fn finish_analysis(&mut self, outcome: Result<AnalysisResult, ClientError>) {
        self.analyzing = false;
        match outcome {
            Ok(result) => {
                debug!("Analysis finished with score {}", result.match_score);
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                debug!("Analysis failed: {}", e);
                self.result = None;
                self.error = Some(
                    e.server_detail()
                        .unwrap_or(ANALYSIS_FAILED_MESSAGE)
                        .to_string(),
                );
            }
        }
    }

    /// Generate a job description from the current title
    pub async fn generate_job_description(&mut self) {
        let Some(title) = self.begin_generation() else {
            return;
        };
        let outcome = self.backend.generate_job_description(&title).await;
        self.finish_generation(outcome);
    }

    /// Analyze the selected résumé against the current job description
    pub async fn analyze(&mut self) {
        let Some(request) = self.begin_analysis() else {
            return;
        };
        let outcome = self
            .backend
            .analyze(&request.resume, &request.job_description)
            .await;
        self.finish_analysis(outcome);
    }

    fn fail(&mut self, error: ValidationError) {
        debug!("Validation failed: {}", error);
        self.error = Some(error.to_string());
    }
}
