mod common;

use common::spawn_backend;
use resume_analyzer::presentation::render_session;
use resume_analyzer::{AnalyzerSession, RequestStatus, ResumeFile};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn generate_then_analyze() {
    let backend = spawn_backend().await;
    let mut session = AnalyzerSession::new(backend.client());

    session.set_job_title("Data Scientist");
    session.generate_job_description().await;
    assert_eq!(session.error(), None);
    assert!(session
        .form()
        .job_description
        .starts_with("Job Title: Data Scientist"));

    session.select_file(Some(ResumeFile::new(
        "resume.pdf",
        "application/pdf",
        b"%PDF-1.4".to_vec(),
    )));
    session.analyze().await;

    assert_eq!(session.status(), RequestStatus::Idle);
    assert_eq!(session.error(), None);
    let result = session.result().unwrap();
    assert_eq!(result.match_score, 85.0);

    let view = render_session(&session);
    assert!(view.contains("85%"));
    assert_eq!(view.matches("✓ ").count(), 2);
    assert_eq!(view.matches("✗ ").count(), 1);

    // The generated description is what went out with the file.
    let uploads = backend.recorder.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].job_description, session.form().job_description);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn analyze_without_file_never_reaches_backend() {
    let backend = spawn_backend().await;
    let mut session = AnalyzerSession::new(backend.client());

    session.set_job_description("Python developer");
    session.analyze().await;

    assert_eq!(session.error(), Some("Please upload your resume"));
    assert!(session.result().is_none());
    assert_eq!(backend.recorder.request_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_generation_shows_generic_message() {
    let backend = spawn_backend().await;
    let mut session = AnalyzerSession::new(backend.client());

    session.set_job_title("Unavailable");
    session.set_job_description("typed by hand");
    session.generate_job_description().await;

    assert_eq!(
        session.error(),
        Some("Failed to generate job description. Please try again.")
    );
    assert_eq!(session.form().job_description, "typed by hand");
    assert_eq!(backend.recorder.titles(), vec!["Unavailable".to_string()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_analysis_falls_back_then_recovers() {
    let backend = spawn_backend().await;
    let mut session = AnalyzerSession::new(backend.client());

    session.select_file(Some(ResumeFile::new(
        "resume.pdf",
        "application/pdf",
        b"%PDF-1.4".to_vec(),
    )));
    session.set_job_description("crash");
    session.analyze().await;
    assert_eq!(session.error(), Some("Analysis failed. Please try again."));
    assert!(session.result().is_none());

    session.set_job_description("Python and SQL");
    session.analyze().await;
    assert_eq!(session.error(), None);
    assert!(session.result().is_some());
}
