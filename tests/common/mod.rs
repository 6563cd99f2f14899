//! Stub analysis backend served by rocket on a loopback port.
#![allow(dead_code)]

use rocket::fairing::AdHoc;
use rocket::form::{Form, FromForm};
use rocket::fs::TempFile;
use rocket::http::{ContentType, Status};
use rocket::serde::json::{json, Json, Value};
use rocket::{delete, get, post, routes, State};
use std::sync::{Arc, Mutex};

use resume_analyzer::{ClientConfig, ServiceClient};

type StubError = (Status, (ContentType, String));

#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: u64,
    pub job_description: String,
}

/// What the stub saw on the wire
#[derive(Default)]
pub struct Recorder {
    pub titles: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<ReceivedUpload>>,
    pub deleted: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<ReceivedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.titles.lock().unwrap().len() + self.uploads.lock().unwrap().len()
    }
}

#[derive(FromForm)]
struct GenerateForm {
    job_title: String,
}

#[derive(FromForm)]
struct AnalyzeForm<'r> {
    file: TempFile<'r>,
    job_description: String,
}

fn json_error(status: Status, detail: Value) -> StubError {
    (status, (ContentType::JSON, json!({ "detail": detail }).to_string()))
}

#[get("/")]
fn health() -> Json<Value> {
    Json(json!({
        "status": "online",
        "message": "AI Resume Analyzer API is running",
        "version": "1.0.0",
        "database": "not connected"
    }))
}

#[get("/job-roles")]
fn job_roles() -> Json<Value> {
    Json(json!({
        "success": true,
        "count": 3,
        "roles": ["data scientist", "devops engineer", "full stack developer"]
    }))
}

#[post("/generate-jd", data = "<form>")]
fn generate_jd(form: Form<GenerateForm>, recorder: &State<Arc<Recorder>>) -> Result<Json<Value>, StubError> {
    let title = form.into_inner().job_title;
    recorder.titles.lock().unwrap().push(title.clone());

    if title == "Unavailable" {
        return Err(json_error(
            Status::InternalServerError,
            json!("template store offline"),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "job_title": title,
        "job_description": format!("Job Title: {}\n\nRequired Skills:\n- Python\n- SQL\n- Spark", title)
    })))
}

#[post("/analyze", data = "<form>")]
fn analyze(form: Form<AnalyzeForm<'_>>, recorder: &State<Arc<Recorder>>) -> Result<Json<Value>, StubError> {
    let upload = ReceivedUpload {
        file_name: form
            .file
            .raw_name()
            .map(|n| n.dangerous_unsafe_unsanitized_raw().as_str().to_string()),
        content_type: form.file.content_type().map(|ct| ct.to_string()),
        len: form.file.len(),
        job_description: form.job_description.clone(),
    };
    recorder.uploads.lock().unwrap().push(upload.clone());

    if upload.content_type.as_deref() != Some("application/pdf") {
        return Err(json_error(
            Status::BadRequest,
            json!("Only PDF files are supported"),
        ));
    }

    match upload.job_description.as_str() {
        "crash" => Err((
            Status::InternalServerError,
            (ContentType::Plain, "Internal Server Error".to_string()),
        )),
        "invalid" => Err(json_error(
            Status::UnprocessableEntity,
            json!([{ "loc": ["body", "job_description"], "msg": "field required" }]),
        )),
        _ => Ok(Json(json!({
            "success": true,
            "match_score": 85,
            "summary": "Strong match",
            "matched_keywords": ["Python", "SQL"],
            "missing_keywords": ["Spark"],
            "analysis_id": null
        }))),
    }
}

#[get("/history?<limit>")]
fn history(limit: Option<usize>) -> Json<Value> {
    let limit = limit.unwrap_or(10);
    let data: Vec<Value> = (0..limit.min(3))
        .map(|i| {
            json!({
                "_id": format!("65a1f0c2e4b0a1b2c3d4e5f{}", i),
                "match_score": 50.5 + i as f64,
                "summary": "Moderate match",
                "matched_keywords": ["python"],
                "missing_keywords": ["spark"],
                "resume_filename": "resume.pdf",
                "job_description": "We are looking for...",
                "timestamp": format!("2024-12-2{}T10:30:00.123456", i + 1)
            })
        })
        .collect();

    Json(json!({ "success": true, "count": data.len(), "data": data }))
}

#[delete("/history/<analysis_id>")]
fn delete_analysis(analysis_id: &str, recorder: &State<Arc<Recorder>>) -> Result<Json<Value>, StubError> {
    if analysis_id == "missing" {
        return Err(json_error(Status::NotFound, json!("Analysis not found")));
    }
    recorder.deleted.lock().unwrap().push(analysis_id.to_string());
    Ok(Json(json!({ "success": true, "message": "Analysis deleted successfully" })))
}

pub struct StubBackend {
    pub base_url: String,
    pub recorder: Arc<Recorder>,
}

impl StubBackend {
    pub fn client(&self) -> ServiceClient {
        ServiceClient::new(&ClientConfig::new(&self.base_url)).unwrap()
    }
}

/// Launch the stub and wait until it accepts connections
pub async fn spawn_backend() -> StubBackend {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let recorder = Arc::new(Recorder::default());
    let figment = rocket::Config::figment()
        .merge(("address", "127.0.0.1"))
        .merge(("port", port))
        .merge(("log_level", "off"));

    let (ready_tx, ready_rx) = rocket::tokio::sync::oneshot::channel::<()>();
    let rocket = rocket::custom(figment)
        .manage(recorder.clone())
        .mount(
            "/",
            routes![health, job_roles, generate_jd, analyze, history, delete_analysis],
        )
        .attach(AdHoc::on_liftoff("Stub ready", move |_| {
            Box::pin(async move {
                let _ = ready_tx.send(());
            })
        }));

    rocket::tokio::spawn(async move {
        let _ = rocket.launch().await;
    });
    ready_rx.await.expect("stub backend failed to start");

    StubBackend {
        base_url: format!("http://127.0.0.1:{}/", port),
        recorder,
    }
}
