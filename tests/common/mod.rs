#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use phishguard::config::{Contract, Endpoints, ServiceConfig};

/// One multipart part received by the mock image endpoint.
#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

#[derive(Default)]
pub struct Recorded {
    pub urls: Mutex<Vec<String>>,
    pub parts: Mutex<Vec<ReceivedPart>>,
}

impl Recorded {
    pub fn url_calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    pub fn parts(&self) -> Vec<ReceivedPart> {
        self.parts.lock().unwrap().clone()
    }
}

pub struct MockService {
    pub base_url: String,
    pub recorded: Arc<Recorded>,
}

impl MockService {
    pub fn endpoints(&self, contract: Contract) -> Endpoints {
        ServiceConfig {
            base_url: Some(self.base_url.clone()),
            contract: Some(contract),
            timeout_secs: Some(1),
            ..Default::default()
        }
        .resolve()
    }
}

async fn predict_url(State(recorded): State<Arc<Recorded>>, Json(body): Json<Value>) -> Response {
    let url = body["url"].as_str().unwrap_or_default().to_string();
    recorded.urls.lock().unwrap().push(url.clone());

    match url.as_str() {
        "" => (StatusCode::BAD_REQUEST, Json(json!({"error": "No URL provided"}))).into_response(),
        "bad" => Json(json!({"error": "Invalid URL format"})).into_response(),
        "http://crash.example" => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response(),
        "http://garbage.example" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "http://slow.example" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"verdict": "Safe", "risk_score": 0})).into_response()
        }
        "http://hostile.example" => Json(json!({
            "is_phishing": true,
            "verdict": "Likely Phishing",
            "risk_score": 73,
            "url": "http://hostile.example/<script>alert(1)</script>",
            "details": ["Symbol '@' detected & <b>bold</b>"]
        }))
        .into_response(),
        "http://secure-login-bank.com" => Json(json!({
            "is_phishing": true,
            "verdict": "Likely Phishing",
            "risk_score": 91.0,
            "url": url,
            "details": ["Hypens detected in domain.", "High similarity to known phishing patterns."]
        }))
        .into_response(),
        _ => Json(json!({
            "is_phishing": false,
            "verdict": "Safe",
            "risk_score": 5,
            "url": url,
            "details": ["No blacklist match"]
        }))
        .into_response(),
    }
}

async fn analyze_qr(State(recorded): State<Arc<Recorded>>, mut multipart: Multipart) -> Response {
    let mut file_name = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let part = ReceivedPart {
            name: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            len: 0,
        };
        let bytes = field.bytes().await.unwrap();
        if part.name == "file" {
            file_name = part.file_name.clone();
        }
        recorded.parts.lock().unwrap().push(ReceivedPart { len: bytes.len(), ..part });
    }

    match file_name.as_deref() {
        None => (StatusCode::BAD_REQUEST, Json(json!({"error": "No file part"}))).into_response(),
        Some("empty.png") => Json(json!({"results": []})).into_response(),
        Some("blurry.png") => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No QR code detected. Try cropping the QR code closer or improving lighting."})),
        )
            .into_response(),
        Some(_) => Json(json!({
            "results": [
                {
                    "content": "http://paypal-security-update.com",
                    "analysis": {
                        "url": "http://paypal-security-update.com",
                        "is_phishing": true,
                        "verdict": "Likely Phishing",
                        "risk_score": 88.5,
                        "details": ["Hypens detected in domain."]
                    }
                },
                {
                    "content": "http://google.com",
                    "analysis": {"url": "http://google.com", "is_phishing": false, "verdict": "Safe", "risk_score": 2, "details": []}
                }
            ]
        }))
        .into_response(),
    }
}

async fn api_predict(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "result": "Phishing",
        "confidence": 88,
        "url": body["url"]
    }))
}

async fn api_scan_qr(mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let _ = field.bytes().await.unwrap();
    }
    Json(json!({
        "content": "https://wikipedia.org",
        "result": "Legitimate",
        "confidence": 12
    }))
}

/// Start the mock analysis service on an ephemeral port.
pub async fn spawn_mock() -> MockService {
    let recorded = Arc::new(Recorded::default());
    let app = Router::new()
        .route("/predict-url", post(predict_url))
        .route("/analyze-qr", post(analyze_qr))
        .route("/api/predict", post(api_predict))
        .route("/api/scan_qr", post(api_scan_qr))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockService {
        base_url: format!("http://{}", addr),
        recorded,
    }
}

/// Base URL of a port nothing listens on.
pub async fn refused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn png(name: &str) -> phishguard::models::ImageUpload {
    phishguard::models::ImageUpload::new(name, "image/png", vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a])
}
