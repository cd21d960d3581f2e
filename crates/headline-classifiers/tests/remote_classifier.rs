//! Remote classifier against a local inference endpoint

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use headline_classifiers::{
    Classifier, ClassifierBackend, ClassifierSettings, RemoteClassifier, SentimentAdapter,
};
use headline_core::{Error, Sentiment};
use serde_json::{json, Value};

async fn spawn_endpoint(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/classify", addr)
}

fn settings(endpoint: String, token: Option<&str>) -> ClassifierSettings {
    ClassifierSettings {
        backend: ClassifierBackend::Remote,
        endpoint,
        api_token: token.map(str::to_string),
        ..Default::default()
    }
}

async fn classify(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer hf_test");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Authorization header is invalid"})),
        );
    }

    let text = body["inputs"].as_str().unwrap_or_default();
    let scores = if text.contains("soar") {
        json!([[
            {"label": "LABEL_2", "score": 0.92},
            {"label": "LABEL_1", "score": 0.06},
            {"label": "LABEL_0", "score": 0.02}
        ]])
    } else {
        json!([
            {"label": "LABEL_1", "score": 0.7},
            {"label": "LABEL_0", "score": 0.3}
        ])
    };
    (StatusCode::OK, Json(scores))
}

#[tokio::test]
async fn test_remote_nested_response() {
    let endpoint = spawn_endpoint(Router::new().route("/classify", post(classify))).await;
    let classifier = RemoteClassifier::new(&settings(endpoint, Some("hf_test"))).unwrap();

    let prediction = classifier.classify("Stocks soar to record").await.unwrap();
    assert_eq!(prediction.label, "LABEL_2");
    assert_eq!(prediction.score, 0.92);
    assert_eq!(prediction.all_scores.len(), 3);
}

#[tokio::test]
async fn test_remote_flat_response_through_adapter() {
    let endpoint = spawn_endpoint(Router::new().route("/classify", post(classify))).await;
    let classifier = RemoteClassifier::new(&settings(endpoint, Some("hf_test"))).unwrap();
    let adapter = SentimentAdapter::new(Box::new(classifier));

    let score = adapter.classify("Council meets Tuesday").await.unwrap();
    assert_eq!(score.label, Sentiment::Neutral);
    assert_eq!(score.confidence, 0.7);
}

#[tokio::test]
async fn test_remote_rejected_token() {
    let endpoint = spawn_endpoint(Router::new().route("/classify", post(classify))).await;
    let classifier = RemoteClassifier::new(&settings(endpoint, None)).unwrap();

    let err = classifier.classify("Stocks soar").await.unwrap_err();
    match err {
        Error::Classifier(msg) => assert!(msg.contains("401"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_remote_malformed_body() {
    let app = Router::new().route(
        "/classify",
        post(|| async { Json(json!({"estimated_time": 20.0})) }),
    );
    let endpoint = spawn_endpoint(app).await;
    let classifier = RemoteClassifier::new(&settings(endpoint, None)).unwrap();

    let err = classifier.classify("anything").await.unwrap_err();
    assert!(matches!(err, Error::Classifier(_)));
}

#[tokio::test]
async fn test_remote_unreachable() {
    let classifier =
        RemoteClassifier::new(&settings("http://127.0.0.1:1/classify".to_string(), None)).unwrap();

    assert!(matches!(
        classifier.classify("anything").await,
        Err(Error::Classifier(_))
    ));
}
